use std::ffi::{CString, c_void};

use anyhow::{Context, Result};
use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{NotCurrentGlContext, PossiblyCurrentContext, PossiblyCurrentGlContext};
use glutin::display::{Display, DisplayApiPreference, GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, WindowSurface};
use glutin_winit::GlWindow;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawWindowHandle};
use winit::dpi::PhysicalSize;
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowAttributes};

use super::{ContextInit, FormatCandidate, PixelFormatPolicy};

/// The process's loader context.
///
/// Owns a hidden window, its surface and a core-profile context. Every window
/// context is created sharing objects with this one, and it is the context
/// left current whenever no window scope is active.
pub struct BaseContext {
    /// Dropped first so the context never outlives its surface.
    context: PossiblyCurrentContext,

    surface: Surface<WindowSurface>,

    /// Keeps the hidden window (and its device context) alive.
    _window: Window,

    /// Format selected at bootstrap; reused for every window surface.
    config: Config,

    format: FormatCandidate,
}

impl BaseContext {
    /// Creates the hidden window and the base context, and makes it current.
    ///
    /// The display layer resolves the extended context-creation entry point
    /// through a throwaway legacy context before the real one is requested.
    pub(crate) fn bootstrap(event_loop: &EventLoop<()>, init: &ContextInit) -> Result<Self> {
        let policy = init.pixel_format;

        let early_window = window_before_display(event_loop)?;
        let early_handle = match &early_window {
            Some(window) => Some(native_handle(window)?),
            None => None,
        };

        let display = open_display(event_loop, early_handle)?;

        let mut template = policy.template();
        if let Some(handle) = early_handle {
            template = template.compatible_with_native_window(handle);
        }

        let (config, format) = choose_config(&display, &policy, template)?;

        let window = match early_window {
            Some(window) => window,
            None => glutin_winit::finalize_window(event_loop, base_window_attributes(), &config)
                .context("failed to create the base window")?,
        };

        let handle = native_handle(&window)?;
        let (major, minor) = init.version;
        let attrs = init.context_attributes(None, Some(handle));

        // SAFETY: `handle` belongs to `window`, which is stored alongside the context.
        let not_current = unsafe { display.create_context(&config, &attrs) }.with_context(|| {
            format!("failed to create an OpenGL {major}.{minor} context; the driver may not support it")
        })?;

        let surface_attrs = window
            .build_surface_attributes(Default::default())
            .context("failed to describe the base window surface")?;

        // SAFETY: same window as above.
        let surface = unsafe { display.create_window_surface(&config, &surface_attrs) }
            .context("failed to create the base window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make the base context current")?;

        log::info!(
            "base context ready: OpenGL {major}.{minor} {:?}, {} color bits, {} samples",
            init.profile,
            format.color_bits,
            format.samples,
        );

        Ok(Self {
            context,
            surface,
            _window: window,
            config,
            format,
        })
    }

    /// Makes the base context current on the calling thread.
    pub fn make_current(&self) -> Result<()> {
        self.context
            .make_current(&self.surface)
            .context("failed to make the base context current")
    }

    /// Returns `true` if the base context is current on the calling thread.
    pub fn is_current(&self) -> bool {
        self.context.is_current()
    }

    /// Presents the base surface's back buffer.
    pub(crate) fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap the base surface")
    }

    pub(crate) fn context(&self) -> &PossiblyCurrentContext {
        &self.context
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the GL display all contexts belong to.
    pub fn display(&self) -> Display {
        self.config.display()
    }

    /// Returns the pixel format selected at bootstrap.
    pub fn pixel_format(&self) -> FormatCandidate {
        self.format
    }

    /// Looks up a GL entry point. Returns null for unknown symbols.
    pub fn get_proc_address(&self, symbol: &str) -> *const c_void {
        match CString::new(symbol) {
            Ok(symbol) => self.display().get_proc_address(&symbol),
            Err(_) => std::ptr::null(),
        }
    }
}

fn base_window_attributes() -> WindowAttributes {
    Window::default_attributes()
        .with_title("glwin")
        .with_visible(false)
        .with_inner_size(PhysicalSize::new(1u32, 1u32))
}

fn native_handle(window: &Window) -> Result<RawWindowHandle> {
    Ok(window
        .window_handle()
        .context("base window has no native handle")?
        .as_raw())
}

/// WGL loads its extensions through a live window, so the base window comes
/// first there. Elsewhere the visual is chosen from the config before the
/// window exists.
#[cfg(windows)]
fn window_before_display(event_loop: &EventLoop<()>) -> Result<Option<Window>> {
    #[allow(deprecated)]
    let window = event_loop
        .create_window(base_window_attributes())
        .context("failed to create the base window")?;
    Ok(Some(window))
}

#[cfg(not(windows))]
fn window_before_display(_event_loop: &EventLoop<()>) -> Result<Option<Window>> {
    Ok(None)
}

fn open_display(event_loop: &EventLoop<()>, window: Option<RawWindowHandle>) -> Result<Display> {
    let raw = event_loop
        .display_handle()
        .context("event loop has no display handle")?
        .as_raw();

    // SAFETY: the event loop owns the display connection and outlives every
    // context created on it (`Runtime` drops it last).
    unsafe { Display::new(raw, display_preference(window)) }
        .context("failed to open the OpenGL display")
}

#[cfg(windows)]
fn display_preference(window: Option<RawWindowHandle>) -> DisplayApiPreference {
    DisplayApiPreference::WglThenEgl(window)
}

#[cfg(target_os = "macos")]
fn display_preference(_window: Option<RawWindowHandle>) -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "ios", target_os = "android"))
))]
fn display_preference(_window: Option<RawWindowHandle>) -> DisplayApiPreference {
    DisplayApiPreference::GlxThenEgl(Box::new(winit::platform::x11::register_xlib_error_hook))
}

#[cfg(target_os = "android")]
fn display_preference(_window: Option<RawWindowHandle>) -> DisplayApiPreference {
    DisplayApiPreference::Egl
}

/// Enumerates the display's formats and keeps the one the policy ranks best.
fn choose_config(
    display: &Display,
    policy: &PixelFormatPolicy,
    template: ConfigTemplateBuilder,
) -> Result<(Config, FormatCandidate)> {
    // SAFETY: enumeration only; no surface is bound to the configs yet.
    let mut configs: Vec<Config> = unsafe { display.find_configs(template.build()) }
        .context("failed to enumerate pixel formats")?
        .collect();

    let candidates: Vec<FormatCandidate> =
        configs.iter().map(FormatCandidate::from_config).collect();

    log::debug!("driver offers {} candidate pixel formats", candidates.len());

    let index = policy.choose(&candidates)?;
    Ok((configs.swap_remove(index), candidates[index]))
}
