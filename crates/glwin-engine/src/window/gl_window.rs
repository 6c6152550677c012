use std::rc::Rc;

use anyhow::{Context, Result, ensure};
use glutin::context::{NotCurrentGlContext, PossiblyCurrentContext, PossiblyCurrentGlContext};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, WindowSurface};
use glutin_winit::GlWindow;
use raw_window_handle::HasWindowHandle;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event_loop::EventLoop;
use winit::window::{Window as NativeWindow, WindowAttributes, WindowButtons, WindowId};

use crate::context::{BaseContext, ContextInit};

/// Placement and size of a new window.
///
/// `size` is the client area; the outer frame is derived by the windowing
/// layer from the border style.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub position: (i32, i32),
    pub size: (u32, u32),
}

impl WindowConfig {
    pub fn new(position: (i32, i32), size: (u32, u32)) -> Self {
        Self {
            title: "Window".to_string(),
            position,
            size,
        }
    }

    /// Builds a config from host-supplied signed integers.
    pub fn from_signed(position: (i32, i32), size: (i32, i32)) -> Result<Self> {
        let (w, h) = size;
        ensure!(w > 0 && h > 0, "window size must be positive, got {w}x{h}");
        Ok(Self::new(position, (w.unsigned_abs(), h.unsigned_abs())))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn validate(&self) -> Result<()> {
        let (w, h) = self.size;
        ensure!(w > 0 && h > 0, "window size must be positive, got {w}x{h}");
        Ok(())
    }

    /// Captioned, fixed-size frame with only a close button, shown on creation.
    pub(crate) fn window_attributes(&self) -> WindowAttributes {
        let (x, y) = self.position;
        let (w, h) = self.size;

        NativeWindow::default_attributes()
            .with_title(self.title.clone())
            .with_position(PhysicalPosition::new(x, y))
            .with_inner_size(PhysicalSize::new(w, h))
            .with_resizable(false)
            .with_enabled_buttons(WindowButtons::CLOSE)
            .with_visible(true)
    }
}

/// A visible window with its own OpenGL context.
///
/// The context shares objects (buffers, textures, programs) with the base
/// context. Dropping the window releases the context, the surface and the
/// native window, in that order.
pub struct Window {
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    window: NativeWindow,
    base: Rc<BaseContext>,
    width: u32,
    height: u32,
}

impl Window {
    pub(crate) fn create(
        event_loop: &EventLoop<()>,
        base: &Rc<BaseContext>,
        init: &ContextInit,
        config: &WindowConfig,
    ) -> Result<Self> {
        config.validate()?;

        // Same format as the base surface; sharing requires compatible formats.
        let gl_config = base.config();
        let display = gl_config.display();

        let window =
            glutin_winit::finalize_window(event_loop, config.window_attributes(), gl_config)
                .context("failed to create the native window")?;

        let handle = window
            .window_handle()
            .context("window has no native handle")?
            .as_raw();

        let surface_attrs = window
            .build_surface_attributes(Default::default())
            .context("failed to describe the window surface")?;

        // SAFETY: `window` is stored next to the surface and dropped after it.
        let surface = unsafe { display.create_window_surface(gl_config, &surface_attrs) }
            .context("failed to apply the pixel format to the window")?;

        let attrs = init.context_attributes(Some(base.context()), Some(handle));

        // SAFETY: as above.
        let context = unsafe { display.create_context(gl_config, &attrs) }
            .context("failed to create a shared window context")?
            .treat_as_possibly_current();

        let (width, height) = config.size;
        log::info!(
            "window {:?} created at {:?}, client area {width}x{height}",
            window.id(),
            config.position,
        );

        Ok(Self {
            context,
            surface,
            window,
            base: Rc::clone(base),
            width,
            height,
        })
    }

    /// Makes this window's context current on the calling thread.
    pub fn enter_context(&self) -> Result<()> {
        self.context
            .make_current(&self.surface)
            .context("failed to make the window context current")
    }

    /// Restores the base context as current.
    pub fn exit_context(&self) -> Result<()> {
        self.base.make_current()
    }

    /// Enters this window's context until the returned guard is dropped.
    pub fn scope(&self) -> Result<CurrentGuard<'_>> {
        self.enter_context()?;
        Ok(CurrentGuard { window: self })
    }

    /// Presents this window's back buffer.
    ///
    /// The frame pump only swaps the base surface; windows with a
    /// double-buffered format present through this call.
    pub fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap the window surface")
    }

    pub fn is_current(&self) -> bool {
        self.context.is_current()
    }

    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    /// Requested client width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Requested client height.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        if self.context.is_current() {
            if let Err(err) = self.base.make_current() {
                log::warn!("{err:#}");
            }
        }

        log::debug!("destroying window {:?}", self.window.id());
    }
}

/// Holds a window's context current; restores the base context on drop.
pub struct CurrentGuard<'a> {
    window: &'a Window,
}

impl Drop for CurrentGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.window.exit_context() {
            log::warn!("{err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::{Position, Size};

    #[test]
    fn signed_sizes_must_be_positive() {
        assert!(WindowConfig::from_signed((0, 0), (0, 400)).is_err());
        assert!(WindowConfig::from_signed((0, 0), (400, -1)).is_err());
    }

    #[test]
    fn signed_config_keeps_values() {
        let config = WindowConfig::from_signed((-20, 50), (640, 480)).unwrap();
        assert_eq!(config.position, (-20, 50));
        assert_eq!(config.size, (640, 480));
        assert_eq!(config.title, "Window");
    }

    #[test]
    fn zero_size_fails_validation() {
        assert!(WindowConfig::new((0, 0), (0, 0)).validate().is_err());
        assert!(WindowConfig::new((0, 0), (1, 1)).validate().is_ok());
    }

    #[test]
    fn attributes_request_client_size_at_position() {
        let attrs = WindowConfig::new((50, 500), (400, 300)).window_attributes();

        assert_eq!(
            attrs.inner_size,
            Some(Size::Physical(PhysicalSize::new(400, 300)))
        );
        assert_eq!(
            attrs.position,
            Some(Position::Physical(PhysicalPosition::new(50, 500)))
        );
    }

    #[test]
    fn attributes_use_fixed_frame_with_close_button() {
        let attrs = WindowConfig::new((0, 0), (10, 10))
            .with_title("probe")
            .window_attributes();

        assert_eq!(attrs.title, "probe");
        assert!(attrs.visible);
        assert!(!attrs.resizable);
        assert_eq!(attrs.enabled_buttons, WindowButtons::CLOSE);
    }
}
