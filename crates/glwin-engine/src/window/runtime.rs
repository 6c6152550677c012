use std::ffi::c_void;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use winit::event_loop::{EventLoop, EventLoopBuilder};
use winit::platform::pump_events::EventLoopExtPumpEvents;

use crate::context::{BaseContext, ContextInit, compositor};
use crate::time::{FrameClock, FrameTime};

use super::pump::{EventPump, FrameStatus};
use super::{Window, WindowConfig};

/// Owns the event loop and the base context; creates windows and pumps frames.
///
/// Everything here is single-threaded: the type is `!Send`, and all windows
/// must be used on the thread that created the runtime.
pub struct Runtime {
    init: ContextInit,
    base: Rc<BaseContext>,
    pump: EventPump,
    clock: FrameClock,
    last_frame: Option<FrameTime>,

    /// Declared last: contexts and windows go before the loop that owns them.
    event_loop: EventLoop<()>,
}

impl Runtime {
    /// Creates the event loop and bootstraps the base context.
    ///
    /// On return the base context is current on the calling thread.
    pub fn new(init: ContextInit) -> Result<Self> {
        let event_loop = build_event_loop(&init)?;

        let base = BaseContext::bootstrap(&event_loop, &init)
            .context("failed to bootstrap the base OpenGL context")?;

        Ok(Self {
            init,
            base: Rc::new(base),
            pump: EventPump::default(),
            clock: FrameClock::new(),
            last_frame: None,
            event_loop,
        })
    }

    /// Creates a visible window whose context shares objects with the base context.
    ///
    /// The current context is left unchanged.
    pub fn create_window(&self, config: &WindowConfig) -> Result<Window> {
        Window::create(&self.event_loop, &self.base, &self.init, config).with_context(|| {
            format!(
                "failed to create a {}x{} window at {:?}",
                config.size.0, config.size.1, config.position
            )
        })
    }

    /// Pumps one frame: swap the base surface, wait for the compositor, then
    /// drain pending events without blocking.
    ///
    /// Returns [`FrameStatus::Stop`] once any window was asked to close, and
    /// on every call after that.
    pub fn update(&mut self) -> FrameStatus {
        if self.pump.is_stopped() {
            return FrameStatus::Stop;
        }

        if let Err(err) = self.base.swap_buffers() {
            log::warn!("{err:#}");
        }

        compositor::flush();

        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.pump);

        self.last_frame = Some(self.clock.tick());
        self.pump.settle(status)
    }

    pub fn base(&self) -> &BaseContext {
        &self.base
    }

    /// Timing of the most recent `update`, if any.
    pub fn frame_time(&self) -> Option<FrameTime> {
        self.last_frame
    }

    /// Looks up a GL entry point through the shared display.
    pub fn get_proc_address(&self, symbol: &str) -> *const c_void {
        self.base.get_proc_address(symbol)
    }
}

fn build_event_loop(init: &ContextInit) -> Result<EventLoop<()>> {
    let mut builder = EventLoop::builder();

    if init.any_thread {
        allow_any_thread(&mut builder);
    }

    builder.build().context("failed to create the event loop")
}

#[cfg(windows)]
fn allow_any_thread(builder: &mut EventLoopBuilder<()>) {
    use winit::platform::windows::EventLoopBuilderExtWindows;

    builder.with_any_thread(true);
}

#[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
fn allow_any_thread(builder: &mut EventLoopBuilder<()>) {
    use winit::platform::wayland::EventLoopBuilderExtWayland;
    use winit::platform::x11::EventLoopBuilderExtX11;

    EventLoopBuilderExtX11::with_any_thread(builder, true);
    EventLoopBuilderExtWayland::with_any_thread(builder, true);
}

#[cfg(not(any(
    windows,
    all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android")))
)))]
fn allow_any_thread(_builder: &mut EventLoopBuilder<()>) {
    log::warn!("this platform requires the event loop on the main thread");
}
