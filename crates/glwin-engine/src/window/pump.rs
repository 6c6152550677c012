use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::platform::pump_events::PumpStatus;
use winit::window::WindowId;

/// Result of one pumped frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    /// Keep running the frame loop.
    Continue,
    /// A window was asked to close; the loop is over for good.
    Stop,
}

impl FrameStatus {
    pub fn is_continue(self) -> bool {
        self == Self::Continue
    }
}

/// Event handler shared by every window.
///
/// Reacts to a close request only; everything else gets the platform's
/// default handling. Once stopped it stays stopped.
#[derive(Debug, Default)]
pub(crate) struct EventPump {
    stopped: bool,
}

impl EventPump {
    pub(crate) fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Folds the outcome of `pump_app_events` into the latched status.
    pub(crate) fn settle(&mut self, status: PumpStatus) -> FrameStatus {
        if let PumpStatus::Exit(code) = status {
            if !self.stopped {
                log::info!("event loop exited with code {code}");
            }
            self.stopped = true;
        }

        if self.stopped {
            FrameStatus::Stop
        } else {
            FrameStatus::Continue
        }
    }
}

impl ApplicationHandler for EventPump {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.stopped {
            return;
        }

        if let WindowEvent::CloseRequested = event {
            log::info!("close requested for {window_id:?}");
            self.stopped = true;
            event_loop.exit();
        }
    }
}
