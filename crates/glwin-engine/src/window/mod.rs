//! Windows + frame pump.
//!
//! Owns the `winit` event loop, the shared base context and every window
//! created against it.

mod gl_window;
mod pump;
mod runtime;

pub use gl_window::{CurrentGuard, Window, WindowConfig};
pub use pump::FrameStatus;
pub use runtime::Runtime;
