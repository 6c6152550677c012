//! glwin engine crate.
//!
//! Native windows carrying OpenGL 4.5 core contexts that all share objects
//! with one hidden base context, plus a non-blocking frame pump. Higher
//! layers (the Python module, the demo) drive it through [`Runtime`].

pub mod context;
pub mod logging;
pub mod time;
pub mod window;

pub use context::{BaseContext, ContextInit, FormatCandidate, PixelFormatPolicy};
pub use time::{FrameClock, FrameTime};
pub use window::{CurrentGuard, FrameStatus, Runtime, Window, WindowConfig};
