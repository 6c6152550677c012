//! Frame timing.
//!
//! The runtime ticks one `FrameClock` per pumped frame so hosts can animate
//! without keeping their own timer.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
