//! OpenGL context management.
//!
//! This module is responsible for:
//! - choosing the pixel format every surface uses
//! - bootstrapping the hidden base window and its core-profile context
//! - the context attributes shared by the base and all window contexts
//! - pacing presentation against the desktop compositor

mod base;
pub(crate) mod compositor;
mod init;
mod pixel_format;

pub use base::BaseContext;
pub use init::ContextInit;
pub use pixel_format::{FormatCandidate, PixelFormatPolicy};
