//! Presentation pacing against the desktop compositor.

/// Blocks until the compositor presents its next frame.
#[cfg(windows)]
pub(crate) fn flush() {
    // SAFETY: DwmFlush takes no arguments and only blocks the calling thread.
    if let Err(err) = unsafe { windows::Win32::Graphics::Dwm::DwmFlush() } {
        // Composition is off (remote sessions, basic theme); there is nothing to wait for.
        log::trace!("DwmFlush failed: {err}");
    }
}

/// Blocks until the compositor presents its next frame.
///
/// No explicit flush exists outside Windows; pacing comes from the swap.
#[cfg(not(windows))]
pub(crate) fn flush() {}
