use glutin::context::{
    ContextApi, ContextAttributes, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext,
    Version,
};
use raw_window_handle::RawWindowHandle;

use super::PixelFormatPolicy;

/// Initialization parameters for the context layer.
///
/// The defaults request what every window context in the process is created
/// with: a hardware-accelerated 32-bit format and an OpenGL 4.5 core context.
#[derive(Debug, Clone)]
pub struct ContextInit {
    /// Requested OpenGL version as `(major, minor)`.
    pub version: (u8, u8),

    /// Requested profile.
    ///
    /// Core excludes the deprecated fixed-function surface. No
    /// forward-compatible flag is requested: glutin has no attribute for it,
    /// and a 3.2+ core context already drops everything that flag would.
    pub profile: GlProfile,

    /// Requests a debug context.
    pub debug: bool,

    /// Pixel-format requirements applied to the base window and every
    /// window created afterwards.
    pub pixel_format: PixelFormatPolicy,

    /// Allows the event loop to live on a thread other than the main one.
    ///
    /// Only honored on Windows and X11/Wayland. Integration tests use it
    /// because the test harness runs tests on worker threads.
    pub any_thread: bool,
}

impl Default for ContextInit {
    fn default() -> Self {
        Self {
            version: (4, 5),
            profile: GlProfile::Core,
            debug: false,
            pixel_format: PixelFormatPolicy::default(),
            any_thread: false,
        }
    }
}

impl ContextInit {
    /// Builds context attributes for a surface identified by `handle`.
    ///
    /// With `share` set, GL objects created under either context are visible
    /// to the other.
    pub(crate) fn context_attributes(
        &self,
        share: Option<&PossiblyCurrentContext>,
        handle: Option<RawWindowHandle>,
    ) -> ContextAttributes {
        let (major, minor) = self.version;

        let mut builder = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(self.profile)
            .with_debug(self.debug);

        if let Some(share) = share {
            builder = builder.with_sharing(share);
        }

        builder.build(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_request_a_4_5_core_context() {
        let init = ContextInit::default();
        assert_eq!(init.version, (4, 5));
        assert_eq!(init.profile, GlProfile::Core);
        assert!(!init.debug);
        assert!(!init.any_thread);
    }

    #[test]
    fn attributes_build_without_a_surface_handle() {
        let _attrs = ContextInit::default().context_attributes(None, None);
    }
}
