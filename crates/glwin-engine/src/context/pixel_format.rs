use anyhow::{Result, anyhow};
use glutin::config::{ColorBufferType, Config, ConfigSurfaceTypes, ConfigTemplateBuilder, GlConfig};

/// Pixel-format requirements for every drawable surface.
///
/// The template handed to glutin narrows the driver's formats; [`select`]
/// then rejects anything that still misses the policy and ranks the rest.
///
/// [`select`]: PixelFormatPolicy::select
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PixelFormatPolicy {
    /// Minimum color depth, alpha included.
    pub min_color_bits: u16,

    /// Alpha channel size requested from the driver.
    pub alpha_bits: u8,

    /// Rejects software (generic) implementations.
    pub hardware_accelerated: bool,
}

impl Default for PixelFormatPolicy {
    fn default() -> Self {
        Self {
            min_color_bits: 32,
            alpha_bits: 8,
            hardware_accelerated: true,
        }
    }
}

/// Properties of one driver-advertised format, as far as selection cares.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FormatCandidate {
    pub color_bits: u16,
    pub hardware_accelerated: bool,
    pub window_surface: bool,
    pub samples: u8,
}

impl FormatCandidate {
    pub fn from_config(config: &Config) -> Self {
        let rgb = match config.color_buffer_type() {
            Some(ColorBufferType::Rgb { r_size, g_size, b_size }) => {
                u16::from(r_size) + u16::from(g_size) + u16::from(b_size)
            }
            Some(ColorBufferType::Luminance(size)) => u16::from(size),
            None => 0,
        };

        Self {
            color_bits: rgb + u16::from(config.alpha_size()),
            hardware_accelerated: config.hardware_accelerated(),
            window_surface: config.config_surface_types().contains(ConfigSurfaceTypes::WINDOW),
            samples: config.num_samples(),
        }
    }
}

impl PixelFormatPolicy {
    /// Template passed to the display when enumerating formats.
    pub(crate) fn template(&self) -> ConfigTemplateBuilder {
        ConfigTemplateBuilder::new()
            .with_alpha_size(self.alpha_bits)
            .with_surface_type(ConfigSurfaceTypes::WINDOW)
            .prefer_hardware_accelerated(self.hardware_accelerated.then_some(true))
    }

    pub fn accepts(&self, candidate: &FormatCandidate) -> bool {
        candidate.window_surface
            && candidate.color_bits >= self.min_color_bits
            && (candidate.hardware_accelerated || !self.hardware_accelerated)
    }

    /// Returns the index of the best acceptable candidate.
    ///
    /// Single-sampled formats win over multisampled ones (multisampling is
    /// the host's business, done in offscreen targets), then the format
    /// closest to the requested depth. Ties keep driver order.
    pub fn select(&self, candidates: &[FormatCandidate]) -> Option<usize> {
        candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| self.accepts(c))
            .min_by_key(|(_, c)| (c.samples, c.color_bits - self.min_color_bits))
            .map(|(index, _)| index)
    }

    /// Like [`select`](Self::select), but an empty or fully rejected list is
    /// an error naming how many formats the driver offered.
    pub fn choose(&self, candidates: &[FormatCandidate]) -> Result<usize> {
        self.select(candidates).ok_or_else(|| {
            anyhow!(
                "no pixel format satisfies the requested policy ({} offered)",
                candidates.len()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(color_bits: u16, hw: bool, samples: u8) -> FormatCandidate {
        FormatCandidate {
            color_bits,
            hardware_accelerated: hw,
            window_surface: true,
            samples,
        }
    }

    #[test]
    fn picks_first_exact_match() {
        let policy = PixelFormatPolicy::default();
        let formats = [fmt(32, true, 0), fmt(32, true, 0)];
        assert_eq!(policy.select(&formats), Some(0));
    }

    #[test]
    fn rejects_shallow_formats() {
        let policy = PixelFormatPolicy::default();
        let formats = [fmt(16, true, 0), fmt(24, true, 0)];
        assert_eq!(policy.select(&formats), None);
    }

    #[test]
    fn rejects_software_formats() {
        let policy = PixelFormatPolicy::default();
        let formats = [fmt(32, false, 0)];
        assert_eq!(policy.select(&formats), None);
    }

    #[test]
    fn software_allowed_when_not_required() {
        let policy = PixelFormatPolicy {
            hardware_accelerated: false,
            ..PixelFormatPolicy::default()
        };
        assert_eq!(policy.select(&[fmt(32, false, 0)]), Some(0));
    }

    #[test]
    fn rejects_formats_that_cannot_draw_to_a_window() {
        let policy = PixelFormatPolicy::default();
        let mut pbuffer_only = fmt(32, true, 0);
        pbuffer_only.window_surface = false;
        assert_eq!(policy.select(&[pbuffer_only]), None);
    }

    #[test]
    fn prefers_single_sampled() {
        let policy = PixelFormatPolicy::default();
        let formats = [fmt(32, true, 4), fmt(32, true, 0)];
        assert_eq!(policy.select(&formats), Some(1));
    }

    #[test]
    fn prefers_closest_depth() {
        let policy = PixelFormatPolicy::default();
        let formats = [fmt(64, true, 0), fmt(40, true, 0), fmt(32, true, 0)];
        assert_eq!(policy.select(&formats), Some(2));
    }

    #[test]
    fn selection_always_meets_policy() {
        let policy = PixelFormatPolicy::default();
        let formats = [
            fmt(16, true, 0),
            fmt(32, false, 0),
            fmt(48, true, 8),
            fmt(24, true, 0),
        ];

        let index = policy.select(&formats).unwrap();
        assert_eq!(index, 2);
        assert!(formats[index].color_bits >= 32);
        assert!(formats[index].hardware_accelerated);
    }

    #[test]
    fn empty_list_has_no_selection() {
        assert_eq!(PixelFormatPolicy::default().select(&[]), None);
    }

    #[test]
    fn choosing_from_nothing_is_an_error() {
        let err = PixelFormatPolicy::default().choose(&[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "no pixel format satisfies the requested policy (0 offered)"
        );
    }

    #[test]
    fn choosing_from_rejected_formats_is_an_error() {
        let policy = PixelFormatPolicy::default();
        let err = policy.choose(&[fmt(16, true, 0), fmt(32, false, 0)]).unwrap_err();
        assert!(err.to_string().contains("(2 offered)"));
    }

    #[test]
    fn choosing_returns_the_selected_index() {
        let policy = PixelFormatPolicy::default();
        let formats = [fmt(24, true, 0), fmt(32, true, 0)];
        assert_eq!(policy.choose(&formats).unwrap(), 1);
    }
}
