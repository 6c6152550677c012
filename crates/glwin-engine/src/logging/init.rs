use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "warn",
/// "glwin_engine=debug,winit=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Level used when neither the config nor `RUST_LOG` names a filter.
///
/// Embedded in a host interpreter; stay quiet unless asked.
pub const DEFAULT_LEVEL: log::LevelFilter = log::LevelFilter::Warn;

/// Picks the filter string: the config's, else the environment's.
fn resolve_filter(configured: Option<String>, env: Option<String>) -> Option<String> {
    configured.or(env)
}

/// Installs the global logger once.
///
/// Subsequent calls are ignored. When the host process already installed a
/// logger (another extension module, an embedding application) the existing
/// one is kept.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(DEFAULT_LEVEL);
            }
        }

        builder.write_style(config.write_style);

        if builder.try_init().is_err() {
            log::debug!("a logger is already installed; keeping it");
            return;
        }

        log::debug!("logging initialized");
    });
}
