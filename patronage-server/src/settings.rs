//! Settings / Configuration.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Names of environments for patronage-server.
/// Overrides serialization to force lower case in settings and
/// environment variables
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    /// Local environment (local testing).
    Local,
    /// Official Develop environment.
    Dev,
    /// Official Staging environment.
    Staging,
    /// Official Production environment.
    Prod,
}

/// Implement display to force environment to lower case
impl std::fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{self:?}").to_lowercase())
    }
}

/// Server settings.
#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    /// Server [AppEnvironment].
    pub environment: AppEnvironment,
    /// Server port.
    pub port: u16,
    /// Server timeout in milliseconds.
    pub timeout_ms: u64,
}

/// Platform presentation settings, consumed by the production stage widgets.
#[derive(Clone, Debug, Deserialize)]
pub struct Platform {
    /// Display name of the platform.
    pub name: String,
    /// Support address surfaced on the recovery pages.
    pub support_email: String,
}

/// Background healthcheck settings
#[derive(Clone, Debug, Deserialize)]
pub struct Healthcheck {
    /// Is background healthcheck enabled?
    #[serde(rename = "enabled")]
    pub is_enabled: bool,
    /// Healthcheck interval in milliseconds.
    pub interval_ms: u64,
    /// Healthcheck max retries.
    pub max_retries: u32,
}

#[derive(Clone, Debug, Deserialize)]
/// Application settings.
pub struct Settings {
    /// Server settings
    pub server: Server,
    /// Platform presentation settings
    pub platform: Platform,
    /// Healthcheck settings
    pub healthcheck: Healthcheck,
    /// The path where the settings file resides.
    /// This can't actually be configured in the settings file itself, for obvious reasons.
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

impl Settings {
    /// Load settings.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = config_path
            .unwrap_or(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/settings.toml"));
        // inject environment variables naming them properly on the settings
        // e.g. [server] port=3000
        // would be injected with environment variable PATRONAGE_SERVER_SERVER_PORT=3000
        let s = Config::builder()
            .add_source(File::with_name(&path.as_path().display().to_string()))
            .add_source(
                Environment::with_prefix("PATRONAGE_SERVER")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;
        let mut settings: Self = s.try_deserialize()?;
        settings.path = Some(path);
        Ok(settings)
    }
}
