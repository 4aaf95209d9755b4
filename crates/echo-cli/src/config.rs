//! Configuration loading and management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use echo_core::{DEFAULT_END_OF_DAY, Granularity, SlotError};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,

    /// Width of generated slots in minutes (30 or 60).
    pub granularity_minutes: u32,

    /// Hour of day after which no slots are offered, e.g. `23.5` for 11:30 PM.
    pub end_of_day: f64,

    /// Seconds between re-evaluations in `slots --watch`.
    pub refresh_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("echo.db"),
            granularity_minutes: Granularity::default().minutes(),
            end_of_day: DEFAULT_END_OF_DAY,
            refresh_secs: 30,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (ECHO_*)
        figment = figment.merge(Env::prefixed("ECHO_"));

        figment.extract()
    }

    /// Configured slot granularity.
    pub fn granularity(&self) -> Result<Granularity, SlotError> {
        Granularity::try_from(self.granularity_minutes)
    }

    /// Interval between slot refreshes, never shorter than one second.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }
}

/// Returns the platform-specific config directory for echo.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("echo"))
}

/// Returns the platform-specific data directory for echo.
///
/// On Linux: `~/.local/share/echo`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("echo"))
}
