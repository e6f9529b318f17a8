use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Runtime settings for the recipe finder
#[derive(Debug, Deserialize, Clone)]
pub struct FinderConfig {
    /// Base URL of the recipe service (without trailing slash)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Upper bound on how many candidates get a detail fetch
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Whether a failed primary lookup switches to the local recipe table
    #[serde(default = "default_fallback_enabled")]
    pub fallback_enabled: bool,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            max_candidates: default_max_candidates(),
            timeout: default_timeout(),
            fallback_enabled: default_fallback_enabled(),
        }
    }
}

// Default value functions
fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_max_candidates() -> usize {
    15
}

fn default_timeout() -> u64 {
    30
}

fn default_fallback_enabled() -> bool {
    true
}

impl FinderConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. recipe_finder.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FINDER__MAX_CANDIDATES
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
///
/// See [`FinderConfig::load`] for the precedence rules.
pub fn load_config() -> Result<FinderConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe_finder").required(false))
        // Use double underscore as the separator: RECIPE_FINDER__API_BASE_URL
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
