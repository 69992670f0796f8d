use config::Config;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://www.regattacentral.com";
const DEFAULT_OUT_DIR: &str = "out";

/// Fixed site and output configuration. Loaded once at startup; the rest of
/// the pipeline only ever sees immutable references.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Origin that event links are resolved against.
    pub base_url: String,
    /// Default directory for written race files (`run --out` overrides).
    pub out_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            out_dir: DEFAULT_OUT_DIR.to_string(),
        }
    }
}

impl Settings {
    /// Defaults overridable via ERG_-prefixed environment variables
    /// (ERG_BASE_URL, ERG_OUT_DIR).
    pub fn load() -> Self {
        Config::builder()
            .add_source(config::Environment::with_prefix("ERG"))
            .build()
            .ok()
            .and_then(|c| c.try_deserialize().ok())
            .unwrap_or_default()
    }
}
