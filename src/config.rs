use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, DEFAULT_SETTINGS_FILE, DEFAULT_SOURCE,
    SETTINGS_ENV_PREFIX,
};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::Validate;

/// Runtime settings. Precedence, lowest first: built-in defaults, the
/// settings file, `BIKESHARE_*` environment variables.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    pub source: PathBuf,

    pub change_detection: bool,

    #[validate(range(min = 32, max = 400))]
    pub chart_width: u32,

    #[validate(range(min = 3, max = 200))]
    pub chart_height: u32,
}

impl Settings {
    /// Load settings. Without an explicit `path`, `./bikeshare.toml` is used
    /// when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_SETTINGS_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("source", DEFAULT_SOURCE)?
            .set_default("change_detection", false)?
            .set_default("chart_width", i64::from(DEFAULT_CHART_WIDTH))?
            .set_default("chart_height", i64::from(DEFAULT_CHART_HEIGHT))?
            .add_source(file)
            .add_source(Environment::with_prefix(SETTINGS_ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings
            .validate()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            change_detection: false,
            chart_width: DEFAULT_CHART_WIDTH,
            chart_height: DEFAULT_CHART_HEIGHT,
        }
    }
}
