use crate::error::{AnalyticsError, Result};
use crate::utils::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_HISTOGRAM_BINS, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_DIR,
    ENV_PREFIX, TEMPERATURE_SCALE,
};
use ::config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Runtime settings, layered as defaults < TOML file < `BIKESHARE_*` environment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalyticsConfig {
    pub input_path: PathBuf,
    pub temperature_scale: f64,
    pub histogram_bins: usize,
    pub strict_categories: bool,
    pub output_dir: PathBuf,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            temperature_scale: TEMPERATURE_SCALE,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            strict_categories: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl AnalyticsConfig {
    /// Load settings. An explicit `path` must exist; otherwise `bikeshare.toml`
    /// in the working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .set_default("input_path", DEFAULT_INPUT_PATH)?
            .set_default("temperature_scale", TEMPERATURE_SCALE)?
            .set_default("histogram_bins", DEFAULT_HISTOGRAM_BINS as i64)?
            .set_default("strict_categories", false)?
            .set_default("output_dir", DEFAULT_OUTPUT_DIR)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: AnalyticsConfig = settings.try_deserialize()?;
        config.validate()?;
        debug!("Loaded configuration: {:?}", config);

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.histogram_bins == 0 {
            return Err(AnalyticsError::Config(
                "histogram_bins must be at least 1".to_string(),
            ));
        }
        if !self.temperature_scale.is_finite() || self.temperature_scale <= 0.0 {
            return Err(AnalyticsError::Config(format!(
                "temperature_scale must be a positive number, got {}",
                self.temperature_scale
            )));
        }
        Ok(())
    }
}
