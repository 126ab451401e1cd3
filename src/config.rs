//! Runtime configuration from the environment.
//!
//! `main` loads `.env` with dotenv first, so every setting can live there.

use crate::output::OutputFormat;
use log::LevelFilter;
use std::error::Error;
use std::str::FromStr;

pub const ENV_FORMAT: &str = "SUBNET_CALC_FORMAT";
pub const ENV_LOG_CONFIG: &str = "SUBNET_CALC_LOG_CONFIG";
pub const ENV_LOG_LEVEL: &str = "SUBNET_CALC_LOG_LEVEL";
pub const ENV_COLOR: &str = "SUBNET_CALC_COLOR";

const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            other => Err(format!("unknown color choice '{other}', use auto, always or never")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub format: OutputFormat,
    /// log4rs YAML file, used when it exists.
    pub log_config: String,
    /// Level of the stderr logger used without a log4rs file.
    pub log_level: LevelFilter,
    pub color: ColorChoice,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            format: OutputFormat::Text,
            log_config: DEFAULT_LOG_CONFIG.to_string(),
            log_level: LevelFilter::Warn,
            color: ColorChoice::Auto,
        }
    }
}

impl Config {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(format) = lookup(ENV_FORMAT) {
            config.format = format.parse().map_err(|e| format!("{ENV_FORMAT}: {e}"))?;
        }
        if let Some(path) = lookup(ENV_LOG_CONFIG) {
            config.log_config = path;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level
                .parse()
                .map_err(|_| format!("{ENV_LOG_LEVEL}: unknown log level '{level}'"))?;
        }
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            config.color = ColorChoice::Never;
        }
        if let Some(color) = lookup(ENV_COLOR) {
            config.color = color.parse().map_err(|e| format!("{ENV_COLOR}: {e}"))?;
        }

        Ok(config)
    }

    /// Apply the colour choice to `colored`.
    pub fn apply_color(&self) {
        match self.color {
            ColorChoice::Auto => colored::control::unset_override(),
            ColorChoice::Always => colored::control::set_override(true),
            ColorChoice::Never => colored::control::set_override(false),
        }
    }
}
