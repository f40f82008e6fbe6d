use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::csv_output::Layout;
use crate::errors::ConfigError;
use crate::extraction::KeySelection;
use crate::models::location::Location;

pub const DEFAULT_API_BASE: &str = "https://api.forecast.io/forecast/";
pub const DEFAULT_LOCATION: Location = Location { lat: 42.514794, long: -71.652153 };
pub const DEFAULT_OUTPUT: &str = "weatherdata1.csv";

#[derive(Deserialize, Debug)]
pub struct ForecastParameters {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Deserialize, Debug)]
pub struct GeoRef {
    pub location: Location,
}

#[derive(Deserialize, Debug)]
pub struct ExtractionParameters {
    #[serde(default)]
    pub keys: KeySelection,
    #[serde(default)]
    pub layout: Layout,
}

#[derive(Deserialize, Debug)]
pub struct Files {
    #[serde(default = "default_output")]
    pub output: String,
}

#[derive(Deserialize, Debug)]
pub struct General {
    #[serde(default)]
    pub log_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: LevelFilter,
    #[serde(default = "default_true")]
    pub log_to_stdout: bool,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub forecast: ForecastParameters,
    pub geo_ref: GeoRef,
    pub extraction: ExtractionParameters,
    pub files: Files,
    pub general: General,
}

fn default_api_base() -> String { DEFAULT_API_BASE.to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_output() -> String { DEFAULT_OUTPUT.to_string() }
fn default_log_level() -> LevelFilter { LevelFilter::Info }
fn default_true() -> bool { true }

/// The configuration used when no config file is given, i.e. the classic run for a
/// single hardcoded coordinate writing time and temperature columns
impl Default for Config {
    fn default() -> Self {
        Config {
            forecast: ForecastParameters {
                api_base: default_api_base(),
                api_key: String::new(),
                timeout_secs: default_timeout_secs(),
            },
            geo_ref: GeoRef { location: DEFAULT_LOCATION },
            extraction: ExtractionParameters {
                keys: KeySelection::Keys(vec!["hourly".to_string()]),
                layout: Layout::Columns,
            },
            files: Files { output: default_output() },
            general: General {
                log_path: String::new(),
                log_level: default_log_level(),
                log_to_stdout: true,
            },
        }
    }
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    parse_config(&toml)
}

/// Parses configuration from a toml document
///
/// # Arguments
///
/// * 'toml' - the configuration document
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    if config.forecast.api_base.is_empty() {
        return Err(ConfigError::Value("forecast.api_base must not be empty".to_string()));
    }
    if config.files.output.is_empty() {
        return Err(ConfigError::Value("files.output must not be empty".to_string()));
    }

    Ok(config)
}

/// Sets the api key from the environment if one is given there, and checks that
/// the config ends up with a key at all
///
/// # Arguments
///
/// * 'config' - config to update
/// * 'env_key' - value of the api key environment variable, if set
pub fn apply_api_key(config: &mut Config, env_key: Option<String>) -> Result<(), ConfigError> {
    if let Some(key) = env_key.filter(|k| !k.is_empty()) {
        config.forecast.api_key = key;
    }

    if config.forecast.api_key.is_empty() {
        return Err(ConfigError::Value("no forecast api key configured".to_string()));
    }

    Ok(())
}
