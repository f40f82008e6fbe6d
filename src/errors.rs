use thiserror::Error;
use crate::csv_output::OutputError;
use crate::extraction::ExtractError;
use crate::manager_forecast::errors::ForecastError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file error: {0}")]
    File(#[from] std::io::Error),
    #[error("config document error: {0}")]
    Document(#[from] toml::de::Error),
    #[error("config value error: {0}")]
    Value(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum LocationError {
    #[error("malformed location '{0}', expected '<lat>,<lon>' without spaces")]
    Malformed(String),
    #[error("coordinate out of range in '{0}'")]
    OutOfRange(String),
}

#[derive(Error, Debug)]
pub enum InitError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("logging setup: {0}")]
    Logging(String),
}

/// Failure of any pipeline stage
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] ForecastError),
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),
    #[error("writing output failed: {0}")]
    Output(#[from] OutputError),
}
