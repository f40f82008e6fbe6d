use std::env;
use std::time::Duration;
use log::info;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::config::{apply_api_key, load_config, Config, General};
use crate::errors::InitError;
use crate::manager_forecast::ForecastApi;

pub const CONFIG_ENV: &str = "WEATHER_SCRAPE_CONFIG";
pub const API_KEY_ENV: &str = "FORECAST_API_KEY";

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

/// Everything a run needs
pub struct Mgr {
    pub config: Config,
    pub forecast: ForecastApi,
}

/// Loads config, starts logging and returns the forecast client together with the config
///
pub fn init() -> Result<Mgr, InitError> {
    let mut config = match env::var(CONFIG_ENV) {
        Ok(path) => load_config(&path)?,
        Err(_) => Config::default(),
    };
    apply_api_key(&mut config, env::var(API_KEY_ENV).ok())?;

    let log_config = log_config(&config.general)?;
    log4rs::init_config(log_config).map_err(|e| InitError::Logging(e.to_string()))?;

    info!("weather-scrape version: {}", env!("CARGO_PKG_VERSION"));

    let forecast = ForecastApi::new(
        &config.forecast.api_base,
        &config.forecast.api_key,
        Duration::from_secs(config.forecast.timeout_secs),
    );

    Ok(Mgr { config, forecast })
}

/// Builds the log4rs configuration from the general config section
///
/// # Arguments
///
/// * 'general' - log settings
pub fn log_config(general: &General) -> Result<log4rs::Config, InitError> {
    let mut builder = log4rs::Config::builder();
    let mut root = Root::builder();

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    if !general.log_path.is_empty() {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(&general.log_path)
            .map_err(|e| InitError::Logging(format!("{}: {}", general.log_path, e)))?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    builder
        .build(root.build(general.log_level))
        .map_err(|e| InitError::Logging(e.to_string()))
}
