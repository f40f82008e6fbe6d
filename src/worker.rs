use std::path::Path;
use log::info;
use crate::config::Config;
use crate::csv_output::write_extracted;
use crate::errors::ScrapeError;
use crate::extraction::extract;
use crate::initialization::Mgr;
use crate::models::forecast::Extracted;

/// Fetches a forecast and writes it to the output file, returns number of rows written
///
/// # Arguments
///
/// * 'mgr' - config and forecast client
pub fn run(mgr: &Mgr) -> Result<usize, ScrapeError> {
    let location = &mgr.config.geo_ref.location;
    info!("fetching forecast for {}", location);

    let body = mgr.forecast.fetch(location)?;

    process_forecast(&body, &mgr.config)
}

/// Extracts rows from a raw forecast and writes them out.
/// The output file is only touched once extraction has succeeded.
///
/// # Arguments
///
/// * 'body' - raw forecast document
/// * 'config' - key selection, layout and output file
pub fn process_forecast(body: &[u8], config: &Config) -> Result<usize, ScrapeError> {
    let extracted = extract(body, &config.extraction.keys, config.extraction.layout)?;

    if let Extracted::Detailed { sun, .. } = &extracted {
        info!("first forecast day: {}", sun);
    }

    let rows = write_extracted(Path::new(&config.files.output), &extracted)?;
    info!("{} hourly records written to {}", rows, config.files.output);

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use crate::csv_output::Layout;
    use crate::extraction::KeySelection;
    use crate::manager_forecast::ForecastApi;
    use crate::manager_forecast::tests::serve_once;

    const FORECAST: &str = r#"{
        "latitude": 42.514794,
        "longitude": -71.652153,
        "hourly": { "summary": "Rain", "data": [
            { "time": 1000, "apparentTemperature": 72.5, "icon": "rain", "cloudCover": 0.5 },
            { "time": 4600, "apparentTemperature": 71.0, "icon": "cloudy", "cloudCover": 0.75 }
        ]},
        "daily": { "data": [ { "sunriseTime": 500, "sunsetTime": 40000 } ] }
    }"#;

    fn config_for(dir: &Path, keys: KeySelection, layout: Layout) -> Config {
        let mut config = Config::default();
        config.extraction.keys = keys;
        config.extraction.layout = layout;
        config.files.output = dir.join("weatherdata1.csv").to_string_lossy().to_string();
        config
    }

    #[test]
    fn writes_one_row_per_hour() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), KeySelection::Keys(vec!["hourly".to_string()]), Layout::Columns);

        let rows = process_forecast(FORECAST.as_bytes(), &config).unwrap();
        assert_eq!(rows, 2);
        assert_eq!(fs::read_to_string(&config.files.output).unwrap(), "1000,72.5\n4600,71.0\n");
    }

    #[test]
    fn second_run_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), KeySelection::All, Layout::Wide);

        process_forecast(FORECAST.as_bytes(), &config).unwrap();
        let first = fs::read(&config.files.output).unwrap();
        process_forecast(FORECAST.as_bytes(), &config).unwrap();
        let second = fs::read(&config.files.output).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            String::from_utf8(first).unwrap(),
            "\"(72.5, 1000, 'rain', 0.5)\",\"(71.0, 4600, 'cloudy', 0.75)\"\n"
        );
    }

    #[test]
    fn missing_key_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(
            dir.path(),
            KeySelection::Keys(vec!["hourly".to_string(), "minutely".to_string()]),
            Layout::Columns,
        );

        let err = process_forecast(FORECAST.as_bytes(), &config).unwrap_err();
        assert!(matches!(err, ScrapeError::Extract(_)));
        assert!(!Path::new(&config.files.output).exists());
    }

    #[test]
    fn full_run_against_local_api() {
        let dir = tempfile::tempdir().unwrap();
        let (base, handle) = serve_once("200 OK", FORECAST);
        let config = config_for(dir.path(), KeySelection::Keys(vec!["hourly".to_string()]), Layout::Columns);
        let forecast = ForecastApi::new(&base, "KEY", Duration::from_secs(5));
        let mgr = Mgr { config, forecast };

        assert_eq!(run(&mgr).unwrap(), 2);
        handle.join().unwrap();
        assert!(Path::new(&mgr.config.files.output).exists());
    }

    #[test]
    fn failed_fetch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (base, handle) = serve_once("500 Internal Server Error", "oops");
        let config = config_for(dir.path(), KeySelection::All, Layout::Columns);
        let forecast = ForecastApi::new(&base, "KEY", Duration::from_secs(5));
        let mgr = Mgr { config, forecast };

        assert!(matches!(run(&mgr), Err(ScrapeError::Fetch(_))));
        handle.join().unwrap();
        assert!(!Path::new(&mgr.config.files.output).exists());
    }
}
