pub mod errors;

use std::time::Duration;
use log::{debug, info};
use ureq::Agent;
use ureq::http::StatusCode;
use crate::manager_forecast::errors::ForecastError;
use crate::models::location::Location;

const USER_AGENT: &str = concat!("weather-scrape/", env!("CARGO_PKG_VERSION"));

/// Client for the forecast api, one blocking GET per forecast
pub struct ForecastApi {
    agent: Agent,
    api_base: String,
    api_key: String,
}

impl ForecastApi {
    /// Returns a new ForecastApi ready to fetch forecasts
    ///
    /// # Arguments
    ///
    /// * 'api_base' - base url of the api, the key and location are appended to it
    /// * 'api_key' - the api key, part of the request path
    /// * 'timeout' - global timeout for a request
    pub fn new(api_base: &str, api_key: &str, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .user_agent(USER_AGENT)
            .build();

        let agent = config.into();

        Self { agent, api_base: api_base.to_string(), api_key: api_key.to_string() }
    }

    /// Builds the request url for a location
    ///
    /// # Arguments
    ///
    /// * 'location' - point to get a forecast for
    pub fn url(&self, location: &Location) -> String {
        let sep = if self.api_base.ends_with('/') { "" } else { "/" };
        format!("{}{}{}/{}", self.api_base, sep, self.api_key, location)
    }

    /// Fetches the raw forecast document for a location.
    /// There is no retry, any transport error or a status other than 200 is returned as is.
    ///
    /// # Arguments
    ///
    /// * 'location' - point to get a forecast for
    pub fn fetch(&self, location: &Location) -> Result<Vec<u8>, ForecastError> {
        let url = self.url(location);
        debug!("requesting forecast from {}", url.replace(&self.api_key, "<key>"));

        let mut response = self.agent
            .get(url.as_str())
            .call()?;

        if response.status() != StatusCode::OK {
            return Err(ForecastError::Status(response.status().as_u16()));
        }

        let body = response.body_mut().read_to_vec()?;
        info!("fetched forecast for {}, {} bytes", location, body.len());

        Ok(body)
    }
}
