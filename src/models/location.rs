use std::fmt;
use std::str::FromStr;
use serde::Deserialize;
use crate::errors::LocationError;

/// A point given in decimal degrees, written as `<lat>,<lon>` in request urls
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(try_from = "String")]
pub struct Location {
    pub lat: f64,
    pub long: f64,
}

impl Location {
    /// Returns a new Location if the coordinates are within range
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude, -90 to 90
    /// * 'long' - longitude, -180 to 180
    pub fn new(lat: f64, long: f64) -> Result<Location, LocationError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&long) {
            return Err(LocationError::OutOfRange(format!("{},{}", lat, long)));
        }

        Ok(Location { lat, long })
    }
}

impl FromStr for Location {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || LocationError::Malformed(s.to_string());

        if s.chars().any(char::is_whitespace) {
            return Err(malformed());
        }

        let (lat, long) = s.split_once(',').ok_or_else(malformed)?;
        if long.contains(',') {
            return Err(malformed());
        }

        let lat = lat.parse::<f64>().map_err(|_| malformed())?;
        let long = long.parse::<f64>().map_err(|_| malformed())?;
        if !lat.is_finite() || !long.is_finite() {
            return Err(malformed());
        }

        Location::new(lat, long).map_err(|_| LocationError::OutOfRange(s.to_string()))
    }
}

impl TryFrom<String> for Location {
    type Error = LocationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.long)
    }
}
