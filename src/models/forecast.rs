use std::fmt;
use chrono::DateTime;

/// One hour of the basic variant: timestamp and apparent temperature
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRow {
    pub time: i64,
    pub apparent_temperature: f64,
}

/// One hour of the detailed variant, fields in the order they are written
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedRow {
    pub apparent_temperature: f64,
    pub time: i64,
    pub icon: String,
    pub cloud_cover: f64,
}

/// Sunrise and sunset of the first forecast day, Unix timestamps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunTimes {
    pub sunrise: i64,
    pub sunset: i64,
}

impl fmt::Display for SunTimes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let render = |ts: i64| {
            DateTime::from_timestamp(ts, 0)
                .map(|d| d.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| ts.to_string())
        };
        write!(f, "sunrise {}, sunset {}", render(self.sunrise), render(self.sunset))
    }
}

/// Result of an extraction, shaped by the requested layout
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Hourly(Vec<HourlyRow>),
    Detailed { rows: Vec<DetailedRow>, sun: SunTimes },
}

/// Formats a float the way the CSV output expects it, shortest round trip
/// representation but always with a decimal point for whole numbers
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}
