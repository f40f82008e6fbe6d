use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use crate::csv_output::Layout;
use crate::models::forecast::{DetailedRow, Extracted, HourlyRow, SunTimes};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("json document error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("forecast document is not a json object")]
    NotAnObject,
    #[error("missing key: {0}")]
    MissingKey(String),
    #[error("wrong type at {path}, expected {expected}")]
    WrongType { path: String, expected: &'static str },
}

/// Which top level keys of the forecast document to keep
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(try_from = "RawKeys")]
pub enum KeySelection {
    #[default]
    All,
    Keys(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKeys {
    Word(String),
    List(Vec<String>),
}

impl TryFrom<RawKeys> for KeySelection {
    type Error = String;

    fn try_from(raw: RawKeys) -> Result<Self, Self::Error> {
        match raw {
            RawKeys::Word(w) if w == "all" => Ok(KeySelection::All),
            RawKeys::Word(w) => Err(format!("keys must be \"all\" or a list of key names, got \"{}\"", w)),
            RawKeys::List(keys) => Ok(KeySelection::Keys(keys)),
        }
    }
}

/// Parses a raw forecast response and runs the row extraction for the given layout.
/// Everything is extracted before returning, so a lookup failure never leaves
/// partial results behind.
///
/// # Arguments
///
/// * 'body' - raw response bytes
/// * 'keys' - top level keys to keep
/// * 'layout' - decides which rows to pull out
pub fn extract(body: &[u8], keys: &KeySelection, layout: Layout) -> Result<Extracted, ExtractError> {
    let doc = select_keys(body, keys)?;

    match layout {
        Layout::Columns => Ok(Extracted::Hourly(hourly_rows(&doc)?)),
        Layout::Wide => {
            let sun = sun_times(&doc)?;
            let rows = detailed_rows(&doc)?;
            Ok(Extracted::Detailed { rows, sun })
        }
    }
}

/// Parses the response and returns either the whole document or a new one
/// restricted to the requested keys
///
/// # Arguments
///
/// * 'body' - raw response bytes
/// * 'keys' - top level keys to keep
pub fn select_keys(body: &[u8], keys: &KeySelection) -> Result<Map<String, Value>, ExtractError> {
    let doc = match serde_json::from_slice::<Value>(body)? {
        Value::Object(map) => map,
        _ => return Err(ExtractError::NotAnObject),
    };

    match keys {
        KeySelection::All => Ok(doc),
        KeySelection::Keys(keys) => {
            let mut selected = Map::new();
            for key in keys {
                let value = doc.get(key).ok_or_else(|| ExtractError::MissingKey(key.clone()))?;
                selected.insert(key.clone(), value.clone());
            }
            Ok(selected)
        }
    }
}

/// Returns time and apparent temperature for every hourly record, in document order
///
/// # Arguments
///
/// * 'doc' - the (possibly projected) forecast document
pub fn hourly_rows(doc: &Map<String, Value>) -> Result<Vec<HourlyRow>, ExtractError> {
    period_data(doc, "hourly")?
        .iter()
        .enumerate()
        .map(|(i, entry)| -> Result<HourlyRow, ExtractError> {
            let path = format!("hourly.data[{}]", i);
            Ok(HourlyRow {
                time: get_i64(entry, &path, "time")?,
                apparent_temperature: get_f64(entry, &path, "apparentTemperature")?,
            })
        })
        .collect()
}

/// Same as hourly_rows but also pulls icon and cloud cover, all of them required
///
/// # Arguments
///
/// * 'doc' - the (possibly projected) forecast document
pub fn detailed_rows(doc: &Map<String, Value>) -> Result<Vec<DetailedRow>, ExtractError> {
    period_data(doc, "hourly")?
        .iter()
        .enumerate()
        .map(|(i, entry)| -> Result<DetailedRow, ExtractError> {
            let path = format!("hourly.data[{}]", i);
            Ok(DetailedRow {
                apparent_temperature: get_f64(entry, &path, "apparentTemperature")?,
                time: get_i64(entry, &path, "time")?,
                icon: get_str(entry, &path, "icon")?.to_string(),
                cloud_cover: get_f64(entry, &path, "cloudCover")?,
            })
        })
        .collect()
}

/// Sunrise and sunset for the first daily record
///
/// # Arguments
///
/// * 'doc' - the (possibly projected) forecast document
pub fn sun_times(doc: &Map<String, Value>) -> Result<SunTimes, ExtractError> {
    let first = period_data(doc, "daily")?
        .first()
        .ok_or_else(|| ExtractError::MissingKey("daily.data[0]".to_string()))?;

    Ok(SunTimes {
        sunrise: get_i64(first, "daily.data[0]", "sunriseTime")?,
        sunset: get_i64(first, "daily.data[0]", "sunsetTime")?,
    })
}

fn period_data<'a>(doc: &'a Map<String, Value>, period: &str) -> Result<&'a Vec<Value>, ExtractError> {
    let block = doc.get(period).ok_or_else(|| ExtractError::MissingKey(period.to_string()))?;
    let data_path = format!("{}.data", period);

    match block.get("data") {
        Some(Value::Array(data)) => Ok(data),
        Some(_) => Err(ExtractError::WrongType { path: data_path, expected: "array" }),
        None => Err(ExtractError::MissingKey(data_path)),
    }
}

fn get_field<'a>(entry: &'a Value, path: &str, key: &str) -> Result<&'a Value, ExtractError> {
    entry.get(key).ok_or_else(|| ExtractError::MissingKey(format!("{}.{}", path, key)))
}

fn get_i64(entry: &Value, path: &str, key: &str) -> Result<i64, ExtractError> {
    let value = get_field(entry, path, key)?;

    // Timestamps occasionally come back as floats, truncate like an integer cast
    value.as_i64()
        .or_else(|| value.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64))
        .ok_or_else(|| ExtractError::WrongType { path: format!("{}.{}", path, key), expected: "integer" })
}

fn get_f64(entry: &Value, path: &str, key: &str) -> Result<f64, ExtractError> {
    get_field(entry, path, key)?
        .as_f64()
        .ok_or_else(|| ExtractError::WrongType { path: format!("{}.{}", path, key), expected: "number" })
}

fn get_str<'a>(entry: &'a Value, path: &str, key: &str) -> Result<&'a str, ExtractError> {
    get_field(entry, path, key)?
        .as_str()
        .ok_or_else(|| ExtractError::WrongType { path: format!("{}.{}", path, key), expected: "string" })
}
