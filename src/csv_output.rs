use std::path::Path;
use csv::{QuoteStyle, WriterBuilder};
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;
use crate::models::forecast::{format_float, DetailedRow, Extracted, HourlyRow};

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shape of the output file
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// One `time,apparentTemperature` record per hour
    #[default]
    Columns,
    /// A single fully quoted record holding one tuple per hour
    Wide,
}

/// Writes extracted rows to the given file, replacing whatever was there.
/// Returns the number of hourly rows written.
///
/// # Arguments
///
/// * 'path' - output file
/// * 'extracted' - rows from the extraction step
pub fn write_extracted(path: &Path, extracted: &Extracted) -> Result<usize, OutputError> {
    match extracted {
        Extracted::Hourly(rows) => write_columns(path, rows),
        Extracted::Detailed { rows, .. } => write_wide(path, rows),
    }
}

/// Writes one `time,temperature` record per row, quoting only where needed
///
/// # Arguments
///
/// * 'path' - output file, truncated if it exists
/// * 'rows' - hourly rows
pub fn write_columns(path: &Path, rows: &[HourlyRow]) -> Result<usize, OutputError> {
    debug!("writing {} rows as columns to {}", rows.len(), path.display());

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    for row in rows {
        wtr.write_record([row.time.to_string(), format_float(row.apparent_temperature)])?;
    }
    wtr.flush()?;

    info!("wrote {} hourly rows to {}", rows.len(), path.display());
    Ok(rows.len())
}

/// Writes all rows as one record, every field quoted and holding the tuple
/// `(temperature, time, 'icon', cloud cover)`
///
/// # Arguments
///
/// * 'path' - output file, truncated if it exists
/// * 'rows' - detailed hourly rows
pub fn write_wide(path: &Path, rows: &[DetailedRow]) -> Result<usize, OutputError> {
    debug!("writing {} rows as a single wide record to {}", rows.len(), path.display());

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .from_path(path)?;

    // no rows, no record: leave the file empty
    if !rows.is_empty() {
        wtr.write_record(rows.iter().map(tuple_field))?;
    }
    wtr.flush()?;

    info!("wrote {} hourly tuples to {}", rows.len(), path.display());
    Ok(rows.len())
}

fn tuple_field(row: &DetailedRow) -> String {
    format!("({}, {}, '{}', {})",
            format_float(row.apparent_temperature),
            row.time,
            row.icon,
            format_float(row.cloud_cover))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn hourly(time: i64, temp: f64) -> HourlyRow {
        HourlyRow { time, apparent_temperature: temp }
    }

    #[test]
    fn single_row_example() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weatherdata1.csv");

        let n = write_columns(&path, &[hourly(1000, 72.5)]).unwrap();
        assert_eq!(n, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "1000,72.5\n");
    }

    #[test]
    fn round_trip_through_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![hourly(1000, 72.5), hourly(4600, 70.0), hourly(8200, -1.75)];

        write_columns(&path, &rows).unwrap();

        let mut rdr = csv::ReaderBuilder::new().has_headers(false).from_path(&path).unwrap();
        let read: Vec<HourlyRow> = rdr.records()
            .map(|r| {
                let r = r.unwrap();
                hourly(r[0].parse().unwrap(), r[1].parse().unwrap())
            })
            .collect();
        assert_eq!(read, rows);
    }

    #[test]
    fn overwrites_instead_of_appending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "old,content\nmore,lines\nand,more\n").unwrap();

        write_columns(&path, &[hourly(1, 2.0)]).unwrap();
        let first = fs::read(&path).unwrap();
        write_columns(&path, &[hourly(1, 2.0)]).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, b"1,2.0\n");
        assert_eq!(first, second);
    }

    #[test]
    fn wide_record_quotes_every_tuple() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.csv");
        let rows = vec![
            DetailedRow { apparent_temperature: 72.5, time: 1000, icon: "rain".to_string(), cloud_cover: 0.5 },
            DetailedRow { apparent_temperature: 70.0, time: 4600, icon: "cloudy".to_string(), cloud_cover: 1.0 },
        ];

        let n = write_extracted(&path, &Extracted::Detailed {
            rows,
            sun: crate::models::forecast::SunTimes { sunrise: 0, sunset: 1 },
        }).unwrap();

        assert_eq!(n, 2);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "\"(72.5, 1000, 'rain', 0.5)\",\"(70.0, 4600, 'cloudy', 1.0)\"\n"
        );
    }

    #[test]
    fn wide_with_no_rows_is_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.csv");
        fs::write(&path, "stale").unwrap();

        assert_eq!(write_wide(&path, &[]).unwrap(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn layout_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Holder { layout: Layout }
        let h: Holder = toml::from_str("layout = \"wide\"").unwrap();
        assert_eq!(h.layout, Layout::Wide);
    }
}
