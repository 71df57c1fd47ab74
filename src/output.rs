//! CSV output for harvested station records.
//!
//! The column set is fixed: every row carries all eleven columns, with
//! absent detail fields written as empty cells, so the schema is stable
//! regardless of how much scraping succeeded for any given station.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::types::{Harvest, StationRecord};

/// Default directory for output files.
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Column names, in output order. Written explicitly so that the header is
/// present even for an empty harvest.
const CSV_HEADER: [&str; 11] = [
    "agency",
    "location_id",
    "name",
    "latitude",
    "longitude",
    "lat_long_type",
    "county",
    "hydrologic_unit",
    "drainage_area",
    "datum_of_gage",
    "datum_type",
];

/// One CSV row. Field order matches `CSV_HEADER`.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    agency: &'a str,
    location_id: &'a str,
    name: &'a str,
    latitude: Option<&'a str>,
    longitude: Option<&'a str>,
    lat_long_type: Option<&'a str>,
    county: Option<&'a str>,
    hydrologic_unit: Option<&'a str>,
    drainage_area: Option<&'a str>,
    datum_of_gage: Option<&'a str>,
    datum_type: Option<&'a str>,
}

impl<'a> From<&'a StationRecord> for CsvRow<'a> {
    fn from(record: &'a StationRecord) -> Self {
        Self {
            agency: &record.identity.agency,
            location_id: &record.identity.location_id,
            name: &record.identity.name,
            latitude: record.detail.latitude.as_deref(),
            longitude: record.detail.longitude.as_deref(),
            lat_long_type: record.detail.lat_long_type.as_deref(),
            county: record.detail.county.as_deref(),
            hydrologic_unit: record.detail.hydrologic_unit.as_deref(),
            drainage_area: record.detail.drainage_area.as_deref(),
            datum_of_gage: record.detail.datum_of_gage.as_deref(),
            datum_type: record.detail.datum_type.as_deref(),
        }
    }
}

/// Build the output file name for a harvest.
///
/// # Examples
/// ```
/// use streamgage_harvester::output::output_file_name;
///
/// let date = chrono::NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
/// assert_eq!(output_file_name("az", date), "usgs_streamgages_az_20260830.csv");
/// ```
#[must_use]
pub fn output_file_name(state: &str, date: chrono::NaiveDate) -> String {
    format!("usgs_streamgages_{state}_{}.csv", date.format("%Y%m%d"))
}

/// Serialize records to CSV text, header included.
///
/// # Arguments
/// * `records` - Station records in output order
///
/// # Returns
/// The CSV document as a string
pub fn records_to_csv(records: &[StationRecord]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Save a harvest to a date-stamped CSV file.
///
/// # Arguments
/// * `harvest` - The harvest to save
/// * `output_dir` - Output directory (default: `data/`, created if missing)
///
/// # Returns
/// Path to the written file
pub fn save_csv(harvest: &Harvest, output_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    fs::create_dir_all(&dir)?;

    let file_name = output_file_name(&harvest.state, chrono::Local::now().date_naive());
    let path = dir.join(file_name);

    fs::write(&path, records_to_csv(&harvest.records)?)?;
    tracing::info!(path = %path.display(), records = harvest.records.len(), "Saved CSV");

    Ok(path)
}
