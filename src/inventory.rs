//! Station detail extraction from NWIS inventory pages.
//!
//! An inventory page carries a `stationTable` container whose `<dd>` entries
//! describe the station in loosely-structured prose, e.g.:
//!
//! ```text
//! Latitude  34°51'57",   Longitude  111°46'21"   NAD83
//! Yavapai County, Arizona,  Hydrologic Unit 15060202
//! Drainage area: 355  square miles
//! Datum of gage: 3,644.61 feet above   NGVD29.
//! ```
//!
//! Each field group has its own marker substring and its own pattern, so a
//! page that omits a section (older station types do) or phrases one entry
//! unexpectedly degrades that field group only. Nothing in this module
//! fails the station, let alone the batch.

use regex::Regex;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::config::Endpoints;
use crate::error::{HarvesterError, Result};
use crate::http::{bytes_to_string, download_bytes};
use crate::types::StationDetail;

/// Selector for the description entries inside the station table.
#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static STATION_TABLE_ENTRIES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#stationTable dd").expect("valid selector"));

/// Latitude/longitude entry: two degree-minute-second strings followed by
/// the coordinate datum token.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LAT_LONG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"Latitude\s{1,2}(?P<lat>[0-9]{1,3}°[0-9]{1,3}'[0-9.]{1,5}"),\s{1,3}Longitude\s{1,2}(?P<long>[0-9]{1,3}°[0-9]{1,3}'[0-9.]{1,5}")\s{1,3}(?P<datum>[A-Za-z0-9]+)"#,
    )
    .expect("valid regex")
});

/// County name: everything up to the comma preceding the rest of the
/// location phrase, which must end in a hydrologic unit code.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static COUNTY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<county>[A-Za-z\s-]+),.+Hydrologic Unit [0-9]+").expect("valid regex")
});

/// Hydrologic unit code. Kept separate from `COUNTY_PATTERN` so a county
/// mismatch cannot take the unit code down with it.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HYDROLOGIC_UNIT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z\s-]+,.+Hydrologic Unit (?P<huc>[0-9]+)").expect("valid regex")
});

/// Drainage area in square miles, possibly with thousands separators.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DRAINAGE_AREA_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Drainage area:\s+(?P<area>[0-9.,]+)\s+square miles").expect("valid regex")
});

/// Gage datum: elevation in feet plus the single datum token after "above".
/// Multi-word datum names are truncated to their first token; the token is
/// the datum label (e.g. NGVD29) on every current page layout.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static GAGE_DATUM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Datum of gage:\s+(?P<elevation>[0-9.,]+)\s+feet above\s+(?P<datum>[A-Za-z0-9]+)")
        .expect("valid regex")
});

/// Download and parse a station's inventory page.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `endpoints` - Endpoint base URLs
/// * `location_id` - The monitoring location ID (e.g., "09504500")
///
/// # Returns
/// The scraped details plus any non-fatal warnings. Only a transport
/// failure is an error; every parse-level problem degrades to an absent
/// field and a warning.
pub fn scrape_station(
    client: &Client,
    endpoints: &Endpoints,
    location_id: &str,
) -> Result<(StationDetail, Vec<String>)> {
    tracing::info!(location_id, "Scraping inventory page");

    let url = endpoints.inventory_url(location_id);
    let bytes = download_bytes(client, &url).map_err(|e| {
        if let HarvesterError::Http(source) = e {
            HarvesterError::InventoryDownload {
                location_id: location_id.to_string(),
                source,
            }
        } else {
            e
        }
    })?;

    let html = bytes_to_string(&bytes, &format!("inventory page for {location_id}"));
    Ok(parse_inventory(&html))
}

/// Parse an inventory page into station details.
///
/// Never fails: a missing station table yields the all-absent detail, and
/// each field group degrades independently.
///
/// # Returns
/// `(detail, warnings)` where warnings are non-fatal extraction problems.
pub fn parse_inventory(html: &str) -> (StationDetail, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let entries = description_entries(html, &mut warnings);
    let mut detail = StationDetail::default();

    // Latitude / longitude / coordinate datum
    match first_containing(&entries, "Latitude") {
        Some(entry) => match extract_lat_long(entry) {
            Some((lat, long, datum)) => {
                detail.latitude = Some(lat);
                detail.longitude = Some(long);
                detail.lat_long_type = Some(datum);
            }
            None => warn(&mut warnings, format!("could not parse lat/long: {entry}")),
        },
        None => warn(&mut warnings, "no lat/long entry on page".to_string()),
    }

    // County and hydrologic unit share an entry but parse independently
    match first_containing(&entries, "Hydrologic Unit") {
        Some(entry) => {
            match extract_county(entry) {
                Some(county) => detail.county = Some(county),
                None => warn(&mut warnings, format!("could not parse county: {entry}")),
            }
            match extract_hydrologic_unit(entry) {
                Some(huc) => detail.hydrologic_unit = Some(huc),
                None => warn(
                    &mut warnings,
                    format!("could not parse hydrologic unit: {entry}"),
                ),
            }
        }
        None => warn(
            &mut warnings,
            "no county/hydrologic unit entry on page".to_string(),
        ),
    }

    // Drainage area
    match first_containing(&entries, "Drainage area") {
        Some(entry) => match extract_drainage_area(entry) {
            Some(area) => detail.drainage_area = Some(area),
            None => warn(
                &mut warnings,
                format!("could not parse drainage area: {entry}"),
            ),
        },
        None => warn(&mut warnings, "no drainage area entry on page".to_string()),
    }

    // Gage datum (elevation) and datum type
    match first_containing(&entries, "Datum of gage") {
        Some(entry) => match extract_gage_datum(entry) {
            Some((elevation, datum)) => {
                detail.datum_of_gage = Some(elevation);
                detail.datum_type = Some(datum);
            }
            None => warn(
                &mut warnings,
                format!("could not parse datum of gage: {entry}"),
            ),
        },
        None => warn(&mut warnings, "no datum of gage entry on page".to_string()),
    }

    (detail, warnings)
}

/// Collect the text of every description entry in the station table.
///
/// A missing container is a structural absence, not an error: it is logged
/// and an empty entry list is returned so every field defaults to absent.
/// Entry text is normalized by collapsing non-breaking spaces, which the
/// pages use inconsistently and which break the patterns otherwise.
fn description_entries(html: &str, warnings: &mut Vec<String>) -> Vec<String> {
    let document = Html::parse_document(html);
    let entries: Vec<String> = document
        .select(&STATION_TABLE_ENTRIES)
        .map(|entry| entry.text().collect::<String>().replace('\u{a0}', " "))
        .collect();

    if entries.is_empty() {
        warn(
            warnings,
            "could not find stationTable entries on inventory page".to_string(),
        );
    }

    entries
}

/// First entry containing the marker substring, if any.
fn first_containing<'a>(entries: &'a [String], marker: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|entry| entry.contains(marker))
        .map(String::as_str)
}

/// Extract latitude, longitude, and coordinate datum from a lat/long entry.
fn extract_lat_long(entry: &str) -> Option<(String, String, String)> {
    let caps = LAT_LONG_PATTERN.captures(entry)?;
    Some((
        caps["lat"].to_string(),
        caps["long"].to_string(),
        caps["datum"].to_string(),
    ))
}

/// Extract the county name from a county/hydrologic unit entry.
fn extract_county(entry: &str) -> Option<String> {
    let caps = COUNTY_PATTERN.captures(entry)?;
    Some(caps["county"].trim().to_string())
}

/// Extract the hydrologic unit code from a county/hydrologic unit entry.
fn extract_hydrologic_unit(entry: &str) -> Option<String> {
    let caps = HYDROLOGIC_UNIT_PATTERN.captures(entry)?;
    Some(caps["huc"].to_string())
}

/// Extract the drainage area from a drainage entry, separators stripped.
fn extract_drainage_area(entry: &str) -> Option<String> {
    let caps = DRAINAGE_AREA_PATTERN.captures(entry)?;
    Some(caps["area"].replace(',', ""))
}

/// Extract the gage elevation (separators stripped) and datum token from a
/// datum entry.
fn extract_gage_datum(entry: &str) -> Option<(String, String)> {
    let caps = GAGE_DATUM_PATTERN.captures(entry)?;
    Some((caps["elevation"].replace(',', ""), caps["datum"].to_string()))
}

/// Log a non-fatal extraction problem and record it for the caller.
fn warn(warnings: &mut Vec<String>, message: String) {
    tracing::warn!(message = %message, "Inventory extraction degraded");
    warnings.push(message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FULL_PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>USGS 09504500 OAK CREEK NEAR SEDONA, AZ</title></head>
<body>
<div id="stationTable">
<h2>OAK CREEK NEAR SEDONA, AZ (09504500)</h2>
<dl>
<dt>DESCRIPTION:</dt>
<dd>Latitude&nbsp;34&#176;51'57",&nbsp;&nbsp;&nbsp;Longitude&nbsp;111&#176;46'21"&nbsp;&nbsp;&nbsp;NAD83</dd>
<dd>Yavapai County, Arizona,&nbsp; Hydrologic Unit 15060202</dd>
<dd>Drainage area: 355&nbsp;square miles</dd>
<dd>Datum of gage: 3,644.61 feet above&nbsp;&nbsp;&nbsp;NGVD29.</dd>
</dl>
</div>
</body></html>"#;

    #[test]
    fn test_parse_inventory_full_page() {
        let (detail, warnings) = parse_inventory(FULL_PAGE);

        assert_eq!(detail.latitude.as_deref(), Some(r#"34°51'57""#));
        assert_eq!(detail.longitude.as_deref(), Some(r#"111°46'21""#));
        assert_eq!(detail.lat_long_type.as_deref(), Some("NAD83"));
        assert_eq!(detail.county.as_deref(), Some("Yavapai County"));
        assert_eq!(detail.hydrologic_unit.as_deref(), Some("15060202"));
        assert_eq!(detail.drainage_area.as_deref(), Some("355"));
        assert_eq!(detail.datum_of_gage.as_deref(), Some("3644.61"));
        assert_eq!(detail.datum_type.as_deref(), Some("NGVD29"));
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn test_parse_inventory_missing_container() {
        let (detail, warnings) = parse_inventory("<html><body><p>No table here</p></body></html>");

        assert_eq!(detail, StationDetail::default());
        assert!(!warnings.is_empty());
    }

    #[test]
    fn test_parse_inventory_missing_drainage_leaves_others_intact() {
        let page = r#"<div id="stationTable"><dl>
<dd>Latitude  34°51'57",   Longitude  111°46'21"   NAD83</dd>
<dd>Yavapai County, Arizona,  Hydrologic Unit 15060202</dd>
</dl></div>"#;

        let (detail, warnings) = parse_inventory(page);

        assert_eq!(detail.latitude.as_deref(), Some(r#"34°51'57""#));
        assert_eq!(detail.county.as_deref(), Some("Yavapai County"));
        assert_eq!(detail.drainage_area, None);
        assert_eq!(detail.datum_of_gage, None);
        assert!(warnings.iter().any(|w| w.contains("drainage area")));
    }

    #[test]
    fn test_parse_inventory_unexpected_county_phrasing_degrades_county_only() {
        // No "<county>," prefix before the hydrologic unit phrase
        let page = r#"<div id="stationTable"><dl>
<dd>Hydrologic Unit 15060202</dd>
</dl></div>"#;

        let (detail, warnings) = parse_inventory(page);

        assert_eq!(detail.county, None);
        assert_eq!(detail.hydrologic_unit, None);
        assert!(warnings.iter().any(|w| w.contains("county")));
    }

    #[test]
    fn test_extract_lat_long_spec_example() {
        let entry = r#"Latitude  34°16'42", Longitude 117°18'52" NAD83"#;
        let (lat, long, datum) = extract_lat_long(entry).expect("should match");

        assert_eq!(lat, r#"34°16'42""#);
        assert_eq!(long, r#"117°18'52""#);
        assert_eq!(datum, "NAD83");
    }

    #[test]
    fn test_extract_lat_long_fractional_seconds() {
        let entry = r#"Latitude 34°51'57.3",  Longitude 111°46'21.9"  NAD27"#;
        let (lat, long, datum) = extract_lat_long(entry).expect("should match");

        assert_eq!(lat, r#"34°51'57.3""#);
        assert_eq!(long, r#"111°46'21.9""#);
        assert_eq!(datum, "NAD27");
    }

    #[test]
    fn test_extract_county_and_hydrologic_unit() {
        let entry = "San Bernardino County, California,  Hydrologic Unit 18100200";

        assert_eq!(
            extract_county(entry).as_deref(),
            Some("San Bernardino County")
        );
        assert_eq!(extract_hydrologic_unit(entry).as_deref(), Some("18100200"));
    }

    #[test]
    fn test_extract_drainage_area_strips_separators() {
        assert_eq!(
            extract_drainage_area("Drainage area: 1,234.5 square miles").as_deref(),
            Some("1234.5")
        );
        assert_eq!(
            extract_drainage_area("Drainage area: 355  square miles").as_deref(),
            Some("355")
        );
        assert_eq!(extract_drainage_area("Drainage area: unknown"), None);
    }

    #[test]
    fn test_extract_gage_datum_truncates_to_first_token() {
        let (elevation, datum) =
            extract_gage_datum("Datum of gage: 985.32 feet above sea level datum")
                .expect("should match");

        assert_eq!(elevation, "985.32");
        assert_eq!(datum, "sea");
    }

    #[test]
    fn test_extract_gage_datum_strips_separators() {
        let (elevation, datum) =
            extract_gage_datum("Datum of gage: 3,644.61 feet above   NGVD29.")
                .expect("should match");

        assert_eq!(elevation, "3644.61");
        assert_eq!(datum, "NGVD29");
    }

    #[test]
    fn test_first_containing_picks_first_match() {
        let entries = vec![
            "nothing relevant".to_string(),
            "Drainage area: 10 square miles".to_string(),
            "Drainage area: 20 square miles".to_string(),
        ];

        assert_eq!(
            first_containing(&entries, "Drainage area"),
            Some("Drainage area: 10 square miles")
        );
        assert_eq!(first_containing(&entries, "Latitude"), None);
    }
}
