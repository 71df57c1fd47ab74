//! Configuration constants, input validation, and endpoint URL building.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{HarvesterError, Result};

/// Base URL for the NWIS instantaneous values service (station list source).
pub const STATION_LIST_BASE_URL: &str = "https://nwis.waterservices.usgs.gov/nwis/iv";

/// Base URL for the NWIS site inventory pages (per-station details source).
pub const INVENTORY_BASE_URL: &str = "https://waterdata.usgs.gov/nwis/inventory";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Response format requested from the station list service.
///
/// RDB is the USGS tab-delimited text format; the station list lives in its
/// comment header.
pub const RDB_FORMAT: &str = "rdb";

/// NWIS parameter codes selecting which series a site must report to be
/// listed: 00060 (discharge) and 00065 (gage height).
///
/// Only the comment header of the response is parsed, so the series values
/// themselves are never consumed.
pub const PARAMETER_CODES: &str = "00060,00065";

/// State code pattern: exactly two ASCII letters.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static STATE_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2}$").expect("valid regex"));

/// Validate a state code.
///
/// # Arguments
/// * `state` - The state code to validate (e.g., "az", "NY")
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(HarvesterError::InvalidStateCode)` if invalid
///
/// # Examples
/// ```
/// use streamgage_harvester::config::validate_state_code;
///
/// assert!(validate_state_code("az").is_ok());
/// assert!(validate_state_code("NY").is_ok());
/// assert!(validate_state_code("arizona").is_err());
/// ```
pub fn validate_state_code(state: &str) -> Result<()> {
    if STATE_CODE_PATTERN.is_match(state) {
        Ok(())
    } else {
        Err(HarvesterError::InvalidStateCode(state.to_string()))
    }
}

/// Endpoint base URLs for the two NWIS services.
///
/// Defaults to the public USGS hosts; tests point both at a mock server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Base URL of the station list service.
    pub station_list_base: String,

    /// Base URL of the site inventory pages.
    pub inventory_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            station_list_base: STATION_LIST_BASE_URL.to_string(),
            inventory_base: INVENTORY_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Build the station list URL for a state.
    ///
    /// # Arguments
    /// * `state` - The state code (should be validated with
    ///   `validate_state_code` first)
    ///
    /// # Panics
    /// Debug builds panic if `state` doesn't match the expected format.
    pub fn station_list_url(&self, state: &str) -> String {
        debug_assert!(
            STATE_CODE_PATTERN.is_match(state),
            "state should be validated before calling station_list_url"
        );
        format!(
            "{}?format={RDB_FORMAT}&stateCd={state}&parameterCd={PARAMETER_CODES}&siteStatus=all",
            self.station_list_base
        )
    }

    /// Build the inventory page URL for a station.
    ///
    /// # Arguments
    /// * `location_id` - The monitoring location ID (e.g., "09504500")
    pub fn inventory_url(&self, location_id: &str) -> String {
        debug_assert!(
            !location_id.is_empty(),
            "location_id should never be empty"
        );
        format!(
            "{}?site_no={location_id}&agency_cd=USGS",
            self.inventory_base
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_state_code_valid() {
        assert!(validate_state_code("az").is_ok());
        assert!(validate_state_code("ny").is_ok());
        assert!(validate_state_code("CA").is_ok());
        assert!(validate_state_code("Wv").is_ok());
    }

    #[test]
    fn test_validate_state_code_invalid() {
        assert!(validate_state_code("").is_err());
        assert!(validate_state_code("a").is_err());
        assert!(validate_state_code("azz").is_err());
        assert!(validate_state_code("a1").is_err());
        assert!(validate_state_code("a z").is_err());
    }

    #[test]
    fn test_station_list_url() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.station_list_url("az"),
            "https://nwis.waterservices.usgs.gov/nwis/iv?format=rdb&stateCd=az&parameterCd=00060,00065&siteStatus=all"
        );
    }

    #[test]
    fn test_inventory_url() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.inventory_url("09504500"),
            "https://waterdata.usgs.gov/nwis/inventory?site_no=09504500&agency_cd=USGS"
        );
    }

    #[test]
    fn test_endpoints_override() {
        let endpoints = Endpoints {
            station_list_base: "http://localhost:8080/nwis/iv".to_string(),
            inventory_base: "http://localhost:8080/nwis/inventory".to_string(),
        };
        assert!(endpoints
            .station_list_url("az")
            .starts_with("http://localhost:8080/nwis/iv?"));
        assert!(endpoints
            .inventory_url("09504500")
            .starts_with("http://localhost:8080/nwis/inventory?"));
    }
}
