//! Core data types for the harvester.

/// Identity of a monitoring station, parsed from the station list.
///
/// Immutable once created; `location_id` is always non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationIdentity {
    /// Operating agency code (usually "USGS").
    pub agency: String,

    /// Monitoring location ID (e.g., "09504500").
    pub location_id: String,

    /// Station name (e.g., "OAK CREEK NEAR SEDONA, AZ").
    pub name: String,
}

/// Metadata scraped from a station's inventory page.
///
/// Every field is independently optional: the inventory pages omit sections
/// inconsistently across station types, and a failure to extract one field
/// must never discard the others. `Default` is the all-absent value, used
/// when the whole page cannot be fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationDetail {
    /// Latitude as a degree-minute-second string (e.g., `34°51'57"`).
    pub latitude: Option<String>,

    /// Longitude as a degree-minute-second string.
    pub longitude: Option<String>,

    /// Coordinate datum token (e.g., "NAD83").
    pub lat_long_type: Option<String>,

    /// County name.
    pub county: Option<String>,

    /// Hydrologic unit code (watershed classification).
    pub hydrologic_unit: Option<String>,

    /// Drainage area in square miles, thousands separators stripped.
    pub drainage_area: Option<String>,

    /// Gage datum (reference elevation) in feet, separators stripped.
    pub datum_of_gage: Option<String>,

    /// Vertical datum token (e.g., "NGVD29").
    pub datum_type: Option<String>,
}

/// One output row: a station's identity merged with its scraped details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRecord {
    pub identity: StationIdentity,
    pub detail: StationDetail,
}

impl StationRecord {
    /// Merge an identity and its scraped details into a record.
    #[must_use]
    pub fn merge(identity: StationIdentity, detail: StationDetail) -> Self {
        Self { identity, detail }
    }
}

/// Result of harvesting one state: all records in discovery order, plus
/// the non-fatal warnings collected along the way.
#[derive(Debug, Clone)]
pub struct Harvest {
    /// State code the harvest was run for (lowercased).
    pub state: String,

    /// Station records in the order they appeared in the station list.
    pub records: Vec<StationRecord>,

    /// Non-fatal diagnostics, prefixed with the location ID they concern.
    pub warnings: Vec<String>,
}
