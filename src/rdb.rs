//! Station list extraction from NWIS RDB responses.
//!
//! The RDB (tab-delimited) response opens with a comment header. Somewhere
//! in that header is a block listing every site in the response, introduced
//! by a "Data for the following ... site(s)" line and closed by a dashed
//! comment line:
//!
//! ```text
//! # Data for the following 2 site(s) are contained in this file
//! #    USGS 09504500 OAK CREEK NEAR SEDONA, AZ
//! #    USGS 09505800 WEST CLEAR CREEK NEAR CAMP VERDE, AZ
//! # -----------------------------------------------------------------
//! ```
//!
//! Only that block is consumed; the data section below it is ignored.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::StationIdentity;

/// Prefix of the line introducing the station block.
pub const STATION_BLOCK_START: &str = "# Data for the following";

/// Prefix of the dashed line terminating the station block.
pub const STATION_BLOCK_END: &str = "# ---";

/// Pattern for one station line: agency code, numeric location ID, and a
/// free-text name (place-name punctuation allowed).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static STATION_LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#\s+(?P<agency>[A-Za-z]+)\s+(?P<id>[0-9]+)\s+(?P<name>[A-Za-z0-9.,@()\s-]+)$")
        .expect("valid regex")
});

/// Parse the station block out of a raw RDB response.
///
/// Pure function of its input: lines before the start marker are discarded,
/// the scan stops at the end marker (or end of input if none is present),
/// and malformed lines inside the block are skipped without aborting the
/// scan. A missing start marker yields an empty list rather than an error.
///
/// # Arguments
/// * `text` - Raw RDB response text
///
/// # Returns
/// Station identities in encounter order. Duplicates are preserved.
pub fn parse_station_list(text: &str) -> Vec<StationIdentity> {
    let mut stations = Vec::new();
    let mut in_block = false;

    for raw_line in text.lines() {
        let line = raw_line.trim_end();

        if !in_block {
            if line.starts_with(STATION_BLOCK_START) {
                tracing::debug!(header = line, "Found station block");
                in_block = true;
            }
            continue;
        }

        if line.starts_with(STATION_BLOCK_END) {
            break;
        }

        match STATION_LINE_PATTERN.captures(line) {
            Some(caps) => stations.push(StationIdentity {
                agency: caps["agency"].to_string(),
                location_id: caps["id"].to_string(),
                name: caps["name"].trim().to_string(),
            }),
            None => {
                tracing::debug!(line, "Skipping non-station line in station block");
            }
        }
    }

    if !in_block {
        tracing::warn!("No station block marker found in RDB response");
    }

    stations
}
