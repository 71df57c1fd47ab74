//! Main harvester service that ties all components together.

use crate::config::{validate_state_code, Endpoints};
use crate::error::{HarvesterError, Result};
use crate::http::{bytes_to_string, create_client, download_bytes};
use crate::inventory::scrape_station;
use crate::rdb::parse_station_list;
use crate::types::{Harvest, StationDetail, StationRecord};

/// Harvest all monitoring stations for a state.
///
/// Downloads the station list, then scrapes each station's inventory page
/// sequentially in discovery order. A failure to download the list is
/// fatal; a failure to fetch or parse any single station's page degrades
/// that station to absent details and records a warning, never aborting
/// the batch.
///
/// # Arguments
/// * `state` - Two-letter state code (e.g., "az")
/// * `endpoints` - Endpoint base URLs (use `Endpoints::default()` for the
///   public USGS hosts)
///
/// # Returns
/// A `Harvest` with one record per listed station, in discovery order.
pub fn harvest_state(state: &str, endpoints: &Endpoints) -> Result<Harvest> {
    validate_state_code(state)?;
    let state = state.to_ascii_lowercase();

    let client = create_client()?;

    // Station list failure is the only fatal download: without it there is
    // nothing to process.
    tracing::info!(state = %state, "Requesting station list");
    let url = endpoints.station_list_url(&state);
    let bytes = download_bytes(&client, &url).map_err(|e| {
        if let HarvesterError::Http(source) = e {
            HarvesterError::ListDownload {
                state: state.clone(),
                source,
            }
        } else {
            e
        }
    })?;
    let text = bytes_to_string(&bytes, &format!("station list for {state}"));

    let identities = parse_station_list(&text);
    tracing::info!(state = %state, count = identities.len(), "Parsed station list");

    let mut records = Vec::with_capacity(identities.len());
    let mut warnings: Vec<String> = Vec::new();

    for identity in identities {
        let detail = match scrape_station(&client, endpoints, &identity.location_id) {
            Ok((detail, station_warnings)) => {
                warnings.extend(
                    station_warnings
                        .into_iter()
                        .map(|w| format!("{}: {w}", identity.location_id)),
                );
                detail
            }
            Err(e) => {
                tracing::warn!(
                    location_id = %identity.location_id,
                    error = %e,
                    "Inventory fetch failed, continuing with absent details"
                );
                warnings.push(format!("{}: {e}", identity.location_id));
                StationDetail::default()
            }
        };

        records.push(StationRecord::merge(identity, detail));
    }

    Ok(Harvest {
        state,
        records,
        warnings,
    })
}
