//! Error types for the harvester.
//!
//! Only two conditions are fatal to a run: invalid input and a failure to
//! download the region-level station list. Everything downstream of the
//! list (missing page sections, pattern mismatches, per-station fetch
//! failures) is degraded to absent fields and surfaced as warnings.

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Invalid state code format.
    #[error("Invalid state code: '{0}'. Expected a two-letter code (e.g., az)")]
    InvalidStateCode(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to download the station list for a state.
    #[error("Failed to download station list for state {state}: {source}")]
    ListDownload {
        state: String,
        #[source]
        source: reqwest::Error,
    },

    /// Failed to download a station's inventory page.
    #[error("Failed to download inventory page for station {location_id}: {source}")]
    InventoryDownload {
        location_id: String,
        #[source]
        source: reqwest::Error,
    },

    /// All retry attempts for a download were exhausted.
    #[error("Download failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;
