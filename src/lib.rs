//! Streamgage Harvester - Collect USGS water monitoring station metadata.
//!
//! This crate downloads the list of streamgages for a US state from the
//! NWIS water services, scrapes each station's inventory page for location
//! and physical metadata, and writes the merged result to a CSV file.
//!
//! # Example
//!
//! ```
//! use streamgage_harvester::config;
//!
//! // Validate a state code
//! assert!(config::validate_state_code("az").is_ok());
//! assert!(config::validate_state_code("arizona").is_err());
//! ```
//!
//! # Architecture
//!
//! The harvester is organized into several modules:
//!
//! - [`config`]: Configuration constants, validation, and endpoint URLs
//! - [`types`]: Core data types (StationIdentity, StationDetail, ...)
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client for downloading from NWIS
//! - [`rdb`]: Station list extraction from RDB responses
//! - [`inventory`]: Station detail extraction from inventory pages
//! - [`output`]: CSV output generation
//! - [`cli`]: Command-line interface
//! - [`harvester`]: Main harvester service

pub mod cli;
pub mod config;
pub mod error;
pub mod harvester;
pub mod http;
pub mod inventory;
pub mod output;
pub mod rdb;
pub mod types;

// Re-export main functions
pub use harvester::harvest_state;

// Re-export commonly used items
pub use config::{validate_state_code, Endpoints};
pub use error::{HarvesterError, Result};
pub use types::{Harvest, StationDetail, StationIdentity, StationRecord};
