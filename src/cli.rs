//! Command-line interface for the harvester.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{validate_state_code, Endpoints};
use crate::error::{HarvesterError, Result};
use crate::harvester::harvest_state;
use crate::output::save_csv;

/// Streamgage Harvester - Collect USGS water monitoring station metadata.
#[derive(Parser)]
#[command(name = "streamgage-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch all stations for a state and write them to a CSV file.
    Fetch {
        /// Two-letter state code (e.g., az, ny, ca)
        state: String,

        /// Output directory (default: data/, created if missing)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch { state, output } => fetch_command(&state, output.as_deref()),
    }
}

/// Execute the fetch command.
fn fetch_command(state: &str, output: Option<&std::path::Path>) -> Result<()> {
    // Validate inputs before making HTTP requests
    validate_state_code(state)?;

    // Validate output directory (if specified) before downloading; the
    // default directory is created on save instead.
    if let Some(output_dir) = output {
        if !output_dir.exists() {
            return Err(HarvesterError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Output directory does not exist: {}", output_dir.display()),
            )));
        }
        if !output_dir.is_dir() {
            return Err(HarvesterError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Output path is not a directory: {}", output_dir.display()),
            )));
        }
    }

    println!(
        "{} streamgage data for state {}",
        style("Fetching").bold(),
        style(state).cyan()
    );
    println!();

    // Create progress spinner
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );

    pb.set_message("Fetching station list and scraping inventory pages...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let harvest = match harvest_state(state, &Endpoints::default()) {
        Ok(harvest) => harvest,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    println!("  Stations: {}", style(harvest.records.len()).green());
    if !harvest.warnings.is_empty() {
        println!(
            "  Warnings: {}",
            style(harvest.warnings.len()).yellow().bold()
        );
    }

    pb.set_message("Saving CSV...");

    let output_path = match save_csv(&harvest, output) {
        Ok(path) => path,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_fetch() {
        let cli = Cli::parse_from(["streamgage-harvester", "fetch", "az"]);

        let Commands::Fetch { state, output } = cli.command;
        assert_eq!(state, "az");
        assert!(output.is_none());
    }

    #[test]
    fn test_cli_parse_fetch_with_output() {
        let cli = Cli::parse_from([
            "streamgage-harvester",
            "fetch",
            "ny",
            "--output",
            "/tmp/streamgages",
        ]);

        let Commands::Fetch { state, output } = cli.command;
        assert_eq!(state, "ny");
        assert_eq!(output, Some(PathBuf::from("/tmp/streamgages")));
    }
}
