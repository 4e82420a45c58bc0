//! Main entry point for the weekend campsite reservation checker.
//! Looks up every configured campground on recreation.gov and reports which
//! watched sites can be booked on a Friday or Saturday night this season.

mod logging;
mod report;
mod terminal;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use campground_scan::{
    CampgroundScanner, CandidateDates, DEFAULT_SETTINGS_PATH, load_settings,
    upcoming_candidate_dates,
};
use chrono::{Datelike, Local};
use clap::Parser;
use rec_gov::{RecGovClient, RecGovConfig};

use crate::terminal::ColorPalette;

#[derive(Parser, Debug)]
#[command(author, version, about = "Check campground availability for weekends")]
struct Cli {
    /// Path to the settings file.
    #[arg(long, env = "RESERVATION_CHECKER_CONFIG", default_value = DEFAULT_SETTINGS_PATH)]
    config: PathBuf,

    /// Season year to check. Defaults to the current year.
    #[arg(long)]
    year: Option<i32>,

    /// Print the reports as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Directory for the daily log files.
    #[arg(long, env = "RESERVATION_CHECKER_LOG_DIR", default_value = "logs")]
    log_dir: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = logging::init_file_logging(&cli.log_dir) {
        match logging::init_stderr_logging() {
            Ok(()) => log::error!("❌ File logging unavailable: {:#}", e),
            Err(stderr_err) => eprintln!(
                "Logging unavailable: {:#} (stderr fallback: {:#})",
                e, stderr_err
            ),
        }
    }

    let palette = ColorPalette::detect();

    match run(cli, &palette).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("❌ Fatal error: {:#}", e);
            eprintln!("{}", palette.paint(palette.red, &format!("Error: {:#}", e)));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, palette: &ColorPalette) -> Result<ExitCode> {
    let year = cli.year.unwrap_or_else(|| Local::now().year());
    log::info!("🚀 Starting availability check for year {}", year);

    let settings = match load_settings(&cli.config) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("❌ Configuration error: {}", e);
            eprintln!(
                "{}",
                palette.paint(palette.red, &format!("Configuration error: {}", e))
            );
            return Ok(ExitCode::FAILURE);
        }
    };

    let dates = match upcoming_candidate_dates(year) {
        CandidateDates::Dates(dates) => dates,
        CandidateDates::SeasonEnded => {
            let message = report::season_ended_message(year);
            log::warn!("{}", message);
            if cli.json {
                println!("{}", report::season_ended_json(year));
            } else {
                println!("{}", palette.paint(palette.red, &message));
            }
            return Ok(ExitCode::SUCCESS);
        }
    };
    log::info!("Found {} weekend dates to check", dates.len());

    let client = Arc::new(
        RecGovClient::new(RecGovConfig::from_env())
            .context("failed to create recreation.gov client")?,
    );
    let mut scanner = CampgroundScanner::new(client.clone(), client);

    if !cli.json {
        println!();
    }

    let mut reports = Vec::with_capacity(settings.campgrounds.len());
    for campground in &settings.campgrounds {
        let campground_report = scanner.scan_campground(campground, year, &dates).await;
        if !cli.json {
            print!("{}", report::render_campground(&campground_report, palette));
        }
        reports.push(campground_report);
    }

    log::info!(
        "Availability check completed: {} available site-night(s)",
        reports.iter().map(|r| r.available_count()).sum::<usize>()
    );

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).context("failed to serialize reports")?
        );
    } else {
        println!(
            "{}",
            palette.paint(palette.blue, "Availability check completed.")
        );
        println!();
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["reservation_checker"]).unwrap();
        assert_eq!(cli.year, None);
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "reservation_checker",
            "--config",
            "my.yaml",
            "--year",
            "2026",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("my.yaml"));
        assert_eq!(cli.year, Some(2026));
        assert!(cli.json);
    }

    #[test]
    fn test_cli_rejects_bad_year() {
        assert!(Cli::try_parse_from(["reservation_checker", "--year", "next"]).is_err());
    }

    fn cli_for(config: &std::path::Path) -> Cli {
        // A far-off year would scan every month if the settings were accepted
        Cli::try_parse_from([
            "reservation_checker",
            "--config",
            config.to_str().unwrap(),
            "--year",
            "2099",
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_invalid_settings_fail_before_scanning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "campgrounds:\n  - id: \"232447\"\n").unwrap();

        let code = run(cli_for(&path), &ColorPalette::plain()).await.unwrap();
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[tokio::test]
    async fn test_missing_settings_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");

        let code = run(cli_for(&path), &ColorPalette::plain()).await.unwrap();
        assert_eq!(code, ExitCode::FAILURE);
    }
}
