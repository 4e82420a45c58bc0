//! Human readable rendering of campground reports.

use std::fmt::Write;

use campground_scan::{CampgroundReport, MonthOutcome};

use crate::terminal::ColorPalette;

const SEPARATOR_WIDTH: usize = 50;

/// One block per campground: header, link, month results, separator.
pub fn render_campground(report: &CampgroundReport, palette: &ColorPalette) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Checking data for {} (ID: {})",
        report.name, report.campground_id
    );
    let _ = writeln!(out, "{}", palette.paint(palette.yellow, &report.url));

    for month in &report.months {
        let name = month.month_name();
        if let Some(error) = &month.fetch_error {
            let line = format!(
                "Network error fetching data for campground {}: {}",
                report.campground_id, error
            );
            let _ = writeln!(out, "{}", palette.paint(palette.red, &line));
        }
        match &month.outcome {
            MonthOutcome::Available(hits) => {
                let _ = writeln!(out, "\n{}:", name);
                for hit in hits {
                    let line = format!("✓ Campsite {} is available on {}", hit.site, hit.date);
                    let _ = writeln!(out, "{}", palette.paint(palette.green, &line));
                }
            }
            MonthOutcome::NotYetReleased => {
                let line = format!(
                    "✗ No campsites available for {} (some dates not yet released)",
                    name
                );
                let _ = writeln!(out, "{}", palette.paint(palette.red, &line));
            }
            MonthOutcome::NoSitesFound => {
                let line = format!("✗ No campsites found for {}", name);
                let _ = writeln!(out, "{}", palette.paint(palette.red, &line));
            }
        }
    }

    let _ = writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH));
    out
}

/// Shown instead of any report once September of `year` is over.
pub fn season_ended_message(year: i32) -> String {
    format!(
        "It's past September in {}. The camping season (May-September) has ended. Run this next year.",
        year
    )
}

/// JSON form of the season-ended notice, for `--json` output.
pub fn season_ended_json(year: i32) -> serde_json::Value {
    serde_json::json!({
        "status": "season_ended",
        "year": year,
        "message": season_ended_message(year),
    })
}
