use std::collections::BTreeMap;

use chrono::{Datelike, Local, NaiveDate, Weekday};
use tracing::{info, warn};

/// Months worth checking: May through September
pub const CAMPING_MONTHS: [u32; 5] = [5, 6, 7, 8, 9];

/// Nights worth checking: Friday and Saturday
pub const WEEKEND_DAYS: [Weekday; 2] = [Weekday::Fri, Weekday::Sat];

const LAST_CAMPING_MONTH: u32 = 9;

/// Weekend nights still ahead in a season
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateDates {
    /// Fridays and Saturdays on or after the reference date, in calendar order
    Dates(Vec<NaiveDate>),
    /// The reference date is past September of the requested year
    SeasonEnded,
}

/// All Fridays and Saturdays from May to September of `year` that are not
/// before `reference` (today when `None`).
pub fn generate_candidate_dates(year: i32, reference: Option<NaiveDate>) -> CandidateDates {
    let reference = reference.unwrap_or_else(|| Local::now().date_naive());
    let same_year = reference.year() == year;

    if same_year && reference.month() > LAST_CAMPING_MONTH {
        warn!("Past camping season for year {}", year);
        return CandidateDates::SeasonEnded;
    }

    let dates: Vec<NaiveDate> = CAMPING_MONTHS
        .iter()
        .filter(|&&month| !(same_year && month < reference.month()))
        .flat_map(|&month| days_of_month(year, month))
        .filter(|date| WEEKEND_DAYS.contains(&date.weekday()) && *date >= reference)
        .collect();

    info!("Found {} weekend dates for year {}", dates.len(), year);
    CandidateDates::Dates(dates)
}

/// Candidate dates counted from today
pub fn upcoming_candidate_dates(year: i32) -> CandidateDates {
    generate_candidate_dates(year, None)
}

/// Group dates by month number, keeping their order within each month
pub fn group_by_month(dates: &[NaiveDate]) -> BTreeMap<u32, Vec<NaiveDate>> {
    let mut by_month: BTreeMap<u32, Vec<NaiveDate>> = BTreeMap::new();
    for date in dates {
        by_month.entry(date.month()).or_default().push(*date);
    }
    by_month
}

fn days_of_month(year: i32, month: u32) -> impl Iterator<Item = NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .into_iter()
        .flat_map(move |first| first.iter_days().take_while(move |d| d.month() == month))
}
