use chrono::{Datelike, Days, NaiveDate, NaiveTime, TimeDelta};

const TIME_FORMAT: &str = "%I:%M %p";

fn last_sunday(year: i32, month: u32) -> Option<NaiveDate> {
    let last = NaiveDate::from_ymd_opt(year, month, 31)?;
    last.checked_sub_days(Days::new(u64::from(last.weekday().num_days_from_sunday())))
}

/// Whether UK clocks run one hour ahead of UTC on `date`.
///
/// Summer time runs from the last Sunday of March up to, but excluding, the last Sunday of
/// October.
pub fn is_british_summer_time(date: NaiveDate) -> bool {
    match (last_sunday(date.year(), 3), last_sunday(date.year(), 10)) {
        (Some(start), Some(end)) => (start..end).contains(&date),
        _ => false,
    }
}

/// Kick-off time in UTC and UK local time, formatted for the header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KickoffTimes {
    /// UTC, `hh:MM AM/PM`.
    pub utc: String,
    /// UK local time, `hh:MM AM/PM`.
    pub uk: String,
}

impl KickoffTimes {
    /// Parse an `HH:MM:SS` UTC time. `None` when it does not parse.
    pub fn from_utc(utc: &str, as_of: NaiveDate) -> Option<Self> {
        let utc_time = match NaiveTime::parse_from_str(utc.trim(), "%H:%M:%S") {
            Ok(t) => t,
            Err(err) => {
                tracing::debug!(utc, %err, "unparseable kick-off time");
                return None;
            }
        };
        let uk_time = if is_british_summer_time(as_of) {
            utc_time.overflowing_add_signed(TimeDelta::hours(1)).0
        } else {
            utc_time
        };
        Some(Self {
            utc: utc_time.format(TIME_FORMAT).to_string(),
            uk: uk_time.format(TIME_FORMAT).to_string(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/feed/kickoff.rs"]
mod tests;
