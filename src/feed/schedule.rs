use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::compose::output::sanitize_identifier;
use crate::foundation::error::{PosterError, PosterResult};
use crate::layout::sources::NO_SOURCES_SENTINEL;

/// League directory used when a match names no league.
pub const DEFAULT_LEAGUE: &str = "No_league";

fn non_empty<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// One match entry as published in the daily feed.
///
/// Absent, `null` and empty-string fields all decode to `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MatchInfo {
    /// Home team badge URL.
    #[serde(rename = "strHomeTeamBadge", default, deserialize_with = "non_empty")]
    pub home_badge: Option<String>,
    /// Away team badge URL.
    #[serde(rename = "strAwayTeamBadge", default, deserialize_with = "non_empty")]
    pub away_badge: Option<String>,
    /// Venue name.
    #[serde(rename = "Venue", default, deserialize_with = "non_empty")]
    pub venue: Option<String>,
    /// Kick-off time, `HH:MM:SS` UTC.
    #[serde(rename = "UTC", default, deserialize_with = "non_empty")]
    pub utc: Option<String>,
    /// Match date, `YYYY-MM-DD`.
    #[serde(rename = "dateEvent", default, deserialize_with = "non_empty")]
    pub date_event: Option<String>,
    /// Comma-separated `Region:Channel` list.
    #[serde(rename = "Sources", default, deserialize_with = "non_empty")]
    pub sources: Option<String>,
    /// League banner URL.
    #[serde(rename = "league_banner", default, deserialize_with = "non_empty")]
    pub league_banner: Option<String>,
    /// League name.
    #[serde(rename = "strLeague", default, deserialize_with = "non_empty")]
    pub league: Option<String>,
}

/// Split a comma-separated source list into trimmed entries.
///
/// Empty pieces are dropped. Spacing around `:` is left to [`crate::SourceEntry::parse`].
pub fn split_sources(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// A match normalised for rendering; images are still URLs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventListing {
    /// Sanitized event name; both the poster title and the file name stem.
    pub name: String,
    /// Venue name.
    pub venue: Option<String>,
    /// Display date with `/` separators.
    pub date: Option<String>,
    /// Raw `HH:MM:SS` kick-off time.
    pub utc_time: Option<String>,
    /// Home team badge URL.
    pub home_logo_url: Option<String>,
    /// Away team badge URL.
    pub away_logo_url: Option<String>,
    /// Broadcast sources in feed order; never empty.
    pub sources: Vec<String>,
    /// League name, or [`DEFAULT_LEAGUE`].
    pub league: String,
    /// League banner URL.
    pub banner_url: Option<String>,
}

impl EventListing {
    /// Normalise one feed entry.
    pub fn from_match(match_name: &str, info: &MatchInfo) -> PosterResult<Self> {
        let name = sanitize_identifier(match_name.trim_end_matches(':'));
        if name.trim().is_empty() {
            return Err(PosterError::validation(format!(
                "match name '{match_name}' is empty after normalisation"
            )));
        }

        let mut sources = info.sources.as_deref().map(split_sources).unwrap_or_default();
        if sources.is_empty() {
            sources.push(NO_SOURCES_SENTINEL.to_string());
        }

        Ok(Self {
            name,
            venue: info.venue.clone(),
            date: info.date_event.as_ref().map(|d| d.replace('-', "/")),
            utc_time: info.utc.clone(),
            home_logo_url: info.home_badge.clone(),
            away_logo_url: info.away_badge.clone(),
            sources,
            league: info
                .league
                .clone()
                .unwrap_or_else(|| DEFAULT_LEAGUE.to_string()),
            banner_url: info.league_banner.clone(),
        })
    }
}

/// One match of the day, decoded independently of its neighbours.
#[derive(Debug)]
pub struct ScheduledEvent {
    /// Sport key from the feed.
    pub sport: String,
    /// Match key as published.
    pub match_name: String,
    /// The normalised listing, or why this match could not be read.
    pub listing: PosterResult<EventListing>,
}

/// All matches published for one day.
#[derive(Debug)]
pub struct DailySchedule {
    as_of: NaiveDate,
    events: Vec<ScheduledEvent>,
}

type RawFeed = BTreeMap<String, Vec<BTreeMap<String, serde_json::Value>>>;

impl DailySchedule {
    /// `{data_dir}/{YYYY-MM-DD}.json`.
    pub fn path_for(data_dir: &Path, as_of: NaiveDate) -> PathBuf {
        data_dir.join(format!("{}.json", as_of.format("%Y-%m-%d")))
    }

    /// Read the feed file for `as_of`.
    pub fn load(data_dir: impl AsRef<Path>, as_of: NaiveDate) -> PosterResult<Self> {
        let path = Self::path_for(data_dir.as_ref(), as_of);
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PosterError::feed(format!(
                    "no match information: '{}' not found",
                    path.display()
                )));
            }
            Err(e) => {
                return Err(PosterError::io(format!("read '{}': {e}", path.display())));
            }
        };
        let schedule = Self::from_json(&json, as_of)?;
        tracing::info!(
            path = %path.display(),
            events = schedule.len(),
            "loaded daily schedule"
        );
        Ok(schedule)
    }

    /// Decode a feed document. Sports come out in name order, matches in file order.
    ///
    /// Only a malformed document is an error; a malformed match is kept as a failed
    /// [`ScheduledEvent`].
    pub fn from_json(json: &str, as_of: NaiveDate) -> PosterResult<Self> {
        let raw: RawFeed = serde_json::from_str(json)
            .map_err(|e| PosterError::feed(format!("parse daily feed: {e}")))?;

        let mut events = Vec::new();
        for (sport, matches) in raw {
            for entry in matches {
                for (match_name, value) in entry {
                    let listing = serde_json::from_value::<MatchInfo>(value)
                        .map_err(|e| PosterError::feed(format!("match '{match_name}': {e}")))
                        .and_then(|info| EventListing::from_match(&match_name, &info));
                    events.push(ScheduledEvent {
                        sport: sport.clone(),
                        match_name,
                        listing,
                    });
                }
            }
        }
        Ok(Self { as_of, events })
    }

    /// Day the feed was published for.
    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Every match in processing order.
    pub fn events(&self) -> &[ScheduledEvent] {
        &self.events
    }

    /// Number of matches, including unreadable ones.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// `true` when the feed lists no matches.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/feed/schedule.rs"]
mod tests;
