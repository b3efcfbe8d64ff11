use chrono::NaiveDate;
use image::DynamicImage;

use crate::assets::fetch::ImageFetcher;
use crate::feed::kickoff::KickoffTimes;
use crate::feed::schedule::EventListing;
use crate::foundation::error::PosterResult;
use crate::layout::header::HeaderContent;

/// Everything one poster is drawn from, with remote images already decoded.
#[derive(Clone, Debug)]
pub struct EventRecord {
    /// Sanitized event name.
    pub name: String,
    /// Venue name.
    pub venue: Option<String>,
    /// Display date.
    pub date: Option<String>,
    /// Kick-off times; `None` when the feed time is missing or malformed.
    pub kickoff: Option<KickoffTimes>,
    /// Home team logo.
    pub home_logo: Option<DynamicImage>,
    /// Away team logo.
    pub away_logo: Option<DynamicImage>,
    /// Broadcast sources in feed order.
    pub sources: Vec<String>,
    /// League name.
    pub league: String,
    /// League banner.
    pub banner: Option<DynamicImage>,
}

fn fetch_optional(
    fetcher: &dyn ImageFetcher,
    url: Option<&str>,
) -> PosterResult<Option<DynamicImage>> {
    match url {
        Some(url) if !url.trim().is_empty() => fetcher.fetch_image(url).map(Some),
        _ => Ok(None),
    }
}

impl EventRecord {
    /// Download the listing's images and resolve its kick-off times.
    ///
    /// Any failed download fails the whole record.
    pub fn fetch(
        listing: &EventListing,
        as_of: NaiveDate,
        fetcher: &dyn ImageFetcher,
    ) -> PosterResult<Self> {
        let home_logo = fetch_optional(fetcher, listing.home_logo_url.as_deref())?;
        let away_logo = fetch_optional(fetcher, listing.away_logo_url.as_deref())?;
        let banner = fetch_optional(fetcher, listing.banner_url.as_deref())?;

        Ok(Self {
            name: listing.name.clone(),
            venue: listing.venue.clone(),
            date: listing.date.clone(),
            kickoff: listing
                .utc_time
                .as_deref()
                .and_then(|utc| KickoffTimes::from_utc(utc, as_of)),
            home_logo,
            away_logo,
            sources: listing.sources.clone(),
            league: listing.league.clone(),
            banner,
        })
    }

    /// Header fields borrowed from this record.
    pub fn header_content(&self) -> HeaderContent<'_> {
        HeaderContent {
            title: &self.name,
            venue: self.venue.as_deref(),
            date: self.date.as_deref(),
            uk_time: self.kickoff.as_ref().map(|k| k.uk.as_str()),
            utc_time: self.kickoff.as_ref().map(|k| k.utc.as_str()),
            home_logo: self.home_logo.as_ref(),
            away_logo: self.away_logo.as_ref(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/feed/record.rs"]
mod tests;
