//! Matchposter turns a day's sports fixtures into promotional poster images.
//!
//! Each event becomes one or more pages stacked from three kinds of panel:
//!
//! - a header with the event title, venue, date, kick-off times, and team logos
//! - one broadcast-source panel per page, balanced across at most ten entries each
//! - an optional league banner
//!
//! Pages are written to `{out_root}/{date}/{sport}/{league}/{event}_poster_{n}.png`.
//! Start with a [`PosterStudio`] and a [`DailySchedule`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod assets;
pub(crate) mod compose;
pub mod config;
pub(crate) mod feed;
pub(crate) mod layout;
/// Tracing subscriber setup.
pub mod logging;
pub(crate) mod render;
/// Batch driver.
pub mod studio;
pub(crate) mod text;

pub use crate::foundation::core::{CANVAS_WIDTH, PANEL_MIN_HEIGHT, Panel, PanelKind, PosterPage};
pub use crate::foundation::error::{PosterError, PosterResult};

pub use crate::assets::decode::decode_image;
pub use crate::assets::fetch::{HttpImageFetcher, ImageFetcher};
pub use crate::assets::fonts::{FontBook, Typeface};
pub use crate::compose::assembler::{PanelSet, assemble_poster, merge_panels};
pub use crate::compose::output::{
    OutputLayout, poster_file_name, sanitize_identifier, write_pages,
};
pub use crate::config::{FetchConfig, FontConfig, LoggingConfig, PosterConfig};
pub use crate::feed::kickoff::{KickoffTimes, is_british_summer_time};
pub use crate::feed::record::EventRecord;
pub use crate::feed::schedule::{
    DEFAULT_LEAGUE, DailySchedule, EventListing, MatchInfo, ScheduledEvent, split_sources,
};
pub use crate::layout::banner::render_banner;
pub use crate::layout::header::{
    HEADER_HEIGHT, HeaderContent, HeaderPlan, PlacedText, plan_header, render_header,
};
pub use crate::layout::sources::{
    NO_SOURCES_SENTINEL, SOURCES_PER_PAGE, SourceEntry, SourcePage, format_source, order_sources,
    page_sizes, plan_source_pages, render_source_pages, split_pages,
};
pub use crate::logging::init_logging;
pub use crate::studio::{BatchReport, EventFailure, PosterStudio};
pub use crate::text::engine::{TextEngine, TextExtent};
pub use crate::text::fit::FontFit;
