use std::path::PathBuf;
use std::sync::Arc;

use rayon::prelude::*;

use crate::assets::fetch::{HttpImageFetcher, ImageFetcher};
use crate::assets::fonts::FontBook;
use crate::compose::assembler::{PanelSet, assemble_poster};
use crate::compose::output::OutputLayout;
use crate::config::PosterConfig;
use crate::feed::record::EventRecord;
use crate::feed::schedule::{DailySchedule, EventListing, ScheduledEvent};
use crate::foundation::error::{PosterError, PosterResult};
use crate::layout::banner::render_banner;
use crate::layout::header::render_header;
use crate::layout::sources::render_source_pages;
use crate::text::engine::TextEngine;

/// An event that produced no poster.
#[derive(Debug)]
pub struct EventFailure {
    /// Sport key.
    pub sport: String,
    /// Match key as published.
    pub event: String,
    /// What went wrong.
    pub error: PosterError,
}

/// Outcome of one batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Every poster page written, in schedule order.
    pub written: Vec<PathBuf>,
    /// Events that produced posters.
    pub succeeded: usize,
    /// Events that did not.
    pub failures: Vec<EventFailure>,
}

/// Renders posters for scheduled events into an [`OutputLayout`].
///
/// Holds only read-only state, so one studio can serve many worker threads.
pub struct PosterStudio {
    fonts: FontBook,
    fetcher: Arc<dyn ImageFetcher>,
    layout: OutputLayout,
    parallel: bool,
    threads: Option<usize>,
}

impl PosterStudio {
    /// Sequential studio over explicit collaborators.
    pub fn new(fonts: FontBook, fetcher: Arc<dyn ImageFetcher>, layout: OutputLayout) -> Self {
        Self {
            fonts,
            fetcher,
            layout,
            parallel: false,
            threads: None,
        }
    }

    /// Studio wired from configuration: configured fonts, HTTP fetcher, `out_root` layout.
    pub fn from_config(cfg: &PosterConfig, as_of: chrono::NaiveDate) -> PosterResult<Self> {
        cfg.validate()?;
        let fetcher = HttpImageFetcher::new(&cfg.fetch)?;
        Ok(Self::new(
            FontBook::load(&cfg.fonts),
            Arc::new(fetcher),
            OutputLayout::new(cfg.out_root.clone(), as_of),
        )
        .with_parallel(cfg.parallel, cfg.threads))
    }

    /// Fan events out over a rayon pool of `threads` workers (`None`: rayon default).
    pub fn with_parallel(mut self, parallel: bool, threads: Option<usize>) -> Self {
        self.parallel = parallel;
        self.threads = threads;
        self
    }

    /// Where posters are written.
    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Render every panel of one event.
    pub fn build_panels(&self, engine: &mut TextEngine, record: &EventRecord) -> PosterResult<PanelSet> {
        let header = render_header(engine, &self.fonts.title, &record.header_content())?;
        let sources = render_source_pages(engine, &self.fonts.body, &record.sources)?;
        let banner = record.banner.as_ref().map(render_banner).transpose()?;
        Ok(PanelSet {
            header: Some(header),
            sources,
            banner,
        })
    }

    /// Fetch, lay out, and write the posters of one event.
    #[tracing::instrument(skip(self, engine, listing), fields(event = %listing.name))]
    pub fn render_event(
        &self,
        engine: &mut TextEngine,
        sport: &str,
        listing: &EventListing,
    ) -> PosterResult<Vec<PathBuf>> {
        let record = EventRecord::fetch(listing, self.layout.as_of(), self.fetcher.as_ref())?;
        let panels = self.build_panels(engine, &record)?;
        assemble_poster(&self.layout, sport, &record.league, &record.name, panels)
    }

    fn process(&self, engine: &mut TextEngine, event: &ScheduledEvent) -> PosterResult<Vec<PathBuf>> {
        match &event.listing {
            Ok(listing) => self.render_event(engine, &event.sport, listing),
            Err(err) => Err(PosterError::feed(format!("unreadable match: {err}"))),
        }
    }

    /// Render every event of the day. One event failing never stops the others.
    ///
    /// Errors only when the worker pool cannot be built.
    pub fn run_batch(&self, schedule: &DailySchedule) -> PosterResult<BatchReport> {
        if schedule.as_of() != self.layout.as_of() {
            tracing::warn!(
                feed = %schedule.as_of(),
                output = %self.layout.as_of(),
                "feed date differs from output date"
            );
        }

        let events = schedule.events();
        let outcomes: Vec<PosterResult<Vec<PathBuf>>> = if self.parallel {
            let pool = build_thread_pool(self.threads)?;
            pool.install(|| {
                events
                    .par_iter()
                    .map_init(TextEngine::new, |engine, event| self.process(engine, event))
                    .collect()
            })
        } else {
            let mut engine = TextEngine::new();
            events.iter().map(|event| self.process(&mut engine, event)).collect()
        };

        let mut report = BatchReport::default();
        for (event, outcome) in events.iter().zip(outcomes) {
            match outcome {
                Ok(paths) => {
                    report.succeeded += 1;
                    report.written.extend(paths);
                }
                Err(error) => {
                    tracing::error!(
                        sport = %event.sport,
                        event = %event.match_name,
                        %error,
                        "could not generate poster"
                    );
                    report.failures.push(EventFailure {
                        sport: event.sport.clone(),
                        event: event.match_name.clone(),
                        error,
                    });
                }
            }
        }

        tracing::info!(
            events = events.len(),
            succeeded = report.succeeded,
            failed = report.failures.len(),
            pages = report.written.len(),
            "batch finished"
        );
        Ok(report)
    }
}

fn build_thread_pool(threads: Option<usize>) -> PosterResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PosterError::validation("'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PosterError::render(format!("failed to build rayon thread pool: {e}")))
}
