use std::path::PathBuf;

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "matchposter", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render posters for every event of one day.
    Run(RunArgs),
    /// Print how a source list is ordered and paginated.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// JSON configuration file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding `{YYYY-MM-DD}.json` feeds.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Root of the output tree.
    #[arg(long)]
    out_root: Option<PathBuf>,

    /// Feed date (YYYY-MM-DD). Defaults to today, local time.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Font file for the header.
    #[arg(long)]
    title_font: Option<PathBuf>,

    /// Font file for the source pages.
    #[arg(long)]
    body_font: Option<PathBuf>,

    /// Render events concurrently.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Comma-separated `Region:Channel` list, as found in the feed.
    #[arg(long)]
    sources: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn load_config(args: &RunArgs) -> anyhow::Result<matchposter::PosterConfig> {
    let mut cfg = match &args.config {
        Some(path) => matchposter::PosterConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => matchposter::PosterConfig::default(),
    };
    if let Some(dir) = &args.data_dir {
        cfg.data_dir = dir.clone();
    }
    if let Some(dir) = &args.out_root {
        cfg.out_root = dir.clone();
    }
    if let Some(font) = &args.title_font {
        cfg.fonts.title = font.clone();
    }
    if let Some(font) = &args.body_font {
        cfg.fonts.body = font.clone();
    }
    if args.parallel {
        cfg.parallel = true;
    }
    if args.threads.is_some() {
        cfg.threads = args.threads;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args)?;
    matchposter::init_logging(&cfg.logging);

    let as_of = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let schedule = match matchposter::DailySchedule::load(&cfg.data_dir, as_of) {
        Ok(schedule) => schedule,
        Err(err @ matchposter::PosterError::Feed(_)) => {
            tracing::warn!(%as_of, %err, "no match information found");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let studio = matchposter::PosterStudio::from_config(&cfg, as_of)?;
    let report = studio.run_batch(&schedule)?;
    for failure in &report.failures {
        eprintln!(
            "{}/{}: {}",
            failure.sport, failure.event, failure.error
        );
    }
    println!(
        "wrote {} poster page(s) for {} event(s); {} event(s) failed",
        report.written.len(),
        report.succeeded,
        report.failures.len()
    );
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let raw = matchposter::split_sources(&args.sources);
    let display: Vec<String> = matchposter::order_sources(&raw)
        .iter()
        .map(matchposter::SourceEntry::display)
        .collect();

    for (i, page) in matchposter::split_pages(&display).iter().enumerate() {
        println!("page {} ({} sources)", i + 1, page.len());
        for line in page.iter() {
            println!("  {line}");
        }
    }
    Ok(())
}
