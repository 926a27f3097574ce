//! Question Log Browser - Entry Point

use chrono::NaiveDate;
use clap::Parser;
use qlog::config::{self, CliOverrides, ResolvedConfig};
use qlog::date::{self, Preset};
use qlog::model::{AppError, DateRange, EntryId, LogEntry};
use qlog::query::{self, QueryResult, SortDirection};
use qlog::source::InputSource;
use qlog::state::{BrowserState, Clock, RangeSelector};
use qlog::view::{self, ViewOptions};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Question Log Browser - search, filter and page through question logs
#[derive(Parser, Debug)]
#[command(name = "qlog")]
#[command(version)]
#[command(about = "Browse a JSONL question log by text, date range and page")]
pub struct Args {
    /// Path to JSONL log file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Case-insensitive text to find in question, answer or author email
    #[arg(short, long)]
    pub search: Option<String>,

    /// First day of the date range (DD/MM/YYYY)
    #[arg(long, value_parser = date::parse_date)]
    pub from: Option<NaiveDate>,

    /// Last day of the date range (DD/MM/YYYY)
    #[arg(long, value_parser = date::parse_date)]
    pub to: Option<NaiveDate>,

    /// Preset range: all-time, today, yesterday, last-7-days, last-30-days
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub preset: Option<Preset>,

    /// Page to show (clamped to the last page)
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
    pub page: u64,

    /// Entries per page
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: Option<u64>,

    /// Timestamp sort direction: asc or desc
    #[arg(long)]
    pub sort: Option<SortDirection>,

    /// Show one question in full instead of the table
    #[arg(long, value_parser = parse_entry_id)]
    #[arg(conflicts_with_all = ["search", "from", "to", "preset"])]
    pub id: Option<EntryId>,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Fail on the first malformed line instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            page_size: self.page_size.map(to_usize),
            sort_direction: self.sort,
        }
    }
}

fn parse_entry_id(raw: &str) -> Result<EntryId, qlog::model::InvalidEntryId> {
    EntryId::new(raw)
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "qlog failed");
            eprintln!("qlog: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = config::load_config_with_precedence(args.config.clone())?;
        let merged = config::merge_config(config_file);
        let with_env = config::apply_env_overrides(merged);
        config::apply_cli_overrides(with_env, args.cli_overrides())
    };

    qlog::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let repository = InputSource::detect(args.file.clone()).load()?;
    if let Some(first) = repository.malformed.first() {
        if args.strict {
            return Err(first.error().clone().into());
        }
        eprintln!(
            "qlog: skipped {} malformed line(s), first at line {}",
            repository.malformed.len(),
            first.line_number()
        );
    }

    if let Some(id) = &args.id {
        let entry = query::find_by_id(&repository.entries, id)
            .ok_or_else(|| AppError::EntryNotFound { id: id.to_string() })?;
        info!(id = %id, "showing question detail");
        return write_entry(args, &config, entry);
    }

    let mut selector = RangeSelector::new(DateRange::ALL_TIME);
    let range = select_range(args, &mut selector);

    let browser = browse(args, &config, range);
    let result = browser.run(&repository.entries);
    info!(
        total = result.total,
        page = result.page,
        total_pages = result.total_pages,
        "query complete"
    );

    write_result(args, &config, &browser, &result)
}

/// Drive the selector the way the picker would: a preset click, or typed
/// start and end dates.
fn select_range<C: Clock>(args: &Args, selector: &mut RangeSelector<C>) -> DateRange {
    if let Some(preset) = args.preset {
        selector.on_preset_selected(preset);
    }
    if let Some(from) = args.from {
        selector.on_start_text_changed(&date::format_date(Some(from)));
    }
    if let Some(to) = args.to {
        selector.on_end_text_changed(&date::format_date(Some(to)));
    }
    selector.range()
}

fn browse(args: &Args, config: &ResolvedConfig, range: DateRange) -> BrowserState {
    let mut browser = BrowserState::new(config.page_size, config.sort_direction);
    if let Some(search) = &args.search {
        browser.set_search(search.as_str());
    }
    browser.set_range(range);
    browser.go_to_page(to_usize(args.page));
    browser
}

fn write_result(
    args: &Args,
    config: &ResolvedConfig,
    browser: &BrowserState,
    result: &QueryResult,
) -> Result<(), AppError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.json {
        serde_json::to_writer_pretty(&mut out, result)?;
        writeln!(out)?;
    } else {
        let options = ViewOptions::from(config);
        out.write_all(view::render_result(result, browser.params(), &options).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

fn write_entry(args: &Args, config: &ResolvedConfig, entry: &LogEntry) -> Result<(), AppError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.json {
        serde_json::to_writer_pretty(&mut out, entry)?;
        writeln!(out)?;
    } else {
        let options = ViewOptions::from(config);
        out.write_all(view::render_entry(entry, &options).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}
