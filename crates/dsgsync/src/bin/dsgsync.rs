//! dsgsync: files Divine Service Prep documents and serving schedules into
//! a dated folder tree.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

use dsgsync::classify::{DestinationMapper, LinkCandidate};
use dsgsync::config::{apply_env_overrides, default_config_path, load_config, Config};
use dsgsync::error::{ConfigError, DsgError, ScheduleError};
use dsgsync::schedule::{
    extract_schedule_metadata, Assignment, CalendarSettings, EventSpec, PdfTextExtractor,
    ScheduleTable, TextExtractor,
};
use dsgsync::selection::required_subfolders;
use dsgsync::storage::{schedule_files_for, FolderEnsurer};

#[derive(Parser, Debug)]
#[command(
    name = "dsgsync",
    version,
    about = "Divine Service Prep document and schedule organiser"
)]
struct Cli {
    /// Config file (JSON or YAML). Defaults to the platform config dir.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show how a single link would be classified and where it would land
    Classify {
        href: String,
        #[arg(long, default_value = "")]
        text: String,
        #[arg(long, default_value = "")]
        header: String,
        /// Listing text of the month page, e.g. "December 2025"
        #[arg(long)]
        month_year: Option<String>,
        /// Overrides the configured base directory
        #[arg(long)]
        base_dir: Option<PathBuf>,
    },
    /// Pre-create year/month/category folders for listing texts
    EnsureFolders {
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// List schedule PDFs for the current and next month
    Schedules {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Find a minister's assignments in a schedule
    Assignments {
        /// Extracted schedule text, or a PDF
        file: PathBuf,
        /// Name to look for; defaults to the configured search_name
        #[arg(short, long)]
        query: Option<String>,
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool, log_json: bool) {
    // Route `log` records from the library into tracing.
    let _ = tracing_log::LogTracer::init();

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let registry = tracing_subscriber::registry().with(filter);

    let result = if log_json {
        tracing::subscriber::set_global_default(
            registry.with(fmt::layer().json().with_writer(std::io::stderr)),
        )
    } else {
        tracing::subscriber::set_global_default(
            registry.with(fmt::layer().with_writer(std::io::stderr)),
        )
    };
    if let Err(e) = result {
        eprintln!("Failed to install log subscriber: {}", e);
    }
}

fn run(cli: Cli) -> Result<(), DsgError> {
    let config_path = cli.config;

    match cli.command {
        Command::Classify {
            href,
            text,
            header,
            month_year,
            base_dir,
        } => {
            let base_dir = match base_dir {
                Some(dir) => dir,
                None => optional_config(config_path.as_deref())
                    .map(|c| c.base_dir)
                    .unwrap_or_else(|| PathBuf::from(".")),
            };
            classify(&base_dir, href, text, header, month_year);
        }
        Command::EnsureFolders { texts } => {
            let config = read_config(config_path.as_deref())?;
            let categories = required_subfolders(&config.selection);
            let report = FolderEnsurer::new(&config.base_dir)
                .ensure_listing(texts.as_slice(), &categories)?;
            info!(
                "{} folder(s) created, {} already present",
                report.created.len(),
                report.existing.len()
            );
            for path in &report.created {
                println!("{}", path.display());
            }
        }
        Command::Schedules { today } => {
            let config = read_config(config_path.as_deref())?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            for path in schedule_files_for(&config.base_dir, today)? {
                println!("{}", path.display());
            }
        }
        Command::Assignments { file, query, today } => {
            let config = optional_config(config_path.as_deref());
            let query = query
                .or_else(|| config.as_ref().and_then(|c| c.search_name.clone()))
                .ok_or_else(|| ConfigError::Validation {
                    message: "no name to search for: pass --query or set search_name".to_string(),
                })?;
            let settings = config.map(|c| c.calendar).unwrap_or_default();
            let today = today.unwrap_or_else(|| Local::now().date_naive());

            let text = read_schedule_text(&file)?;
            let metadata = extract_schedule_metadata(&text);
            let assignments = ScheduleTable::parse(&text)
                .map(|table| table.find_assignments(&query))
                .unwrap_or_default();
            info!("{} assignment(s) for '{}'", assignments.len(), query);

            let rows = assignment_rows(&assignments, today, &settings);
            println!(
                "{:#}",
                json!({ "metadata": metadata, "query": query, "assignments": rows })
            );
        }
    }

    Ok(())
}

fn classify(
    base_dir: &Path,
    href: String,
    text: String,
    header: String,
    month_year: Option<String>,
) {
    let mut candidate = LinkCandidate::new(href).with_text(text).with_header(header);
    if let Some(hint) = month_year {
        candidate = candidate.with_month_year_hint(hint);
    }

    let mapping = DestinationMapper::new(base_dir).map_detailed(&candidate);
    let date = &mapping.date;
    let output = json!({
        "href": candidate.href,
        "flags": mapping.flags,
        "date": {
            "year": date.year(),
            "month": date.month_name(),
            "exact": date.exact_date().map(|d| d.to_string()),
            "source": date.source().to_string(),
        },
        "category": mapping.classification.category,
        "rule": mapping.classification.rule,
        "destination": mapping.destination.file_path(),
    });
    println!("{:#}", output);
}

fn read_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path().ok_or_else(|| ConfigError::Validation {
            message: "no platform config directory; pass --config".to_string(),
        })?,
    };
    apply_env_overrides(load_config(&path)?)
}

// Commands that can run without a config still say why it was skipped.
fn optional_config(path: Option<&Path>) -> Option<Config> {
    match read_config(path) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Ignoring config: {}", e);
            None
        }
    }
}

/// One JSON row per assignment; a row whose date cannot be parsed carries
/// the error instead of an event.
fn assignment_rows(assignments: &[Assignment], today: NaiveDate, settings: &CalendarSettings) -> Vec<Value> {
    assignments
        .iter()
        .map(|assignment| match EventSpec::from_assignment(assignment, today, settings) {
            Ok(event) => json!({ "assignment": assignment, "event": event }),
            Err(e) => {
                warn!("No event for '{}': {}", assignment.date, e);
                json!({ "assignment": assignment, "error": e.to_string() })
            }
        })
        .collect()
}

fn read_schedule_text(path: &Path) -> Result<String, ScheduleError> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        return PdfTextExtractor.extract_text(path);
    }
    std::fs::read_to_string(path).map_err(|e| ScheduleError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })
}
