use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use page_harvest::validate::check_url;
use page_harvest::{
    save_csv, ExtractionRequest, ExtractionResult, FetchConfig, InputError, ModeKind,
    ScrapeError, DEFAULT_TIMEOUT, EXPORT_FILE_NAME, EXPORT_MIME,
};

/// Widest a table cell is printed before truncation
const MAX_CELL_WIDTH: usize = 60;

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "page-harvest", version)]
#[command(about = "Extract text, links, images, CSS matches, prices or emails from one web page")]
struct Args {
    /// Website URL (e.g. https://example.com)
    url: String,

    /// What to extract
    #[arg(short, long, value_enum, default_value_t = ModeArg::Text)]
    mode: ModeArg,

    /// CSS selector for `--mode custom` (e.g. "div.class-name" or "#id")
    #[arg(short, long)]
    selector: Option<String>,

    /// What to look for with `--mode smart` (e.g. "product prices", "email addresses")
    #[arg(short, long)]
    description: Option<String>,

    /// CSV export path
    #[arg(short, long, default_value = EXPORT_FILE_NAME)]
    output: PathBuf,

    /// Print the table only, skip the CSV export
    #[arg(long)]
    no_export: bool,

    /// Request timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (errors only, no spinner)
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Copy, Clone, ValueEnum, PartialEq, Eq)]
enum ModeArg {
    Text,
    Links,
    Images,
    Custom,
    Smart,
}

impl From<ModeArg> for ModeKind {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Text => ModeKind::Text,
            ModeArg::Links => ModeKind::Links,
            ModeArg::Images => ModeKind::Images,
            ModeArg::Custom => ModeKind::CustomSelector,
            ModeArg::Smart => ModeKind::SmartExtract,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ScrapeError>() {
                Some(ScrapeError::Input(e @ InputError::InvalidUrl(_))) => eprintln!("❌ {}", e),
                Some(e) if e.is_input() => eprintln!("⚠️  {}", e),
                _ => eprintln!("🚨 Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let url = check_url(&args.url).map_err(ScrapeError::from)?;
    let request = ExtractionRequest::from_parts(
        url.as_str(),
        args.mode.into(),
        args.selector.as_deref(),
        args.description.as_deref(),
    )
    .map_err(ScrapeError::from)?;
    let config = FetchConfig::default().with_timeout(Duration::from_secs(args.timeout));

    let spinner = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(format!("🔄 Scraping {} ...", url));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let outcome = page_harvest::run(&request, &config);
    spinner.finish_and_clear();
    let result = outcome?;

    for advisory in result.advisories() {
        eprintln!("⚠️  {}", advisory);
    }
    if result.is_empty() {
        return Ok(());
    }

    println!("✅ Scraping completed successfully! {} rows", result.len());
    print_table(&result);

    if !args.no_export {
        save_csv(&args.output, &result)?;
        println!("📥 Saved {} ({})", args.output.display(), EXPORT_MIME);
    }
    Ok(())
}

fn print_table(result: &ExtractionResult) {
    let headers = result.headers();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    let cells: Vec<Vec<String>> = result
        .rows()
        .iter()
        .map(|row| row.values().map(clip).collect())
        .collect();

    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |values: &[String]| {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<width$}", v, width = *w))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    println!("{}", line(&header_cells));
    println!(
        "{}",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-")
    );
    for row in &cells {
        println!("{}", line(row));
    }
}

/// Single-line, width-limited rendering of a cell
fn clip(value: &str) -> String {
    let flat = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX_CELL_WIDTH {
        return flat;
    }
    let mut clipped: String = flat.chars().take(MAX_CELL_WIDTH - 1).collect();
    clipped.push('…');
    clipped
}
