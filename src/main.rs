use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use errscope_logs::{LogQuery, Paginator, QueryParams, SeverityCounts, collect_matches, run, run_raw, timestamp::resolve_time_zone};

mod config;
mod print;
mod viewer;

use config::Config;

/// errscope - A terminal viewer for PHP error logs
#[derive(Parser, Debug)]
#[command(name = "errscope")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Error log file (defaults to `log_path` from the config file)
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Keep entries whose message contains this text (case-insensitive)
    #[arg(short, long)]
    search: Option<String>,

    /// Keep entries with this exact severity, e.g. "Warning" or "Fatal error"
    #[arg(short = 't', long)]
    error_type: Option<String>,

    /// First day to include (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    start_date: Option<String>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    end_date: Option<String>,

    /// Page to show (1-based)
    #[arg(short, long)]
    page: Option<i64>,

    /// Entries per page
    #[arg(long)]
    per_page: Option<usize>,

    /// Query string, e.g. "search=foo&errorType=Warning&page=2"; explicit flags win
    #[arg(short, long, value_name = "QS")]
    query: Option<String>,

    /// Zone in which dates are read (IANA name)
    #[arg(long, value_name = "TZ")]
    timezone: Option<String>,

    /// Treat every line as opaque text instead of parsing entries
    #[arg(long, conflicts_with = "stats")]
    raw: bool,

    /// Print the page as text instead of opening the viewer
    #[arg(long, conflicts_with_all = ["json", "stats"])]
    print: bool,

    /// Print the page as JSON
    #[arg(long, conflicts_with = "stats")]
    json: bool,

    /// Print severity counts of all matches
    #[arg(long)]
    stats: bool,

    /// Config file (default: <config dir>/errscope/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so they never mix with printed output or the TUI
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    match run_cli(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_cli(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;

    let tz = match &args.timezone {
        Some(name) => resolve_time_zone(name)?,
        None => config.time_zone()?,
    };

    let Some(path) = args.path.clone().or_else(|| config.log_path.clone()) else {
        anyhow::bail!("No log file given and no log_path set in the config file");
    };

    let per_page = args.per_page.unwrap_or(config.per_page);
    Paginator::new(per_page)?;

    let query = build_query(&args, per_page, tz).context("Invalid filter")?;
    tracing::debug!(path = %path.display(), query = %query.to_query_string(tz), "request");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.stats {
        let matches = collect_matches(&path, &query.criteria)?;
        print::write_stats(&mut out, &SeverityCounts::from_records(&matches))?;
    } else if args.raw {
        let page = run_raw(&path, &query)?;
        if args.json {
            print::write_json(&mut out, &page)?;
        } else {
            print::write_raw(&mut out, &page)?;
        }
    } else if args.json {
        print::write_json(&mut out, &run(&path, &query)?)?;
    } else if args.print {
        print::write_records(&mut out, &run(&path, &query)?)?;
    } else {
        drop(out);
        return viewer::run_app(path, query, tz, config.error_types).await;
    }

    out.flush()?;
    Ok(())
}

/// Query string first, then individual flags on top
fn build_query(args: &Args, per_page: usize, tz: chrono_tz::Tz) -> Result<LogQuery> {
    let mut params = QueryParams::from_query_string(args.query.as_deref().unwrap_or(""));

    if let Some(search) = &args.search {
        params.search = Some(search.clone());
    }
    if let Some(error_type) = &args.error_type {
        params.error_type = Some(error_type.clone());
    }
    if let Some(start) = &args.start_date {
        params.start_date = Some(start.clone());
    }
    if let Some(end) = &args.end_date {
        params.end_date = Some(end.clone());
    }
    if let Some(page) = args.page {
        params.page = Some(page.to_string());
    }

    Ok(params.into_query(per_page, tz)?)
}
