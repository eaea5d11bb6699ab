use anyhow::Context;
use clap::{Parser, Subcommand};
use seminar_feed::{
    date_hint, load_rows, load_table, search, CellValue, Config, DateNormalizer, Publisher,
    RowVerdict, WindowFilter,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "seminar-feed", about = "Upcoming-week seminar schedules from spreadsheets")]
struct Cli {
    /// Write debug logs to /tmp/seminar-feed-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the rows of a JSON table whose event falls in the next seven days.
    Filter {
        table: PathBuf,
        /// Date column: 0-based index, header text, or A1 reference.
        #[arg(long)]
        date_column: Option<String>,
        /// Print why each row was kept or dropped instead of the rows.
        #[arg(long)]
        explain: bool,
    },
    /// Print the published schedule feed for a JSON sheet table.
    Publish {
        table: PathBuf,
        /// Registered source whose column mapping to use.
        #[arg(long)]
        source: Option<String>,
        /// Keep only items whose name, title or room contains this term.
        #[arg(long)]
        search: Option<String>,
        /// Config file to use instead of ~/.config/seminar-feed/config.toml.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Show how each value would be read as a date.
    Parse {
        values: Vec<String>,
        /// Read the values as spreadsheet serial numbers.
        #[arg(long)]
        serial: bool,
    },
    /// List registered sources with the ranges that would be fetched.
    Sources {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    match cli.command {
        Command::Filter {
            table,
            date_column,
            explain,
        } => filter(&table, date_column.as_deref(), explain),
        Command::Publish {
            table,
            source,
            search,
            config,
        } => publish(&table, source.as_deref(), search.as_deref(), config.as_deref()),
        Command::Parse { values, serial } => parse(&values, serial),
        Command::Sources { config } => sources(config.as_deref()),
    }
}

fn init_tracing(debug: bool) -> anyhow::Result<()> {
    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/seminar-feed-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trace")),
            )
            .init();
        tracing::info!("seminar-feed debug log started, tail -f /tmp/seminar-feed-debug.log");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path).with_context(|| format!("loading {}", path.display())),
        None => Config::load().context("loading user config"),
    }
}

fn filter(table: &Path, date_column: Option<&str>, explain: bool) -> anyhow::Result<()> {
    let rows = load_rows(table)?;
    let hint = date_hint(date_column, &rows)?;
    let filter = WindowFilter::default();

    if explain {
        let now = chrono::Local::now().naive_local();
        let window = filter.window_at(now);
        println!("window: {} .. {}", window.start, window.end);
        for (i, verdict) in filter.classify_at(&rows, hint, now).iter().enumerate() {
            let reason = match verdict {
                RowVerdict::Hinted(date) => format!("kept: date column reads {date}"),
                RowVerdict::Scanned { column, date } => format!("kept: column {column} reads {date}"),
                RowVerdict::HintOutOfWindow(date) => format!("dropped: date column reads {date}"),
                RowVerdict::NoDate => "dropped: no upcoming date".to_string(),
            };
            println!("row {i}: {reason}");
        }
        return Ok(());
    }

    let retained = filter.filter_upcoming(&rows, hint);
    println!("{}", serde_json::to_string_pretty(&retained)?);
    Ok(())
}

fn publish(
    table: &Path,
    source: Option<&str>,
    term: Option<&str>,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let table_rows = load_table(table)?;

    let mapping = match source {
        Some(name) => config
            .source(name)
            .with_context(|| format!("no source named {name:?} in config"))?
            .mapping(&config)
            .clone(),
        None => config.columns.clone(),
    };
    let label = source
        .map(str::to_string)
        .or_else(|| table.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_default();

    let publisher = Publisher::new(mapping, config.output.clone(), WindowFilter::default());
    let items = publisher.publish(&table_rows, &label)?;
    let items = search(&items, term.unwrap_or_default());
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}

fn parse(values: &[String], serial: bool) -> anyhow::Result<()> {
    let normalizer = DateNormalizer::new();
    for value in values {
        let cell = if serial {
            CellValue::Number(
                value
                    .trim()
                    .parse()
                    .with_context(|| format!("{value:?} is not a serial number"))?,
            )
        } else {
            CellValue::from(value.as_str())
        };
        match normalizer.normalize(&cell) {
            Some(date) => println!("{value}\t{date}"),
            None => println!("{value}\t-"),
        }
    }
    Ok(())
}

fn sources(config: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config)?;
    if config.sources.is_empty() {
        println!("no sources registered");
        return Ok(());
    }
    for source in &config.sources {
        let id = seminar_feed::extract_spreadsheet_id(&source.sheet_url)
            .with_context(|| format!("source {:?}", source.name))?;
        let ranges: Vec<String> = seminar_feed::sheet_tabs(&source.sheet_name)
            .into_iter()
            .map(seminar_feed::tab_range)
            .collect();
        println!("{}\t{}\t{}", source.name, id, ranges.join(" "));
    }
    Ok(())
}
