//! studyflow CLI: reading chunks, homework questions, and time estimates.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::OutputFormat;

#[derive(Parser)]
#[command(
    name = "studyflow",
    version,
    about = "Break study material into reading chunks and homework questions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a text file into reading chunks
    Chunk {
        /// Text file to segment
        #[arg(long)]
        input: PathBuf,

        /// Grade level (K, G1..G12)
        #[arg(long)]
        grade: String,

        /// Override the grade's chunk size in words
        #[arg(long)]
        target_words: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Detect homework questions in a text file
    Questions {
        /// Text file to scan
        #[arg(long)]
        input: PathBuf,

        /// Grade level (K, G1..G12)
        #[arg(long)]
        grade: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Produce a task breakdown as JSON
    Breakdown {
        /// Text file to process
        #[arg(long)]
        input: PathBuf,

        /// Grade level (K, G1..G12)
        #[arg(long)]
        grade: String,

        /// Task kind: reading or homework
        #[arg(long)]
        kind: String,

        /// Skip the remote model and use the deterministic engine
        #[arg(long)]
        offline: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Summarize a text file for a grade
    Summary {
        /// Text file to summarize
        #[arg(long)]
        input: PathBuf,

        /// Grade level (K, G1..G12)
        #[arg(long)]
        grade: String,

        /// Skip the remote model and use the deterministic engine
        #[arg(long)]
        offline: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Build a study guide for the questions in a text file
    Guide {
        /// Homework text file
        #[arg(long)]
        input: PathBuf,

        /// Grade level (K, G1..G12)
        #[arg(long)]
        grade: String,

        /// Skip the remote model and use the deterministic engine
        #[arg(long)]
        offline: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Compute a progress update for a stored breakdown
    Progress {
        /// Breakdown JSON file
        #[arg(long)]
        breakdown: PathBuf,

        /// Current chunk (reading) or number of completed questions (homework)
        #[arg(long)]
        position: usize,

        /// Furthest chunk already reached (reading); defaults to --position
        #[arg(long)]
        furthest: Option<usize>,

        /// Task kind to assume when the breakdown is unusable
        #[arg(long)]
        kind: Option<String>,

        /// When the task was started (RFC 3339); defaults to now
        #[arg(long)]
        started_at: Option<String>,
    },

    /// Show the grade calibration tables
    Grades,

    /// Create a starter studyflow.toml
    Init,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("studyflow=info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Chunk {
            input,
            grade,
            target_words,
            format,
        } => commands::chunk::execute(input, grade, target_words, format),
        Commands::Questions {
            input,
            grade,
            format,
        } => commands::questions::execute(input, grade, format),
        Commands::Breakdown {
            input,
            grade,
            kind,
            offline,
            config,
        } => commands::generate::breakdown(input, grade, kind, offline, config).await,
        Commands::Summary {
            input,
            grade,
            offline,
            config,
            format,
        } => commands::generate::summary(input, grade, offline, config, format).await,
        Commands::Guide {
            input,
            grade,
            offline,
            config,
            format,
        } => commands::generate::guide(input, grade, offline, config, format).await,
        Commands::Progress {
            breakdown,
            position,
            furthest,
            kind,
            started_at,
        } => commands::progress::execute(breakdown, position, furthest, kind, started_at),
        Commands::Grades => commands::grades::execute(),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
