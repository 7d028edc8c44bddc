//! candlewick CLI - turn per-hour ask/bid tick files into OHLC candles.

use anyhow::Result;
use candlewick_lib::{Symbol, Timeframe};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;
mod logging;

use display::Format;

#[derive(Parser)]
#[command(name = "candlewick")]
#[command(about = "Turn per-hour ask/bid tick files into OHLC candles", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output and informational logs)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build candles for every batch in a directory and store them
    Run {
        /// Directory of decompressed tick files [fallback env: DECOMPRESSED_FOLDER]
        #[arg(short, long, env = "CANDLEWICK_INPUT_DIR")]
        input_dir: Option<PathBuf>,

        /// SQLite database path [fallback env: DB_PATH]
        #[arg(long, env = "CANDLEWICK_DB_PATH")]
        db: Option<PathBuf>,

        /// Symbol the candles are stored under
        #[arg(short, long, env = "CANDLEWICK_SYMBOL", default_value = "ADAUSD")]
        symbol: Symbol,

        /// Candle timeframe (s1, m1, m5, m15, m30, h1, h4, d1, or e.g. 90s)
        #[arg(short, long, default_value = "m1")]
        timeframe: Timeframe,

        /// Directory for the per-symbol log file [fallback env: LOGS_FOLDER_PATH]
        #[arg(long, env = "CANDLEWICK_LOG_DIR")]
        log_dir: Option<PathBuf>,

        /// Build candles without writing them to the database
        #[arg(long)]
        dry_run: bool,
    },

    /// List the batches found in a directory
    Batches {
        /// Directory of decompressed tick files [fallback env: DECOMPRESSED_FOLDER]
        #[arg(short, long, env = "CANDLEWICK_INPUT_DIR")]
        input_dir: Option<PathBuf>,
    },

    /// Process the batch containing one file and write it to a file
    Export {
        /// Any file of the batch to export
        filename: String,

        /// Directory of decompressed tick files [fallback env: DECOMPRESSED_FOLDER]
        #[arg(short, long, env = "CANDLEWICK_INPUT_DIR")]
        input_dir: Option<PathBuf>,

        /// Output file path. Defaults to <key>.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Candle timeframe, or `tick` for the merged mid-ticks
        #[arg(short, long, default_value = "m1")]
        timeframe: Timeframe,
    },
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Run {
            input_dir,
            db,
            symbol,
            timeframe,
            log_dir,
            dry_run,
        } => {
            let config = commands::run::resolve_config(input_dir, db, symbol, timeframe, log_dir);
            logging::init(cli.verbose, cli.quiet, config.log_file().as_deref())?;
            commands::run::run(&config, dry_run, cli.quiet)
        }
        Commands::Batches { input_dir } => {
            logging::init(cli.verbose, cli.quiet, None)?;
            commands::batches::list_batches(&commands::input_dir(input_dir))
        }
        Commands::Export {
            filename,
            input_dir,
            output,
            format,
            timeframe,
        } => {
            logging::init(cli.verbose, cli.quiet, None)?;
            commands::export::export(
                &commands::input_dir(input_dir),
                &filename,
                output,
                format,
                timeframe,
                cli.quiet,
            )
        }
    }
}
