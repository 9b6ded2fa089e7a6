use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use spdlog::{error, info, Logger};

use pupate::eclose::eclose;
use pupate::larva::{check, spawn, warn_if_read_only};
use pupate::logger::{configure_logger, LogLevel, LogSettings};

#[derive(Parser, Debug)]
#[command(version, about = "Turns a larva of text files into an imago of web pages", long_about = None)]
struct Args {
    /// Folder holding the site to work on
    #[arg(short = 'C', long, global = true, default_value = ".")]
    root: PathBuf,

    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Also write the log to this file, rotated daily
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq)]
enum Command {
    /// Tell whether the folder can be built, listing what is missing
    Check,
    /// Create the larva folder and default options, keeping existing files
    Spawn,
    /// Build the imago (default)
    #[command(visible_aliases = ["emerge", "e"])]
    Eclose,
}

fn run(command: Command, args: &Args, logger: &Logger) -> anyhow::Result<()> {
    match command {
        Command::Check => {
            if !check(&args.root, logger) {
                anyhow::bail!("{} is not ready to eclose, run `pupate spawn` first", args.root.display());
            }
            info!(logger: logger, "{} is ready to eclose", args.root.display());
        }
        Command::Spawn => {
            spawn(&args.root, logger)
                .with_context(|| format!("Could not spawn a larva in {}", args.root.display()))?;
        }
        Command::Eclose => {
            eclose(&args.root, logger)
                .with_context(|| format!("Could not eclose {}", args.root.display()))?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let settings = LogSettings {
        level: args.log_level,
        quiet: args.quiet,
        log_file: args.log_file.clone(),
    };
    let logger = match configure_logger(&settings) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Error configuring log: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(logger: logger, "Welcome to Pupate!");
    warn_if_read_only(&args.root, &logger);

    let command = args.command.unwrap_or(Command::Eclose);
    let result = run(command, &args, &logger);
    logger.flush();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(logger: logger, "{:#}", e);
            logger.flush();
            ExitCode::FAILURE
        }
    }
}
