//! `dictify` CLI: pull object and array literals out of JS/TS files.
//!
//! ## Usage
//!
//! ```sh
//! # Named declarations as JSON (stdin → stdout)
//! echo 'const theme = { dark: true };' | dictify extract
//!
//! # Every top-level object and array literal, from a file
//! dictify extract --mode anonymous --include-arrays -i config.ts
//!
//! # Keep `{}` results, compact output, written to a file
//! dictify extract --keep-empty --compact -i app.js -o app.json
//!
//! # Parse a single literal and print it back as a JS literal
//! echo "{ a: 0x10, b: [1,,2] }" | dictify literal
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use dictify_core::{ExtractOptions, Extraction, Mode};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dictify",
    version,
    about = "Extract object and array literals from JavaScript/TypeScript source"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log progress to stderr (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract literal structures as a JSON document
    Extract {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Collect declarations by name, or every top-level literal in order
        #[arg(long, value_enum, default_value_t = ModeArg::Named)]
        mode: ModeArg,
        /// Keep empty objects and arrays
        #[arg(long)]
        keep_empty: bool,
        /// Keep array literals as well as objects
        #[arg(long)]
        include_arrays: bool,
        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Parse the first literal in the input and print it
    Literal {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Print JSON instead of a JS literal
        #[arg(long)]
        json: bool,
        /// Single-line JSON instead of pretty-printed (with --json)
        #[arg(long, requires = "json")]
        compact: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Named,
    Anonymous,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Named => Mode::Named,
            ModeArg::Anonymous => Mode::Anonymous,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Extract {
            input,
            output,
            mode,
            keep_empty,
            include_arrays,
            compact,
        } => {
            let source = read_input(input.as_deref())?;
            let options = ExtractOptions {
                mode: mode.into(),
                keep_empty,
                include_arrays,
            };
            let found = dictify_core::extract(&source, &options);
            debug!(count = found.len(), ?options, "extraction finished");
            let json = found
                .to_json_string(!compact)
                .context("Failed to serialize extraction")?;
            write_output(output.as_deref(), &format!("{json}\n"))?;
        }
        Commands::Literal {
            input,
            output,
            json,
            compact,
        } => {
            let source = read_input(input.as_deref())?;
            let options = ExtractOptions::anonymous()
                .include_arrays(true)
                .keep_empty(true);
            let value = match dictify_core::extract(&source, &options) {
                Extraction::Anonymous(values) => values.into_iter().next(),
                Extraction::Named(_) => None,
            }
            .context("no literal structure found")?;
            let rendered = if !json {
                value.to_string()
            } else if compact {
                serde_json::to_string(&value)?
            } else {
                serde_json::to_string_pretty(&value)?
            };
            write_output(output.as_deref(), &format!("{rendered}\n"))?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
