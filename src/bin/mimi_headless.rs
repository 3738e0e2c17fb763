//! Headless accessibility harness
//!
//! Runs an event script against the accessibility layer wired to the
//! in-memory collaborators and prints the resulting accessible snapshot.
//! Useful for testing and for inspecting what AT software would see.
//!
//! ```bash
//! printf 'feed hello\ntick\n' | mimi-headless --text
//! mimi-headless --input script.txt --output snapshot.json
//! ```

use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use mimi::{AccessibilityConfig, HeadlessRun};

/// CLI arguments for the headless harness
#[derive(Parser, Debug)]
#[command(name = "mimi-headless")]
#[command(version)]
#[command(about = "Run an event script against the terminal accessibility layer", long_about = None)]
struct CliArgs {
    /// Input script file (stdin if not specified)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output row text instead of a JSON snapshot
    #[arg(short, long)]
    text: bool,

    /// Terminal columns
    #[arg(short, long, value_name = "COLS", default_value_t = 80)]
    cols: usize,

    /// Terminal rows
    #[arg(short, long, value_name = "ROWS", default_value_t = 24)]
    rows: usize,

    /// Announced rows before the truncation notice
    #[arg(long, value_name = "N")]
    announce_cap: Option<usize>,

    /// Enable the live-region reattach workaround
    #[arg(long)]
    reattach: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();

    let script = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut data = String::new();
            io::stdin().read_to_string(&mut data)?;
            data
        }
    };

    let mut config = AccessibilityConfig::for_platform();
    if let Some(cap) = args.announce_cap {
        config.max_announce_rows = cap;
    }
    if args.reattach {
        config.reattach_live_region = true;
    }

    let mut run = HeadlessRun::new(args.cols, args.rows, config);
    run.run_script(&script);

    let snapshot = run.snapshot();
    let rendered = if args.text {
        snapshot.text()
    } else {
        serde_json::to_string_pretty(&snapshot)?
    };

    match &args.output {
        Some(path) => fs::write(path, rendered.as_bytes())?,
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(rendered.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
