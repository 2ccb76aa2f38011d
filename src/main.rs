//! Command-line driver for the desk calculator.
//!
//! Usage:
//!   deskcalc 2+3*4=                 # run a key script, print each key
//!   deskcalc --scientific 90 sin    # scientific keypad, degrees
//!   deskcalc --json 200 + 10 %      # transcript as JSON lines
//!   deskcalc                        # read key scripts from stdin

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use deskcalc::calculator::{AngleMode, copy_to_clipboard};
use deskcalc::config::{Config, Keypad};
use deskcalc::session::Session;
use deskcalc::transcript::TranscriptEntry;

/// Desk calculator with basic and scientific keypads
#[derive(Parser, Debug)]
#[command(name = "deskcalc", version, about)]
struct Args {
    /// Key script, e.g. `2+3*4=` or `90 sin`. Reads stdin when omitted.
    keys: Vec<String>,

    /// Use the scientific keypad
    #[arg(long, conflicts_with = "basic")]
    scientific: bool,

    /// Use the basic keypad
    #[arg(long)]
    basic: bool,

    /// Initial angle mode for trigonometric functions
    #[arg(long, value_enum)]
    angle: Option<AngleArg>,

    /// Maximum length of the entry text
    #[arg(long)]
    max_input_len: Option<usize>,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the transcript as JSON lines
    #[arg(long)]
    json: bool,

    /// Copy the final result to the clipboard
    #[arg(long)]
    copy: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum AngleArg {
    Degrees,
    Radians,
}

impl From<AngleArg> for AngleMode {
    fn from(arg: AngleArg) -> Self {
        match arg {
            AngleArg::Degrees => Self::Degrees,
            AngleArg::Radians => Self::Radians,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = resolve_config(&args)?;
    let mut session = Session::new(&config);

    if args.keys.is_empty() {
        run_interactive(&mut session, args.json)?;
    } else {
        let script = args.keys.join(" ");
        let entries = session.run_script(&script)?;
        print_entries(&entries, args.json)?;
    }

    if args.copy
        && let Err(err) = copy_to_clipboard(session.display())
    {
        warn!("{:#}", err);
    }

    Ok(())
}

fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    if args.scientific {
        config.keypad = Keypad::Scientific;
    } else if args.basic {
        config.keypad = Keypad::Basic;
    }
    if let Some(angle) = args.angle {
        config.angle_mode = angle.into();
        // Choosing an angle mode only makes sense on the scientific keypad.
        if !args.basic {
            config.keypad = Keypad::Scientific;
        }
    }
    if let Some(max_input_len) = args.max_input_len {
        config.max_input_len = max_input_len;
    }

    Ok(config)
}

fn run_interactive(session: &mut Session, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let script = line.trim();
        if script.is_empty() {
            continue;
        }
        if matches!(script, "quit" | "exit") {
            break;
        }

        match session.run_script(script) {
            Ok(entries) if json => print_entries(&entries, true)?,
            Ok(entries) => {
                for notice in entries.iter().filter_map(|e| e.notice.as_deref()) {
                    writeln!(stdout, "{}", notice)?;
                }
                writeln!(stdout, "{}", session.display())?;
            }
            Err(err) => writeln!(stdout, "{}", err)?,
        }
    }

    Ok(())
}

fn print_entries(entries: &[TranscriptEntry], json: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for entry in entries {
        if json {
            writeln!(stdout, "{}", serde_json::to_string(entry)?)?;
        } else {
            writeln!(stdout, "{}", entry.render())?;
        }
    }
    Ok(())
}
