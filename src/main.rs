// heaptty: interactive heap map for memory allocation profiles

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Context};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use heaptty::config::ViewConfig;
use heaptty::profile::{self, HeapModel};
use heaptty::ui::{run_heap_view, run_heat_view, CrosstermInput, TerminalSurface};

struct Args {
    profile: String,
    heat: bool,
    config: ViewConfig,
}

fn usage(program_name: &str) {
    eprintln!("Usage: {} [--heat] [--delay <ms>] [--seed <n>] <profile.json>", program_name);
    eprintln!();
    eprintln!("  --heat         start in the access-count heat view");
    eprintln!("  --delay <ms>   delay between animation frames (default 1000)");
    eprintln!("  --seed <n>     fixed seed for allocation site colors");
    eprintln!();
    eprintln!("Set HEAPTTY_LOG=<file> to write a debug log.");
}

fn parse_args() -> anyhow::Result<Args> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("heaptty");

    let mut profile = None;
    let mut heat = false;
    let mut config = ViewConfig::default();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                usage(program_name);
                std::process::exit(0);
            }
            "--heat" => heat = true,
            "--delay" => {
                let value = iter.next().context("--delay needs a value")?;
                let ms: u64 = value
                    .parse()
                    .with_context(|| format!("invalid delay '{}'", value))?;
                config.animation_delay = Duration::from_millis(ms);
            }
            "--seed" => {
                let value = iter.next().context("--seed needs a value")?;
                config.color_seed = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid seed '{}'", value))?,
                );
            }
            other if other.starts_with('-') => {
                usage(program_name);
                bail!("unknown option '{}'", other);
            }
            other => profile = Some(other.to_string()),
        }
    }

    let Some(profile) = profile else {
        eprintln!("Error: No profile provided");
        eprintln!();
        usage(program_name);
        std::process::exit(1);
    };

    Ok(Args {
        profile,
        heat,
        config,
    })
}

/// Log to the file named by HEAPTTY_LOG; the terminal belongs to the TUI
fn init_tracing() -> anyhow::Result<()> {
    let Some(path) = std::env::var_os("HEAPTTY_LOG") else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("cannot create log file {}", Path::new(&path).display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("heaptty=debug")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Raw mode plus alternate screen for as long as the guard lives
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // from here on, dropping the guard undoes whatever succeeded
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // every step runs even if an earlier one fails
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = execute!(io::stdout(), Show);
    }
}

fn run_tui(model: HeapModel, heat: bool, config: &ViewConfig) -> anyhow::Result<()> {
    let _guard = TerminalGuard::enter().context("cannot set up the terminal")?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut surface = TerminalSurface::new(Terminal::new(backend)?, CrosstermInput);

    if heat {
        run_heat_view(model, &mut surface, config)?;
    } else {
        run_heap_view(model, &mut surface, config)?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = parse_args()?;
    init_tracing()?;

    if !Path::new(&args.profile).exists() {
        bail!("File '{}' not found", args.profile);
    }

    let model = profile::load_profile(&args.profile)
        .with_context(|| format!("failed to load profile '{}'", args.profile))?;
    eprintln!(
        "Loaded {} snapshot(s), addresses {}..{}",
        model.len(),
        model.min_address,
        model.max_address
    );

    if let Err(err) = run_tui(model, args.heat, &args.config) {
        // the guard inside run_tui has already restored the terminal
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }

    Ok(())
}
