use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event;
use ratatui::DefaultTerminal;
use tracing_subscriber::EnvFilter;

use rawl::buffer::Buffer;
use rawl::config::Config;
use rawl::editor::Editor;
use rawl::input;
use rawl::render;

/// A small terminal text editor that keeps malformed UTF-8 editable.
#[derive(Parser, Debug)]
#[command(name = "rawl")]
#[command(about = "A terminal text editor that never mangles bytes", long_about = None)]
#[command(version)]
struct Args {
    /// File to open.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Path to configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for editor diagnostics (default: system temp dir).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Diagnostics go to a file; the terminal itself belongs to the UI.
fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(terminal: &mut DefaultTerminal, editor: &mut Editor) -> Result<()> {
    while editor.is_running() {
        terminal.draw(|frame| render::draw(frame, editor))?;
        let event = event::read()?;
        editor.apply(input::translate(event));
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("rawl.log"));
    init_tracing(&log_path)?;
    tracing::info!("editor starting");

    let config = Config::load(args.config.as_deref())?;

    let buffer = match &args.file {
        Some(path) => Buffer::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?,
        None => Buffer::new(),
    };

    // ratatui::init installs a panic hook that restores the terminal, so
    // raw mode is released on every exit path.
    let mut terminal = ratatui::init();
    let result = terminal
        .size()
        .map_err(anyhow::Error::from)
        .and_then(|size| {
            let mut editor = Editor::new(buffer, config, (size.width, size.height));
            run(&mut terminal, &mut editor)
        });
    ratatui::restore();
    tracing::info!("editor exiting");
    result
}
