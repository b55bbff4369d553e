use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::event::{poll as event_poll, read as event_read, Event as CrosstermEvent};
use kite::input::translate_key;
use kite::view::render::render;
use kite::view::screen::Screen;
use kite::view::theme::Theme;
use kite::{Config, Editor};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A small terminal text editor
#[derive(Parser, Debug)]
#[command(name = "kite")]
#[command(version)]
struct Cli {
    /// File to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for editor diagnostics
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: Option<&PathBuf>) -> AnyhowResult<()> {
    // Stdout belongs to the terminal UI, so logs only go to a file
    let Some(path) = log_file else {
        return Ok(());
    };

    use tracing_subscriber::{fmt, EnvFilter};
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    // A subscriber may already be installed; keep it
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn load_config(explicit: Option<&PathBuf>) -> AnyhowResult<Config> {
    if let Some(path) = explicit {
        return Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {:?}", path));
    }

    let Some(path) = dirs::config_dir().map(|dir| dir.join("kite").join("config.json")) else {
        return Ok(Config::default());
    };
    match Config::load_from_file(&path) {
        Ok(config) => Ok(config),
        Err(e) if e.is_not_found() => {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Config::default())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to load config {:?}", path)),
    }
}

fn main() -> AnyhowResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;
    tracing::info!("Starting kite {}", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.as_ref())?;
    let theme = Theme::from_name(&config.theme);

    // Load the file before touching the terminal so errors print normally
    let (width, height) = crossterm::terminal::size().context("Failed to get terminal size")?;
    let mut editor = Editor::new(config, width, height);
    if let Some(path) = &cli.file {
        editor
            .open(path)
            .with_context(|| format!("Failed to open {:?}", path))?;
    }

    let terminal = ratatui::init();
    let result = run_event_loop(&mut editor, &theme, terminal);
    ratatui::restore();
    result
}

fn run_event_loop(
    editor: &mut Editor,
    theme: &Theme,
    mut terminal: DefaultTerminal,
) -> AnyhowResult<()> {
    // Redraw at least this often so expired messages disappear
    const IDLE_REDRAW: Duration = Duration::from_millis(250);

    loop {
        terminal.draw(|frame| {
            let screen = Screen::compose(editor, Instant::now());
            render(frame, &screen, theme);
        })?;

        if editor.should_quit() {
            tracing::info!("Exiting");
            return Ok(());
        }

        if !event_poll(IDLE_REDRAW)? {
            continue;
        }
        match event_read()? {
            CrosstermEvent::Key(key_event) => {
                if let Some(key) = translate_key(&key_event) {
                    tracing::debug!("Key {:?}", key);
                    editor.handle_key(key);
                }
            }
            CrosstermEvent::Resize(width, height) => {
                tracing::debug!("Resize to {}x{}", width, height);
                editor.resize(width, height);
            }
            _ => {}
        }
    }
}
