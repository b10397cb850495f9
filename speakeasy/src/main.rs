//! SpeakEasy - single-switch scanning communication board for the terminal.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, DisableLineWrap, EnableLineWrap,
    EnterAlternateScreen, LeaveAlternateScreen,
};
use speakeasy::{draw, layout, App};
use speakeasy_core::{Config, ScanEngine, StateStore, WordList};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Poll timeout while no scan tick is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(
    name = "speakeasy",
    version,
    about = "Compose sentences with a single switch by scanning letters or phrases"
)]
struct Args {
    /// Word list used for letter prediction (one word per line)
    #[arg(short, long)]
    words: Option<PathBuf>,

    /// State database (default: ~/.speakeasy/state.redb)
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// Keep state in memory only
    #[arg(long, conflicts_with = "state")]
    ephemeral: bool,

    /// Seconds per scan step; 0 pauses
    #[arg(long)]
    speed: Option<f64>,

    /// Start with scanning paused
    #[arg(long)]
    paused: bool,

    /// TOML configuration file (default: ~/.speakeasy/config.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for speakeasy.log (default: $SPEAKEASY_LOG_DIR or the temp dir)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn home_dir() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".speakeasy")
}

fn init_logging(log_dir: Option<PathBuf>) -> tracing_appender::non_blocking::WorkerGuard {
    // stdout belongs to the board, so logs only go to a file
    let log_dir = log_dir
        .or_else(|| std::env::var("SPEAKEASY_LOG_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(std::env::temp_dir);
    let file_appender = tracing_appender::rolling::never(&log_dir, "speakeasy.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "speakeasy=info,speakeasy_core=info,warn".into()),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    tracing::info!("Starting SpeakEasy - logging to {}/speakeasy.log", log_dir.display());
    guard
}

fn load_config(args: &Args) -> Result<Config> {
    let path = args.config.clone().or_else(|| {
        let default = home_dir().join("config.toml");
        default.exists().then_some(default)
    });

    let mut config = match path {
        Some(path) => Config::load_toml(&path)
            .map_err(|e| anyhow!("loading config {}: {}", path.display(), e))?,
        None => Config::default(),
    };

    if let Some(words) = &args.words {
        config.word_list = Some(words.clone());
    }
    if let Some(state) = &args.state {
        config.state_path = Some(state.clone());
    }
    if args.paused {
        config.start_paused = true;
    }
    Ok(config)
}

fn load_words(config: &Config) -> WordList {
    let Some(path) = &config.word_list else {
        return WordList::load_demo();
    };
    match WordList::load(path) {
        Ok(words) if !words.is_empty() => words,
        Ok(_) => {
            tracing::warn!(path = %path.display(), "word list is empty, using built-in list");
            WordList::load_demo()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read word list, using built-in list");
            WordList::load_demo()
        }
    }
}

fn open_store(args: &Args, config: &Config) -> Result<StateStore> {
    if args.ephemeral {
        return Ok(StateStore::in_memory());
    }
    let path = config
        .state_path
        .clone()
        .unwrap_or_else(|| home_dir().join("state.redb"));
    StateStore::open(&path).with_context(|| format!("opening state database {}", path.display()))
}

fn run<W: Write>(out: &mut W, app: &mut App) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            let (width, _) = terminal::size()?;
            draw(out, &layout(app.engine().view(), width))?;
            dirty = false;
        }
        if app.should_quit() {
            return Ok(());
        }

        let now = Instant::now();
        let timeout = app
            .engine()
            .next_deadline()
            .map(|due| due.saturating_duration_since(now))
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            dirty |= app.handle_event(&event::read()?, Instant::now());
            while event::poll(Duration::ZERO)? {
                dirty |= app.handle_event(&event::read()?, Instant::now());
            }
        }
        dirty |= app.tick(Instant::now());
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = init_logging(args.log_dir.clone());

    let config = load_config(&args)?;
    let words = load_words(&config);
    let store = open_store(&args, &config)?;

    let now = Instant::now();
    let mut engine = ScanEngine::new(words, store, config, now);
    if let Some(speed) = args.speed {
        engine.set_speed(speed, now);
    }
    let mut app = App::new(engine);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        DisableLineWrap,
        Hide
    )?;

    let result = run(&mut stdout, &mut app);

    let _ = disable_raw_mode();
    let _ = execute!(
        stdout,
        Show,
        EnableLineWrap,
        DisableMouseCapture,
        LeaveAlternateScreen
    );

    if let Err(e) = &result {
        tracing::error!(error = %e, "exiting after error");
    }
    result
}
