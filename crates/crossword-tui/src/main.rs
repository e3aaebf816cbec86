mod app;
mod render;
mod store;
mod theme;

use app::App;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use crossword_core::{ClueCorpus, Difficulty, Session, SessionConfig};
use std::error::Error;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use store::FileStore;
use theme::Theme;
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Crossword ladder: solve Easy, Normal and Hard puzzles in a row
#[derive(Debug, Parser)]
#[command(name = "crossword", version, about)]
struct Args {
    /// Start at this difficulty instead of the saved one (easy, normal, hard)
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// JSON word list of `{"word", "clue"}` entries to use instead of the built-in one
    #[arg(long, value_name = "PATH")]
    corpus: Option<PathBuf>,

    /// JSON session settings (score, timings, hint rules per tier)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for word choice, layout and hints
    #[arg(long)]
    seed: Option<u64>,

    /// Forget saved progress before starting
    #[arg(long)]
    reset: bool,

    /// Use the high contrast color theme
    #[arg(long)]
    high_contrast: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let dir = store::data_dir();

    if let Err(err) = init_logging(&dir) {
        eprintln!("Warning: logging disabled: {}", err);
    }

    let session = match build_session(&args, &dir) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };
    let theme = if args.high_contrast {
        Theme::high_contrast()
    } else {
        Theme::dark()
    };
    let mut app = App::new(session, theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

/// Send logs to a file in the data directory so they never hit the screen.
/// `RUST_LOG` controls verbosity.
fn init_logging(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("crossword.log"))?;

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn build_session(args: &Args, dir: &Path) -> Result<Session, Box<dyn Error>> {
    let corpus = match &args.corpus {
        Some(path) => ClueCorpus::from_path(path)?,
        None => ClueCorpus::embedded()?,
    };

    let config = match &args.config {
        Some(path) => serde_json::from_str::<SessionConfig>(&fs::read_to_string(path)?)?,
        None => SessionConfig::default(),
    };

    let mut store = FileStore::open(dir);
    if args.reset {
        if let Err(err) = store.clear() {
            warn!(%err, "failed to reset saved progress");
        }
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, words = corpus.len(), "starting");

    let mut builder = Session::builder(corpus)
        .config(config)
        .store(store)
        .seed(seed);
    if let Some(difficulty) = args.difficulty {
        builder = builder.difficulty(difficulty);
    }
    Ok(builder.build())
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let start = Instant::now();
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.tick_rate();

        render::render(stdout, app)?;
        stdout.flush()?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                }
            }
        }

        // Session clock: debounced checks and the play timer
        if last_tick.elapsed() >= tick_rate {
            app.tick(start.elapsed());
            last_tick = Instant::now();
        }
    }

    Ok(())
}
