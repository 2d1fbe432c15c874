//! Terminal runner (default binary).
//!
//! Reads keys with crossterm, turns them into a per-frame intent set and
//! drives the engine with a monotonic clock. Rendering goes through the
//! framebuffer renderer in `blockfall-term`.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use blockfall::core::{EngineConfig, GameEngine, GameSnapshot};
use blockfall::input::{should_quit, KeyTracker};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Target frame time
const FRAME: Duration = Duration::from_millis(16);

/// With real release events the hold timeout only guards against a lost release.
const RELEASE_AWARE_HOLD_TIMEOUT_MS: u64 = 1000;

/// blockfall - falling-block puzzle in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON engine configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Piece source seed (defaults to the wall clock)
    #[arg(short, long)]
    seed: Option<u32>,

    /// Move-down drops the piece to the floor
    #[arg(long)]
    instant_down: bool,

    /// Write logs here (filter with RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_tracing(path)?;
    }

    let config = load_config(&args)?;
    info!(
        width = config.board_width,
        height = config.board_height,
        seed = ?config.seed,
        "starting session"
    );
    let engine = GameEngine::new(config).context("invalid engine configuration")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && execute!(
            std::io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .is_ok();

    let result = run(&mut term, engine, enhanced);

    // Always try to restore terminal state.
    if enhanced {
        let _ = execute!(std::io::stdout(), PopKeyboardEnhancementFlags);
    }
    let _ = term.exit();
    result
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.instant_down {
        config.instant_down = true;
    }
    if config.seed.is_none() {
        config.seed = Some(clock_seed());
    }
    Ok(config)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, mut engine: GameEngine, enhanced: bool) -> Result<()> {
    let view = GameView::default();
    let mut tracker = if enhanced {
        KeyTracker::with_hold_timeout_ms(RELEASE_AWARE_HOLD_TIMEOUT_MS)
    } else {
        KeyTracker::new()
    };
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    loop {
        let frame_start = Instant::now();

        engine.snapshot_into(&mut snap);
        let (w, h) = terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Drain input until the frame is due.
        let mut timeout = FRAME.saturating_sub(frame_start.elapsed());
        while event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        info!(score = engine.score(), lines = engine.lines(), "quit");
                        return Ok(());
                    }
                    tracker.handle_key(key, now_ms());
                }
                Event::FocusLost => {
                    tracker.clear();
                    engine.focus_lost();
                }
                Event::FocusGained => engine.focus_gained(),
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
            timeout = FRAME.saturating_sub(frame_start.elapsed());
        }

        let now = now_ms();
        engine.tick(now, tracker.intents(now));
    }
}
