use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use flappy_term::{
    Artwork, AssetProvider, AudioSink, BuiltinAssets, DirAssets, FrameClock, Game, GameConfig,
    RodioSink, SilentSink, Sounds, TerminalCanvas, TerminalInput, VERSION,
};

/// Flap through the pipes. Space, Up, Enter or a click to flap; Esc or q to quit.
#[derive(Parser, Debug)]
#[command(name = "flappy-term", version)]
struct Args {
    /// Folder with `images/` and `audio/` to use instead of the built-in art
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Seed for the pipe gaps
    #[arg(long)]
    seed: Option<u64>,

    /// No sound
    #[arg(long)]
    mute: bool,

    /// Write logs here (the terminal is busy showing the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {e}"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    info!("flappy-term v{}", VERSION);

    let cfg = GameConfig::default();
    info!(
        "screen {}x{}, {} fps, volume {}",
        cfg.screen_width, cfg.screen_height, cfg.fps, cfg.volume
    );

    // Everything is loaded before the terminal is taken over, so a missing
    // file is reported on a normal screen.
    let mut assets: Box<dyn AssetProvider> = match &args.assets {
        Some(dir) => Box::new(DirAssets::new(dir)),
        None => {
            info!("using built-in assets");
            Box::new(BuiltinAssets)
        }
    };
    let art = Artwork::load(assets.as_mut()).context("failed to load images")?;
    let sounds = Sounds::load(assets.as_mut()).context("failed to load sounds")?;

    let rng = match args.seed {
        Some(seed) => {
            info!("pipe seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let mut audio: Box<dyn AudioSink> = if args.mute {
        Box::new(SilentSink)
    } else {
        let sink = RodioSink::new(cfg.volume);
        info!("audio output available: {}", sink.is_available());
        Box::new(sink)
    };

    let (w, h) = (cfg.screen_width as usize, cfg.screen_height as usize);
    let mut game = Game::new(cfg, art, sounds, rng);
    let mut input = TerminalInput;
    let mut clock = FrameClock::new();

    let mut canvas = TerminalCanvas::new(w, h).context("failed to set up the terminal")?;
    let result = flappy_term::run(
        &mut game,
        &mut input,
        &mut canvas,
        audio.as_mut(),
        &mut clock,
    );
    canvas.restore()?;
    result?;

    println!(
        "Game over. Score: {}  High score: {}",
        game.score(),
        game.high_score().max(game.score())
    );
    Ok(())
}
