use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pacman_game::config::Settings;
use pacman_game::render::Renderer;
use pacman_game::tick::{self, Flow, Ticker};
use pacman_game::{input, load_map, Game};

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal Pac-Man")]
struct Cli {
    /// Map file to play.
    #[arg(long)]
    map: Option<PathBuf>,
    /// Milliseconds between simulation steps on level 1.
    #[arg(long)]
    tick_ms: Option<u64>,
    #[arg(long)]
    fps: Option<u64>,
    /// Seed for ghost movement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs here. Nothing is logged otherwise.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply(self, mut settings: Settings) -> Settings {
        if let Some(map) = self.map {
            settings.map_path = map;
        }
        if let Some(tick_ms) = self.tick_ms.filter(|v| *v > 0) {
            settings.tick_ms = tick_ms;
        }
        if let Some(fps) = self.fps.filter(|v| *v > 0) {
            settings.render_fps = fps;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if self.log_file.is_some() {
            settings.log_file = self.log_file;
        }
        settings
    }
}

fn main() -> Result<()> {
    let settings = Cli::parse().apply(Settings::from_env());
    init_tracing(&settings)?;

    let layout = load_map(&settings.map_path)
        .with_context(|| format!("cannot start with map {}", settings.map_path.display()))?;
    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let game = Game::new(layout, settings.tick_interval());
    info!(map = %settings.map_path.display(), seed = ?settings.seed, "starting");

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, game, rng, &settings);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result?;
    Ok(())
}

/// The terminal belongs to the game, so logs only go to a file.
fn init_tracing(settings: &Settings) -> Result<()> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(
    stdout: &mut Stdout,
    mut game: Game,
    mut rng: StdRng,
    settings: &Settings,
) -> io::Result<()> {
    let start = Instant::now();
    let mut ticker = Ticker::new(start.elapsed());
    let mut renderer = Renderer::new(game.grid().width(), game.grid().height());
    let frame_time = settings.frame_time();

    loop {
        let frame_start = Instant::now();
        let command = input::poll_command()?;
        if tick::advance(&mut game, &mut rng, &mut ticker, command, start.elapsed()) == Flow::Quit {
            info!(score = game.score(), level = game.level(), "quit");
            return Ok(());
        }
        renderer.render(stdout, &game)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
