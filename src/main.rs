use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event};
use rand::SeedableRng;
use rand::rngs::StdRng;
use torus_snake::config::{
    ConfigError, DEFAULT_GRID_SIZE, DEFAULT_TICK_INTERVAL_MS, GridSize, SessionConfig,
    THEME_CLASSIC,
};
use torus_snake::headless;
use torus_snake::input::{Direction, GameInput, map_key_event};
use torus_snake::renderer;
use torus_snake::session::Session;
use torus_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use torus_snake::ui::hud::HudInfo;

/// Upper bound on how long one input poll blocks between frames.
const FRAME_POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Side length of the square, wrap-around board.
    #[arg(long = "grid-size", default_value_t = DEFAULT_GRID_SIZE)]
    grid_size: u16,

    /// Milliseconds between simulation ticks.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Direction the snake travels before the first key press.
    #[arg(long, value_enum, default_value_t = Direction::Right)]
    direction: Direction,

    /// Seed for reward placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a terminal UI, printing one JSON state per tick.
    #[arg(long)]
    headless: bool,

    /// Number of ticks to simulate in headless mode.
    #[arg(long, default_value_t = 100, requires = "headless")]
    ticks: u64,

    /// Scripted U/D/L/R directions for headless mode, one per tick.
    #[arg(long, default_value = "", requires = "headless")]
    moves: String,

    /// Write log output to this file instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = session_config(&cli).map_err(invalid_input)?;
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(config, rng).map_err(invalid_input)?;

    if cli.headless {
        let moves = headless::parse_moves(&cli.moves).map_err(invalid_input)?;
        let stdout = io::stdout();
        return headless::run(&mut session, cli.ticks, &moves, &mut stdout.lock());
    }

    install_panic_hook();
    let mut terminal = TerminalSession::enter()?;
    run(&mut terminal, &mut session)
}

fn session_config(cli: &Cli) -> Result<SessionConfig, ConfigError> {
    let grid = GridSize::new(cli.grid_size)?;
    Ok(SessionConfig::new(grid)
        .with_direction(cli.direction)
        .with_tick_interval(Duration::from_millis(cli.tick_ms)))
}

fn run(terminal: &mut TerminalSession, session: &mut Session) -> io::Result<()> {
    let tick_interval = session.config().tick_interval;
    let mut last_tick = Instant::now();

    loop {
        terminal.terminal_mut().draw(|frame| {
            let hud_info = HudInfo {
                length: session.state().snake.len(),
                grid_side: session.state().grid().side(),
                tick_interval,
                tick_count: session.tick_count(),
                status: session.status(),
                theme: &THEME_CLASSIC,
            };
            renderer::render(frame, session.state(), &hud_info);
        })?;

        let timeout = tick_interval
            .saturating_sub(last_tick.elapsed())
            .min(FRAME_POLL_INTERVAL);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match map_key_event(key) {
                    Some(GameInput::Quit) => break,
                    Some(input) => session.apply_input(input),
                    None => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_interval {
            session.tick();
            last_tick = Instant::now();
        }
    }

    log::info!("quit after {} ticks", session.tick_count());
    Ok(())
}

fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn invalid_input<E>(error: E) -> io::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    io::Error::new(io::ErrorKind::InvalidInput, error)
}
