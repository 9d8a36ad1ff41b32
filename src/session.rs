use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{ConfigError, SessionConfig};
use crate::game::{GameState, TickEvent, apply_step};
use crate::input::{Direction, DirectionIntent, GameInput};

/// Current high-level session state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionStatus {
    Playing,
    Paused,
    BoardFull,
}

/// Serial tick loop around the simulation: one writer, one step per tick.
#[derive(Debug, Clone)]
pub struct Session<R = StdRng> {
    config: SessionConfig,
    state: GameState,
    intent: DirectionIntent,
    paused: bool,
    tick_count: u64,
    rng: R,
}

impl Session<StdRng> {
    /// Creates a deterministic session for tests and reproducible runs.
    pub fn from_seed(config: SessionConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Validates `config` and places the opening reward with `rng`.
    pub fn new(config: SessionConfig, mut rng: R) -> Result<Self, ConfigError> {
        let state = GameState::new(&config, &mut rng)?;
        log::info!(
            "session started on a {0}x{0} grid, snake length {1}",
            config.grid.side(),
            state.snake.len()
        );

        Ok(Self {
            intent: DirectionIntent::new(state.direction),
            config,
            state,
            paused: false,
            tick_count: 0,
            rng,
        })
    }

    /// Advances the simulation by one tick unless paused or finished.
    pub fn tick(&mut self) -> Option<TickEvent> {
        if self.status() != SessionStatus::Playing {
            return None;
        }

        let direction = self.intent.requested();
        let event = apply_step(&mut self.state, direction, &mut self.rng);
        self.tick_count += 1;

        if let TickEvent::BitSelf { lost } = event {
            log::info!(
                "tick {}: bit itself, {lost} segments lost, length now {}",
                self.tick_count,
                self.state.snake.len()
            );
        }

        Some(event)
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                if self.status() == SessionStatus::Playing {
                    self.intent.request(self.state.direction, direction);
                }
            }
            GameInput::Pause => {
                if self.status() != SessionStatus::BoardFull {
                    self.paused = !self.paused;
                }
            }
            GameInput::Restart => self.restart(),
            GameInput::Quit => {}
        }
    }

    /// Starts over from the configured opening layout.
    pub fn restart(&mut self) {
        match GameState::new(&self.config, &mut self.rng) {
            Ok(state) => {
                self.intent = DirectionIntent::new(state.direction);
                self.state = state;
                self.paused = false;
                self.tick_count = 0;
                log::info!("session restarted");
            }
            // The config was validated when the session was built.
            Err(error) => log::warn!("restart failed: {error}"),
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if self.state.is_board_full() {
            SessionStatus::BoardFull
        } else if self.paused {
            SessionStatus::Paused
        } else {
            SessionStatus::Playing
        }
    }

    /// Latest complete state, for rendering.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Direction the next tick will travel.
    #[must_use]
    pub fn requested_direction(&self) -> Direction {
        self.intent.requested()
    }
}
