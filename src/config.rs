use std::collections::HashSet;
use std::time::Duration;

use ratatui::style::Color;
use serde::Serialize;
use thiserror::Error;

use crate::input::Direction;
use crate::snake::Position;

/// Default side length of the square torus.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Largest accepted side length.
pub const MAX_GRID_SIZE: u16 = 1024;

/// Segment count of the starting snake.
pub const DEFAULT_SNAKE_LENGTH: usize = 4;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Random draws attempted before reward placement scans for free cells.
pub const MAX_REWARD_SAMPLES: usize = 64;

/// Errors raised while validating session parameters.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid size must be positive")]
    ZeroGridSize,

    #[error("grid size {side} exceeds the maximum of {max}")]
    GridTooLarge { side: u16, max: u16 },

    #[error("initial snake must contain at least one segment")]
    EmptySnake,

    #[error("snake segment ({x}, {y}) lies outside the {side}x{side} grid")]
    SegmentOutOfBounds { x: i32, y: i32, side: u16 },

    #[error("snake segment ({x}, {y}) appears more than once")]
    DuplicateSegment { x: i32, y: i32 },

    #[error("snake of length {length} leaves no free cell on a grid of {cells} cells")]
    SnakeFillsGrid { length: usize, cells: usize },

    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}

/// Side length of the square, wrap-around play field.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct GridSize {
    side: u16,
}

impl GridSize {
    /// Default 20x20 field.
    pub const DEFAULT: Self = Self {
        side: DEFAULT_GRID_SIZE,
    };

    /// Creates a grid, rejecting zero and oversized sides.
    pub fn new(side: u16) -> Result<Self, ConfigError> {
        if side == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        if side > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                side,
                max: MAX_GRID_SIZE,
            });
        }

        Ok(Self { side })
    }

    /// Returns the side length in cells.
    #[must_use]
    pub fn side(self) -> u16 {
        self.side
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.side) * usize::from(self.side)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Parameters fixed for the lifetime of one session.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SessionConfig {
    pub grid: GridSize,
    /// Starting body, head first.
    pub initial_snake: Vec<Position>,
    pub initial_direction: Direction,
    /// Presentation cadence only; simulation results do not depend on it.
    pub tick_interval: Duration,
}

impl SessionConfig {
    /// Creates the default layout for `grid`: a vertical four-cell snake
    /// with its head at the centre, travelling right.
    #[must_use]
    pub fn new(grid: GridSize) -> Self {
        Self {
            grid,
            initial_snake: default_snake(grid),
            initial_direction: Direction::Right,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
        }
    }

    #[must_use]
    pub fn with_snake(mut self, segments: Vec<Position>) -> Self {
        self.initial_snake = segments;
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.initial_direction = direction;
        self
    }

    #[must_use]
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Checks every invariant the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_snake.is_empty() {
            return Err(ConfigError::EmptySnake);
        }

        if let Some(outside) = self
            .initial_snake
            .iter()
            .find(|segment| !segment.is_within_bounds(self.grid))
        {
            return Err(ConfigError::SegmentOutOfBounds {
                x: outside.x,
                y: outside.y,
                side: self.grid.side(),
            });
        }

        let mut seen = HashSet::with_capacity(self.initial_snake.len());
        if let Some(repeated) = self
            .initial_snake
            .iter()
            .find(|segment| !seen.insert(**segment))
        {
            return Err(ConfigError::DuplicateSegment {
                x: repeated.x,
                y: repeated.y,
            });
        }

        // At least one cell must stay free for the first reward.
        if self.initial_snake.len() >= self.grid.total_cells() {
            return Err(ConfigError::SnakeFillsGrid {
                length: self.initial_snake.len(),
                cells: self.grid.total_cells(),
            });
        }

        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }

        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(GridSize::DEFAULT)
    }
}

/// Head at the grid centre, remaining segments stacked below it.
#[must_use]
pub fn default_snake(grid: GridSize) -> Vec<Position> {
    let centre = i32::from(grid.side() / 2);

    (0..DEFAULT_SNAKE_LENGTH as i32)
        .map(|offset| {
            Position {
                x: centre,
                y: centre + offset,
            }
            .wrapped(grid)
        })
        .collect()
}

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub reward: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_text: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
}

/// Classic green snake on dark theme.
pub const THEME_CLASSIC: Theme = Theme {
    name: "Classic",
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    reward: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::Gray,
    hud_text: Color::White,
    hud_muted: Color::DarkGray,
    menu_title: Color::Green,
};

/// Each logical cell is drawn two terminal columns wide to look square.
pub const CELL_WIDTH: u16 = 2;

pub const GLYPH_SNAKE_HEAD: &str = "██";
pub const GLYPH_SNAKE_BODY: &str = "▓▓";
pub const GLYPH_SNAKE_TAIL: &str = "▒▒";
pub const GLYPH_REWARD: &str = "◖◗";
