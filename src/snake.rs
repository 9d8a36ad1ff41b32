use std::collections::VecDeque;

use serde::Serialize;

use crate::config::{ConfigError, GridSize};
use crate::input::Direction;

/// Grid position in logical cell coordinates.
///
/// Coordinates may leave `[0, side)` while a step is being computed;
/// [`Position::wrapped`] folds them back onto the torus.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, grid: GridSize) -> bool {
        let side = i32::from(grid.side());
        self.x >= 0 && self.y >= 0 && self.x < side && self.y < side
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, grid: GridSize) -> Self {
        let side = i32::from(grid.side());
        Self {
            x: wrap_axis(self.x, side),
            y: wrap_axis(self.y, side),
        }
    }

    /// Returns the neighbouring position one unit along `direction`, unwrapped.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - 1,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + 1,
            },
            Direction::Left => Self {
                x: self.x - 1,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + 1,
                y: self.y,
            },
        }
    }
}

/// Maps `value` into `[0, upper_bound)`, including negative inputs.
#[must_use]
pub fn wrap_axis(value: i32, upper_bound: i32) -> i32 {
    debug_assert!(upper_bound > 0);

    let wrapped = value % upper_bound;
    if wrapped < 0 {
        wrapped + upper_bound
    } else {
        wrapped
    }
}

/// Ordered snake body, head first. Never empty.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    pub fn from_segments(segments: Vec<Position>) -> Result<Self, ConfigError> {
        if segments.is_empty() {
            return Err(ConfigError::EmptySnake);
        }

        Ok(Self {
            body: VecDeque::from(segments),
        })
    }

    /// Pushes `head` on the front.
    ///
    /// When `grow` is false the previous tail is dropped, so the length is
    /// unchanged; otherwise the whole previous body is kept.
    pub fn advance(&mut self, head: Position, grow: bool) {
        self.body.push_front(head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Index of the first non-head segment equal to `cell`.
    #[must_use]
    pub fn bite_index(&self, cell: Position) -> Option<usize> {
        self.body
            .iter()
            .skip(1)
            .position(|segment| *segment == cell)
            .map(|offset| offset + 1)
    }

    /// Discards everything from the head up to and including `index`.
    ///
    /// The segment right after `index` becomes the new head. When nothing
    /// follows `index` the snake collapses onto the bitten cell, so it is
    /// never left empty.
    pub fn truncate_after(&mut self, index: usize) {
        let survivors = self.body.split_off((index + 1).min(self.body.len()));
        if survivors.is_empty() {
            let bitten = self.tail();
            self.body.clear();
            self.body.push_back(bitten);
        } else {
            self.body = survivors;
        }
    }

    /// Wraps every segment onto the torus independently.
    pub fn wrap(&mut self, grid: GridSize) {
        for segment in &mut self.body {
            *segment = segment.wrapped(grid);
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the last segment.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Position> + ExactSizeIterator {
        self.body.iter()
    }
}
