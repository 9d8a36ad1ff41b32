use rand::Rng;

use crate::config::{GridSize, MAX_REWARD_SAMPLES};
use crate::snake::{Position, Snake};

/// Picks a uniformly random cell that the snake does not occupy.
///
/// Draws up to [`MAX_REWARD_SAMPLES`] candidates first, then falls back to a
/// uniform choice among the free cells found by scanning the grid. Returns
/// `None` when the snake covers every cell.
#[must_use]
pub fn spawn_reward<R: Rng + ?Sized>(
    rng: &mut R,
    grid: GridSize,
    snake: &Snake,
) -> Option<Position> {
    let side = i32::from(grid.side());

    for _ in 0..MAX_REWARD_SAMPLES {
        let candidate = Position {
            x: rng.gen_range(0..side),
            y: rng.gen_range(0..side),
        };
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    log::debug!(
        "reward sampling exhausted {MAX_REWARD_SAMPLES} draws on a {side}x{side} grid, scanning"
    );

    let candidates = free_cells(grid, snake);
    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

/// Lists every cell not covered by the snake, row by row.
#[must_use]
pub fn free_cells(grid: GridSize, snake: &Snake) -> Vec<Position> {
    let side = i32::from(grid.side());
    let mut candidates = Vec::new();

    for y in 0..side {
        for x in 0..side {
            let position = Position { x, y };
            if !snake.occupies(position) {
                candidates.push(position);
            }
        }
    }

    candidates
}
