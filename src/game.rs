use rand::Rng;
use serde::Serialize;

use crate::config::{ConfigError, GridSize, SessionConfig};
use crate::input::Direction;
use crate::reward::spawn_reward;
use crate::snake::{Position, Snake};

/// What a single simulation step did.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TickEvent {
    /// Plain move, or a growing move queued by an earlier reward.
    Moved,
    /// The head landed on the reward; a new one was placed.
    AteReward,
    /// The head landed on the body and `lost` segments were cut off.
    BitSelf { lost: usize },
    /// The reward was eaten and no free cell remains for the next one.
    BoardFull,
}

/// Complete simulation state for one session.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct GameState {
    pub snake: Snake,
    pub direction: Direction,
    pub reward: Position,
    grow: bool,
    board_full: bool,
    grid: GridSize,
}

/// A new state together with the event that produced it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StepResult {
    pub state: GameState,
    pub event: TickEvent,
}

impl GameState {
    /// Builds the opening state from a validated config and places the first reward.
    pub fn new<R: Rng + ?Sized>(config: &SessionConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;

        let snake = Snake::from_segments(config.initial_snake.clone())?;
        let reward =
            spawn_reward(rng, config.grid, &snake).ok_or(ConfigError::SnakeFillsGrid {
                length: snake.len(),
                cells: config.grid.total_cells(),
            })?;

        Ok(Self::from_parts(
            config.grid,
            snake,
            config.initial_direction,
            reward,
        ))
    }

    /// Assembles a state directly, with no pending growth.
    #[must_use]
    pub fn from_parts(
        grid: GridSize,
        snake: Snake,
        direction: Direction,
        reward: Position,
    ) -> Self {
        Self {
            snake,
            direction,
            reward,
            grow: false,
            board_full: false,
            grid,
        }
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Returns true when the next step keeps the tail (a reward was just eaten).
    #[must_use]
    pub fn grows_next(&self) -> bool {
        self.grow
    }

    /// Returns true once no free cell is left for a reward.
    #[must_use]
    pub fn is_board_full(&self) -> bool {
        self.board_full
    }
}

/// Advances `state` by one tick travelling in `direction`.
///
/// The direction is trusted as given; reversal filtering belongs to the
/// input layer.
#[must_use]
pub fn step<R: Rng + ?Sized>(state: GameState, direction: Direction, rng: &mut R) -> GameState {
    step_detailed(state, direction, rng).state
}

/// Same as [`step`], also reporting what happened.
#[must_use]
pub fn step_detailed<R: Rng + ?Sized>(
    mut state: GameState,
    direction: Direction,
    rng: &mut R,
) -> StepResult {
    let event = apply_step(&mut state, direction, rng);
    StepResult { state, event }
}

/// Advances `state` in place by one tick; the body is reused, not copied.
///
/// Produces exactly the state [`step`] would return for the same inputs.
pub fn apply_step<R: Rng + ?Sized>(
    state: &mut GameState,
    direction: Direction,
    rng: &mut R,
) -> TickEvent {
    if state.board_full {
        return TickEvent::BoardFull;
    }

    let grid = state.grid;
    let head = state.snake.head().stepped(direction);
    state.snake.advance(head, state.grow);
    state.direction = direction;
    state.grow = false;
    let mut event = TickEvent::Moved;

    let wrapped_head = head.wrapped(grid);
    if wrapped_head == state.reward {
        state.grow = true;

        // Occupancy has to see the head where it will be drawn.
        state.snake.wrap(grid);
        match spawn_reward(rng, grid, &state.snake) {
            Some(cell) => {
                log::debug!(
                    "reward eaten at ({}, {}), next at ({}, {})",
                    wrapped_head.x,
                    wrapped_head.y,
                    cell.x,
                    cell.y
                );
                state.reward = cell;
                event = TickEvent::AteReward;
            }
            None => {
                log::info!("board full at length {}", state.snake.len());
                state.board_full = true;
                event = TickEvent::BoardFull;
            }
        }
    }

    if let Some(index) = state.snake.bite_index(wrapped_head) {
        let before = state.snake.len();
        state.snake.truncate_after(index);
        let lost = before - state.snake.len();
        log::debug!("bit own segment {index}, lost {lost}");

        if event != TickEvent::BoardFull {
            event = TickEvent::BitSelf { lost };
        }
    }

    state.snake.wrap(grid);

    event
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::{GridSize, SessionConfig};
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{GameState, TickEvent, apply_step, step, step_detailed};

    fn grid(side: u16) -> GridSize {
        GridSize::new(side).expect("test grid should be valid")
    }

    fn snake(cells: &[(i32, i32)]) -> Snake {
        Snake::from_segments(cells.iter().map(|&(x, y)| Position { x, y }).collect())
            .expect("test snake should not be empty")
    }

    fn cells(snake: &Snake) -> Vec<(i32, i32)> {
        snake.segments().map(|p| (p.x, p.y)).collect()
    }

    fn classic_snake() -> Snake {
        snake(&[(10, 10), (10, 11), (10, 12), (10, 13)])
    }

    #[test]
    fn plain_move_slides_the_body() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = GameState::from_parts(
            grid(20),
            classic_snake(),
            Direction::Right,
            Position { x: 0, y: 0 },
        );

        let result = step_detailed(state, Direction::Right, &mut rng);

        assert_eq!(result.event, TickEvent::Moved);
        assert_eq!(
            cells(&result.state.snake),
            vec![(11, 10), (10, 10), (10, 11), (10, 12)]
        );
        assert_eq!(result.state.reward, Position { x: 0, y: 0 });
        assert!(!result.state.grows_next());
    }

    #[test]
    fn eating_sets_grow_flag_and_growth_lands_next_tick() {
        let mut rng = StdRng::seed_from_u64(2);
        let state = GameState::from_parts(
            grid(20),
            classic_snake(),
            Direction::Right,
            Position { x: 11, y: 10 },
        );

        let eaten = step_detailed(state, Direction::Right, &mut rng);

        assert_eq!(eaten.event, TickEvent::AteReward);
        assert!(eaten.state.grows_next());
        assert_eq!(eaten.state.snake.head(), Position { x: 11, y: 10 });
        assert_eq!(eaten.state.snake.len(), 4);
        assert_ne!(eaten.state.reward, Position { x: 11, y: 10 });
        assert!(!eaten.state.snake.occupies(eaten.state.reward));

        let previous = cells(&eaten.state.snake);
        let grown = step(eaten.state, Direction::Right, &mut rng);

        assert_eq!(grown.snake.len(), 5);
        assert_eq!(grown.snake.head(), Position { x: 12, y: 10 });
        assert_eq!(cells(&grown.snake)[1..], previous[..]);
    }

    #[test]
    fn head_wraps_across_the_right_edge() {
        let mut rng = StdRng::seed_from_u64(3);
        let state = GameState::from_parts(
            grid(20),
            snake(&[(19, 10), (18, 10), (17, 10)]),
            Direction::Right,
            Position { x: 5, y: 5 },
        );

        let next = step(state, Direction::Right, &mut rng);

        assert_eq!(next.snake.head(), Position { x: 0, y: 10 });
        assert_eq!(cells(&next.snake), vec![(0, 10), (19, 10), (18, 10)]);
    }

    #[test]
    fn head_wraps_across_the_top_edge() {
        let mut rng = StdRng::seed_from_u64(4);
        let state = GameState::from_parts(
            grid(20),
            snake(&[(5, 0), (5, 1)]),
            Direction::Up,
            Position { x: 9, y: 9 },
        );

        let next = step(state, Direction::Up, &mut rng);

        assert_eq!(next.snake.head(), Position { x: 5, y: 19 });
    }

    #[test]
    fn reward_across_the_edge_is_eaten() {
        let mut rng = StdRng::seed_from_u64(5);
        let state = GameState::from_parts(
            grid(20),
            snake(&[(0, 7), (1, 7)]),
            Direction::Left,
            Position { x: 19, y: 7 },
        );

        let result = step_detailed(state, Direction::Left, &mut rng);

        assert_eq!(result.event, TickEvent::AteReward);
        assert!(!result.state.snake.occupies(result.state.reward));
    }

    #[test]
    fn self_bite_keeps_segments_behind_the_bite() {
        let mut rng = StdRng::seed_from_u64(6);
        let state = GameState::from_parts(
            grid(20),
            snake(&[(2, 2), (2, 3), (3, 3), (3, 2), (3, 1), (3, 0), (4, 0)]),
            Direction::Right,
            Position { x: 15, y: 15 },
        );

        let result = step_detailed(state, Direction::Right, &mut rng);

        assert_eq!(result.event, TickEvent::BitSelf { lost: 5 });
        assert_eq!(cells(&result.state.snake), vec![(3, 1), (3, 0)]);
    }

    #[test]
    fn biting_the_last_segment_leaves_a_single_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = GameState::from_parts(
            grid(20),
            snake(&[(2, 2), (2, 3), (3, 3), (3, 2), (3, 1)]),
            Direction::Right,
            Position { x: 15, y: 15 },
        );

        let result = step_detailed(state, Direction::Right, &mut rng);

        assert_eq!(result.event, TickEvent::BitSelf { lost: 4 });
        assert_eq!(cells(&result.state.snake), vec![(3, 2)]);
    }

    #[test]
    fn step_trusts_the_given_direction() {
        let mut rng = StdRng::seed_from_u64(8);
        let state = GameState::from_parts(
            grid(20),
            snake(&[(5, 5)]),
            Direction::Right,
            Position { x: 0, y: 0 },
        );

        let next = step(state, Direction::Left, &mut rng);

        assert_eq!(next.direction, Direction::Left);
        assert_eq!(next.snake.head(), Position { x: 4, y: 5 });
    }

    #[test]
    fn eating_the_last_free_cell_fills_the_board() {
        let mut rng = StdRng::seed_from_u64(9);
        // Grow into the remaining cell with the tail still attached.
        let state = GameState {
            grow: true,
            ..GameState::from_parts(
                grid(2),
                snake(&[(0, 0), (0, 1), (1, 1)]),
                Direction::Right,
                Position { x: 1, y: 0 },
            )
        };
        let full = step_detailed(state, Direction::Right, &mut rng);

        assert_eq!(full.event, TickEvent::BoardFull);
        assert!(full.state.is_board_full());
        assert_eq!(full.state.snake.len(), 4);

        let frozen = step_detailed(full.state.clone(), Direction::Down, &mut rng);
        assert_eq!(frozen.event, TickEvent::BoardFull);
        assert_eq!(frozen.state, full.state);
    }

    #[test]
    fn in_place_step_matches_the_owned_step() {
        let mut owned_rng = StdRng::seed_from_u64(12);
        let mut in_place_rng = StdRng::seed_from_u64(12);
        let mut owned = GameState::from_parts(
            grid(6),
            snake(&[(0, 2), (0, 3), (0, 4), (1, 4), (1, 3)]),
            Direction::Up,
            Position { x: 0, y: 0 },
        );
        let mut in_place = owned.clone();
        let moves = [
            Direction::Up,
            Direction::Up,
            Direction::Left,
            Direction::Down,
            Direction::Right,
            Direction::Right,
            Direction::Up,
        ];

        for direction in moves.into_iter().cycle().take(40) {
            let result = step_detailed(owned, direction, &mut owned_rng);
            let event = apply_step(&mut in_place, direction, &mut in_place_rng);

            assert_eq!(event, result.event);
            assert_eq!(in_place, result.state);
            owned = result.state;
        }
    }

    #[test]
    fn configured_direction_is_the_opening_direction() {
        let mut rng = StdRng::seed_from_u64(13);
        let config = SessionConfig::default().with_direction(Direction::Left);

        let state = GameState::new(&config, &mut rng).expect("default layout fits");
        let next = step(state.clone(), state.direction, &mut rng);

        assert_eq!(state.direction, Direction::Left);
        assert_eq!(next.snake.head(), Position { x: 9, y: 10 });
    }

    #[test]
    fn new_state_places_reward_off_the_snake() {
        let mut rng = StdRng::seed_from_u64(10);
        let config = SessionConfig::default();

        let state = GameState::new(&config, &mut rng).expect("default config is valid");

        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.snake.len(), 4);
        assert!(!state.snake.occupies(state.reward));
        assert!(state.reward.is_within_bounds(state.grid()));
    }

    #[test]
    fn new_state_rejects_invalid_config() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = SessionConfig::default().with_snake(Vec::new());

        assert!(GameState::new(&config, &mut rng).is_err());
    }
}
