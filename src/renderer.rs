use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    CELL_WIDTH, GLYPH_REWARD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, GLYPH_SNAKE_TAIL, GridSize,
    Theme,
};
use crate::game::GameState;
use crate::session::SessionStatus;
use crate::snake::Position;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_board_full_menu, render_pause_menu, render_too_small};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, hud_info: &HudInfo<'_>) {
    let area = frame.area();
    let theme = hud_info.theme;
    let available = render_hud(frame, area, hud_info);

    let (width, height) = board_size(state.grid());
    if available.width < width || available.height < height {
        render_too_small(frame, available, (width, height));
        return;
    }

    let play_area = centered(available, width, height);
    let block = Block::bordered()
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));

    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_reward(frame, inner, state, theme);
    render_snake(frame, inner, state, theme);

    match hud_info.status {
        SessionStatus::Paused => render_pause_menu(frame, play_area, theme),
        SessionStatus::BoardFull => {
            render_board_full_menu(frame, play_area, state.snake.len(), theme);
        }
        SessionStatus::Playing => {}
    }
}

/// Terminal columns and rows the bordered board needs.
#[must_use]
pub fn board_size(grid: GridSize) -> (u16, u16) {
    let side = grid.side();
    (
        side.saturating_mul(CELL_WIDTH).saturating_add(2),
        side.saturating_add(2),
    )
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

fn render_reward(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    // A full board leaves the last reward under the snake.
    if state.is_board_full() {
        return;
    }

    let Some((x, y)) = logical_to_terminal(inner, state.grid(), state.reward) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_REWARD, Style::new().fg(theme.reward));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let last = state.snake.len().saturating_sub(1);
    let buffer = frame.buffer_mut();

    // Tail first so the head wins wherever segments overlap.
    for (index, segment) in state.snake.segments().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, state.grid(), *segment) else {
            continue;
        };

        let (glyph, style) = if index == 0 {
            (
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            )
        } else if index == last {
            (GLYPH_SNAKE_TAIL, Style::new().fg(theme.snake_tail))
        } else {
            (GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body))
        };

        buffer.set_string(x, y, glyph, style);
    }
}

fn logical_to_terminal(inner: Rect, grid: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(grid) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    use crate::config::{
        GLYPH_REWARD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, GLYPH_SNAKE_TAIL, GridSize,
        THEME_CLASSIC,
    };
    use crate::game::GameState;
    use crate::input::Direction;
    use crate::session::SessionStatus;
    use crate::snake::{Position, Snake};
    use crate::ui::hud::HudInfo;

    use super::{board_size, logical_to_terminal, render};

    fn draw(state: &GameState, status: SessionStatus) -> Buffer {
        let (width, height) = board_size(state.grid());
        // One extra row for the HUD; the board then sits at the origin.
        let mut terminal =
            Terminal::new(TestBackend::new(width, height + 1)).expect("test backend");
        let info = HudInfo {
            length: state.snake.len(),
            grid_side: state.grid().side(),
            tick_interval: Duration::from_millis(200),
            tick_count: 0,
            status,
            theme: &THEME_CLASSIC,
        };

        terminal
            .draw(|frame| render(frame, state, &info))
            .expect("drawing to a test backend");
        terminal.backend().buffer().clone()
    }

    fn first_char(glyph: &str) -> String {
        glyph.chars().next().map(String::from).unwrap_or_default()
    }

    fn classic_state() -> GameState {
        let grid = GridSize::new(20).expect("grid should be valid");
        let snake = Snake::from_segments(
            (10..14).map(|y| Position { x: 10, y }).collect(),
        )
        .expect("test snake should not be empty");

        GameState::from_parts(grid, snake, Direction::Right, Position { x: 0, y: 0 })
    }

    #[test]
    fn snake_and_reward_are_drawn_with_their_glyphs() {
        let buffer = draw(&classic_state(), SessionStatus::Playing);

        // Inner board origin is (1, 1); each cell spans two columns.
        assert_eq!(buffer[(21, 11)].symbol(), first_char(GLYPH_SNAKE_HEAD));
        assert_eq!(buffer[(22, 11)].symbol(), first_char(GLYPH_SNAKE_HEAD));
        assert_eq!(buffer[(21, 12)].symbol(), first_char(GLYPH_SNAKE_BODY));
        assert_eq!(buffer[(21, 13)].symbol(), first_char(GLYPH_SNAKE_BODY));
        assert_eq!(buffer[(21, 14)].symbol(), first_char(GLYPH_SNAKE_TAIL));
        assert_eq!(buffer[(1, 1)].symbol(), first_char(GLYPH_REWARD));
        assert_eq!(buffer[(21, 15)].symbol(), " ");
    }

    #[test]
    fn pause_popup_names_the_theme() {
        let buffer = draw(&classic_state(), SessionStatus::Paused);
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();

        assert!(text.contains("PAUSED"));
        assert!(text.contains("theme: Classic"));
    }

    #[test]
    fn board_size_includes_border_and_double_width_cells() {
        let grid = GridSize::new(20).expect("grid should be valid");

        assert_eq!(board_size(grid), (42, 22));
    }

    #[test]
    fn cells_map_to_double_width_columns() {
        let grid = GridSize::new(20).expect("grid should be valid");
        let inner = Rect::new(5, 3, 40, 20);

        assert_eq!(
            logical_to_terminal(inner, grid, Position { x: 0, y: 0 }),
            Some((5, 3))
        );
        assert_eq!(
            logical_to_terminal(inner, grid, Position { x: 19, y: 19 }),
            Some((43, 22))
        );
        assert_eq!(
            logical_to_terminal(inner, grid, Position { x: 20, y: 0 }),
            None
        );
    }

    #[test]
    fn cells_outside_a_clipped_area_are_skipped() {
        let grid = GridSize::new(20).expect("grid should be valid");
        let inner = Rect::new(0, 0, 10, 5);

        assert_eq!(
            logical_to_terminal(inner, grid, Position { x: 6, y: 1 }),
            None
        );
    }
}
