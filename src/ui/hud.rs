use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::session::SessionStatus;

const SEPARATOR: &str = " │ ";

/// Values displayed by the HUD row.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub length: usize,
    pub grid_side: u16,
    pub tick_interval: Duration,
    pub tick_count: u64,
    pub status: SessionStatus,
    pub theme: &'a Theme,
}

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, info: &HudInfo<'_>) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let [stats_area, keys_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(keys_width())])
            .areas(hud_area);

    frame.render_widget(
        Paragraph::new(stats_line(info)).alignment(Alignment::Left),
        stats_area,
    );
    frame.render_widget(
        Paragraph::new(Line::from(KEYS_HINT))
            .alignment(Alignment::Right)
            .style(Style::default().fg(info.theme.hud_muted)),
        keys_area,
    );

    play_area
}

const KEYS_HINT: &str = "[P] pause  [R] restart  [Q] quit";

fn keys_width() -> u16 {
    u16::try_from(KEYS_HINT.chars().count()).unwrap_or(u16::MAX)
}

fn stats_line(info: &HudInfo<'_>) -> Line<'static> {
    let value = Style::default()
        .fg(info.theme.hud_text)
        .add_modifier(Modifier::BOLD);
    let label = Style::default().fg(info.theme.hud_muted);

    let mut spans = vec![
        Span::styled("Length ", label),
        Span::styled(info.length.to_string(), value),
        Span::styled(SEPARATOR, label),
        Span::styled("Grid ", label),
        Span::styled(format!("{0}x{0}", info.grid_side), value),
        Span::styled(SEPARATOR, label),
        Span::styled("Tick ", label),
        Span::styled(info.tick_count.to_string(), value),
        Span::styled(format!(" @ {}ms", info.tick_interval.as_millis()), label),
    ];

    if let Some(status) = status_label(info.status) {
        spans.push(Span::styled(SEPARATOR, label));
        spans.push(Span::styled(status, value));
    }

    Line::from(spans)
}

fn status_label(status: SessionStatus) -> Option<&'static str> {
    match status {
        SessionStatus::Playing => None,
        SessionStatus::Paused => Some("PAUSED"),
        SessionStatus::BoardFull => Some("BOARD FULL"),
    }
}
