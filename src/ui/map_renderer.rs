use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::hud::render_hud;
use crate::app::App;
use crate::logging::create_log_widget;
use crate::simulation::WorldSnapshot;

/// Lays out the map on the left and the HUD above the log pane on the right.
pub fn render_app(frame: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.snapshot();
    let map_width = padded_length(snapshot.width, 2);
    let hud_height = padded_length(snapshot.robots.len(), 8);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(map_width), Constraint::Min(30)])
        .split(area);
    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(hud_height),
            Constraint::Min(5),
        ])
        .split(columns[1]);

    render_map(frame, columns[0], &snapshot);
    render_hud(frame, side[0], app, &snapshot);
    frame.render_widget(create_log_widget(), side[1]);
}

/// Terminal length for `count` cells plus `pad`, clamped to what a `Rect` holds.
fn padded_length(count: usize, pad: u16) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX).saturating_add(pad)
}

pub fn render_map(frame: &mut Frame, area: Rect, snapshot: &WorldSnapshot) {
    let lines = create_styled_lines(snapshot);
    frame.render_widget(create_map_widget(lines), area);
}

fn create_styled_lines(snapshot: &WorldSnapshot) -> Vec<Line<'static>> {
    snapshot
        .to_string()
        .lines()
        .map(|line| Line::from(line.chars().map(create_styled_span).collect::<Vec<_>>()))
        .collect()
}

fn create_styled_span(c: char) -> Span<'static> {
    let style = match c {
        '#' => Style::default().fg(Color::Red),
        'S' => Style::default().fg(Color::Magenta),
        'R' => Style::default().fg(Color::Cyan),
        'C' => Style::default().fg(Color::Yellow),
        '0'..='9' => Style::default().fg(Color::Blue),
        _ => Style::default().fg(Color::DarkGray),
    };
    Span::styled(c.to_string(), style)
}

fn create_map_widget(lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Forage Swarm"))
}
