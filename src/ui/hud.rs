use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::simulation::WorldSnapshot;

pub fn render_hud(frame: &mut Frame, area: Rect, app: &App, snapshot: &WorldSnapshot) {
    let paragraph = Paragraph::new(hud_lines(app, snapshot))
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(paragraph, area);
}

fn hud_lines(app: &App, snapshot: &WorldSnapshot) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(format!("Seed {}  Tick {}", app.seed(), snapshot.tick)),
        Line::from(format!(
            "Start Area Materials: {} / {}",
            snapshot.start_area.materials(), snapshot.collection_target
        ))
        .bold(),
    ];

    for robot in &snapshot.robots {
        let text = format!(
            "Robot {} Grabbing: {} materials ({})",
            robot.id + 1,
            robot.materials,
            robot.status
        );
        let style = if robot.is_grabbing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        lines.push(Line::styled(text, style));
    }

    let stats = app.stats();
    lines.push(Line::from(format!(
        "Grabs {}  Drops {}  Depleted {}  Home {}",
        stats.grabs, stats.deposits, stats.depleted, stats.arrivals
    )));

    let seconds = app.elapsed().num_seconds();
    lines.push(match app.finished_at() {
        Some(at) => Line::from(format!(
            "Target reached at {} after {}s",
            at.format("%H:%M:%S"),
            seconds
        ))
        .fg(Color::Green),
        None => Line::from(format!("Running for {}s", seconds)),
    });
    lines.push(Line::from(if app.is_paused() {
        "[space] resume  [q] quit"
    } else {
        "[space] pause  [q] quit"
    }));
    lines
}
