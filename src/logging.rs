use color_eyre::Result;
use log::LevelFilter;
use ratatui::style::{Color, Style, Stylize};
use ratatui::widgets::{Block, Borders};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

/// Environment variable overriding the displayed log level.
pub const LOG_LEVEL_ENV: &str = "FORAGE_LOG";

/// Routes the `log` facade into tui-logger so records show up in the UI.
pub fn setup_logging() -> Result<()> {
    tui_logger::init_logger(LevelFilter::Trace)?;

    let level = level_from_env(std::env::var(LOG_LEVEL_ENV).ok().as_deref());
    tui_logger::set_default_level(level);

    log::info!("Logger ready at level {}", level);
    Ok(())
}

/// Parses a level name, falling back to `Info`.
pub fn level_from_env(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

pub fn create_log_widget<'a>() -> TuiLoggerWidget<'a> {
    TuiLoggerWidget::default()
        .block(
            Block::default()
                .title("Events")
                .border_style(Style::default().fg(Color::White))
                .borders(Borders::ALL),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style_error(Style::default().fg(Color::Red).bold())
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Green))
        .style_debug(Style::default().fg(Color::Blue))
        .style_trace(Style::default().fg(Color::Gray))
}
