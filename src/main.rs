use forage_swarm::{
    app::App, config::SimulationConfig, logging, terminal::TerminalManager,
    ui::map_renderer::render_app,
};

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{prelude::Backend, Terminal};
use std::time::{Duration, Instant};

const TICK_RATE: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    color_eyre::install()?;
    logging::setup_logging()?;

    let seed = parse_seed(std::env::args().nth(1))?;
    log::info!("Application starting with seed {}", seed);

    let mut app = App::new(&SimulationConfig::with_seed(seed))?;
    let mut terminal_manager = TerminalManager::new().wrap_err("failed to set up the terminal")?;

    run_app(&mut app, terminal_manager.get_terminal())
}

/// First CLI argument is the seed; without one a random seed is drawn so the
/// run can still be replayed from the log.
fn parse_seed(arg: Option<String>) -> Result<u64> {
    match arg {
        Some(raw) => raw
            .parse()
            .map_err(|e| eyre!("invalid seed {:?}: {}", raw, e)),
        None => Ok(rand::random()),
    }
}

fn run_app<B: Backend>(app: &mut App, terminal: &mut Terminal<B>) -> Result<()> {
    let mut last_update = Instant::now();

    loop {
        if last_update.elapsed() >= TICK_RATE {
            app.update();
            last_update = Instant::now();
        }

        terminal.draw(|frame| {
            let area = frame.area();
            render_app(frame, area, app);
        })?;

        let timeout = TICK_RATE.saturating_sub(last_update.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char(' ') => app.toggle_pause(),
                    _ => {}
                }
            }
        }
    }
    log::info!("Application stopping");
    Ok(())
}
