mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;
use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::Config;
use controller::{AppController, ControllerOptions};
use model::{AppModel, HttpWallpaperSource};
use view::{AppView, Surface};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== animewall starting ===");

    let server_url = config.server_url()?;
    tracing::info!(server = %server_url, timeout = ?config.timeout(), "Using wallpaper service");
    let source = HttpWallpaperSource::new(server_url, config.timeout())?;

    let model = Arc::new(AppModel::new());
    let controller = AppController::new(
        model.clone(),
        Arc::new(source),
        ControllerOptions::from(&config),
    );

    // A username on the command line is looked up right away
    if let Some(username) = config.username.clone() {
        model.set_input_text(username.clone()).await;
        let _ = controller.submit(&username).await;
    }

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("animewall shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<AppModel>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        // Snapshot state; the ui lock is taken first, like every other reader
        let ui_state = model.get_ui_state().await;
        let images = model.get_images().await;
        let input = model.get_input().await;
        let focus = model.get_focus().await;
        let should_quit = model.should_quit().await;

        let surface = Surface::compose(&ui_state, &images, &input, focus);

        terminal.draw(|f| {
            AppView::render(f, &surface);
        })?;

        if should_quit {
            break;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }
    }

    Ok(())
}
