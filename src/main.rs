mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use anyhow::{Context, Result};
use std::time::Duration;
use tokio::sync::Mutex;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use config::AppConfig;
use view::AppView;
use controller::{AppController, ControllerSettings};
use model::{AppModel, JsonFileStore, OmdbClient, SearchProvider};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== movie-search-rs starting ===");

    let config = AppConfig::load()?;

    let store = JsonFileStore::open(config.preferences_path())
        .context("could not open the preferences file")?;
    tracing::debug!(path = %store.path().display(), "Preferences store opened");

    let app_model = AppModel::new(Box::new(store), config.model_settings());
    tracing::info!(
        favorites = app_model.favorites().len(),
        theme = app_model.ui_state().theme.as_str(),
        "Preferences loaded"
    );

    let client = OmdbClient::new(config.api_key.clone(), &config.api_url, config.request_timeout())
        .context("could not build the OMDb client")?;

    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(
        model.clone(),
        Arc::new(client),
        ControllerSettings {
            debounce: config.debounce(),
            live_search: config.live_search,
        },
    );

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("movie-search-rs shutting down");
    Ok(())
}

async fn run_app<P: SearchProvider>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController<P>,
) -> io::Result<()> {
    loop {
        // Get current state
        let (ui_state, content_state, pagination, should_quit) = {
            let mut model_guard = model.lock().await;

            // Auto-clear old errors (after 5 seconds)
            model_guard.auto_clear_old_errors();

            (
                model_guard.get_ui_state(),
                model_guard.get_content_state(),
                model_guard.pagination_controls(),
                model_guard.should_quit(),
            )
        };

        if should_quit {
            break;
        }

        // Draw UI
        terminal.draw(|f| {
            AppView::render(f, &ui_state, &content_state, pagination.as_ref());
        })?;

        // Handle input with shorter poll time for smoother UI updates
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if let Err(e) = controller.handle_key_event(key).await {
                        tracing::warn!(error = %e, "Key handling failed");
                    }
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    controller
                        .handle_mouse_event(mouse, Rect::new(0, 0, size.width, size.height))
                        .await;
                }
                _ => {}
            }
        }
    }

    Ok(())
}
