mod audio;
mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use view::AppView;
use audio::{AudioBackend, AudioOutput};
use config::{Cli, Preset, Settings};
use controller::CarouselController;
use model::{Catalog, HitAreas};

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = match logging::init_logging() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!("=== Coverflow Starting ===");

    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli).context("invalid settings")?;

    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => match cli.preset {
            Preset::CoverFlow => Catalog::discography(),
            Preset::NowPlaying => Catalog::now_playing(),
        },
    };

    let output = open_output(&settings, &catalog);
    let controller = CarouselController::mount(catalog, &settings, output).await;

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &controller, &settings).await;

    controller.unmount().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Coverflow shutting down");
    Ok(())
}

/// Audio output for this run, or `None` when audio is off or unavailable.
fn open_output(settings: &Settings, catalog: &Catalog) -> Option<Box<dyn AudioOutput>> {
    if !settings.audio {
        tracing::debug!("Audio disabled by settings");
        return None;
    }
    if !catalog.has_tracks() {
        tracing::info!("Catalog has no tracks, running without audio");
        return None;
    }

    match AudioBackend::spawn() {
        Ok(backend) => Some(Box::new(backend)),
        Err(e) => {
            tracing::warn!(error = %e, "Audio init failed, running without audio");
            None
        }
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &CarouselController,
    settings: &Settings,
) -> io::Result<()> {
    let tick_rate = settings.tick_rate();

    loop {
        // Get current state
        let (snapshot, ui_state) = (controller.snapshot().await, controller.get_ui_state().await);

        // Draw UI and remember where things landed for mouse hit-testing
        let mut hit_areas = HitAreas::default();
        terminal.draw(|f| {
            hit_areas = AppView::render(f, &snapshot, &ui_state);
        })?;
        controller.set_hit_areas(hit_areas).await;

        if event::poll(tick_rate)? {
            let result = match event::read()? {
                Event::Key(key) => controller.handle_key_event(key).await,
                Event::Mouse(mouse) => controller.handle_mouse_event(mouse).await,
                _ => Ok(()),
            };
            if let Err(e) = result {
                tracing::warn!(error = %e, "Input handling failed");
            }
        }

        if controller.should_quit().await {
            break;
        }
    }

    Ok(())
}
