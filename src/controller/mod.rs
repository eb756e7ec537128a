//! Controller module - Carousel orchestration and event handling
//!
//! This module contains the controller that handles user input, runs the
//! settle and autoplay timers, and keeps playback in step with the cursor.
//! It is organized into submodules by responsibility:
//!
//! - `navigation`: next / previous / go-to and the settle timer
//! - `playback`: play/pause toggle and start-outcome handling
//! - `autoplay`: periodic advance
//! - `input`: key and mouse event mapping

mod navigation;
mod playback;
mod autoplay;
mod input;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::audio::AudioOutput;
use crate::config::Settings;
use crate::model::{
    project, CarouselSnapshot, CarouselState, Catalog, HitAreas, PlaybackSynchronizer, UiState,
    WeightProfile,
};

/// Handle to one mounted carousel instance.
///
/// Locks are always taken in the order `state` → `playback`.
#[derive(Clone)]
pub struct CarouselController {
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) state: Arc<Mutex<CarouselState>>,
    pub(crate) playback: Arc<Mutex<PlaybackSynchronizer>>,
    pub(crate) ui_state: Arc<Mutex<UiState>>,
    settle_delay: Duration,
    window_radius: usize,
    weight_profile: WeightProfile,
    autoplay_interval: Option<Duration>,
    shutdown: CancellationToken,
    /// Signalled each time a transition settles; re-arms autoplay.
    settled: Arc<Notify>,
    autoplay_task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl CarouselController {
    /// Create the carousel with cursor `0`, unlocked and stopped, and start
    /// autoplay when configured.
    pub async fn mount(
        catalog: Catalog,
        settings: &Settings,
        output: Option<Box<dyn AudioOutput>>,
    ) -> Self {
        tracing::info!(
            items = catalog.len(),
            radius = settings.window_radius,
            settle_ms = settings.settle_delay_ms,
            autoplay_ms = ?settings.autoplay_interval_ms,
            audio = output.is_some(),
            "Mounting carousel"
        );

        let controller = Self {
            state: Arc::new(Mutex::new(CarouselState::new(catalog.len()))),
            catalog: Arc::new(catalog),
            playback: Arc::new(Mutex::new(PlaybackSynchronizer::new(output, settings.volume))),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            settle_delay: settings.settle_delay(),
            window_radius: settings.window_radius,
            weight_profile: settings.weight_profile,
            autoplay_interval: settings.autoplay_interval(),
            shutdown: CancellationToken::new(),
            settled: Arc::new(Notify::new()),
            autoplay_task: Arc::new(Mutex::new(None)),
        };

        if let Some(period) = controller.autoplay_interval {
            controller.start_autoplay(period).await;
        }
        controller
    }

    /// Cancel every pending timer, reject further input and stop audio.
    pub async fn unmount(&self) {
        self.shutdown.cancel();
        if let Some(task) = self.autoplay_task.lock().await.take() {
            task.abort();
        }

        let mut state = self.state.lock().await;
        state.tear_down();
        let mut playback = self.playback.lock().await;
        playback.release();
        tracing::info!("Carousel unmounted");
    }

    /// Current render payload.
    pub async fn snapshot(&self) -> CarouselSnapshot {
        let state = self.state.lock().await;
        let playback = self.playback.lock().await;
        let info = playback.info();

        CarouselSnapshot {
            cursor: state.index(),
            len: self.catalog.len(),
            slots: project(
                state.cursor(),
                self.catalog.items(),
                self.window_radius,
                self.weight_profile,
            ),
            profile: self.weight_profile,
            locked: state.is_locked(),
            is_playing: info.is_playing,
            loaded_track: info.loaded_track,
            audio_available: info.audio_available,
            autoplay: self.autoplay_interval.is_some(),
        }
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn should_quit(&self) -> bool {
        self.ui_state.lock().await.should_quit
    }

    pub async fn set_hit_areas(&self, areas: HitAreas) {
        self.ui_state.lock().await.hit_areas = areas;
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::Preset;
    use crate::model::playback::mock::MockOutput;

    pub fn settings(settle_ms: u64, autoplay_ms: Option<u64>) -> Settings {
        Settings {
            settle_delay_ms: settle_ms,
            autoplay_interval_ms: autoplay_ms,
            ..Settings::preset(Preset::NowPlaying)
        }
    }

    pub async fn mount(settings: &Settings, mock: Option<&MockOutput>) -> CarouselController {
        let output = mock.map(|m| Box::new(m.clone()) as Box<dyn AudioOutput>);
        CarouselController::mount(Catalog::now_playing(), settings, output).await
    }

    /// Let spawned tasks run and timers up to `ms` fire (paused clock).
    pub async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}
