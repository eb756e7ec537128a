//! Playback synchronizer: keeps the single audio output aligned with the cursor

use futures::future::BoxFuture;

use crate::audio::{AudioOutput, PlaybackError};
use super::catalog::TrackRef;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    Stopped,
    Playing,
}

/// A start request whose outcome has not been observed yet.
///
/// Feed the awaited outcome back through [`PlaybackSynchronizer::resolve`].
pub struct PendingStart {
    pub generation: u64,
    pub outcome: BoxFuture<'static, Result<(), PlaybackError>>,
}

impl std::fmt::Debug for PendingStart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingStart")
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

/// Playback state derived for rendering
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackInfo {
    pub is_playing: bool,
    pub loaded_track: Option<TrackRef>,
    pub audio_available: bool,
}

pub struct PlaybackSynchronizer {
    output: Option<Box<dyn AudioOutput>>,
    state: PlayState,
    loaded: Option<TrackRef>,
    /// Bumped on every start, pause and release; outcomes from older
    /// generations are discarded.
    generation: u64,
    volume: f32,
}

impl PlaybackSynchronizer {
    pub fn new(output: Option<Box<dyn AudioOutput>>, volume: f32) -> Self {
        Self {
            output,
            state: PlayState::Stopped,
            loaded: None,
            generation: 0,
            volume,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    pub fn loaded_track(&self) -> Option<&TrackRef> {
        self.loaded.as_ref()
    }

    pub fn info(&self) -> PlaybackInfo {
        PlaybackInfo {
            is_playing: self.is_playing(),
            loaded_track: self.loaded.clone(),
            audio_available: self.output.is_some(),
        }
    }

    /// Play/pause for the item under the cursor.
    pub fn toggle(&mut self, track: Option<&TrackRef>) -> Option<PendingStart> {
        let Some(output) = self.output.as_mut() else {
            tracing::debug!("Toggle ignored: no audio output");
            return None;
        };

        match self.state {
            PlayState::Playing => {
                output.pause();
                self.state = PlayState::Stopped;
                self.generation = self.generation.wrapping_add(1);
                tracing::info!("Playback paused");
                None
            }
            PlayState::Stopped => {
                let Some(track) = track else {
                    tracing::debug!("Toggle ignored: current item has no track");
                    return None;
                };
                self.start(track)
            }
        }
    }

    /// React to a committed cursor move.
    pub fn on_cursor_changed(&mut self, track: Option<&TrackRef>) -> Option<PendingStart> {
        if self.state == PlayState::Stopped {
            return None;
        }

        match track {
            None => {
                if let Some(output) = self.output.as_mut() {
                    output.stop();
                }
                self.loaded = None;
                self.state = PlayState::Stopped;
                self.generation = self.generation.wrapping_add(1);
                tracing::info!("Playback stopped: item has no track");
                None
            }
            Some(track) if self.loaded.as_ref() == Some(track) => None,
            Some(track) => self.start(track),
        }
    }

    fn start(&mut self, track: &TrackRef) -> Option<PendingStart> {
        let output = self.output.as_mut()?;

        if self.loaded.as_ref() != Some(track) {
            tracing::debug!(
                from = ?self.loaded.as_ref().map(|t| t.to_string()),
                to = %track,
                "Switching track"
            );
            output.load(track);
            self.loaded = Some(track.clone());
        }
        output.set_volume(self.volume);

        self.generation = self.generation.wrapping_add(1);
        self.state = PlayState::Playing;

        Some(PendingStart {
            generation: self.generation,
            outcome: output.play(),
        })
    }

    /// Apply the outcome of a start request.
    ///
    /// Returns `false` when the outcome belonged to a superseded request.
    pub fn resolve(&mut self, generation: u64, outcome: Result<(), PlaybackError>) -> bool {
        if generation != self.generation {
            tracing::trace!(generation, current = self.generation, "Stale playback outcome ignored");
            return false;
        }
        if let Err(e) = outcome {
            tracing::warn!(error = %e, "Playback start rejected");
            self.state = PlayState::Stopped;
        }
        true
    }

    /// Stop and drop the output. Further toggles are no-ops.
    pub fn release(&mut self) {
        if let Some(mut output) = self.output.take() {
            output.stop();
            tracing::info!("Audio output released");
        }
        self.state = PlayState::Stopped;
        self.loaded = None;
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::{Arc, Mutex};

    use futures::future::{self, BoxFuture, FutureExt};

    use crate::audio::{AudioOutput, PlaybackError};
    use crate::model::TrackRef;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Call {
        Load(TrackRef),
        Play,
        Pause,
        Stop,
        Volume(f32),
    }

    /// Records calls; play requests succeed unless `reject` is set.
    #[derive(Clone, Default)]
    pub struct MockOutput {
        pub calls: Arc<Mutex<Vec<Call>>>,
        pub reject: Arc<Mutex<bool>>,
    }

    impl MockOutput {
        pub fn rejecting() -> Self {
            let mock = Self::default();
            *mock.reject.lock().expect("mock lock") = true;
            mock
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().expect("mock lock").clone()
        }

        pub fn loads(&self) -> Vec<TrackRef> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::Load(t) => Some(t),
                    _ => None,
                })
                .collect()
        }

        fn record(&self, call: Call) {
            self.calls.lock().expect("mock lock").push(call);
        }
    }

    impl AudioOutput for MockOutput {
        fn load(&mut self, track: &TrackRef) {
            self.record(Call::Load(track.clone()));
        }

        fn play(&mut self) -> BoxFuture<'static, Result<(), PlaybackError>> {
            self.record(Call::Play);
            let result = if *self.reject.lock().expect("mock lock") {
                Err(PlaybackError::NoOutputDevice("autoplay denied".to_string()))
            } else {
                Ok(())
            };
            future::ready(result).boxed()
        }

        fn pause(&mut self) {
            self.record(Call::Pause);
        }

        fn stop(&mut self) {
            self.record(Call::Stop);
        }

        fn set_volume(&mut self, volume: f32) {
            self.record(Call::Volume(volume));
        }
    }
}
