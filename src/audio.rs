//! Audio output: the single playback resource owned by the synchronizer
//!
//! The rodio output stream is tied to the thread that opened it, so the
//! backend runs a dedicated audio thread and talks to it over a command
//! channel. Play requests answer through a oneshot so callers observe
//! start failures asynchronously.

use std::fs::File;
use std::io::BufReader;
use std::sync::mpsc;
use std::thread::JoinHandle;

use futures::future::{BoxFuture, FutureExt};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use thiserror::Error;
use tokio::sync::oneshot;

use crate::model::TrackRef;

pub const DEFAULT_VOLUME: f32 = 0.6;

/// Why a play request was rejected
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no track loaded")]
    NothingLoaded,
    #[error("track {track} is unavailable")]
    TrackUnavailable {
        track: TrackRef,
        #[source]
        source: std::io::Error,
    },
    #[error("track {track} could not be decoded")]
    Decode {
        track: TrackRef,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("no audio output device: {0}")]
    NoOutputDevice(String),
    #[error("audio thread is gone")]
    BackendGone,
}

/// A single, replaceable audio source.
///
/// `load` swaps the source and rewinds to its beginning; `pause` keeps the
/// position; `play` resolves once the output has actually started or refused.
pub trait AudioOutput: Send {
    fn load(&mut self, track: &TrackRef);
    fn play(&mut self) -> BoxFuture<'static, Result<(), PlaybackError>>;
    fn pause(&mut self);
    fn stop(&mut self);
    fn set_volume(&mut self, volume: f32);
}

enum AudioCommand {
    Load(TrackRef),
    Play(oneshot::Sender<Result<(), PlaybackError>>),
    Pause,
    Stop,
    Volume(f32),
    Shutdown,
}

/// rodio-backed [`AudioOutput`]
pub struct AudioBackend {
    commands: mpsc::Sender<AudioCommand>,
    thread: Option<JoinHandle<()>>,
}

impl AudioBackend {
    pub fn spawn() -> anyhow::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let thread = std::thread::Builder::new()
            .name("coverflow-audio".to_string())
            .spawn(move || audio_thread(rx))?;
        tracing::info!("Audio thread started");
        Ok(Self {
            commands: tx,
            thread: Some(thread),
        })
    }

    fn send(&self, command: AudioCommand) {
        if self.commands.send(command).is_err() {
            tracing::warn!("Audio thread is not running");
        }
    }
}

impl AudioOutput for AudioBackend {
    fn load(&mut self, track: &TrackRef) {
        self.send(AudioCommand::Load(track.clone()));
    }

    fn play(&mut self) -> BoxFuture<'static, Result<(), PlaybackError>> {
        let (tx, rx) = oneshot::channel();
        let sent = self.commands.send(AudioCommand::Play(tx)).is_ok();
        async move {
            if !sent {
                return Err(PlaybackError::BackendGone);
            }
            rx.await.unwrap_or(Err(PlaybackError::BackendGone))
        }
        .boxed()
    }

    fn pause(&mut self) {
        self.send(AudioCommand::Pause);
    }

    fn stop(&mut self) {
        self.send(AudioCommand::Stop);
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(AudioCommand::Volume(volume));
    }
}

impl Drop for AudioBackend {
    fn drop(&mut self) {
        let _ = self.commands.send(AudioCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("Audio thread panicked");
            }
        }
    }
}

fn audio_thread(commands: mpsc::Receiver<AudioCommand>) {
    let stream = match OutputStreamBuilder::open_default_stream() {
        Ok(mut stream) => {
            stream.log_on_drop(false);
            Ok(stream)
        }
        Err(e) => {
            tracing::warn!(error = %e, "No audio output device, playback disabled");
            Err(e.to_string())
        }
    };

    let mut loaded: Option<TrackRef> = None;
    let mut sink: Option<Sink> = None;
    let mut volume = DEFAULT_VOLUME;

    while let Ok(command) = commands.recv() {
        match command {
            AudioCommand::Load(track) => {
                if let Some(old) = sink.take() {
                    old.stop();
                }
                tracing::debug!(track = %track, "Track loaded");
                loaded = Some(track);
            }
            AudioCommand::Play(reply) => {
                let result = match (&stream, &loaded) {
                    (Err(reason), _) => Err(PlaybackError::NoOutputDevice(reason.clone())),
                    (_, None) => Err(PlaybackError::NothingLoaded),
                    (Ok(stream), Some(track)) => {
                        // A paused sink resumes in place; a finished one is rebuilt.
                        let resumable = sink.as_ref().is_some_and(|s| !s.empty());
                        if resumable {
                            if let Some(existing) = &sink {
                                existing.play();
                            }
                            Ok(())
                        } else {
                            open_sink(stream, track, volume).map(|new_sink| {
                                sink = Some(new_sink);
                            })
                        }
                    }
                };
                if let Err(e) = &result {
                    tracing::warn!(error = %e, "Play request rejected");
                }
                let _ = reply.send(result);
            }
            AudioCommand::Pause => {
                if let Some(sink) = &sink {
                    sink.pause();
                }
            }
            AudioCommand::Stop => {
                if let Some(old) = sink.take() {
                    old.stop();
                }
            }
            AudioCommand::Volume(v) => {
                volume = v;
                if let Some(sink) = &sink {
                    sink.set_volume(v);
                }
            }
            AudioCommand::Shutdown => break,
        }
    }

    if let Some(sink) = sink.take() {
        sink.stop();
    }
    tracing::info!("Audio thread stopped");
}

fn open_sink(stream: &OutputStream, track: &TrackRef, volume: f32) -> Result<Sink, PlaybackError> {
    let file = File::open(track.path()).map_err(|source| PlaybackError::TrackUnavailable {
        track: track.clone(),
        source,
    })?;
    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| PlaybackError::Decode {
        track: track.clone(),
        source,
    })?;
    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(decoder);
    sink.play();
    tracing::info!(track = %track, "Playback started");
    Ok(sink)
}
