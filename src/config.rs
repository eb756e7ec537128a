//! Runtime settings: presets, optional JSON settings file, CLI overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::DEFAULT_VOLUME;
use crate::model::WeightProfile;

const MAX_WINDOW_RADIUS: usize = 6;

/// The two shipped carousel flavours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Seven covers, rotating on its own, no audio.
    CoverFlow,
    /// Five covers with audio that follows the selected album.
    NowPlaying,
}

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Terminal cover-flow album browser")]
pub struct Cli {
    /// Starting preset.
    #[arg(long, value_enum, default_value_t = Preset::CoverFlow)]
    pub preset: Preset,

    /// Album catalog (JSON). Defaults to the preset's built-in albums.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Settings file (JSON) layered over the preset.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Covers shown on each side of the selected one.
    #[arg(long)]
    pub radius: Option<usize>,

    /// Autoplay period in milliseconds (0 disables autoplay).
    #[arg(long)]
    pub autoplay_ms: Option<u64>,

    /// Disable audio playback.
    #[arg(long)]
    pub mute: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Lock hold time after an accepted navigation.
    pub settle_delay_ms: u64,
    pub window_radius: usize,
    /// Slot scale/opacity falloff.
    pub weight_profile: WeightProfile,
    /// `None` disables autoplay.
    pub autoplay_interval_ms: Option<u64>,
    pub audio: bool,
    pub volume: f32,
    /// UI redraw / input poll period.
    pub tick_rate_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self::preset(Preset::CoverFlow)
    }
}

impl Settings {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::CoverFlow => Self {
                settle_delay_ms: 300,
                window_radius: 3,
                weight_profile: WeightProfile::CoverFlow,
                autoplay_interval_ms: Some(4000),
                audio: false,
                volume: DEFAULT_VOLUME,
                tick_rate_ms: 50,
            },
            Preset::NowPlaying => Self {
                settle_delay_ms: 400,
                window_radius: 2,
                weight_profile: WeightProfile::Spotlight,
                autoplay_interval_ms: None,
                audio: true,
                volume: DEFAULT_VOLUME,
                tick_rate_ms: 50,
            },
        }
    }

    /// Resolve settings from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut settings = match &cli.config {
            Some(path) => Self::load_layered(cli.preset, path)?,
            None => Self::preset(cli.preset),
        };

        if let Some(radius) = cli.radius {
            settings.window_radius = radius;
        }
        if let Some(ms) = cli.autoplay_ms {
            settings.autoplay_interval_ms = (ms > 0).then_some(ms);
        }
        if cli.mute {
            settings.audio = false;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Read a JSON settings file; fields it omits keep the preset's values.
    fn load_layered(preset: Preset, path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::layer_json(preset, &content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn layer_json(preset: Preset, content: &str) -> Result<Self, serde_json::Error> {
        let base = serde_json::to_value(Self::preset(preset))?;
        let overlay: serde_json::Value = serde_json::from_str(content)?;
        let mut merged = base;
        if let (Some(target), serde_json::Value::Object(fields)) = (merged.as_object_mut(), overlay) {
            for (key, value) in fields {
                target.insert(key, value);
            }
        }
        serde_json::from_value(merged)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.settle_delay_ms == 0 {
            return Err(ConfigError::Invalid("settle_delay_ms must be positive".into()));
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid("tick_rate_ms must be positive".into()));
        }
        if self.window_radius > MAX_WINDOW_RADIUS {
            return Err(ConfigError::Invalid(format!(
                "window_radius must be at most {MAX_WINDOW_RADIUS}"
            )));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(ConfigError::Invalid("volume must be within 0.0..=1.0".into()));
        }
        if self.autoplay_interval_ms == Some(0) {
            return Err(ConfigError::Invalid("autoplay_interval_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn autoplay_interval(&self) -> Option<Duration> {
        self.autoplay_interval_ms.map(Duration::from_millis)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["coverflow"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn presets_match_the_two_carousels() {
        let flow = Settings::preset(Preset::CoverFlow);
        assert_eq!(flow.window_radius, 3);
        assert_eq!(flow.settle_delay(), Duration::from_millis(300));
        assert_eq!(flow.autoplay_interval(), Some(Duration::from_secs(4)));
        assert!(!flow.audio);

        let playing = Settings::preset(Preset::NowPlaying);
        assert_eq!(playing.window_radius, 2);
        assert_eq!(playing.settle_delay(), Duration::from_millis(400));
        assert_eq!(playing.autoplay_interval(), None);
        assert!(playing.audio);
        assert_eq!(playing.volume, 0.6);
    }

    #[test]
    fn cli_overrides_preset() {
        let settings = Settings::from_cli(&cli(&[
            "--preset", "now-playing", "--radius", "3", "--autoplay-ms", "2500", "--mute",
        ]))
        .expect("valid settings");
        assert_eq!(settings.window_radius, 3);
        assert_eq!(settings.autoplay_interval_ms, Some(2500));
        assert!(!settings.audio);
        assert_eq!(settings.settle_delay_ms, 400);

        let settings = Settings::from_cli(&cli(&["--autoplay-ms", "0"])).expect("valid settings");
        assert_eq!(settings.autoplay_interval_ms, None);
    }

    #[test]
    fn settings_file_layers_over_preset() {
        let settings = Settings::layer_json(Preset::NowPlaying, r#"{"settle_delay_ms": 250}"#)
            .expect("valid json");
        assert_eq!(settings.settle_delay_ms, 250);
        assert_eq!(settings.window_radius, 2);
        assert_eq!(settings.weight_profile, WeightProfile::Spotlight);
        assert!(settings.audio);

        let settings = Settings::layer_json(Preset::NowPlaying, r#"{"weight_profile": "cover-flow"}"#)
            .expect("valid json");
        assert_eq!(settings.weight_profile, WeightProfile::CoverFlow);

        assert!(Settings::layer_json(Preset::CoverFlow, r#"{"radius": 2}"#).is_err());
    }

    #[test]
    fn settings_file_is_read_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"window_radius": 1, "autoplay_interval_ms": null}"#)
            .expect("write settings");

        let path_arg = path.to_string_lossy().to_string();
        let settings = Settings::from_cli(&cli(&["--config", &path_arg])).expect("valid settings");
        assert_eq!(settings.window_radius, 1);
        assert_eq!(settings.autoplay_interval_ms, None);
    }

    #[test]
    fn validation_rejects_out_of_range_values() {
        let mut settings = Settings::default();
        settings.window_radius = MAX_WINDOW_RADIUS + 1;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.settle_delay_ms = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.volume = 1.5;
        assert!(settings.validate().is_err());

        assert!(Settings::default().validate().is_ok());
    }
}
