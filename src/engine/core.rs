use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ron::extensions::Extensions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::resources::ElementIds;
use crate::game::{StartupState, Track};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("volume {volume} for track '{track}' is outside 0.0..=1.0")]
    VolumeOutOfRange { track: Track, volume: f32 },

    #[error("element identifier '{id}' is used more than once")]
    DuplicateId { id: String },
}

/// Per-track overrides. Unset fields fall back to the page defaults for
/// that track (`toggle_<track>`, `audio_<track>`, `audio/<track>.ogg`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    pub toggle_id: Option<String>,
    pub audio_id: Option<String>,
    /// Relative to [`JukeboxConfig::asset_root`] unless absolute.
    pub source: Option<PathBuf>,
    pub volume: Option<f32>,
    pub looping: bool,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            toggle_id: None,
            audio_id: None,
            source: None,
            volume: None,
            looping: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JukeboxConfig {
    pub app_name: String,
    pub asset_root: PathBuf,
    pub default_track: Option<Track>,
    pub silent: bool,
    pub menu: TrackConfig,
    pub ambient: TrackConfig,
    pub battle: TrackConfig,
}

impl Default for JukeboxConfig {
    fn default() -> Self {
        Self {
            app_name: "Jukebox".to_string(),
            asset_root: PathBuf::from("assets"),
            default_track: Some(Track::Menu),
            silent: false,
            menu: TrackConfig::default(),
            ambient: TrackConfig::default(),
            battle: TrackConfig::default(),
        }
    }
}

impl JukeboxConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_ron(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_ron(text: &str) -> Result<Self> {
        let config: Self = ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(text)
            .context("failed to parse RON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for track in Track::ALL {
            let volume = self.volume(track);
            if !(0.0..=1.0).contains(&volume) {
                return Err(ConfigError::VolumeOutOfRange { track, volume });
            }
            for id in [self.toggle_id(track), self.audio_id(track)] {
                if !seen.insert(id.clone()) {
                    return Err(ConfigError::DuplicateId { id });
                }
            }
        }
        Ok(())
    }

    pub fn track(&self, track: Track) -> &TrackConfig {
        match track {
            Track::Menu => &self.menu,
            Track::Ambient => &self.ambient,
            Track::Battle => &self.battle,
        }
    }

    pub fn toggle_id(&self, track: Track) -> String {
        self.track(track)
            .toggle_id
            .clone()
            .unwrap_or_else(|| format!("toggle_{track}"))
    }

    pub fn audio_id(&self, track: Track) -> String {
        self.track(track)
            .audio_id
            .clone()
            .unwrap_or_else(|| format!("audio_{track}"))
    }

    /// Battle defaults to half volume.
    pub fn volume(&self, track: Track) -> f32 {
        self.track(track)
            .volume
            .unwrap_or(if track == Track::Battle { 0.5 } else { 1.0 })
    }

    pub fn source_path(&self, track: Track) -> PathBuf {
        match &self.track(track).source {
            Some(source) => self.asset_root.join(source),
            None => self.asset_root.join(format!("audio/{track}.ogg")),
        }
    }

    pub fn element_ids(&self) -> ElementIds {
        ElementIds::new(
            Track::ALL.map(|t| self.toggle_id(t)),
            Track::ALL.map(|t| self.audio_id(t)),
        )
    }

    pub fn startup_state(&self) -> StartupState {
        StartupState {
            default_track: self.default_track,
            volumes: Track::ALL.map(|t| self.volume(t)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_layout() {
        let config = JukeboxConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.element_ids(), ElementIds::default());
        assert_eq!(config.startup_state(), StartupState::default());
        assert_eq!(
            config.source_path(Track::Ambient),
            PathBuf::from("assets/audio/ambient.ogg")
        );
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let config = JukeboxConfig::from_ron(
            r#"(
                silent: true,
                battle: (volume: 0.25, source: "sfx/war.ogg", looping: false),
            )"#,
        )
        .unwrap();
        assert!(config.silent);
        assert_eq!(config.volume(Track::Battle), 0.25);
        assert!(!config.battle.looping);
        assert_eq!(config.toggle_id(Track::Battle), "toggle_battle");
        assert_eq!(
            config.source_path(Track::Battle),
            PathBuf::from("assets/sfx/war.ogg")
        );
        assert_eq!(config.menu, TrackConfig::default());
        assert_eq!(config.default_track, Some(Track::Menu));
    }

    #[test]
    fn default_track_can_be_cleared() {
        let config = JukeboxConfig::from_ron("(default_track: None)").unwrap();
        assert_eq!(config.startup_state().default_track, None);
    }

    #[test]
    fn rejects_out_of_range_volume() {
        let mut config = JukeboxConfig::default();
        config.ambient.volume = Some(1.5);
        assert_eq!(
            config.validate(),
            Err(ConfigError::VolumeOutOfRange {
                track: Track::Ambient,
                volume: 1.5
            })
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut config = JukeboxConfig::default();
        config.battle.toggle_id = Some("toggle_menu".to_string());
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateId {
                id: "toggle_menu".to_string()
            })
        );
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let config = JukeboxConfig::from_ron(include_str!("../../jukebox.ron")).unwrap();
        assert_eq!(config.element_ids(), ElementIds::default());
        assert_eq!(config.startup_state(), StartupState::default());
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(JukeboxConfig::from_ron("(silent: maybe)").is_err());
    }
}
