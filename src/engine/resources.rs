use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::game::{ToggleControl, Track};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    #[error("toggle control '{id}' is not registered")]
    MissingToggle { id: String },

    #[error("audio player '{id}' is not registered")]
    MissingPlayer { id: String },

    #[error("element identifier '{id}' is bound more than once")]
    DuplicateId { id: String },
}

/// External identifiers of the six elements the controller binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    toggles: [String; 3],
    players: [String; 3],
}

impl ElementIds {
    pub fn new(toggles: [String; 3], players: [String; 3]) -> Self {
        Self { toggles, players }
    }

    pub fn toggle_id(&self, track: Track) -> &str {
        &self.toggles[track.index()]
    }

    pub fn audio_id(&self, track: Track) -> &str {
        &self.players[track.index()]
    }

    /// First identifier that appears twice among the six, if any.
    pub fn first_duplicate(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.toggles
            .iter()
            .chain(self.players.iter())
            .map(String::as_str)
            .find(|id| !seen.insert(*id))
    }

    pub fn track_for_toggle(&self, id: &str) -> Option<Track> {
        Track::ALL
            .into_iter()
            .find(|track| self.toggle_id(*track) == id)
    }
}

impl Default for ElementIds {
    fn default() -> Self {
        let toggles = Track::ALL.map(|track| format!("toggle_{track}"));
        let players = Track::ALL.map(|track| format!("audio_{track}"));
        Self { toggles, players }
    }
}

/// Elements the host exposes, addressed by identifier.
#[derive(Debug)]
pub struct ElementRegistry<P> {
    toggles: HashMap<String, ToggleControl>,
    players: HashMap<String, P>,
}

impl<P> Default for ElementRegistry<P> {
    fn default() -> Self {
        Self {
            toggles: HashMap::new(),
            players: HashMap::new(),
        }
    }
}

impl<P> ElementRegistry<P> {
    pub fn register_toggle(&mut self, id: impl Into<String>, toggle: ToggleControl) {
        let id = id.into();
        tracing::debug!(%id, "registering toggle control");
        self.toggles.insert(id, toggle);
    }

    pub fn register_player(&mut self, id: impl Into<String>, player: P) {
        let id = id.into();
        tracing::debug!(%id, "registering audio player");
        self.players.insert(id, player);
    }

    pub fn has_toggle(&self, id: &str) -> bool {
        self.toggles.contains_key(id)
    }

    pub fn has_player(&self, id: &str) -> bool {
        self.players.contains_key(id)
    }

    pub fn take_toggle(&mut self, id: &str) -> Option<ToggleControl> {
        self.toggles.remove(id)
    }

    pub fn take_player(&mut self, id: &str) -> Option<P> {
        self.players.remove(id)
    }

    pub fn element_count(&self) -> usize {
        self.toggles.len() + self.players.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ids_follow_page_naming() {
        let ids = ElementIds::default();
        assert_eq!(ids.toggle_id(Track::Menu), "toggle_menu");
        assert_eq!(ids.audio_id(Track::Battle), "audio_battle");
        assert_eq!(ids.track_for_toggle("toggle_ambient"), Some(Track::Ambient));
        assert_eq!(ids.track_for_toggle("audio_ambient"), None);
        assert_eq!(ids.first_duplicate(), None);
    }

    #[test]
    fn finds_repeated_id_across_kinds() {
        let ids = ElementIds::new(
            ["a".into(), "b".into(), "c".into()],
            ["d".into(), "b".into(), "e".into()],
        );
        assert_eq!(ids.first_duplicate(), Some("b"));
    }

    #[test]
    fn take_removes_element() {
        let mut registry: ElementRegistry<()> = ElementRegistry::default();
        registry.register_toggle("toggle_menu", ToggleControl::default());
        registry.register_player("audio_menu", ());
        assert_eq!(registry.element_count(), 2);
        assert!(registry.take_toggle("toggle_menu").is_some());
        assert!(registry.take_toggle("toggle_menu").is_none());
        assert_eq!(registry.element_count(), 1);
    }
}
