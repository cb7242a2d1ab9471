use crate::engine::audio::AudioPlayer;
use crate::engine::resources::{BindError, ElementIds, ElementRegistry};

use super::{Selection, ToggleControl, Track};

/// A toggle control and the player it drives.
#[derive(Debug)]
pub struct TrackChannel<P> {
    pub toggle: ToggleControl,
    pub player: P,
}

impl<P> TrackChannel<P> {
    pub fn new(toggle: ToggleControl, player: P) -> Self {
        Self { toggle, player }
    }
}

/// State applied by [`ExclusiveTrackController::initialize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartupState {
    pub default_track: Option<Track>,
    /// Indexed by [`Track::index`].
    pub volumes: [f32; 3],
}

impl Default for StartupState {
    fn default() -> Self {
        Self {
            default_track: Some(Track::Menu),
            volumes: [1.0, 1.0, 0.5],
        }
    }
}

/// Keeps at most one of the three channels checked and audible.
///
/// Every select action silences and unchecks the other two channels, then
/// plays or pauses the triggering channel depending on whether its own
/// control is checked. One handler per track therefore covers both the
/// "turned on" and "turned off" notifications of that control.
#[derive(Debug)]
pub struct ExclusiveTrackController<P> {
    channels: [TrackChannel<P>; 3],
    startup: StartupState,
}

impl<P: AudioPlayer> ExclusiveTrackController<P> {
    pub fn new(menu: TrackChannel<P>, ambient: TrackChannel<P>, battle: TrackChannel<P>) -> Self {
        Self {
            channels: [menu, ambient, battle],
            startup: StartupState::default(),
        }
    }

    pub fn with_startup(mut self, startup: StartupState) -> Self {
        self.startup = startup;
        self
    }

    /// Takes the six bound elements out of `registry`.
    ///
    /// Every identifier is checked before anything is removed, so a failed
    /// bind leaves the registry untouched.
    pub fn bind(registry: &mut ElementRegistry<P>, ids: &ElementIds) -> Result<Self, BindError> {
        if let Some(id) = ids.first_duplicate() {
            return Err(BindError::DuplicateId { id: id.to_string() });
        }
        for track in Track::ALL {
            let toggle_id = ids.toggle_id(track);
            if !registry.has_toggle(toggle_id) {
                return Err(BindError::MissingToggle {
                    id: toggle_id.to_string(),
                });
            }
            let audio_id = ids.audio_id(track);
            if !registry.has_player(audio_id) {
                return Err(BindError::MissingPlayer {
                    id: audio_id.to_string(),
                });
            }
        }

        let menu = take_channel(registry, ids, Track::Menu)?;
        let ambient = take_channel(registry, ids, Track::Ambient)?;
        let battle = take_channel(registry, ids, Track::Battle)?;
        tracing::debug!(target: "controller", "bound all track channels");
        Ok(Self::new(menu, ambient, battle))
    }

    /// Applies the startup selection and volumes. Starts no playback.
    pub fn initialize(&mut self) {
        if let Some(track) = self.startup.default_track {
            self.channel_mut(track).toggle.set_checked(true);
        }
        for track in Track::ALL {
            let volume = self.startup.volumes[track.index()];
            self.channel_mut(track).player.set_volume(volume);
        }
        tracing::info!(
            target: "controller",
            default_track = ?self.startup.default_track,
            "controller initialized"
        );
    }

    pub fn select_menu(&mut self) {
        self.select(Track::Menu);
    }

    pub fn select_ambient(&mut self) {
        self.select(Track::Ambient);
    }

    pub fn select_battle(&mut self) {
        self.select(Track::Battle);
    }

    /// Entry point the host subscribes every control's change notification to.
    pub fn on_control_changed(&mut self, track: Track) {
        match track {
            Track::Menu => self.select_menu(),
            Track::Ambient => self.select_ambient(),
            Track::Battle => self.select_battle(),
        }
    }

    /// Writes a control the way a user interaction does, then notifies.
    pub fn user_toggle(&mut self, track: Track, checked: bool) {
        self.set_checked(track, checked);
        self.on_control_changed(track);
    }

    /// Writes a control without raising a change notification.
    pub fn set_checked(&mut self, track: Track, checked: bool) {
        self.channel_mut(track).toggle.set_checked(checked);
    }

    pub fn is_checked(&self, track: Track) -> bool {
        self.channel(track).toggle.checked
    }

    pub fn is_playing(&self, track: Track) -> bool {
        self.channel(track).player.is_playing()
    }

    pub fn volume(&self, track: Track) -> f32 {
        self.channel(track).player.volume()
    }

    pub fn player(&self, track: Track) -> &P {
        &self.channel(track).player
    }

    pub fn selection(&self) -> Selection {
        Track::ALL
            .into_iter()
            .find(|track| self.is_checked(*track))
            .into()
    }

    pub fn playing(&self) -> Option<Track> {
        Track::ALL.into_iter().find(|track| self.is_playing(*track))
    }

    fn select(&mut self, track: Track) {
        for other in track.others() {
            let channel = self.channel_mut(other);
            channel.player.pause();
            channel.toggle.set_checked(false);
        }

        let channel = self.channel_mut(track);
        let checked = channel.toggle.checked;
        if checked {
            channel.player.play();
        } else {
            channel.player.pause();
        }
        tracing::info!(target: "controller", %track, checked, "track selected");
    }

    fn channel(&self, track: Track) -> &TrackChannel<P> {
        &self.channels[track.index()]
    }

    fn channel_mut(&mut self, track: Track) -> &mut TrackChannel<P> {
        &mut self.channels[track.index()]
    }
}

fn take_channel<P>(
    registry: &mut ElementRegistry<P>,
    ids: &ElementIds,
    track: Track,
) -> Result<TrackChannel<P>, BindError> {
    let toggle_id = ids.toggle_id(track);
    let toggle = registry
        .take_toggle(toggle_id)
        .ok_or_else(|| BindError::MissingToggle {
            id: toggle_id.to_string(),
        })?;
    let audio_id = ids.audio_id(track);
    let player = registry
        .take_player(audio_id)
        .ok_or_else(|| BindError::MissingPlayer {
            id: audio_id.to_string(),
        })?;
    Ok(TrackChannel::new(toggle, player))
}
