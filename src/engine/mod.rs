pub mod audio;
pub mod core;
pub mod platform;
pub mod resources;

use anyhow::{Context, Result};
use audio::{AudioEngine, AudioPlayer};
use self::core::JukeboxConfig;
use platform::{HostEvent, PlatformLayer};
use resources::{ElementIds, ElementRegistry};

use crate::game::{ExclusiveTrackController, ToggleControl, Track};

pub type DynController = ExclusiveTrackController<Box<dyn AudioPlayer>>;

pub struct JukeboxApp {
    config: JukeboxConfig,
    ids: ElementIds,
    controller: DynController,
    // Players stop when the output stream is dropped.
    audio: AudioEngine,
}

impl JukeboxApp {
    pub fn new(config: JukeboxConfig) -> Result<Self> {
        config.validate().context("invalid config")?;
        let audio = if config.silent {
            AudioEngine::silent()
        } else {
            AudioEngine::open_default()?
        };
        Self::with_audio(config, audio)
    }

    /// Registers every control and player, binds the controller and applies
    /// the startup state.
    pub fn with_audio(config: JukeboxConfig, audio: AudioEngine) -> Result<Self> {
        config.validate().context("invalid config")?;
        let mut registry = ElementRegistry::default();
        for track in Track::ALL {
            registry.register_toggle(config.toggle_id(track), ToggleControl::new(false));
            let path = config.source_path(track);
            let player = audio
                .load_player(&path, config.track(track).looping)
                .with_context(|| format!("failed to load {track} track"))?;
            registry.register_player(config.audio_id(track), player);
        }

        let ids = config.element_ids();
        let mut controller = ExclusiveTrackController::bind(&mut registry, &ids)
            .context("failed to bind track controls")?
            .with_startup(config.startup_state());
        controller.initialize();

        Ok(Self {
            config,
            ids,
            controller,
            audio,
        })
    }

    pub fn controller(&self) -> &DynController {
        &self.controller
    }

    pub fn run(&mut self, platform: &PlatformLayer) -> Result<()> {
        tracing::info!(
            target: "jukebox",
            app = %self.config.app_name,
            silent = self.audio.is_silent(),
            "Jukebox starting"
        );
        while self.handle_event(platform.next_event()) {}
        tracing::info!(target: "jukebox", "Jukebox shutdown complete");
        Ok(())
    }

    /// Applies one host event. Returns `false` once the host asks to quit.
    pub fn handle_event(&mut self, event: HostEvent) -> bool {
        tracing::debug!(target: "jukebox", ?event, "host event");
        match event {
            HostEvent::Check(id) => self.toggle(&id, |_| true),
            HostEvent::Uncheck(id) => self.toggle(&id, |_| false),
            HostEvent::Click(id) => self.toggle(&id, |checked| !checked),
            HostEvent::Status => println!("{}", self.status_line()),
            HostEvent::Quit => return false,
        }
        true
    }

    pub fn status_line(&self) -> String {
        let playing = self
            .controller
            .playing()
            .map_or("nothing", |track| track.name());
        let selected = self
            .controller
            .selection()
            .track()
            .map_or("nothing", |track| track.name());
        format!("selected: {selected}, playing: {playing}")
    }

    fn toggle(&mut self, id: &str, next: impl FnOnce(bool) -> bool) {
        let Some(track) = self.ids.track_for_toggle(id) else {
            tracing::warn!(target: "jukebox", %id, "no toggle control with this id");
            return;
        };
        let checked = next(self.controller.is_checked(track));
        self.controller.user_toggle(track, checked);
    }
}
