use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use rodio::source::Buffered;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

/// A playable media handle with play/pause and an output volume.
pub trait AudioPlayer {
    fn play(&mut self);
    fn pause(&mut self);
    fn is_playing(&self) -> bool;
    fn volume(&self) -> f32;
    /// Values outside `[0, 1]` are clamped.
    fn set_volume(&mut self, volume: f32);
}

impl<P: AudioPlayer + ?Sized> AudioPlayer for Box<P> {
    fn play(&mut self) {
        (**self).play();
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn is_playing(&self) -> bool {
        (**self).is_playing()
    }

    fn volume(&self) -> f32 {
        (**self).volume()
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume);
    }
}

pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Records playback state without producing sound.
#[derive(Debug, Clone, PartialEq)]
pub struct SilentPlayer {
    playing: bool,
    volume: f32,
    play_calls: u32,
}

impl SilentPlayer {
    pub fn play_calls(&self) -> u32 {
        self.play_calls
    }
}

impl Default for SilentPlayer {
    fn default() -> Self {
        Self {
            playing: false,
            volume: 1.0,
            play_calls: 0,
        }
    }
}

impl AudioPlayer for SilentPlayer {
    fn play(&mut self) {
        self.playing = true;
        self.play_calls += 1;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);
    }
}

type FileSource = Buffered<Decoder<BufReader<File>>>;

/// One sink per track on the shared output mixer.
pub struct RodioPlayer {
    sink: Sink,
    source: FileSource,
    looping: bool,
}

impl RodioPlayer {
    fn open(stream: &OutputStream, path: &Path, looping: bool) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open audio file {}", path.display()))?;
        let source = Decoder::new(BufReader::new(file))
            .with_context(|| format!("failed to decode audio file {}", path.display()))?
            .buffered();

        let sink = Sink::connect_new(stream.mixer());
        sink.pause();
        tracing::debug!(path = %path.display(), looping, "audio player loaded");
        Ok(Self {
            sink,
            source,
            looping,
        })
    }

    fn enqueue(&self) {
        if self.looping {
            self.sink.append(self.source.clone().repeat_infinite());
        } else {
            self.sink.append(self.source.clone());
        }
    }
}

impl AudioPlayer for RodioPlayer {
    fn play(&mut self) {
        // A finished one-shot track restarts from the top.
        if self.sink.empty() {
            self.enqueue();
        }
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn is_playing(&self) -> bool {
        !self.sink.is_paused() && !self.sink.empty()
    }

    fn volume(&self) -> f32 {
        self.sink.volume()
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(clamp_volume(volume));
    }
}

/// Owns the output device, or nothing when running silent.
pub struct AudioEngine {
    stream: Option<OutputStream>,
}

impl AudioEngine {
    pub fn open_default() -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .context("failed to open default audio output")?;
        stream.log_on_drop(false);
        tracing::info!(target: "jukebox", "audio output opened");
        Ok(Self {
            stream: Some(stream),
        })
    }

    pub fn silent() -> Self {
        tracing::info!(target: "jukebox", "audio engine in silent mode");
        Self { stream: None }
    }

    pub fn is_silent(&self) -> bool {
        self.stream.is_none()
    }

    pub fn load_player(&self, path: &Path, looping: bool) -> Result<Box<dyn AudioPlayer>> {
        match &self.stream {
            Some(stream) => Ok(Box::new(RodioPlayer::open(stream, path, looping)?)),
            None => {
                tracing::trace!(path = %path.display(), "silent player stands in for track");
                Ok(Box::new(SilentPlayer::default()))
            }
        }
    }
}
