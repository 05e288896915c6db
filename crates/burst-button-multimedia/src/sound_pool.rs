//! Pre-loaded one-shot sounds for button audio cues.
//!
//! Clips are decoded once when loaded into a [`SoundBank`] and played by
//! name through a [`SoundPool`]. Several instances of the same clip may
//! overlap, up to a per-clip limit.
//!
//! # Example
//!
//! ```ignore
//! use burst_button_multimedia::{SoundBank, SoundPool};
//!
//! let mut bank = SoundBank::new();
//! bank.load("click", "assets/click.wav")?;
//! bank.load("pop", "assets/pop.ogg")?;
//!
//! let pool = SoundPool::with_bank(bank)?;
//! pool.set_max_instances("click", 4);
//! pool.play("click")?;
//! ```

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use burst_button_core::logging::targets;
use burst_button_core::{AudioClip, AudioPlayer};
use parking_lot::Mutex;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::error::{MultimediaError, Result};

/// Default maximum concurrent instances per clip.
const DEFAULT_MAX_INSTANCES: usize = 8;

/// Encoded clip data keyed by name, validated on load.
#[derive(Debug, Clone, Default)]
pub struct SoundBank {
    clips: HashMap<String, Arc<[u8]>>,
}

impl SoundBank {
    /// Create an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a clip from a file.
    ///
    /// Supported formats: WAV, MP3, OGG Vorbis, FLAC.
    pub fn load<P: AsRef<Path>>(&mut self, name: &str, path: P) -> Result<()> {
        let data = std::fs::read(path.as_ref())?;
        self.load_bytes(name, data)
    }

    /// Load a clip from encoded bytes. The format is detected from the data.
    pub fn load_bytes(&mut self, name: &str, data: Vec<u8>) -> Result<()> {
        let data: Arc<[u8]> = data.into();
        Decoder::new(Cursor::new(Arc::clone(&data)))?;
        tracing::debug!(target: targets::AUDIO, name, bytes = data.len(), "clip loaded");
        self.clips.insert(name.to_string(), data);
        Ok(())
    }

    /// Check if a clip is loaded.
    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    /// Remove a clip. Returns `false` if it was not loaded.
    pub fn remove(&mut self, name: &str) -> bool {
        self.clips.remove(name).is_some()
    }

    /// Number of loaded clips.
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Check if no clip is loaded.
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Names of the loaded clips.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clips.keys().map(String::as_str)
    }

    /// A fresh decoder over a loaded clip.
    pub fn decoder(&self, name: &str) -> Result<Decoder<Cursor<Arc<[u8]>>>> {
        let data = self
            .clips
            .get(name)
            .ok_or_else(|| MultimediaError::UnknownClip(name.to_string()))?;
        Ok(Decoder::new(Cursor::new(Arc::clone(data)))?)
    }
}

/// Playback settings and live sinks of one clip.
struct Voices {
    volume: f32,
    max_instances: usize,
    sinks: Vec<Sink>,
}

impl Voices {
    fn new() -> Self {
        Self {
            volume: 1.0,
            max_instances: DEFAULT_MAX_INSTANCES,
            sinks: Vec::new(),
        }
    }

    /// Drop sinks that finished playing.
    fn cleanup_finished(&mut self) {
        self.sinks.retain(|sink| !sink.empty());
    }

    fn can_play(&self) -> bool {
        self.sinks.len() < self.max_instances
    }
}

struct PoolState {
    voices: HashMap<String, Voices>,
    global_volume: f32,
}

/// Plays clips from a [`SoundBank`] on the default output device.
///
/// Implements [`AudioPlayer`], so it can be handed to a button host
/// directly. Playback runs on rodio's audio thread; `SoundPool` itself is
/// used from one thread.
pub struct SoundPool {
    /// Must stay alive for sound to play.
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    bank: SoundBank,
    state: Mutex<PoolState>,
}

impl SoundPool {
    /// Open the default output device with an empty bank.
    pub fn new() -> Result<Self> {
        Self::with_bank(SoundBank::new())
    }

    /// Open the default output device and play from `bank`.
    pub fn with_bank(bank: SoundBank) -> Result<Self> {
        let (stream, stream_handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            stream_handle,
            bank,
            state: Mutex::new(PoolState {
                voices: HashMap::new(),
                global_volume: 1.0,
            }),
        })
    }

    /// The clips available to this pool.
    pub fn bank(&self) -> &SoundBank {
        &self.bank
    }

    /// Mutable access to the clips, for loading more.
    pub fn bank_mut(&mut self) -> &mut SoundBank {
        &mut self.bank
    }

    /// Start one instance of `name`.
    ///
    /// Fails if the clip is not loaded or its instance limit is reached.
    pub fn play(&self, name: &str) -> Result<()> {
        let source = self.bank.decoder(name)?;

        let mut state = self.state.lock();
        let global_volume = state.global_volume;
        let voices = state.voices.entry(name.to_string()).or_insert_with(Voices::new);
        voices.cleanup_finished();
        if !voices.can_play() {
            return Err(MultimediaError::InstanceLimit {
                clip: name.to_string(),
                max: voices.max_instances,
            });
        }

        let sink = Sink::try_new(&self.stream_handle)?;
        sink.set_volume(voices.volume * global_volume);
        sink.append(source);
        sink.play();
        voices.sinks.push(sink);
        Ok(())
    }

    /// Stop every playing instance of `name`.
    pub fn stop(&self, name: &str) {
        if let Some(voices) = self.state.lock().voices.get_mut(name) {
            for sink in voices.sinks.drain(..) {
                sink.stop();
            }
        }
    }

    /// Stop everything.
    pub fn stop_all(&self) {
        for voices in self.state.lock().voices.values_mut() {
            for sink in voices.sinks.drain(..) {
                sink.stop();
            }
        }
    }

    /// Set the volume multiplier applied to every clip.
    pub fn set_volume(&self, volume: f32) {
        let mut state = self.state.lock();
        state.global_volume = volume.max(0.0);
        let global_volume = state.global_volume;
        for voices in state.voices.values() {
            for sink in &voices.sinks {
                sink.set_volume(voices.volume * global_volume);
            }
        }
    }

    /// The global volume multiplier.
    pub fn volume(&self) -> f32 {
        self.state.lock().global_volume
    }

    /// Set the volume of one clip.
    pub fn set_clip_volume(&self, name: &str, volume: f32) {
        let mut state = self.state.lock();
        let global_volume = state.global_volume;
        let voices = state.voices.entry(name.to_string()).or_insert_with(Voices::new);
        voices.volume = volume.max(0.0);
        for sink in &voices.sinks {
            sink.set_volume(voices.volume * global_volume);
        }
    }

    /// Limit how many instances of `name` may play at once (at least one).
    /// Instances over the new limit are stopped.
    pub fn set_max_instances(&self, name: &str, max: usize) {
        let max = max.max(1);
        let mut state = self.state.lock();
        let voices = state.voices.entry(name.to_string()).or_insert_with(Voices::new);
        voices.max_instances = max;
        while voices.sinks.len() > max {
            if let Some(sink) = voices.sinks.pop() {
                sink.stop();
            }
        }
    }

    /// Number of instances of `name` still playing.
    pub fn playing_count(&self, name: &str) -> usize {
        self.state
            .lock()
            .voices
            .get(name)
            .map_or(0, |voices| voices.sinks.iter().filter(|s| !s.empty()).count())
    }
}

impl AudioPlayer for SoundPool {
    fn play_one_shot(&mut self, clip: &AudioClip) {
        if let Err(err) = self.play(clip.name()) {
            tracing::warn!(target: targets::AUDIO, %clip, error = %err, "audio cue not played");
        }
    }
}

impl std::fmt::Debug for SoundPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundPool")
            .field("clips", &self.bank.len())
            .field("volume", &self.volume())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    /// A mono 16-bit PCM WAV file.
    fn wav_bytes(samples: &[i16]) -> Vec<u8> {
        let sample_rate: u32 = 8000;
        let data_len = (samples.len() * 2) as u32;
        let mut out = Vec::with_capacity(44 + data_len as usize);
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&1u16.to_le_bytes()); // mono
        out.extend_from_slice(&sample_rate.to_le_bytes());
        out.extend_from_slice(&(sample_rate * 2).to_le_bytes());
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        for sample in samples {
            out.extend_from_slice(&sample.to_le_bytes());
        }
        out
    }

    fn click() -> Vec<u8> {
        let samples: Vec<i16> = (0..400).map(|i| if i % 20 < 10 { 8000 } else { -8000 }).collect();
        wav_bytes(&samples)
    }

    #[test]
    fn test_load_bytes() {
        let mut bank = SoundBank::new();
        bank.load_bytes("click", click()).unwrap();
        assert!(bank.contains("click"));
        assert_eq!(bank.len(), 1);
        assert!(bank.decoder("click").is_ok());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&click()).unwrap();
        file.flush().unwrap();

        let mut bank = SoundBank::new();
        bank.load("pop", file.path()).unwrap();
        assert_eq!(bank.names().collect::<Vec<_>>(), vec!["pop"]);
    }

    #[test]
    fn test_invalid_data_rejected() {
        let mut bank = SoundBank::new();
        let err = bank.load_bytes("noise", b"definitely not audio".to_vec()).unwrap_err();
        assert!(matches!(err, MultimediaError::AudioLoad(_)));
        assert!(bank.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut bank = SoundBank::new();
        let err = bank.load("gone", dir.path().join("gone.wav")).unwrap_err();
        assert!(matches!(err, MultimediaError::Io(_)));
    }

    #[test]
    fn test_unknown_clip() {
        let bank = SoundBank::new();
        assert_eq!(
            bank.decoder("click").err(),
            Some(MultimediaError::UnknownClip("click".into()))
        );
    }

    #[test]
    fn test_remove() {
        let mut bank = SoundBank::new();
        bank.load_bytes("click", click()).unwrap();
        assert!(bank.remove("click"));
        assert!(!bank.remove("click"));
    }

    #[test]
    fn test_error_display() {
        let err = MultimediaError::InstanceLimit {
            clip: "click".into(),
            max: 4,
        };
        assert_eq!(
            err.to_string(),
            "maximum concurrent instances (4) reached for sound: click"
        );
    }
}
