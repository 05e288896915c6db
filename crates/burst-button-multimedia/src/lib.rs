//! Audio cue playback for Burst Button, backed by `rodio`.
//!
//! [`SoundPool`] implements the core [`AudioPlayer`](burst_button_core::AudioPlayer)
//! contract, so a host can pass it wherever button audio cues are played:
//!
//! ```ignore
//! use burst_button::Stage;
//! use burst_button_multimedia::{SoundBank, SoundPool};
//!
//! let mut bank = SoundBank::new();
//! bank.load("click", "assets/click.wav")?;
//! let stage = Stage::with_audio(scene, Box::new(SoundPool::with_bank(bank)?));
//! ```
//!
//! Playback failures (missing clip, instance limit, device errors) are
//! logged and never reach the button.
//!
//! ## Supported Formats
//!
//! - WAV
//! - MP3
//! - OGG Vorbis
//! - FLAC

mod error;
pub mod sound_pool;

pub use error::{MultimediaError, Result};
pub use sound_pool::{SoundBank, SoundPool};
