//! Error types for audio cue playback.

use thiserror::Error;

/// Audio loading and playback errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MultimediaError {
    /// The audio data could not be decoded.
    #[error("failed to load audio: {0}")]
    AudioLoad(String),

    /// A clip name was played before being loaded.
    #[error("sound not loaded: {0}")]
    UnknownClip(String),

    /// The per-clip instance limit is reached.
    #[error("maximum concurrent instances ({max}) reached for sound: {clip}")]
    InstanceLimit {
        /// The clip name.
        clip: String,
        /// The configured limit.
        max: usize,
    },

    /// Playback could not start.
    #[error("playback error: {0}")]
    Playback(String),

    /// The audio output device failed or is missing.
    #[error("audio device error: {0}")]
    Device(String),

    /// Reading a clip file failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for MultimediaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<rodio::StreamError> for MultimediaError {
    fn from(err: rodio::StreamError) -> Self {
        Self::Device(err.to_string())
    }
}

impl From<rodio::PlayError> for MultimediaError {
    fn from(err: rodio::PlayError) -> Self {
        Self::Playback(err.to_string())
    }
}

impl From<rodio::decoder::DecoderError> for MultimediaError {
    fn from(err: rodio::decoder::DecoderError) -> Self {
        Self::AudioLoad(err.to_string())
    }
}

/// A specialized Result type for multimedia operations.
pub type Result<T> = std::result::Result<T, MultimediaError>;
