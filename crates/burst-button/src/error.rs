//! Error types for the button widget.

use std::sync::Arc;

use burst_button_core::{NodeId, SceneError};
use thiserror::Error;

use crate::dispatch::{ButtonEvent, ListenerError};
use crate::stage::ButtonId;

/// Errors found in a button's authored configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Sprite-swap feedback was selected without naming a target.
    #[error("sprite-swap effect mode requires an effect target")]
    MissingEffectTarget,

    /// The press scale multiplier is negative or not a number.
    #[error("press scale must be a finite non-negative number, got {0}")]
    InvalidPressScale(f32),

    /// The effect target path does not name a node under the button.
    #[error("effect target `{path}` not found under `{button}`")]
    UnresolvedTarget {
        /// Path as authored.
        path: String,
        /// Scene path of the button node.
        button: String,
    },

    /// The effect target node is not part of the scene.
    #[error("effect target node {0:?} does not exist")]
    UnknownTarget(NodeId),

    /// Malformed TOML, or a value outside its allowed range.
    #[error("invalid button definition: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised by button construction and transitions.
#[derive(Error, Debug)]
pub enum ButtonError {
    /// Configuration rejected at construction.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The button node is not part of the scene.
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),

    /// No button is registered under this id.
    #[error("button {0:?} does not exist")]
    UnknownButton(ButtonId),

    /// The host scene rejected an operation.
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// A node path in a button sheet did not resolve.
    #[error("button path `{0}` not found")]
    UnresolvedPath(String),

    /// The listener failed while handling an event. The transition that
    /// emitted the event had already completed.
    #[error("listener failed handling `{event}` from `{tag}`")]
    Listener {
        /// Tag of the emitting button.
        tag: Arc<str>,
        /// The event being handled.
        event: ButtonEvent,
        /// The listener's error.
        #[source]
        source: ListenerError,
    },
}

/// A specialized Result type for button operations.
pub type Result<T> = std::result::Result<T, ButtonError>;
