//! Prelude module for Burst Button.
//!
//! ```ignore
//! use burst_button::prelude::*;
//! ```

// ============================================================================
// Widget
// ============================================================================

pub use crate::{BurstButton, ButtonContext, ButtonState};
pub use crate::{AudioCues, ButtonConfig, ButtonSheet, EffectMode, EffectTarget};
pub use crate::{ButtonEvent, EventSource, ListenerError, PointerSignal};
pub use crate::{ButtonError, ConfigError};

// ============================================================================
// Host
// ============================================================================

pub use crate::{ButtonId, Stage, StageHandle};
pub use burst_button_core::{
    Animator, AudioClip, AudioPlayer, Color, Easing, FrameScheduler, MutedAudio, NodeId,
    SceneGraph, SceneTree, Size, SpriteFrame, Vec2,
};
