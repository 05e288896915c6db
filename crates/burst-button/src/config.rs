//! Authored button configuration.
//!
//! A [`ButtonConfig`] is fixed when a button is created. It can be built in
//! code with the `with_*` builder methods or loaded from TOML:
//!
//! ```
//! use burst_button::{ButtonConfig, EffectMode};
//!
//! let config = ButtonConfig::from_toml(r##"
//!     burst_enabled = true
//!     burst_delay = 0.3
//!     burst_interval = 0.1
//!     press_scale = 0.95
//!     effect_mode = "recolor"
//!     press_tint = "#C8C8C8"
//!
//!     [audio]
//!     press = "click"
//! "##).unwrap();
//!
//! assert!(config.burst_enabled);
//! assert_eq!(config.effect_mode, EffectMode::Recolor);
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use burst_button_core::{AudioClip, Color, Easing, NodeId, SpriteFrame};
use serde::Deserialize;

use crate::error::ConfigError;

/// Which visual feedback a button applies besides scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectMode {
    /// Scale feedback only.
    None,
    /// Multiply the button subtree's colors by the press/disabled tint.
    #[default]
    Recolor,
    /// Swap the image shown by the effect target's sprite.
    SpriteSwap,
}

/// The node whose sprite is swapped in [`EffectMode::SpriteSwap`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum EffectTarget {
    /// A node resolved by the caller.
    Node(NodeId),
    /// A slash-separated child path relative to the button node. An empty
    /// path names the button node itself.
    Path(String),
}

impl From<String> for EffectTarget {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

impl From<NodeId> for EffectTarget {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

/// Sounds played on each user gesture. Missing clips are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioCues {
    /// Played when the button is pressed.
    pub press: Option<AudioClip>,
    /// Played when the pointer is released over the button.
    pub release: Option<AudioClip>,
    /// Played when the host cancels the press (pointer left the button).
    pub cancel: Option<AudioClip>,
}

/// Construction-time configuration of a [`BurstButton`](crate::BurstButton).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ButtonConfig {
    /// Initial value of `is_active`.
    pub enabled: bool,
    /// Emit `Burst` events while held.
    pub burst_enabled: bool,
    /// Time from press to the first `Burst`.
    #[serde(deserialize_with = "seconds::deserialize")]
    pub burst_delay: Duration,
    /// Time between consecutive `Burst` events.
    #[serde(deserialize_with = "seconds::deserialize")]
    pub burst_interval: Duration,
    /// Scale multiplier applied to the baseline scale while pressed.
    pub press_scale: f32,
    /// Visual feedback strategy.
    pub effect_mode: EffectMode,
    /// Tint multiplied into the subtree while pressed.
    pub press_tint: Color,
    /// Tint multiplied into the subtree while disabled.
    pub disabled_tint: Color,
    /// Duration of tint transitions. Zero applies colors immediately.
    #[serde(deserialize_with = "seconds::deserialize")]
    pub color_transition: Duration,
    /// Easing curve of tint transitions.
    pub easing: Easing,
    /// Image shown by the effect target while pressed.
    pub press_sprite: Option<SpriteFrame>,
    /// Image shown by the effect target while disabled.
    pub disabled_sprite: Option<SpriteFrame>,
    /// Node whose sprite is swapped. Required for [`EffectMode::SpriteSwap`].
    pub effect_target: Option<EffectTarget>,
    /// Sounds for press, release and cancel.
    pub audio: AudioCues,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            burst_enabled: false,
            burst_delay: Duration::ZERO,
            burst_interval: Duration::from_millis(100),
            press_scale: 0.9,
            effect_mode: EffectMode::Recolor,
            press_tint: Color::WHITE,
            disabled_tint: Color::GRAY,
            color_transition: Duration::ZERO,
            easing: Easing::Linear,
            press_sprite: None,
            disabled_sprite: None,
            effect_target: None,
            audio: AudioCues::default(),
        }
    }
}

impl ButtonConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML button definition.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for invalid combinations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.press_scale.is_finite() || self.press_scale < 0.0 {
            return Err(ConfigError::InvalidPressScale(self.press_scale));
        }
        if self.effect_mode == EffectMode::SpriteSwap && self.effect_target.is_none() {
            return Err(ConfigError::MissingEffectTarget);
        }
        Ok(())
    }

    /// Set the initial active state using builder pattern.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Enable repeating `Burst` events with the given delay and interval.
    pub fn with_burst(mut self, delay: Duration, interval: Duration) -> Self {
        self.burst_enabled = true;
        self.burst_delay = delay;
        self.burst_interval = interval;
        self
    }

    /// Set the press scale multiplier using builder pattern.
    pub fn with_press_scale(mut self, factor: f32) -> Self {
        self.press_scale = factor;
        self
    }

    /// Use tint feedback with the given press and disabled tints.
    pub fn with_recolor(mut self, press_tint: Color, disabled_tint: Color) -> Self {
        self.effect_mode = EffectMode::Recolor;
        self.press_tint = press_tint;
        self.disabled_tint = disabled_tint;
        self
    }

    /// Use sprite-swap feedback on `target`.
    pub fn with_sprite_swap(
        mut self,
        target: impl Into<EffectTarget>,
        press_sprite: Option<SpriteFrame>,
        disabled_sprite: Option<SpriteFrame>,
    ) -> Self {
        self.effect_mode = EffectMode::SpriteSwap;
        self.effect_target = Some(target.into());
        self.press_sprite = press_sprite;
        self.disabled_sprite = disabled_sprite;
        self
    }

    /// Set the effect mode using builder pattern.
    pub fn with_effect_mode(mut self, mode: EffectMode) -> Self {
        self.effect_mode = mode;
        self
    }

    /// Set the tint transition duration and easing.
    pub fn with_color_transition(mut self, duration: Duration, easing: Easing) -> Self {
        self.color_transition = duration;
        self.easing = easing;
        self
    }

    /// Set the audio cues using builder pattern.
    pub fn with_audio(mut self, audio: AudioCues) -> Self {
        self.audio = audio;
        self
    }
}

/// A set of button definitions keyed by node path, as authored for a screen.
///
/// ```toml
/// [buttons."Count/+"]
/// burst_enabled = true
/// burst_delay = 0.3
///
/// [buttons.ImageBtn]
/// effect_mode = "sprite_swap"
/// effect_target = "Icon"
/// press_sprite = "icon_down"
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ButtonSheet {
    /// Button configurations keyed by node path relative to the screen root.
    pub buttons: BTreeMap<String, ButtonConfig>,
}

impl ButtonSheet {
    /// Parse a sheet and validate every entry.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let sheet: Self = toml::from_str(source)?;
        for config in sheet.buttons.values() {
            config.validate()?;
        }
        Ok(sheet)
    }
}

/// Durations authored as fractional seconds.
mod seconds {
    use std::time::Duration;

    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() || secs < 0.0 {
            return Err(D::Error::custom(format!(
                "duration must be a non-negative number of seconds, got {secs}"
            )));
        }
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}
