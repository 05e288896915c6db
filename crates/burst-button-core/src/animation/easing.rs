//! Easing curves for colour transitions.
//!
//! An easing curve maps linear progress `t` in `0.0..=1.0` to eased
//! progress. Every curve starts at 0 and ends at 1.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Available easing curves.
///
/// Serialized in snake case (`"ease_in_out"`), as used in button definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation (no easing).
    #[default]
    Linear,
    /// Quadratic ease-in (starts slow, accelerates).
    EaseIn,
    /// Quadratic ease-out (starts fast, decelerates).
    EaseOut,
    /// Quadratic ease-in-out (smooth start and end).
    EaseInOut,
    /// Cubic ease-out.
    EaseOutCubic,
    /// Sinusoidal ease-in-out.
    EaseInOutSine,
}

impl Easing {
    /// Apply the curve to a progress value. Input is clamped to `0.0..=1.0`.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        ease(self, t)
    }
}

/// Apply an easing curve to a progress value.
///
/// # Example
///
/// ```
/// use burst_button_core::animation::{ease, Easing};
///
/// assert_eq!(ease(Easing::Linear, 0.5), 0.5);
/// assert!(ease(Easing::EaseIn, 0.5) < 0.5);
/// assert!(ease(Easing::EaseOut, 0.5) > 0.5);
/// ```
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
        Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        Easing::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
    }
}
