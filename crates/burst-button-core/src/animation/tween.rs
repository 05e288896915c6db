//! Cancellable property tweens keyed by `(node, property)`.

use std::collections::HashMap;
use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

use super::easing::{ease, Easing};
use crate::scene::{NodeId, SceneGraph};
use crate::types::Color;

new_key_type! {
    /// A unique identifier for a running tween.
    pub struct TweenId;
}

/// The node property a tween drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TweenProperty {
    /// The node's color.
    Color,
}

/// A color interpolation in progress.
#[derive(Debug, Clone)]
struct ColorTween {
    node: NodeId,
    from: Color,
    to: Color,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl ColorTween {
    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_nanos() as f64 / self.duration.as_nanos() as f64).min(1.0) as f32
        }
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> Color {
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(self.to, ease(self.easing, self.progress()))
    }
}

/// Runs color tweens on scene nodes.
///
/// At most one tween runs per `(node, property)`: starting a new one on the
/// same key stops the previous tween first. Tweens advance only when the
/// host calls [`Animator::advance`].
#[derive(Debug, Default)]
pub struct Animator {
    tweens: SlotMap<TweenId, ColorTween>,
    by_key: HashMap<(NodeId, TweenProperty), TweenId>,
}

impl Animator {
    /// Create an animator with no running tweens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start interpolating `node`'s color from `from` to `to`.
    ///
    /// Any tween already driving the node's color is cancelled. The node
    /// keeps its current value until the next [`advance`](Self::advance).
    pub fn animate_color(
        &mut self,
        node: NodeId,
        from: Color,
        to: Color,
        duration: Duration,
        easing: Easing,
    ) -> TweenId {
        self.cancel(node, TweenProperty::Color);
        let id = self.tweens.insert(ColorTween {
            node,
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        });
        self.by_key.insert((node, TweenProperty::Color), id);
        tracing::trace!(target: "burst_button_core::tween", ?id, ?node, %from, %to, ?duration, "tween started");
        id
    }

    /// Cancel the tween driving `property` on `node`, leaving the property
    /// at its last written value. Returns `false` if nothing was running.
    pub fn cancel(&mut self, node: NodeId, property: TweenProperty) -> bool {
        match self.by_key.remove(&(node, property)) {
            Some(id) => {
                self.tweens.remove(id);
                tracing::trace!(target: "burst_button_core::tween", ?id, ?node, "tween cancelled");
                true
            }
            None => false,
        }
    }

    /// Stop a tween by id. Returns `false` if it already finished or was cancelled.
    pub fn stop(&mut self, id: TweenId) -> bool {
        match self.tweens.remove(id) {
            Some(tween) => {
                self.by_key.remove(&(tween.node, TweenProperty::Color));
                true
            }
            None => false,
        }
    }

    /// Check if a tween is still running.
    pub fn is_active(&self, id: TweenId) -> bool {
        self.tweens.contains_key(id)
    }

    /// The tween currently driving `property` on `node`.
    pub fn active_on(&self, node: NodeId, property: TweenProperty) -> Option<TweenId> {
        self.by_key.get(&(node, property)).copied()
    }

    /// The value a running tween is heading to.
    pub fn target_of(&self, id: TweenId) -> Option<Color> {
        self.tweens.get(id).map(|t| t.to)
    }

    /// Number of running tweens.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Check if no tween is running.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Advance every tween by `dt`, writing the interpolated colors into
    /// `scene`. Returns the tweens that completed during this call; their
    /// end value has been written exactly.
    ///
    /// Tweens whose node no longer exists are dropped.
    #[tracing::instrument(skip(self, scene), target = "burst_button_core::tween", level = "trace")]
    pub fn advance(&mut self, dt: Duration, scene: &mut dyn SceneGraph) -> Vec<TweenId> {
        let mut finished = Vec::new();

        for (id, tween) in self.tweens.iter_mut() {
            tween.elapsed = tween.elapsed.saturating_add(dt);
            let written = scene.set_color(tween.node, tween.value());
            if !written || tween.is_finished() {
                finished.push(id);
            }
        }

        for &id in &finished {
            if let Some(tween) = self.tweens.remove(id) {
                self.by_key.remove(&(tween.node, TweenProperty::Color));
                tracing::trace!(target: "burst_button_core::tween", ?id, node = ?tween.node, "tween finished");
            }
        }

        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneTree;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_tween_reaches_target() {
        let mut scene = SceneTree::new();
        let node = scene.create_node("Icon");
        let mut animator = Animator::new();

        let id = animator.animate_color(node, Color::WHITE, Color::BLACK, ms(100), Easing::Linear);
        assert!(animator.advance(ms(50), &mut scene).is_empty());
        assert_eq!(scene.color(node), Some(Color::rgb(128, 128, 128)));

        assert_eq!(animator.advance(ms(50), &mut scene), vec![id]);
        assert_eq!(scene.color(node), Some(Color::BLACK));
        assert!(!animator.is_active(id));
        assert!(animator.is_empty());
    }

    #[test]
    fn test_new_tween_supersedes_old() {
        let mut scene = SceneTree::new();
        let node = scene.create_node("Icon");
        let mut animator = Animator::new();

        let first = animator.animate_color(node, Color::WHITE, Color::BLACK, ms(100), Easing::Linear);
        let second = animator.animate_color(node, Color::WHITE, Color::RED, ms(100), Easing::Linear);

        assert!(!animator.is_active(first));
        assert_eq!(animator.active_on(node, TweenProperty::Color), Some(second));
        assert_eq!(animator.len(), 1);

        animator.advance(ms(200), &mut scene);
        assert_eq!(scene.color(node), Some(Color::RED));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut scene = SceneTree::new();
        let node = scene.create_node("Icon");
        let mut animator = Animator::new();

        assert!(!animator.cancel(node, TweenProperty::Color));
        animator.animate_color(node, Color::WHITE, Color::BLACK, ms(100), Easing::Linear);
        assert!(animator.cancel(node, TweenProperty::Color));
        assert!(!animator.cancel(node, TweenProperty::Color));

        animator.advance(ms(100), &mut scene);
        assert_eq!(scene.color(node), Some(Color::WHITE));
    }

    #[test]
    fn test_removed_node_drops_tween() {
        let mut scene = SceneTree::new();
        let node = scene.create_node("Icon");
        let mut animator = Animator::new();

        let id = animator.animate_color(node, Color::WHITE, Color::BLACK, ms(100), Easing::Linear);
        scene.remove_node(node).unwrap();
        assert_eq!(animator.advance(ms(10), &mut scene), vec![id]);
        assert!(animator.is_empty());
    }
}
