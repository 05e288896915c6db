//! Multiplicative subtree tinting.

use std::collections::HashMap;
use std::time::Duration;

use burst_button_core::logging::targets;
use burst_button_core::{Animator, Color, Easing, NodeId, SceneGraph, TweenId, TweenProperty};

/// Per-node record of the authored colour.
#[derive(Debug, Clone, Copy)]
struct ColorMemo {
    original: Color,
    transition: Option<TweenId>,
    /// Heading back to `original`. Once the transition ends the memo is stale.
    reverting: bool,
}

impl ColorMemo {
    fn is_settled(&self, animator: &Animator) -> bool {
        self.reverting && self.transition.is_none_or(|id| !animator.is_active(id))
    }
}

/// Tints a subtree without losing the colours it was authored with.
///
/// Each node's colour is captured the first time a tint reaches it and kept
/// until a revert has fully completed, so tints never compound across press
/// cycles. Memos are keyed by [`NodeId`]; nothing is stored on the nodes.
#[derive(Debug, Default)]
pub struct ColorEffects {
    memos: HashMap<NodeId, ColorMemo>,
}

impl ColorEffects {
    /// Create an engine with no captured colours.
    pub fn new() -> Self {
        Self::default()
    }

    /// Multiply `tint` into `root` and every descendant.
    ///
    /// With a zero `duration` the colours are written immediately, otherwise
    /// each node is animated from its current colour. Any transition already
    /// running on a node is superseded.
    pub fn apply_tint(
        &mut self,
        root: NodeId,
        tint: Color,
        duration: Duration,
        easing: Easing,
        scene: &mut dyn SceneGraph,
        animator: &mut Animator,
    ) {
        self.memos.retain(|_, memo| !memo.is_settled(animator));

        let mut visited = 0usize;
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            stack.extend(scene.children(node).iter().rev().copied());
            let Some(current) = scene.color(node) else {
                continue;
            };
            visited += 1;

            let memo = self.memos.entry(node).or_insert(ColorMemo {
                original: current,
                transition: None,
                reverting: false,
            });
            let target = memo.original.tinted(tint);
            animator.cancel(node, TweenProperty::Color);
            memo.reverting = false;

            if duration.is_zero() || current == target {
                scene.set_color(node, target);
                memo.transition = None;
            } else {
                memo.transition = Some(animator.animate_color(node, current, target, duration, easing));
            }
        }

        tracing::trace!(target: targets::EFFECTS, ?root, %tint, visited, "tint applied");
    }

    /// Bring every captured node back to its authored colour.
    ///
    /// With a zero `duration` the memos are cleared immediately; otherwise
    /// they are cleared once the transition back has finished. Safe to call
    /// when nothing is tinted.
    pub fn revert_tint(
        &mut self,
        duration: Duration,
        easing: Easing,
        scene: &mut dyn SceneGraph,
        animator: &mut Animator,
    ) {
        self.memos.retain(|&node, memo| {
            if memo.is_settled(animator) {
                return false;
            }
            if memo.reverting {
                // Already heading home.
                return true;
            }
            animator.cancel(node, TweenProperty::Color);

            let Some(current) = scene.color(node) else {
                return false;
            };
            if duration.is_zero() || current == memo.original {
                scene.set_color(node, memo.original);
                return false;
            }

            memo.transition =
                Some(animator.animate_color(node, current, memo.original, duration, easing));
            memo.reverting = true;
            true
        });

        tracing::trace!(target: targets::EFFECTS, pending = self.memos.len(), "tint reverted");
    }

    /// Restore every captured colour right now, abandoning running transitions.
    pub fn revert_immediately(&mut self, scene: &mut dyn SceneGraph, animator: &mut Animator) {
        for (node, memo) in self.memos.drain() {
            animator.cancel(node, TweenProperty::Color);
            scene.set_color(node, memo.original);
        }
    }

    /// The authored colour captured for `node`, if a tint has reached it.
    pub fn original_color(&self, node: NodeId) -> Option<Color> {
        self.memos.get(&node).map(|memo| memo.original)
    }

    /// Number of nodes whose authored colour is still held.
    pub fn captured_len(&self) -> usize {
        self.memos.len()
    }

    /// Check if any node is tinted or on its way back.
    pub fn is_tinted(&self) -> bool {
        !self.memos.is_empty()
    }
}
