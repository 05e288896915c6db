//! The press-and-hold button state machine.
//!
//! A [`BurstButton`] tracks one pointer stream over a scene node and drives
//! scale, tint or sprite feedback, audio cues, an optional repeat timer and
//! event dispatch from it.
//!
//! # States
//!
//! | State    | Entered by                      | Leaves on                         |
//! |----------|---------------------------------|-----------------------------------|
//! | Idle     | release, cancel, enable         | press, disable                    |
//! | Pressed  | press                           | release, cancel, disable          |
//! | Disabled | disable, or `enabled = false`   | enable                            |
//!
//! While pressed with bursts enabled, each repeat timer fire emits a `Burst`
//! event without changing state.
//!
//! # Collaborators
//!
//! The button owns none of the host systems. Each operation receives a
//! [`ButtonContext`] borrowing the scene, the frame scheduler, the animator
//! and the audio player for the duration of the call.

use std::fmt;
use std::sync::Arc;

use burst_button_core::logging::targets;
use burst_button_core::{
    Animator, AudioClip, AudioPlayer, FrameScheduler, NodeId, SceneGraph, TimerId, Vec2,
};

use crate::config::{ButtonConfig, EffectMode, EffectTarget};
use crate::dispatch::{ButtonEvent, EventSource, Listener, ListenerError, PointerSignal};
use crate::effects::{ColorEffects, SpriteSwap};
use crate::error::{ButtonError, ConfigError, Result};
use crate::repeat::RepeatTimer;

/// Host systems lent to a button for one operation.
pub struct ButtonContext<'a> {
    /// The node tree the button and its effects live in.
    pub scene: &'a mut dyn SceneGraph,
    /// Scheduler driving the repeat timer.
    pub scheduler: &'a mut FrameScheduler,
    /// Animator driving colour transitions.
    pub animator: &'a mut Animator,
    /// Audio cue playback.
    pub audio: &'a mut dyn AudioPlayer,
}

impl<'a> ButtonContext<'a> {
    /// Bundle the host systems.
    pub fn new(
        scene: &'a mut dyn SceneGraph,
        scheduler: &'a mut FrameScheduler,
        animator: &'a mut Animator,
        audio: &'a mut dyn AudioPlayer,
    ) -> Self {
        Self {
            scene,
            scheduler,
            animator,
            audio,
        }
    }
}

impl fmt::Debug for ButtonContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonContext")
            .field("now", &self.scheduler.now())
            .finish_non_exhaustive()
    }
}

/// Observable interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonState {
    /// Not accepting input.
    Disabled,
    /// Enabled and not pressed.
    Idle,
    /// Enabled and held down.
    Pressed,
}

/// A press-and-hold button bound to a scene node.
pub struct BurstButton {
    tag: Arc<str>,
    node: NodeId,
    config: ButtonConfig,
    effect_target: Option<NodeId>,
    enabled: bool,
    pressed: bool,
    activated: bool,
    baseline_scale: Option<Vec2>,
    repeat: RepeatTimer,
    colors: ColorEffects,
    sprite: SpriteSwap,
    listener: Option<Listener>,
    /// Set when the listener is replaced while it is running.
    listener_replaced: bool,
}

impl BurstButton {
    /// Create a button for `node`.
    ///
    /// The configuration is validated and its effect target resolved
    /// relative to `node`. The node's name becomes the button's tag. The
    /// button ignores input until [`activate`](Self::activate) is called.
    pub fn new(scene: &dyn SceneGraph, node: NodeId, config: ButtonConfig) -> Result<Self> {
        config.validate()?;
        if !scene.contains(node) {
            return Err(ButtonError::UnknownNode(node));
        }

        let effect_target = match &config.effect_target {
            None => None,
            Some(EffectTarget::Node(target)) => {
                if !scene.contains(*target) {
                    return Err(ConfigError::UnknownTarget(*target).into());
                }
                Some(*target)
            }
            Some(EffectTarget::Path(path)) => {
                let target = scene.find_path(node, path).ok_or_else(|| {
                    ConfigError::UnresolvedTarget {
                        path: path.clone(),
                        button: scene.path_of(node),
                    }
                })?;
                Some(target)
            }
        };

        Ok(Self {
            tag: Arc::from(scene.name(node).unwrap_or_default()),
            node,
            enabled: config.enabled,
            config,
            effect_target,
            pressed: false,
            activated: false,
            baseline_scale: None,
            repeat: RepeatTimer::new(),
            colors: ColorEffects::new(),
            sprite: SpriteSwap::new(),
            listener: None,
            listener_replaced: false,
        })
    }

    /// Stable identifier passed to the listener.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The button's scene node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The configuration the button was created with.
    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// The resolved sprite-swap target.
    pub fn effect_target(&self) -> Option<NodeId> {
        self.effect_target
    }

    /// The node scale captured at activation.
    pub fn baseline_scale(&self) -> Option<Vec2> {
        self.baseline_scale
    }

    /// Whether the button accepts input.
    pub fn is_active(&self) -> bool {
        self.enabled
    }

    /// Whether the button is held down.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Whether [`activate`](Self::activate) has run.
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Whether the repeat timer is running.
    pub fn is_repeating(&self) -> bool {
        self.repeat.is_running()
    }

    /// Check if `id` is this button's repeat timer.
    pub fn owns_timer(&self, id: TimerId) -> bool {
        self.repeat.owns(id)
    }

    /// The current interaction state.
    pub fn state(&self) -> ButtonState {
        match (self.enabled, self.pressed) {
            (false, _) => ButtonState::Disabled,
            (true, false) => ButtonState::Idle,
            (true, true) => ButtonState::Pressed,
        }
    }

    /// Whether a listener is registered.
    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Register the listener, replacing any previous one.
    pub fn set_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&str, ButtonEvent, &mut EventSource<'_, '_>) -> std::result::Result<(), ListenerError>
            + 'static,
    {
        self.replace_listener(Some(Box::new(listener)));
    }

    /// Remove the listener.
    pub fn clear_listener(&mut self) {
        self.replace_listener(None);
    }

    pub(crate) fn replace_listener(&mut self, listener: Option<Listener>) {
        self.listener = listener;
        self.listener_replaced = true;
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Start handling input.
    ///
    /// Captures the baseline scale, binds the sprite target and applies the
    /// disabled visuals if the button starts disabled. Calling it again has
    /// no effect.
    pub fn activate(&mut self, ctx: &mut ButtonContext<'_>) {
        if self.activated {
            return;
        }
        self.activated = true;

        if self.baseline_scale.is_none() {
            self.baseline_scale = Some(ctx.scene.scale(self.node).unwrap_or(Vec2::ONE));
        }
        self.check_size(ctx.scene);
        self.bind_sprite_target(ctx.scene);
        if !self.enabled {
            self.show_disabled(ctx);
        }

        tracing::debug!(
            target: targets::BUTTON,
            tag = %self.tag,
            state = ?self.state(),
            "button activated"
        );
    }

    /// Stop handling input and return the node to its baseline.
    ///
    /// Stops the repeat timer, restores the scale if pressed, restores
    /// colours immediately and shows the normal sprite. No event is emitted.
    pub fn deactivate(&mut self, ctx: &mut ButtonContext<'_>) {
        if !self.activated {
            return;
        }
        self.repeat.stop(ctx.scheduler);
        if self.pressed {
            self.pressed = false;
            self.restore_scale(ctx.scene);
        }
        self.colors.revert_immediately(ctx.scene, ctx.animator);
        self.sprite.show_normal(ctx.scene);
        self.activated = false;

        tracing::debug!(target: targets::BUTTON, tag = %self.tag, "button deactivated");
    }

    /// Enable or disable the button.
    ///
    /// Disabling while pressed stops the repeat timer and restores the scale
    /// without emitting `Release` or `Cancel`. Setting the current value does
    /// nothing.
    pub fn set_active(&mut self, active: bool, ctx: &mut ButtonContext<'_>) {
        if self.enabled == active {
            return;
        }
        self.enabled = active;
        tracing::debug!(target: targets::BUTTON, tag = %self.tag, active, "active changed");

        if !self.activated {
            return;
        }
        if active {
            self.show_normal(ctx);
        } else {
            if self.pressed {
                self.pressed = false;
                self.repeat.stop(ctx.scheduler);
                self.restore_scale(ctx.scene);
            }
            self.show_disabled(ctx);
        }
    }

    /// Change the sprite-swap target.
    ///
    /// The previous target is returned to its normal frame and the new one
    /// has its current frame captured as normal, then shows whatever the
    /// current state calls for.
    pub fn set_effect_target(
        &mut self,
        target: Option<NodeId>,
        ctx: &mut ButtonContext<'_>,
    ) -> Result<()> {
        if let Some(node) = target.filter(|&node| !ctx.scene.contains(node)) {
            return Err(ConfigError::UnknownTarget(node).into());
        }
        if self.effect_target == target {
            return Ok(());
        }

        self.sprite.show_normal(ctx.scene);
        self.sprite.unbind();
        self.effect_target = target;

        if self.activated {
            self.bind_sprite_target(ctx.scene);
            if self.config.effect_mode == EffectMode::SpriteSwap {
                match self.state() {
                    ButtonState::Disabled => self.sprite.show_disabled(self.config.disabled_sprite.as_ref(), ctx.scene),
                    ButtonState::Pressed => self.sprite.show_press(self.config.press_sprite.as_ref(), ctx.scene),
                    ButtonState::Idle => {}
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Route a pointer signal.
    pub fn handle_pointer(&mut self, signal: PointerSignal, ctx: &mut ButtonContext<'_>) -> Result<()> {
        match signal {
            PointerSignal::Down => self.press(ctx),
            PointerSignal::Up => self.release(ctx),
            PointerSignal::Cancel => self.cancel(ctx),
        }
    }

    /// Pointer down. Ignored unless the button is activated, enabled and not
    /// already pressed.
    pub fn press(&mut self, ctx: &mut ButtonContext<'_>) -> Result<()> {
        if !self.activated || !self.enabled || self.pressed {
            tracing::trace!(target: targets::BUTTON, tag = %self.tag, state = ?self.state(), "press ignored");
            return Ok(());
        }
        self.pressed = true;

        let baseline = *self
            .baseline_scale
            .get_or_insert_with(|| ctx.scene.scale(self.node).unwrap_or(Vec2::ONE));
        ctx.scene.set_scale(self.node, baseline * self.config.press_scale);
        self.show_press(ctx);
        play(ctx.audio, self.config.audio.press.as_ref());
        if self.config.burst_enabled {
            self.repeat.start(self.config.burst_delay, self.config.burst_interval, ctx.scheduler);
        }

        tracing::debug!(target: targets::BUTTON, tag = %self.tag, "pressed");
        self.emit(ButtonEvent::Press, ctx)
    }

    /// Pointer released over the button.
    pub fn release(&mut self, ctx: &mut ButtonContext<'_>) -> Result<()> {
        let clip = self.config.audio.release.clone();
        self.end_press(ButtonEvent::Release, clip.as_ref(), ctx)
    }

    /// Pointer left the button before release.
    pub fn cancel(&mut self, ctx: &mut ButtonContext<'_>) -> Result<()> {
        let clip = self.config.audio.cancel.clone();
        self.end_press(ButtonEvent::Cancel, clip.as_ref(), ctx)
    }

    /// Handle a fire reported by the scheduler.
    ///
    /// Returns `Ok(false)` when `id` is not this button's current repeat
    /// timer, which happens for fires queued before the timer was stopped.
    pub fn handle_timer(&mut self, id: TimerId, ctx: &mut ButtonContext<'_>) -> Result<bool> {
        if !self.repeat.owns(id) {
            return Ok(false);
        }
        if !self.pressed {
            self.repeat.stop(ctx.scheduler);
            return Ok(false);
        }
        tracing::trace!(target: targets::BUTTON, tag = %self.tag, "burst");
        self.emit(ButtonEvent::Burst, ctx)?;
        Ok(true)
    }

    /// The host resized the button node.
    pub fn handle_size_changed(&mut self, ctx: &mut ButtonContext<'_>) {
        self.check_size(ctx.scene);
    }

    fn end_press(
        &mut self,
        event: ButtonEvent,
        clip: Option<&AudioClip>,
        ctx: &mut ButtonContext<'_>,
    ) -> Result<()> {
        if !self.pressed {
            return Ok(());
        }
        self.pressed = false;

        self.repeat.stop(ctx.scheduler);
        self.restore_scale(ctx.scene);
        self.show_normal(ctx);
        play(ctx.audio, clip);

        tracing::debug!(target: targets::BUTTON, tag = %self.tag, %event, "press ended");
        self.emit(event, ctx)
    }

    // =========================================================================
    // Visuals
    // =========================================================================

    fn show_press(&mut self, ctx: &mut ButtonContext<'_>) {
        match self.config.effect_mode {
            EffectMode::None => {}
            EffectMode::Recolor => self.colors.apply_tint(
                self.node,
                self.config.press_tint,
                self.config.color_transition,
                self.config.easing,
                ctx.scene,
                ctx.animator,
            ),
            EffectMode::SpriteSwap => {
                self.sprite.show_press(self.config.press_sprite.as_ref(), ctx.scene);
            }
        }
    }

    fn show_disabled(&mut self, ctx: &mut ButtonContext<'_>) {
        match self.config.effect_mode {
            EffectMode::None => {}
            EffectMode::Recolor => self.colors.apply_tint(
                self.node,
                self.config.disabled_tint,
                self.config.color_transition,
                self.config.easing,
                ctx.scene,
                ctx.animator,
            ),
            EffectMode::SpriteSwap => {
                self.sprite.show_disabled(self.config.disabled_sprite.as_ref(), ctx.scene);
            }
        }
    }

    fn show_normal(&mut self, ctx: &mut ButtonContext<'_>) {
        match self.config.effect_mode {
            EffectMode::None => {}
            EffectMode::Recolor => self.colors.revert_tint(
                self.config.color_transition,
                self.config.easing,
                ctx.scene,
                ctx.animator,
            ),
            EffectMode::SpriteSwap => self.sprite.show_normal(ctx.scene),
        }
    }

    fn restore_scale(&self, scene: &mut dyn SceneGraph) {
        if let Some(baseline) = self.baseline_scale {
            scene.set_scale(self.node, baseline);
        }
    }

    fn bind_sprite_target(&mut self, scene: &dyn SceneGraph) {
        if self.config.effect_mode != EffectMode::SpriteSwap {
            return;
        }
        match self.effect_target {
            Some(target) => {
                self.sprite.bind(scene, target);
            }
            None => self.sprite.unbind(),
        }
    }

    fn check_size(&self, scene: &dyn SceneGraph) {
        if scene.size(self.node).is_some_and(|size| size.is_empty()) {
            tracing::warn!(
                target: targets::BUTTON,
                tag = %self.tag,
                node = %scene.path_of(self.node),
                "button has zero size and cannot receive pointer input"
            );
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Call the listener with `event`. The listener is moved out for the
    /// call so it can reach this button through the [`EventSource`].
    fn emit(&mut self, event: ButtonEvent, ctx: &mut ButtonContext<'_>) -> Result<()> {
        let Some(mut listener) = self.listener.take() else {
            tracing::trace!(target: targets::DISPATCH, tag = %self.tag, %event, "no listener");
            return Ok(());
        };
        tracing::debug!(target: targets::DISPATCH, tag = %self.tag, %event, "dispatching");

        self.listener_replaced = false;
        let tag = Arc::clone(&self.tag);
        let result = {
            let mut source = EventSource {
                button: &mut *self,
                ctx: &mut *ctx,
            };
            listener(&*tag, event, &mut source)
        };
        if !self.listener_replaced {
            self.listener = Some(listener);
        }

        result.map_err(|source| {
            tracing::debug!(target: targets::DISPATCH, tag = %tag, %event, error = %source, "listener failed");
            ButtonError::Listener { tag, event, source }
        })
    }
}

fn play(audio: &mut dyn AudioPlayer, clip: Option<&AudioClip>) {
    if let Some(clip) = clip {
        audio.play_one_shot(clip);
    }
}

impl fmt::Debug for BurstButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BurstButton")
            .field("tag", &self.tag)
            .field("node", &self.node)
            .field("state", &self.state())
            .field("activated", &self.activated)
            .field("repeating", &self.is_repeating())
            .field("has_listener", &self.has_listener())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use burst_button_core::{Color, MutedAudio, SceneTree, SpriteFrame};

    use super::*;

    struct Host {
        scene: SceneTree,
        scheduler: FrameScheduler,
        animator: Animator,
        audio: MutedAudio,
    }

    impl Host {
        fn new(scene: SceneTree) -> Self {
            Self {
                scene,
                scheduler: FrameScheduler::new(),
                animator: Animator::new(),
                audio: MutedAudio,
            }
        }

        fn ctx(&mut self) -> ButtonContext<'_> {
            ButtonContext::new(&mut self.scene, &mut self.scheduler, &mut self.animator, &mut self.audio)
        }
    }

    fn button_scene() -> (SceneTree, NodeId, NodeId) {
        let mut scene = SceneTree::new();
        let node = scene.create_node("Plus");
        scene.set_size(node, (80.0, 40.0).into()).unwrap();
        scene.set_color(node, Color::rgb(200, 100, 50));
        let icon = scene.create_child(node, "Icon").unwrap();
        scene.attach_sprite(icon, Some(SpriteFrame::new("up"))).unwrap();
        (scene, node, icon)
    }

    fn recorder(button: &mut BurstButton) -> Rc<RefCell<Vec<ButtonEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        button.set_listener(move |_, event, _| {
            sink.borrow_mut().push(event);
            Ok(())
        });
        events
    }

    #[test]
    fn test_initial_state() {
        let (scene, node, _) = button_scene();
        let button = BurstButton::new(&scene, node, ButtonConfig::default()).unwrap();
        assert_eq!(button.tag(), "Plus");
        assert_eq!(button.state(), ButtonState::Idle);
        assert!(!button.is_activated());

        let button = BurstButton::new(&scene, node, ButtonConfig::new().with_enabled(false)).unwrap();
        assert_eq!(button.state(), ButtonState::Disabled);
    }

    #[test]
    fn test_unknown_node() {
        let (mut scene, node, _) = button_scene();
        scene.remove_node(node).unwrap();
        let result = BurstButton::new(&scene, node, ButtonConfig::default());
        assert!(matches!(result, Err(ButtonError::UnknownNode(_))));
    }

    #[test]
    fn test_effect_target_resolution() {
        let (scene, node, icon) = button_scene();
        let config = ButtonConfig::new().with_sprite_swap(
            EffectTarget::Path("Icon".into()),
            Some(SpriteFrame::new("down")),
            None,
        );
        let button = BurstButton::new(&scene, node, config).unwrap();
        assert_eq!(button.effect_target(), Some(icon));

        let config = ButtonConfig::new().with_sprite_swap(EffectTarget::Path("Missing".into()), None, None);
        let err = BurstButton::new(&scene, node, config).unwrap_err();
        assert!(matches!(err, ButtonError::Config(ConfigError::UnresolvedTarget { .. })));
    }

    #[test]
    fn test_input_ignored_before_activation() {
        let (scene, node, _) = button_scene();
        let mut host = Host::new(scene);
        let mut button = BurstButton::new(&host.scene, node, ButtonConfig::default()).unwrap();
        let events = recorder(&mut button);

        button.press(&mut host.ctx()).unwrap();
        assert_eq!(button.state(), ButtonState::Idle);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_press_release_restores_baseline() {
        let (scene, node, _) = button_scene();
        let mut host = Host::new(scene);
        host.scene.set_scale(node, Vec2::new(2.0, 2.0));
        let config = ButtonConfig::new().with_recolor(Color::GRAY, Color::GRAY);
        let mut button = BurstButton::new(&host.scene, node, config).unwrap();
        let events = recorder(&mut button);
        button.activate(&mut host.ctx());

        button.press(&mut host.ctx()).unwrap();
        assert_eq!(host.scene.scale(node), Some(Vec2::new(1.8, 1.8)));
        assert_eq!(host.scene.color(node), Some(Color::rgb(200, 100, 50).tinted(Color::GRAY)));

        button.release(&mut host.ctx()).unwrap();
        assert_eq!(host.scene.scale(node), Some(Vec2::new(2.0, 2.0)));
        assert_eq!(host.scene.color(node), Some(Color::rgb(200, 100, 50)));
        assert_eq!(*events.borrow(), vec![ButtonEvent::Press, ButtonEvent::Release]);
    }

    #[test]
    fn test_duplicate_signals_are_noops() {
        let (scene, node, _) = button_scene();
        let mut host = Host::new(scene);
        let mut button = BurstButton::new(&host.scene, node, ButtonConfig::default()).unwrap();
        let events = recorder(&mut button);
        button.activate(&mut host.ctx());

        button.release(&mut host.ctx()).unwrap();
        button.press(&mut host.ctx()).unwrap();
        button.press(&mut host.ctx()).unwrap();
        button.cancel(&mut host.ctx()).unwrap();
        button.cancel(&mut host.ctx()).unwrap();
        assert_eq!(*events.borrow(), vec![ButtonEvent::Press, ButtonEvent::Cancel]);
    }

    #[test]
    fn test_disable_while_pressed() {
        let (scene, node, _) = button_scene();
        let mut host = Host::new(scene);
        let config = ButtonConfig::new().with_burst(Duration::ZERO, Duration::from_millis(100));
        let mut button = BurstButton::new(&host.scene, node, config).unwrap();
        let events = recorder(&mut button);
        button.activate(&mut host.ctx());

        button.press(&mut host.ctx()).unwrap();
        assert!(button.is_repeating());
        button.set_active(false, &mut host.ctx());

        assert_eq!(button.state(), ButtonState::Disabled);
        assert!(!button.is_repeating());
        assert_eq!(host.scheduler.active_count(), 0);
        assert_eq!(host.scene.scale(node), Some(Vec2::ONE));
        assert_eq!(host.scene.color(node), Some(Color::rgb(200, 100, 50).tinted(Color::GRAY)));

        button.release(&mut host.ctx()).unwrap();
        assert_eq!(*events.borrow(), vec![ButtonEvent::Press]);
    }

    #[test]
    fn test_burst_fires_only_while_pressed() {
        let (scene, node, _) = button_scene();
        let mut host = Host::new(scene);
        let config = ButtonConfig::new().with_burst(Duration::from_millis(300), Duration::from_millis(100));
        let mut button = BurstButton::new(&host.scene, node, config).unwrap();
        let events = recorder(&mut button);
        button.activate(&mut host.ctx());

        button.press(&mut host.ctx()).unwrap();
        for id in host.scheduler.advance(Duration::from_millis(450)) {
            assert!(button.handle_timer(id, &mut host.ctx()).unwrap());
        }
        button.release(&mut host.ctx()).unwrap();
        assert!(host.scheduler.advance(Duration::from_secs(1)).is_empty());

        assert_eq!(
            *events.borrow(),
            vec![ButtonEvent::Press, ButtonEvent::Burst, ButtonEvent::Burst, ButtonEvent::Release]
        );
    }

    #[test]
    fn test_listener_error_after_transition() {
        let (scene, node, _) = button_scene();
        let mut host = Host::new(scene);
        let mut button = BurstButton::new(&host.scene, node, ButtonConfig::default()).unwrap();
        button.set_listener(|_, _, _| Err("boom".into()));
        button.activate(&mut host.ctx());

        let err = button.press(&mut host.ctx()).unwrap_err();
        assert!(matches!(err, ButtonError::Listener { event: ButtonEvent::Press, .. }));
        assert_eq!(button.state(), ButtonState::Pressed);
        assert!(button.has_listener());
    }

    #[test]
    fn test_listener_replaces_itself() {
        let (scene, node, _) = button_scene();
        let mut host = Host::new(scene);
        let mut button = BurstButton::new(&host.scene, node, ButtonConfig::default()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        button.set_listener(move |_, event, source| {
            sink.borrow_mut().push(format!("first:{event}"));
            let inner = Rc::clone(&sink);
            source.set_listener(move |_, event, _| {
                inner.borrow_mut().push(format!("second:{event}"));
                Ok(())
            });
            Ok(())
        });
        button.activate(&mut host.ctx());

        button.press(&mut host.ctx()).unwrap();
        button.release(&mut host.ctx()).unwrap();
        assert_eq!(*seen.borrow(), vec!["first:press", "second:release"]);
    }

    #[test]
    fn test_sprite_swap_visuals() {
        let (scene, node, icon) = button_scene();
        let mut host = Host::new(scene);
        let config = ButtonConfig::new()
            .with_enabled(false)
            .with_sprite_swap(icon, Some(SpriteFrame::new("down")), Some(SpriteFrame::new("off")));
        let mut button = BurstButton::new(&host.scene, node, config).unwrap();
        button.activate(&mut host.ctx());
        assert_eq!(host.scene.sprite_frame(icon), Some(SpriteFrame::new("off")));

        button.set_active(true, &mut host.ctx());
        assert_eq!(host.scene.sprite_frame(icon), Some(SpriteFrame::new("up")));

        button.press(&mut host.ctx()).unwrap();
        assert_eq!(host.scene.sprite_frame(icon), Some(SpriteFrame::new("down")));
        // Sprite mode leaves colours alone.
        assert_eq!(host.scene.color(node), Some(Color::rgb(200, 100, 50)));
        button.release(&mut host.ctx()).unwrap();
        assert_eq!(host.scene.sprite_frame(icon), Some(SpriteFrame::new("up")));
    }

    #[test]
    fn test_deactivate_restores_everything() {
        let (scene, node, _) = button_scene();
        let mut host = Host::new(scene);
        let config = ButtonConfig::new()
            .with_recolor(Color::GRAY, Color::GRAY)
            .with_color_transition(Duration::from_millis(200), Default::default())
            .with_burst(Duration::ZERO, Duration::from_millis(50));
        let mut button = BurstButton::new(&host.scene, node, config).unwrap();
        button.activate(&mut host.ctx());

        button.press(&mut host.ctx()).unwrap();
        host.animator.advance(Duration::from_millis(100), &mut host.scene);
        button.deactivate(&mut host.ctx());

        assert!(!button.is_activated());
        assert_eq!(host.scheduler.active_count(), 0);
        assert!(host.animator.is_empty());
        assert_eq!(host.scene.scale(node), Some(Vec2::ONE));
        assert_eq!(host.scene.color(node), Some(Color::rgb(200, 100, 50)));
    }
}
