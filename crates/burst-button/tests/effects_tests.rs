//! Tests for tint and sprite feedback over whole button subtrees.

use std::time::Duration;

use burst_button::prelude::*;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// A button with a small authored hierarchy of different colours and a
/// sprite icon.
struct Fixture {
    stage: Stage,
    root: NodeId,
    icon: NodeId,
    nodes: Vec<NodeId>,
}

fn fixture() -> (SceneTree, NodeId, NodeId, Vec<NodeId>) {
    let mut scene = SceneTree::new();
    let root = scene.create_node("ColorBtn");
    scene.set_size(root, Size::new(160.0, 48.0)).unwrap();
    scene.set_color(root, Color::rgb(220, 60, 60));
    let background = scene.create_child(root, "Background").unwrap();
    scene.set_color(background, Color::rgba(255, 255, 255, 200));
    let label = scene.create_child(root, "Label").unwrap();
    scene.set_color(label, Color::rgb(12, 34, 56));
    let icon = scene.create_child(background, "Icon").unwrap();
    scene.set_color(icon, Color::rgb(0, 255, 128));
    scene.attach_sprite(icon, Some(SpriteFrame::new("icon_normal"))).unwrap();
    (scene, root, icon, vec![root, background, label, icon])
}

fn with_config(config: ButtonConfig) -> (Fixture, ButtonId) {
    let (scene, root, icon, nodes) = fixture();
    let mut stage = Stage::new(scene);
    let id = stage.add_button(root, config).unwrap();
    (Fixture { stage, root, icon, nodes }, id)
}

fn snapshot(fx: &Fixture) -> Vec<(Color, Vec2, Option<SpriteFrame>)> {
    let scene = fx.stage.scene();
    fx.nodes
        .iter()
        .map(|&n| (scene.color(n).unwrap(), scene.scale(n).unwrap(), scene.sprite_frame(n)))
        .collect()
}

fn configs() -> Vec<ButtonConfig> {
    let press = Some(SpriteFrame::new("icon_pressed"));
    let disabled = Some(SpriteFrame::new("icon_disabled"));
    vec![
        ButtonConfig::default(),
        ButtonConfig::new().with_effect_mode(EffectMode::None).with_press_scale(1.2),
        ButtonConfig::new().with_recolor(Color::rgb(128, 128, 128), Color::GRAY),
        ButtonConfig::new()
            .with_recolor(Color::rgb(200, 150, 100), Color::BLACK)
            .with_press_scale(0.0),
        ButtonConfig::new().with_sprite_swap(
            EffectTarget::Path("Background/Icon".into()),
            press.clone(),
            disabled.clone(),
        ),
        ButtonConfig::new().with_sprite_swap(EffectTarget::Path("Background/Icon".into()), None, None),
        ButtonConfig::new()
            .with_burst(Duration::ZERO, ms(50))
            .with_recolor(Color::rgb(10, 10, 10), Color::GRAY),
    ]
}

#[test]
fn test_press_release_is_bit_identical() {
    for config in configs() {
        let (mut fx, id) = with_config(config.clone());
        let before = snapshot(&fx);

        fx.stage.press(id).unwrap();
        fx.stage.release(id).unwrap();
        assert_eq!(snapshot(&fx), before, "config: {config:?}");

        fx.stage.press(id).unwrap();
        fx.stage.cancel(id).unwrap();
        assert_eq!(snapshot(&fx), before, "config: {config:?}");
    }
}

#[test]
fn test_tint_is_multiplicative_per_node() {
    let tint = Color::rgb(128, 128, 128);
    let (mut fx, id) = with_config(ButtonConfig::new().with_recolor(tint, Color::GRAY));
    let before = snapshot(&fx);

    fx.stage.press(id).unwrap();
    let pressed = snapshot(&fx);
    for ((original, _, _), (now, _, _)) in before.iter().zip(&pressed) {
        assert_eq!(*now, original.tinted(tint));
        assert_eq!(now.a, original.a);
    }
}

#[test]
fn test_animated_round_trip_converges() {
    let config = ButtonConfig::new()
        .with_recolor(Color::rgb(100, 100, 100), Color::rgb(40, 40, 40))
        .with_color_transition(ms(120), Easing::EaseInOut);
    let (mut fx, id) = with_config(config);
    let before = snapshot(&fx);

    // Interrupt transitions in both directions several times.
    for step in [30, 70, 10, 200, 55] {
        fx.stage.press(id).unwrap();
        fx.stage.advance(ms(step)).unwrap();
        fx.stage.release(id).unwrap();
        fx.stage.advance(ms(step / 2)).unwrap();
    }
    fx.stage.set_active(id, false).unwrap();
    fx.stage.advance(ms(60)).unwrap();
    fx.stage.set_active(id, true).unwrap();
    fx.stage.advance(ms(500)).unwrap();

    assert_eq!(snapshot(&fx), before);
    assert!(fx.stage.animator().is_empty());
}

#[test]
fn test_transition_reaches_exact_target() {
    let tint = Color::rgb(64, 64, 64);
    let config = ButtonConfig::new()
        .with_recolor(tint, Color::GRAY)
        .with_color_transition(ms(100), Easing::Linear);
    let (mut fx, id) = with_config(config);
    let original = fx.stage.scene().color(fx.root).unwrap();

    fx.stage.press(id).unwrap();
    fx.stage.advance(ms(50)).unwrap();
    let midway = fx.stage.scene().color(fx.root).unwrap();
    assert_ne!(midway, original);
    assert_ne!(midway, original.tinted(tint));

    fx.stage.advance(ms(50)).unwrap();
    assert_eq!(fx.stage.scene().color(fx.root), Some(original.tinted(tint)));
}

#[test]
fn test_disabled_tint_replaces_press_tint() {
    let config = ButtonConfig::new().with_recolor(Color::rgb(128, 128, 128), Color::rgb(50, 50, 50));
    let (mut fx, id) = with_config(config);
    let original = fx.stage.scene().color(fx.root).unwrap();

    fx.stage.press(id).unwrap();
    fx.stage.set_active(id, false).unwrap();
    assert_eq!(
        fx.stage.scene().color(fx.root),
        Some(original.tinted(Color::rgb(50, 50, 50)))
    );
}

#[test]
fn test_sprite_swap_leaves_colors() {
    let config = ButtonConfig::new().with_sprite_swap(
        EffectTarget::Path("Background/Icon".into()),
        Some(SpriteFrame::new("icon_pressed")),
        Some(SpriteFrame::new("icon_disabled")),
    );
    let (mut fx, id) = with_config(config);
    let colors: Vec<_> = snapshot(&fx).into_iter().map(|(c, _, _)| c).collect();

    fx.stage.press(id).unwrap();
    assert_eq!(fx.stage.scene().sprite_frame(fx.icon), Some(SpriteFrame::new("icon_pressed")));
    let pressed: Vec<_> = snapshot(&fx).into_iter().map(|(c, _, _)| c).collect();
    assert_eq!(pressed, colors);

    fx.stage.set_active(id, false).unwrap();
    assert_eq!(fx.stage.scene().sprite_frame(fx.icon), Some(SpriteFrame::new("icon_disabled")));
    fx.stage.set_active(id, true).unwrap();
    assert_eq!(fx.stage.scene().sprite_frame(fx.icon), Some(SpriteFrame::new("icon_normal")));
}

#[test]
fn test_rebinding_target_recaptures_normal_frame() {
    let config = ButtonConfig::new().with_sprite_swap(
        EffectTarget::Path("Background/Icon".into()),
        Some(SpriteFrame::new("pressed")),
        None,
    );
    let (mut fx, id) = with_config(config);
    let badge = fx.stage.scene_mut().create_child(fx.root, "Badge").unwrap();
    fx.stage
        .scene_mut()
        .attach_sprite(badge, Some(SpriteFrame::new("badge_normal")))
        .unwrap();

    fx.stage.press(id).unwrap();
    fx.stage.set_effect_target(id, Some(badge)).unwrap();

    // The old target is back to normal and the new one shows the press frame.
    assert_eq!(fx.stage.scene().sprite_frame(fx.icon), Some(SpriteFrame::new("icon_normal")));
    assert_eq!(fx.stage.scene().sprite_frame(badge), Some(SpriteFrame::new("pressed")));

    fx.stage.release(id).unwrap();
    assert_eq!(fx.stage.scene().sprite_frame(badge), Some(SpriteFrame::new("badge_normal")));
}

#[test]
fn test_target_without_sprite_degrades_to_scale_only() {
    let config = ButtonConfig::new().with_sprite_swap(
        EffectTarget::Path("Label".into()),
        Some(SpriteFrame::new("pressed")),
        None,
    );
    let (mut fx, id) = with_config(config);
    let before = snapshot(&fx);

    fx.stage.press(id).unwrap();
    assert_eq!(fx.stage.scene().scale(fx.root), Some(Vec2::splat(0.9)));
    assert_eq!(fx.stage.scene().sprite_frame(fx.icon), Some(SpriteFrame::new("icon_normal")));
    fx.stage.release(id).unwrap();
    assert_eq!(snapshot(&fx), before);
}

#[test]
fn test_children_added_while_pressed_are_restored() {
    let tint = Color::rgb(128, 128, 128);
    let (mut fx, id) = with_config(ButtonConfig::new().with_recolor(tint, Color::GRAY));

    fx.stage.press(id).unwrap();
    let late = fx.stage.scene_mut().create_child(fx.root, "Late").unwrap();
    fx.stage.scene_mut().set_color(late, Color::rgb(90, 90, 90));
    fx.stage.release(id).unwrap();

    // Never tinted, never touched.
    assert_eq!(fx.stage.scene().color(late), Some(Color::rgb(90, 90, 90)));
}

#[test]
fn test_unresolved_target_rejected() {
    let (scene, root, _, _) = fixture();
    let mut stage = Stage::new(scene);
    let config = ButtonConfig::new().with_sprite_swap(EffectTarget::Path("Nope/Icon".into()), None, None);

    let err = stage.add_button(root, config).unwrap_err();
    assert!(matches!(
        err,
        ButtonError::Config(ConfigError::UnresolvedTarget { .. })
    ));
    assert!(err.to_string().contains("Nope/Icon"));
}
