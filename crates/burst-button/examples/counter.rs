//! Hold-to-repeat counter.
//!
//! Two burst buttons, `+` and `-`, step a counter between 0 and 10. Holding a
//! button keeps stepping. Each button disables itself at its limit and
//! re-enables the other one.
//!
//! Run with: cargo run -p burst-button --example counter
//! Set `RUST_LOG=burst_button=debug` to watch the transitions.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use burst_button::prelude::*;
use tracing_subscriber::EnvFilter;

const MAX: i32 = 10;
const FRAME: Duration = Duration::from_millis(16);

const BUTTONS: &str = r##"
[buttons."Count/+"]
burst_enabled = true
burst_delay = 0.3
burst_interval = 0.1
press_tint = "#C8C8C8"
color_transition = 0.05

[buttons."Count/-"]
burst_enabled = true
burst_delay = 0.3
burst_interval = 0.1
press_tint = "#C8C8C8"
color_transition = 0.05
enabled = false
"##;

fn build_scene() -> (SceneTree, NodeId) {
    let mut scene = SceneTree::new();
    let canvas = scene.create_node("Canvas");
    let count = scene.create_child(canvas, "Count").unwrap();
    for name in ["+", "-"] {
        let button = scene.create_child(count, name).unwrap();
        scene.set_size(button, Size::new(64.0, 64.0)).unwrap();
        scene.set_color(button, Color::rgb(90, 160, 255));
        let glyph = scene.create_child(button, "Glyph").unwrap();
        scene.set_color(glyph, Color::WHITE);
    }
    scene.create_child(count, "Num").unwrap();
    (scene, canvas)
}

/// Hold a button for `duration`, stepping the stage frame by frame.
fn hold(stage: &mut Stage, id: ButtonId, duration: Duration) -> Result<(), ButtonError> {
    stage.press(id)?;
    let mut held = Duration::ZERO;
    while held < duration {
        stage.advance(FRAME)?;
        held += FRAME;
    }
    stage.release(id)?;
    // Let the release transition settle.
    stage.advance(Duration::from_millis(100))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("burst_button=info")),
        )
        .init();

    let (scene, canvas) = build_scene();
    let mut stage = Stage::new(scene);
    let sheet = ButtonSheet::from_toml(BUTTONS)?;
    let added = stage.add_buttons(canvas, &sheet)?;
    let find = |path: &str| {
        added
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, id)| *id)
            .ok_or_else(|| format!("button `{path}` missing"))
    };
    let plus = find("Count/+")?;
    let minus = find("Count/-")?;

    let count = Rc::new(Cell::new(0));
    let handle = stage.handle();
    let listener = {
        let count = Rc::clone(&count);
        move |tag: &str, event: ButtonEvent, source: &mut EventSource<'_, '_>| -> Result<(), ListenerError> {
            if !matches!(event, ButtonEvent::Press | ButtonEvent::Burst) {
                return Ok(());
            }
            match tag {
                "+" => {
                    count.set((count.get() + 1).min(MAX));
                    source.set_active(count.get() != MAX);
                    handle.set_active(minus, true);
                }
                "-" => {
                    count.set((count.get() - 1).max(0));
                    source.set_active(count.get() != 0);
                    handle.set_active(plus, true);
                }
                other => return Err(format!("unexpected button `{other}`").into()),
            }
            tracing::info!(tag, %event, count = count.get(), "count changed");
            Ok(())
        }
    };
    stage.set_listener(plus, listener.clone())?;
    stage.set_listener(minus, listener)?;

    // A tap, then a long hold that runs into the limit.
    hold(&mut stage, plus, Duration::from_millis(50))?;
    hold(&mut stage, plus, Duration::from_millis(1500))?;
    println!("after holding +: {}", count.get());
    println!("{}", stage.debug_tree(canvas));

    hold(&mut stage, minus, Duration::from_millis(600))?;
    println!("after holding -: {}", count.get());
    println!("{}", stage.debug_tree(canvas));

    Ok(())
}
