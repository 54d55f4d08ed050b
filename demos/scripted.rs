//! A headless walkthrough of a short gatekeeper conversation.
//!
//! No rendering, no input devices: the "player" walks up, talks, says yes,
//! and the gate props swap. The dialogue surface is printed whenever it
//! changes.

use std::time::Duration;

use bevy::prelude::*;
use bevy_parley::prelude::*;

/// The gatekeeper's script, inline for the demo.
const SCRIPT: &str = r#"(
    dialogues: [
        (sentence: "Halt, traveller!\nState your business."),
        (sentence: "Shall I open the gate for you?", options: [
            (option_text: "Yes", next_dialogue_index: 3, action: Some("OpenDoor")),
            (option_text: "No", next_dialogue_index: 2),
        ]),
        (sentence: "Then move along."),
        (sentence: "Through you go. Safe travels."),
    ],
)"#;

fn main() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, ParleyPlugin));

    let script = DialogueScript::from_ron(SCRIPT).expect("demo script is valid");
    let player = app.world.spawn(MovementController::default()).id();
    let zone = app
        .world
        .spawn(TalkerBundle {
            talker: Talker::new(script),
            ..Default::default()
        })
        .id();

    let closed = app.world.spawn(Prop { active: true }).id();
    let opened = app.world.spawn(Prop { active: false }).id();
    app.world.insert_resource(DoorProps {
        closed: Some(closed),
        opened: Some(opened),
    });

    app.world.send_event(ProximityEntered { zone, player });
    run_for(&mut app, zone, 0.2);

    println!("-- player presses interact --");
    app.world.send_event(InteractPressed);
    run_for(&mut app, zone, 2.5);

    println!("-- player presses interact --");
    app.world.send_event(InteractPressed);
    run_for(&mut app, zone, 2.5);

    println!("-- player confirms --");
    app.world.send_event(ConfirmPressed);
    run_for(&mut app, zone, 2.5);

    println!("-- player presses interact --");
    app.world.send_event(InteractPressed);
    run_for(&mut app, zone, 0.2);

    let gate_open = app
        .world
        .get::<Prop>(opened)
        .map(|prop| prop.active)
        .unwrap_or(false);
    println!("gate open: {gate_open}");
}

/// Updates the app at ~60 fps of wall time for `seconds`, echoing the
/// dialogue surface whenever it changes.
fn run_for(app: &mut App, zone: Entity, seconds: f32) {
    let mut last = String::new();
    let steps = (seconds * 60.0) as u32;
    for _ in 0..steps {
        app.update();
        if let Some(display) = app.world.get::<DialogueDisplay>(zone) {
            let mut shown = display.text.clone();
            if let Some(choices) = &display.choice_line {
                shown.push_str("  ");
                shown.push_str(choices);
            }
            if shown != last {
                println!("{shown}");
                last = shown;
            }
        }
        std::thread::sleep(Duration::from_millis(16));
    }
}
