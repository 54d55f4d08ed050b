// Often exceeded by queries
#![allow(clippy::type_complexity)]
// Unhelpful for systems
#![allow(clippy::too_many_arguments)]

//! [`bevy_parley`] is a Bevy plugin for proximity-triggered branching
//! dialogues: a typewriter-style text reveal, yes/no choice branching and
//! script-driven actions, driven entirely by the host's input and proximity
//! events.
//!
//! The host spawns a [`prelude::TalkerBundle`] on a trigger zone, forwards
//! key-downs and physics overlaps as events, and renders the
//! [`prelude::DialogueDisplay`] surface. The whole conversation lifecycle
//! happens inside the plugin's update chain.

use bevy::prelude::*;

use crate::actions::ActionRegistry;
use crate::events::{
    ActionTriggered, ConfirmPressed, ConversationEnded, ConversationStarted, CustomAction,
    DeclinePressed, InteractPressed, ItemGranted, ProximityEntered, ProximityExited,
    TypingSoundCue,
};

pub mod actions;
pub mod errors;
pub mod events;
pub mod prelude;
pub mod script;
pub mod session;
pub mod talker;

mod trigger;
mod typewriter;

/// The [`SystemSet`] holding the whole dialogue update chain, for hosts that
/// need to order their own systems against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub struct ParleySet;

/// The plugin that runs the dialogue subsystem.
///
/// All stateful transitions run on one logical update tick, in a fixed
/// order: proximity, then input (sampled once per tick, at most one
/// transition per zone), then the typewriter, then the blink indicator, then
/// action dispatch. The order is what guarantees that skip requests are
/// observed at the typewriter's next suspension point and that an entry's
/// action fires after the full reveal but before the indicator's first
/// toggle.
pub struct ParleyPlugin;

impl Plugin for ParleyPlugin {
    fn build(&self, app: &mut App) {
        let mut registry = ActionRegistry::default();
        registry.register("OpenDoor", actions::open_door);
        registry.register("CloseDoor", actions::close_door);
        registry.register("GiveItem", actions::give_item);

        app.insert_resource(registry)
            .init_resource::<actions::DoorProps>()
            .add_event::<InteractPressed>()
            .add_event::<ConfirmPressed>()
            .add_event::<DeclinePressed>()
            .add_event::<ProximityEntered>()
            .add_event::<ProximityExited>()
            .add_event::<ConversationStarted>()
            .add_event::<ConversationEnded>()
            .add_event::<TypingSoundCue>()
            .add_event::<ActionTriggered>()
            .add_event::<CustomAction>()
            .add_event::<ItemGranted>()
            .add_systems(
                Update,
                (
                    trigger::handle_proximity,
                    session::handle_input,
                    typewriter::tick_typewriter,
                    typewriter::tick_indicator,
                    actions::dispatch_actions,
                )
                    .chain()
                    .in_set(ParleySet),
            );
    }
}
