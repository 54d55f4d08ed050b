//! Events to interact with the dialogue subsystem.
//!
//! Input and proximity events are sent by the host game (key bindings and
//! physics are out of scope here); the rest are emitted by the plugin for the
//! host to react to.

use bevy::prelude::*;

/// The interact/advance key was pressed this tick.
///
/// Starts a conversation when the player is in range, skips the typewriter
/// while it is revealing text, or advances to the next entry once the current
/// one is fully shown.
#[derive(Event, Debug)]
pub struct InteractPressed;

/// The confirm-choice key was pressed this tick. Selects the first option.
#[derive(Event, Debug)]
pub struct ConfirmPressed;

/// The decline-choice key was pressed this tick. Selects the second option.
#[derive(Event, Debug)]
pub struct DeclinePressed;

/// The player entered a trigger zone.
#[derive(Event, Debug)]
pub struct ProximityEntered {
    /// The trigger zone entity (carrying a [`crate::prelude::Talker`]).
    pub zone: Entity,
    /// The player entity, expected to carry a
    /// [`crate::prelude::MovementController`].
    pub player: Entity,
}

/// The player left a trigger zone. Forces any running conversation to end.
#[derive(Event, Debug)]
pub struct ProximityExited {
    /// The trigger zone entity.
    pub zone: Entity,
    /// The player entity that left.
    pub player: Entity,
}

/// A conversation started on a zone.
#[derive(Event, Debug)]
pub struct ConversationStarted {
    /// The zone the conversation belongs to.
    pub zone: Entity,
}

/// A conversation ended on a zone, either by running out of entries or by the
/// player leaving the trigger area.
#[derive(Event, Debug)]
pub struct ConversationEnded {
    /// The zone the conversation belonged to.
    pub zone: Entity,
}

/// A typing sound should play for a freshly revealed character.
///
/// Only sent when the zone's `play_typing_sound` setting is on, and never for
/// spaces or line breaks.
#[derive(Event, Debug)]
pub struct TypingSoundCue {
    /// The character that was just revealed.
    pub glyph: char,
}

/// An entry or option declared an action; hand it to the dispatcher.
#[derive(Event, Debug)]
pub struct ActionTriggered {
    /// The zone whose dialogue triggered the action.
    pub zone: Entity,
    /// The symbolic action name from the script.
    pub name: String,
}

/// An action name had no registered handler.
///
/// The generic fallback hook: the event is recorded for an external system to
/// interpret and is never an error.
#[derive(Event, Debug)]
pub struct CustomAction {
    /// The unrecognized action name.
    pub name: String,
}

/// The built-in `GiveItem` action fired; the host decides what the item is.
#[derive(Event, Debug)]
pub struct ItemGranted;
