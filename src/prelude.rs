//! Prelude for the `bevy_parley` crate.
pub use super::{
    actions::{ActionHandler, ActionRegistry, DoorProps},
    errors::DataLoadError,
    events::{
        ActionTriggered, ConfirmPressed, ConversationEnded, ConversationStarted, CustomAction,
        DeclinePressed, InteractPressed, ItemGranted, ProximityEntered, ProximityExited,
        TypingSoundCue,
    },
    script::{DialogueEntry, DialogueOption, DialogueScript},
    session::{DialogueSession, DialogueState, TriggerPhase},
    talker::{DialogueDisplay, MovementController, Prop, Talker, TalkerBundle, TalkerSettings},
    ParleyPlugin, ParleySet,
};
