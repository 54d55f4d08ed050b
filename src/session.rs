//! The dialogue state machine: session state, input handling and the
//! start/advance/choice/end transitions.

use bevy::prelude::*;

use crate::events::{
    ActionTriggered, ConfirmPressed, ConversationEnded, ConversationStarted, DeclinePressed,
    InteractPressed,
};
use crate::script::DialogueOption;
use crate::talker::{DialogueDisplay, MovementController, Talker};
use crate::typewriter::{Indicator, Typewriter};

/// The states a conversation moves through. `Inactive` is both the initial
/// and the terminal state of every conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogueState {
    /// No conversation running.
    #[default]
    Inactive,
    /// The typewriter is revealing the current entry.
    Typing,
    /// The current entry is fully shown and a choice is pending.
    AwaitingChoice,
    /// The current entry is fully shown; waiting for interact to advance.
    AdvanceReady,
}

/// The interaction trigger's phase, derived from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPhase {
    /// No player nearby.
    Idle,
    /// A player is in range and may start a conversation.
    Armed,
    /// A conversation is running.
    Active,
}

/// The transient state of one conversation, recreated per conversation.
///
/// At most one conversation is active per trigger zone. The option list is
/// `Some` exactly while the state is [`DialogueState::AwaitingChoice`], and
/// `current_index` is only ever advanced here.
#[derive(Component, Debug, Default)]
pub struct DialogueSession {
    /// Current machine state.
    pub(crate) state: DialogueState,
    /// Index of the next entry to display.
    pub(crate) current_index: usize,
    /// Set by interact-input while typing; consumed by the typewriter at its
    /// next tick, never synchronously.
    pub(crate) skip_requested: bool,
    /// The active option list while a choice is pending.
    pub(crate) options: Option<Vec<DialogueOption>>,
    /// The player cached on proximity entry.
    pub(crate) player: Option<Entity>,
    /// Whether the player is inside the trigger area.
    pub(crate) player_inside: bool,
    /// Whether this session disabled movement and still owes an enable.
    /// Guarantees movement is restored exactly once per conversation.
    pub(crate) movement_locked: bool,
    /// The in-flight reveal, while typing.
    pub(crate) typewriter: Option<Typewriter>,
    /// The in-flight blink loop, while advance-ready.
    pub(crate) indicator: Option<Indicator>,
    /// Bumped whenever a reveal starts or the conversation ends, so stale
    /// blink loops can be told apart and discarded.
    pub(crate) generation: u32,
}

impl DialogueSession {
    /// Current machine state.
    pub fn state(&self) -> DialogueState {
        self.state
    }

    /// The interaction trigger's phase.
    pub fn phase(&self) -> TriggerPhase {
        if self.state != DialogueState::Inactive {
            TriggerPhase::Active
        } else if self.player_inside {
            TriggerPhase::Armed
        } else {
            TriggerPhase::Idle
        }
    }

    /// Index of the next entry to display.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The pending options, while a choice is awaited.
    pub fn options(&self) -> Option<&[DialogueOption]> {
        self.options.as_deref()
    }

    /// Whether the player is inside the trigger area.
    pub fn player_inside(&self) -> bool {
        self.player_inside
    }
}

/// Samples this tick's input and performs at most one transition per zone.
///
/// Each input kind is read at most once per tick; an interact press during
/// typing only sets the skip flag and never interrupts the reveal
/// synchronously.
pub(crate) fn handle_input(
    mut interacts: EventReader<InteractPressed>,
    mut confirms: EventReader<ConfirmPressed>,
    mut declines: EventReader<DeclinePressed>,
    mut zones: Query<(Entity, &Talker, &mut DialogueSession, &mut DialogueDisplay)>,
    mut movement: Query<&mut MovementController>,
    mut actions: EventWriter<ActionTriggered>,
    mut started: EventWriter<ConversationStarted>,
    mut ended: EventWriter<ConversationEnded>,
) {
    let interact = interacts.read().next().is_some();
    interacts.clear();
    let confirm = confirms.read().next().is_some();
    confirms.clear();
    let decline = declines.read().next().is_some();
    declines.clear();
    if !(interact || confirm || decline) {
        return;
    }

    for (zone, talker, session, display) in &mut zones {
        let session = session.into_inner();
        let display = display.into_inner();
        if !session.player_inside {
            continue;
        }
        match session.state {
            DialogueState::Inactive if interact => {
                start_conversation(
                    zone,
                    talker,
                    session,
                    display,
                    &mut movement,
                    &mut started,
                    &mut ended,
                );
            }
            DialogueState::Typing if interact => {
                session.skip_requested = true;
            }
            DialogueState::AwaitingChoice if confirm || decline => {
                let index = if confirm { 0 } else { 1 };
                select_option(
                    index,
                    zone,
                    talker,
                    session,
                    display,
                    &mut movement,
                    &mut actions,
                    &mut ended,
                );
            }
            DialogueState::AdvanceReady if interact => {
                display_next(zone, talker, session, display, &mut movement, &mut ended);
            }
            _ => {}
        }
    }
}

/// Begins a conversation on an armed zone.
///
/// Fails (logged, no transition) when the zone has no loaded script.
fn start_conversation(
    zone: Entity,
    talker: &Talker,
    session: &mut DialogueSession,
    display: &mut DialogueDisplay,
    movement: &mut Query<&mut MovementController>,
    started: &mut EventWriter<ConversationStarted>,
    ended: &mut EventWriter<ConversationEnded>,
) {
    let has_script = talker.script.as_ref().is_some_and(|s| !s.is_empty());
    if !has_script {
        error!("no dialogue data loaded, conversation cannot start");
        return;
    }

    display.hint_visible = false;
    display.panel_visible = true;
    session.current_index = 0;
    session.options = None;
    if let Some(player) = session.player {
        if let Ok(mut controller) = movement.get_mut(player) {
            controller.disable();
            session.movement_locked = true;
        }
    }
    started.send(ConversationStarted { zone });
    display_next(zone, talker, session, display, movement, ended);
}

/// Displays the entry at `current_index` and increments the index, or ends
/// the conversation when the index has run past the data. Running out of
/// entries (including via an out-of-range option jump) is normal
/// termination, not an error.
fn display_next(
    zone: Entity,
    talker: &Talker,
    session: &mut DialogueSession,
    display: &mut DialogueDisplay,
    movement: &mut Query<&mut MovementController>,
    ended: &mut EventWriter<ConversationEnded>,
) {
    let entry = talker
        .script
        .as_ref()
        .and_then(|script| script.entry(session.current_index))
        .cloned();
    match entry {
        Some(entry) => {
            session.current_index += 1;
            session.state = DialogueState::Typing;
            session.skip_requested = false;
            session.options = None;
            session.generation = session.generation.wrapping_add(1);
            session.indicator = None;
            display.choice_line = None;
            display.text.clear();
            session.typewriter = Some(Typewriter::new(entry, &talker.settings));
        }
        None => end_conversation(zone, session, display, movement, ended),
    }
}

/// Applies a choice selection. Out-of-range selections are silently ignored:
/// input handling stays non-crashing and the session keeps awaiting a choice.
fn select_option(
    index: usize,
    zone: Entity,
    talker: &Talker,
    session: &mut DialogueSession,
    display: &mut DialogueDisplay,
    movement: &mut Query<&mut MovementController>,
    actions: &mut EventWriter<ActionTriggered>,
    ended: &mut EventWriter<ConversationEnded>,
) {
    let Some(choice) = session
        .options
        .as_ref()
        .and_then(|options| options.get(index))
        .cloned()
    else {
        return;
    };

    session.options = None;
    display.choice_line = None;
    session.current_index = choice.next_dialogue_index;
    // The option's action fires before the jump is displayed.
    if let Some(name) = choice.action {
        actions.send(ActionTriggered { zone, name });
    }
    display_next(zone, talker, session, display, movement, ended);
}

/// Ends the conversation from any active state: hides the UI, restores
/// movement exactly once, clears the session and invalidates any in-flight
/// blink loop. Re-shows the hint when the player is still inside. Safe to
/// call when nothing is running.
pub(crate) fn end_conversation(
    zone: Entity,
    session: &mut DialogueSession,
    display: &mut DialogueDisplay,
    movement: &mut Query<&mut MovementController>,
    ended: &mut EventWriter<ConversationEnded>,
) {
    let was_active = session.state != DialogueState::Inactive;

    display.panel_visible = false;
    display.choice_line = None;
    display.text.clear();

    if session.movement_locked {
        if let Some(player) = session.player {
            if let Ok(mut controller) = movement.get_mut(player) {
                controller.enable();
            }
        }
        session.movement_locked = false;
    }

    session.state = DialogueState::Inactive;
    session.current_index = 0;
    session.skip_requested = false;
    session.options = None;
    session.typewriter = None;
    session.indicator = None;
    session.generation = session.generation.wrapping_add(1);

    display.hint_visible = session.player_inside;
    if was_active {
        ended.send(ConversationEnded { zone });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_inactive_and_idle() {
        let session = DialogueSession::default();
        assert_eq!(session.state(), DialogueState::Inactive);
        assert_eq!(session.phase(), TriggerPhase::Idle);
        assert_eq!(session.current_index(), 0);
        assert!(session.options().is_none());
    }

    #[test]
    fn phase_tracks_proximity_and_activity() {
        let mut session = DialogueSession {
            player_inside: true,
            ..Default::default()
        };
        assert_eq!(session.phase(), TriggerPhase::Armed);

        session.state = DialogueState::Typing;
        assert_eq!(session.phase(), TriggerPhase::Active);

        // Activity outranks proximity: leaving mid-conversation is still
        // Active until the trigger forces the end.
        session.player_inside = false;
        assert_eq!(session.phase(), TriggerPhase::Active);
    }
}
