//! The interaction trigger: proximity-based arming and disarming of a zone.
//!
//! The host's physics layer reports enter/exit; this module moves the zone
//! between Idle, Armed and Active. Leaving the area forces a running
//! conversation to end, even mid-typing, and restores movement exactly once.

use bevy::prelude::*;

use crate::events::{ConversationEnded, ProximityEntered, ProximityExited};
use crate::session::{end_conversation, DialogueSession, DialogueState};
use crate::talker::{DialogueDisplay, MovementController};

/// Applies this tick's proximity events to the affected zones.
pub(crate) fn handle_proximity(
    mut entered: EventReader<ProximityEntered>,
    mut exited: EventReader<ProximityExited>,
    mut zones: Query<(&mut DialogueSession, &mut DialogueDisplay)>,
    mut movement: Query<&mut MovementController>,
    mut ended: EventWriter<ConversationEnded>,
) {
    for event in entered.read() {
        let Ok((mut session, mut display)) = zones.get_mut(event.zone) else {
            continue;
        };
        session.player = Some(event.player);
        session.player_inside = true;
        // Idle -> Armed: show the hint unless a conversation is somehow
        // already running on this zone.
        if session.state == DialogueState::Inactive {
            display.hint_visible = true;
        }
        debug!("player {:?} entered trigger zone {:?}", event.player, event.zone);
    }

    for event in exited.read() {
        let Ok((session, display)) = zones.get_mut(event.zone) else {
            continue;
        };
        let session = session.into_inner();
        let display = display.into_inner();
        session.player_inside = false;
        end_conversation(event.zone, session, display, &mut movement, &mut ended);
        display.hint_visible = false;
        session.player = None;
        debug!("player {:?} left trigger zone {:?}", event.player, event.zone);
    }
}
