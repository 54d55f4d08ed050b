//! Components that make up a dialogue trigger zone and its collaborators.

use std::path::Path;

use bevy::log::error;
use bevy::prelude::*;

use crate::script::{DialogueOption, DialogueScript};
use crate::session::DialogueSession;

/// The component that turns an entity into a dialogue trigger zone.
///
/// Holds the loaded script and the presentation settings. A `Talker` without
/// a script (failed load) keeps the rest of the subsystem alive: the trigger
/// can still arm, but starting a conversation fails and is logged.
#[derive(Component, Debug, Default)]
pub struct Talker {
    /// The loaded script, or `None` when loading failed.
    pub script: Option<DialogueScript>,
    /// Presentation settings for this zone.
    pub settings: TalkerSettings,
}

impl Talker {
    /// A talker with the given script and default settings.
    pub fn new(script: DialogueScript) -> Self {
        Self {
            script: Some(script),
            ..default()
        }
    }

    /// A talker with no script: the trigger arms but conversations cannot
    /// start.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Loads the script from a file path, falling back to a disabled talker
    /// when the file is absent or malformed. The failure is logged and stays
    /// local to this zone.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match DialogueScript::load(path.as_ref()) {
            Ok(script) => Self::new(script),
            Err(err) => {
                error!(
                    "dialogue disabled for {}: {err}",
                    path.as_ref().display()
                );
                Self::disabled()
            }
        }
    }
}

/// Presentation settings of a [`Talker`].
#[derive(Debug, Clone)]
pub struct TalkerSettings {
    /// Seconds between revealed characters.
    pub letter_delay: f32,
    /// The glyph blinked after a fully revealed entry with no choices.
    pub indicator_symbol: String,
    /// Seconds between indicator toggles.
    pub blink_interval: f32,
    /// Whether to emit a [`crate::events::TypingSoundCue`] per revealed
    /// character.
    pub play_typing_sound: bool,
    /// Key label rendered in front of the first option.
    pub confirm_label: String,
    /// Key label rendered in front of the second option.
    pub decline_label: String,
}

impl Default for TalkerSettings {
    fn default() -> Self {
        Self {
            letter_delay: 0.05,
            indicator_symbol: "▽".to_string(),
            blink_interval: 0.5,
            play_typing_sound: false,
            confirm_label: "Y".to_string(),
            decline_label: "N".to_string(),
        }
    }
}

/// The text surface of a zone, owned by the dialogue subsystem.
///
/// The host UI reads this component to render the dialogue panel, the
/// interaction hint and the choice line. It must never write `text` itself:
/// in any given tick exactly one of the typewriter or the blink indicator
/// owns it.
#[derive(Component, Debug, Default)]
pub struct DialogueDisplay {
    /// The currently revealed text, possibly suffixed by the blink indicator.
    pub text: String,
    /// Whether the dialogue panel is visible.
    pub panel_visible: bool,
    /// Whether the "press to interact" hint is visible.
    pub hint_visible: bool,
    /// The rendered choice line, present only while a choice is pending.
    pub choice_line: Option<String>,
}

/// The movement collaborator on the player entity.
///
/// Movement itself is out of scope; the dialogue subsystem only disables it
/// for the duration of a conversation and restores it exactly once at the
/// end.
#[derive(Component, Debug)]
pub struct MovementController {
    /// Whether the player may currently move.
    pub enabled: bool,
}

impl Default for MovementController {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MovementController {
    /// Blocks player movement.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Restores player movement.
    pub fn enable(&mut self) {
        self.enabled = true;
    }
}

/// A scene object toggled by action handlers (the visibility analog for the
/// door props). The host maps `active` onto its rendering.
#[derive(Component, Debug)]
pub struct Prop {
    /// Whether the object is currently active in the scene.
    pub active: bool,
}

/// Everything a dialogue trigger zone entity needs.
#[derive(Bundle, Default)]
pub struct TalkerBundle {
    /// The script and settings.
    pub talker: Talker,
    /// The per-conversation session state.
    pub session: DialogueSession,
    /// The text surface.
    pub display: DialogueDisplay,
}

/// Renders the choice line the way the original presented it, e.g.
/// `[Y] Yes / [N] No`. Only the first two options get a key label that is
/// actually bound; longer lists render but are only partially reachable.
pub(crate) fn build_choice_line(options: &[DialogueOption], settings: &TalkerSettings) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let key = if i == 0 {
                &settings.confirm_label
            } else {
                &settings.decline_label
            };
            format!("[{key}] {}", option.option_text)
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Shorthand for an option with just a label.
    fn option(text: &str) -> DialogueOption {
        DialogueOption {
            option_text: text.to_string(),
            next_dialogue_index: 0,
            action: None,
        }
    }

    #[test]
    fn choice_line_uses_both_key_labels() {
        let line = build_choice_line(
            &[option("Yes"), option("No")],
            &TalkerSettings::default(),
        );
        assert_eq!(line, "[Y] Yes / [N] No");
    }

    #[test]
    fn choice_line_reuses_decline_label_past_two() {
        let line = build_choice_line(
            &[option("A"), option("B"), option("C")],
            &TalkerSettings::default(),
        );
        assert_eq!(line, "[Y] A / [N] B / [N] C");
    }

    #[test]
    fn talker_from_missing_path_is_disabled() {
        let talker = Talker::from_path("no/such/file.ron");
        assert!(talker.script.is_none());
    }
}
