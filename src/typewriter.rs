//! The typing engine: character-by-character reveal and the idle blink
//! indicator.
//!
//! Both loops are cooperative: they run once per tick, re-check the owning
//! session's state before touching the text surface, and are cancelled by the
//! state machine clearing their slot and bumping the session generation. The
//! surface is never written by both in the same tick because the session
//! state gates them disjointly.

use bevy::prelude::*;

use crate::events::{ActionTriggered, TypingSoundCue};
use crate::script::{DialogueEntry, DialogueOption};
use crate::session::{DialogueSession, DialogueState};
use crate::talker::{build_choice_line, DialogueDisplay, Talker, TalkerSettings};

/// The in-flight reveal of one entry.
///
/// Carries the completing entry's options and action so the hand-off at the
/// end of the reveal does not have to re-index the script (the session's
/// `current_index` already points at the next entry by then).
#[derive(Debug)]
pub(crate) struct Typewriter {
    /// The processed sentence: the two-character `\n` escape is decoded to a
    /// real line break once, up front, not per character.
    full: String,
    /// How many characters have been revealed so far.
    revealed: usize,
    /// Repeating inter-character delay.
    timer: Timer,
    /// The entry's options, handed to choice handling on completion.
    options: Vec<DialogueOption>,
    /// The entry's action, dispatched on completion when there are no
    /// options.
    action: Option<String>,
}

impl Typewriter {
    /// Starts a reveal for `entry`.
    pub(crate) fn new(entry: DialogueEntry, settings: &TalkerSettings) -> Self {
        Self {
            full: entry.sentence.replace("\\n", "\n"),
            revealed: 0,
            timer: Timer::from_seconds(settings.letter_delay, TimerMode::Repeating),
            options: entry.options,
            action: entry.action,
        }
    }

    /// The full processed text of the entry.
    pub(crate) fn full(&self) -> &str {
        &self.full
    }

    /// Reveals up to `count` more characters and returns them.
    fn reveal(&mut self, count: usize) -> Vec<char> {
        let out: Vec<char> = self.full.chars().skip(self.revealed).take(count).collect();
        self.revealed += out.len();
        out
    }

    /// Marks the remaining text as revealed.
    fn finish(&mut self) {
        self.revealed = self.full.chars().count();
    }

    /// Whether every character has been revealed. Immediately true for an
    /// empty sentence.
    fn is_complete(&self) -> bool {
        self.revealed >= self.full.chars().count()
    }
}

/// The blinking "press to continue" indicator for one idle period.
#[derive(Debug)]
pub(crate) struct Indicator {
    /// Repeating toggle delay.
    timer: Timer,
    /// Whether the glyph is currently appended.
    shown: bool,
    /// Set until the loop's first suspension point. The creation tick's
    /// delta belongs to the reveal that just finished, not to the blink
    /// timeline, and the entry's action must land before the first toggle.
    fresh: bool,
    /// The session generation this loop belongs to. A mismatch means the
    /// loop is stale and must not write to the surface.
    generation: u32,
}

impl Indicator {
    /// A fresh indicator loop stamped with the owning session's generation.
    pub(crate) fn new(blink_interval: f32, generation: u32) -> Self {
        Self {
            timer: Timer::from_seconds(blink_interval, TimerMode::Repeating),
            shown: false,
            fresh: true,
            generation,
        }
    }
}

/// Strips one trailing `" <symbol>"` suffix, if present. Idempotent, so
/// repeated toggles can never stack glyphs.
fn strip_indicator<'a>(text: &'a str, symbol: &str) -> &'a str {
    let suffix = format!(" {symbol}");
    text.strip_suffix(suffix.as_str()).unwrap_or(text)
}

/// Advances every in-flight reveal by this tick's delta.
///
/// A pending skip request is consumed here, at the loop's suspension point:
/// the remaining text is written in full and the reveal completes this tick.
/// On completion the entry hands off to choice handling or to the blink
/// indicator, dispatching the entry's action (exactly once, before the
/// indicator's first toggle) in the latter case.
pub(crate) fn tick_typewriter(
    time: Res<Time>,
    mut zones: Query<(Entity, &Talker, &mut DialogueSession, &mut DialogueDisplay)>,
    mut sounds: EventWriter<TypingSoundCue>,
    mut actions: EventWriter<ActionTriggered>,
) {
    for (zone, talker, session, mut display) in &mut zones {
        let session = session.into_inner();
        if session.state != DialogueState::Typing {
            continue;
        }
        let Some(typewriter) = session.typewriter.as_mut() else {
            continue;
        };

        if session.skip_requested {
            session.skip_requested = false;
            typewriter.finish();
            display.text = typewriter.full().to_owned();
        } else {
            typewriter.timer.tick(time.delta());
            let due = typewriter.timer.times_finished_this_tick() as usize;
            for glyph in typewriter.reveal(due) {
                display.text.push(glyph);
                if talker.settings.play_typing_sound && glyph != ' ' && glyph != '\n' {
                    sounds.send(TypingSoundCue { glyph });
                }
            }
        }

        if !typewriter.is_complete() {
            continue;
        }

        // Hand-off: the surface always ends up holding the exact processed
        // sentence, however the reveal finished.
        let Some(typewriter) = session.typewriter.take() else {
            continue;
        };
        display.text = typewriter.full;
        if !typewriter.options.is_empty() {
            session.state = DialogueState::AwaitingChoice;
            display.choice_line = Some(build_choice_line(&typewriter.options, &talker.settings));
            session.options = Some(typewriter.options);
        } else {
            session.state = DialogueState::AdvanceReady;
            if let Some(name) = typewriter.action {
                actions.send(ActionTriggered { zone, name });
            }
            session.indicator = Some(Indicator::new(
                talker.settings.blink_interval,
                session.generation,
            ));
        }
    }
}

/// Toggles the indicator glyph while a session idles in `AdvanceReady`.
///
/// The loop re-checks its continuation condition every tick: a session that
/// left `AdvanceReady`, or an indicator from an older generation, makes no
/// further writes.
pub(crate) fn tick_indicator(
    time: Res<Time>,
    mut zones: Query<(&Talker, &mut DialogueSession, &mut DialogueDisplay)>,
) {
    for (talker, session, mut display) in &mut zones {
        let session = session.into_inner();
        if session.state != DialogueState::AdvanceReady {
            continue;
        }
        let stale = session
            .indicator
            .as_ref()
            .map_or(true, |indicator| indicator.generation != session.generation);
        if stale {
            session.indicator = None;
            continue;
        }
        let Some(indicator) = session.indicator.as_mut() else {
            continue;
        };
        if indicator.fresh {
            indicator.fresh = false;
            continue;
        }

        indicator.timer.tick(time.delta());
        let toggles = indicator.timer.times_finished_this_tick();
        if toggles == 0 {
            continue;
        }
        if toggles % 2 == 1 {
            indicator.shown = !indicator.shown;
        }

        let symbol = &talker.settings.indicator_symbol;
        let base = strip_indicator(&display.text, symbol).to_owned();
        display.text = if indicator.shown {
            format!("{base} {symbol}")
        } else {
            base
        };
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    /// A typewriter over a bare sentence with default settings.
    fn typewriter(sentence: &str) -> Typewriter {
        Typewriter::new(
            DialogueEntry {
                sentence: sentence.to_string(),
                ..Default::default()
            },
            &TalkerSettings::default(),
        )
    }

    #[test]
    fn newline_escape_is_decoded_once_up_front() {
        let tw = typewriter("Hello\\nWorld");
        assert_eq!(tw.full(), "Hello\nWorld");
        assert_eq!(tw.full().matches('\n').count(), 1);
    }

    #[test]
    fn already_real_newlines_survive_untouched() {
        let tw = typewriter("Hello\nWorld");
        assert_eq!(tw.full(), "Hello\nWorld");
    }

    #[test]
    fn empty_sentence_is_complete_before_any_tick() {
        let tw = typewriter("");
        assert!(tw.is_complete());
    }

    #[test]
    fn reveal_hands_out_characters_in_order() {
        let mut tw = typewriter("abc");
        assert_eq!(tw.reveal(2), vec!['a', 'b']);
        assert!(!tw.is_complete());
        assert_eq!(tw.reveal(5), vec!['c']);
        assert!(tw.is_complete());
    }

    #[test]
    fn finish_reveals_everything() {
        let mut tw = typewriter("long sentence");
        tw.reveal(3);
        tw.finish();
        assert!(tw.is_complete());
        assert!(tw.reveal(1).is_empty());
    }

    #[test]
    fn reveal_counts_characters_not_bytes() {
        let mut tw = typewriter("こんにちは");
        assert_eq!(tw.reveal(2), vec!['こ', 'ん']);
        tw.reveal(3);
        assert!(tw.is_complete());
    }

    #[rstest]
    #[case("Hello ▽", "Hello")]
    #[case("Hello", "Hello")]
    #[case("", "")]
    #[case("▽ Hello", "▽ Hello")]
    #[case("Hello ▽ ▽", "Hello ▽")]
    fn strip_indicator_removes_at_most_one_suffix(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(strip_indicator(text, "▽"), expected);
    }

    #[test]
    fn strip_indicator_is_idempotent() {
        assert_eq!(
            strip_indicator(strip_indicator("Hello ▽", "▽"), "▽"),
            "Hello"
        );
    }
}
