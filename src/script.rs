//! The dialogue data model and its RON loader.
//!
//! A script is an ordered list of entries; index 0 is always the entry point
//! of a fresh conversation. Scripts are immutable once loaded.

use std::path::Path;

use bevy::log::info;
use serde::Deserialize;

use crate::errors::DataLoadError;

/// One unit of dialogue: a sentence plus optional choices and an optional
/// action dispatched after the sentence is fully shown.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DialogueEntry {
    /// The sentence to reveal. A two-character `\n` escape inside it becomes
    /// a real line break before the typewriter starts.
    #[serde(default)]
    pub sentence: String,
    /// The choices presented once the sentence is fully shown. Empty for
    /// plain entries.
    #[serde(default)]
    pub options: Vec<DialogueOption>,
    /// An action name dispatched after the reveal, when there are no options.
    #[serde(default)]
    pub action: Option<String>,
}

/// A selectable branch out of an entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DialogueOption {
    /// The label shown for this option.
    pub option_text: String,
    /// Raw index of the entry the conversation jumps to when this option is
    /// picked. Not validated at load time; an out-of-range value ends the
    /// conversation when it is reached.
    pub next_dialogue_index: usize,
    /// An action name dispatched when this option is picked, before the jump.
    #[serde(default)]
    pub action: Option<String>,
}

/// An ordered set of dialogue entries, loaded once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueScript {
    /// The entries, in conversation order.
    dialogues: Vec<DialogueEntry>,
}

impl DialogueScript {
    /// Builds a script from entries already in memory.
    ///
    /// Fails with [`DataLoadError::EmptyScript`] on an empty list, the same
    /// rule the loaders apply.
    pub fn from_entries(dialogues: Vec<DialogueEntry>) -> Result<Self, DataLoadError> {
        if dialogues.is_empty() {
            return Err(DataLoadError::EmptyScript);
        }
        Ok(Self { dialogues })
    }

    /// Parses a script from a RON string.
    pub fn from_ron(source: &str) -> Result<Self, DataLoadError> {
        let script: DialogueScript = serde_ron::from_str(source)?;
        Self::from_entries(script.dialogues)
    }

    /// Loads and parses a script from a file path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let script = Self::from_ron(&source)?;
        info!(
            "Loaded {} dialogue entries from {}",
            script.len(),
            path.display()
        );
        Ok(script)
    }

    /// Number of entries in the script.
    pub fn len(&self) -> usize {
        self.dialogues.len()
    }

    /// Whether the script has no entries. Never true for a loaded script.
    pub fn is_empty(&self) -> bool {
        self.dialogues.is_empty()
    }

    /// The entry at `index`, if it exists.
    pub fn entry(&self, index: usize) -> Option<&DialogueEntry> {
        self.dialogues.get(index)
    }
}
