// Kahako Chord Modifiers
// Which held modifier keys turn a vowel keystroke into a macron chord

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single physical modifier, resolved from its aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKey {
    Ctrl,
    Alt,
    Shift,
}

const MODIFIER_ALIASES: &[(ModifierKey, &[&str])] = &[
    (ModifierKey::Ctrl, &["Ctrl", "C", "Control"]),
    (ModifierKey::Alt, &["Alt", "A", "Opt", "Option", "M"]),
    (ModifierKey::Shift, &["Shift", "S"]),
];

impl ModifierKey {
    /// Look a modifier up by name or alias, ignoring case
    pub fn from_alias(alias: &str) -> Option<Self> {
        let alias = alias.trim();
        MODIFIER_ALIASES
            .iter()
            .find(|(_, names)| names.iter().any(|n| n.eq_ignore_ascii_case(alias)))
            .map(|(key, _)| *key)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModifierKey::Ctrl => "Ctrl",
            ModifierKey::Alt => "Alt",
            ModifierKey::Shift => "Shift",
        }
    }
}

/// Error parsing a chord modifier setting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModifierError {
    #[error("Unknown modifier: {0}")]
    Unknown(String),

    #[error("Modifier {0} cannot start a chord")]
    NotAChordModifier(String),

    #[error("Empty modifier setting")]
    Empty,
}

/// Modifier combination that activates the chord channel.
///
/// Matching is exact: with `Alt`, a keystroke that also holds Ctrl is not a
/// chord (Ctrl+Alt is AltGr on several layouts).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(strum_macros::EnumIter)]
#[serde(try_from = "String", into = "String")]
pub enum ChordModifier {
    #[default]
    Alt,
    Ctrl,
    CtrlAlt,
    /// Either Ctrl or Alt, alone or together
    Any,
}

impl ChordModifier {
    /// Parse `"alt"`, `"ctrl"`, `"ctrl+alt"`, `"Opt-C"`, `"any"` and friends
    pub fn parse(s: &str) -> Result<Self, ModifierError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ModifierError::Empty);
        }
        if s.eq_ignore_ascii_case("any") {
            return Ok(ChordModifier::Any);
        }

        let mut ctrl = false;
        let mut alt = false;
        for part in s.split(['+', '-']) {
            match ModifierKey::from_alias(part) {
                Some(ModifierKey::Ctrl) => ctrl = true,
                Some(ModifierKey::Alt) => alt = true,
                Some(ModifierKey::Shift) => {
                    return Err(ModifierError::NotAChordModifier(part.trim().to_string()))
                }
                None => return Err(ModifierError::Unknown(part.trim().to_string())),
            }
        }

        Ok(match (ctrl, alt) {
            (true, true) => ChordModifier::CtrlAlt,
            (true, false) => ChordModifier::Ctrl,
            _ => ChordModifier::Alt,
        })
    }

    /// Whether the held modifiers activate the chord channel
    pub fn is_satisfied(&self, ctrl: bool, alt: bool) -> bool {
        match self {
            ChordModifier::Alt => alt && !ctrl,
            ChordModifier::Ctrl => ctrl && !alt,
            ChordModifier::CtrlAlt => ctrl && alt,
            ChordModifier::Any => ctrl || alt,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChordModifier::Alt => "alt",
            ChordModifier::Ctrl => "ctrl",
            ChordModifier::CtrlAlt => "ctrl+alt",
            ChordModifier::Any => "any",
        }
    }

    /// Next variant, wrapping; used by the playground's settings pane
    pub fn cycle(&self) -> Self {
        match self {
            ChordModifier::Alt => ChordModifier::Ctrl,
            ChordModifier::Ctrl => ChordModifier::CtrlAlt,
            ChordModifier::CtrlAlt => ChordModifier::Any,
            ChordModifier::Any => ChordModifier::Alt,
        }
    }
}

impl fmt::Display for ChordModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChordModifier {
    type Err = ModifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ChordModifier {
    type Error = ModifierError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ChordModifier> for String {
    fn from(m: ChordModifier) -> Self {
        m.as_str().to_string()
    }
}
