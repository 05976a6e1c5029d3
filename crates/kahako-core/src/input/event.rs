// Kahako Input Layer - Notifications
// What an environment reports to the engine, one value per channel

use std::fmt;

/// Kind of edit announced on the pre-commit channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EditKind {
    /// A single typed character
    InsertText,
    /// Enter / Return; carries `'\n'` as its unit
    InsertLineBreak,
    InsertFromPaste,
    InsertFromDrop,
    /// Text produced by an IME outside an announced composition
    InsertFromComposition,
    DeleteBackward,
    DeleteForward,
    DeleteWord,
    DeleteByCut,
    /// Anything the environment cannot classify
    Other,
}

impl EditKind {
    /// Delete-type edits reset the dead-key state unconditionally
    pub fn is_delete(&self) -> bool {
        matches!(
            self,
            EditKind::DeleteBackward
                | EditKind::DeleteForward
                | EditKind::DeleteWord
                | EditKind::DeleteByCut
        )
    }

    /// Edits whose unit is fed to the state machine
    pub fn is_typed(&self) -> bool {
        matches!(self, EditKind::InsertText | EditKind::InsertLineBreak)
    }
}

/// One notification delivered to the engine.
///
/// For a single physical keystroke environments deliver, in order: the
/// chord (key down), the pre-commit insert, the native commit, then the
/// post-commit fallback. Any of them may be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    PreCommitInsert { unit: Option<char>, kind: EditKind },
    PostCommitFallback,
    ModifierChord { key: char, ctrl: bool, alt: bool },
    CompositionStart,
    CompositionEnd,
    FocusOrContextChange,
}

impl Notification {
    /// Pre-commit insert of a single typed character
    pub fn typed(ch: char) -> Self {
        let kind = if ch == '\n' {
            EditKind::InsertLineBreak
        } else {
            EditKind::InsertText
        };
        Notification::PreCommitInsert {
            unit: Some(ch),
            kind,
        }
    }

    pub fn backspace() -> Self {
        Notification::PreCommitInsert {
            unit: None,
            kind: EditKind::DeleteBackward,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::PreCommitInsert { unit: Some(u), kind } => {
                write!(f, "pre-commit {} {:?}", kind, u)
            }
            Notification::PreCommitInsert { unit: None, kind } => write!(f, "pre-commit {}", kind),
            Notification::PostCommitFallback => write!(f, "post-commit"),
            Notification::ModifierChord { key, ctrl, alt } => {
                write!(f, "chord ")?;
                if *ctrl {
                    write!(f, "Ctrl-")?;
                }
                if *alt {
                    write!(f, "Alt-")?;
                }
                write!(f, "{:?}", key)
            }
            Notification::CompositionStart => write!(f, "composition start"),
            Notification::CompositionEnd => write!(f, "composition end"),
            Notification::FocusOrContextChange => write!(f, "focus change"),
        }
    }
}
