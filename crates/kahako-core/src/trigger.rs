use std::fmt;

/// Dead-key trigger characters.
///
/// The LOWER trigger arms lowercase kahakō and the ʻokina; the UPPER trigger
/// arms uppercase kahakō. A trigger never produces output on its own: the
/// character typed after it decides what, if anything, is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::EnumIter)]
#[repr(u8)]
pub enum Trigger {
    Lower = 0,
    Upper = 1,
}

impl Trigger {
    /// Create Trigger from the character typed by the user
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            crate::tables::LOWER_TRIGGER => Some(Trigger::Lower),
            crate::tables::UPPER_TRIGGER => Some(Trigger::Upper),
            _ => None,
        }
    }

    /// The literal character this trigger is typed as
    pub fn as_char(self) -> char {
        match self {
            Trigger::Lower => crate::tables::LOWER_TRIGGER,
            Trigger::Upper => crate::tables::UPPER_TRIGGER,
        }
    }

    /// Slot index used by the per-trigger arm state
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Resolve the character typed after this trigger.
    ///
    /// Returns `None` when the character neither completes a Hawaiian letter
    /// nor escapes the trigger, i.e. the literal fallback applies.
    pub fn resolve(self, unit: char) -> Option<char> {
        if unit == ' ' {
            return Some(self.as_char());
        }
        match self {
            Trigger::Lower => crate::tables::lower_macron(unit)
                .or_else(|| crate::tables::okina_for(unit)),
            Trigger::Upper => crate::tables::upper_macron(unit),
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Lower => write!(f, "LOWER({})", self.as_char()),
            Trigger::Upper => write!(f, "UPPER({})", self.as_char()),
        }
    }
}
