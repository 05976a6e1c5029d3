/// Outcome of one engine decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformResult {
    /// The engine did not look at the event (ineligible surface, uninstalled
    /// engine, nothing to inspect)
    NoAction,
    /// The engine owns this keystroke: the native edit must not happen and
    /// the engine rewrote the surface itself
    Consumed {
        inserted_text: String,
        delete_before_cursor: usize,
    },
    /// Let the native keystroke or edit stand
    PassThrough,
}

impl TransformResult {
    pub fn consumed(inserted_text: impl Into<String>, delete_before_cursor: usize) -> Self {
        TransformResult::Consumed {
            inserted_text: inserted_text.into(),
            delete_before_cursor,
        }
    }

    /// Whether the environment must cancel the pending native edit
    pub fn is_consumed(&self) -> bool {
        matches!(self, TransformResult::Consumed { .. })
    }

    /// Text inserted by a consumed result
    pub fn inserted_text(&self) -> Option<&str> {
        match self {
            TransformResult::Consumed { inserted_text, .. } => Some(inserted_text),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransformResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformResult::NoAction => write!(f, "no-action"),
            TransformResult::PassThrough => write!(f, "pass-through"),
            TransformResult::Consumed {
                inserted_text,
                delete_before_cursor,
            } => write!(
                f,
                "consumed(insert {:?}, delete {})",
                inserted_text, delete_before_cursor
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumed_helpers() {
        let r = TransformResult::consumed("ā", 1);
        assert!(r.is_consumed());
        assert_eq!(r.inserted_text(), Some("ā"));
        assert!(!TransformResult::PassThrough.is_consumed());
        assert_eq!(TransformResult::NoAction.inserted_text(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            TransformResult::consumed("ʻ", 0).to_string(),
            "consumed(insert \"ʻ\", delete 0)"
        );
        assert_eq!(TransformResult::PassThrough.to_string(), "pass-through");
    }
}
