// Kahako Eligibility Filter
// Decides whether the engine acts on a given surface at all

mod rule;

pub use rule::{ExclusionRule, RuleParseError};

use crate::surface::{SurfaceDescriptor, SurfaceKind};
use crate::transform::EngineConfig;

/// Compiled form of the eligibility-related configuration.
///
/// The exclusion rule is parsed once here. A rule that fails to parse is
/// dropped with a warning, so a bad rule never disables the engine.
#[derive(Debug, Clone)]
pub struct Eligibility {
    line_inputs: bool,
    multiline_inputs: bool,
    rich_text: bool,
    exclusion: Option<ExclusionRule>,
    rule_error: Option<RuleParseError>,
}

impl Eligibility {
    pub fn from_config(config: &EngineConfig) -> Self {
        let (exclusion, rule_error) = match config.exclusion_rule.as_deref() {
            None => (None, None),
            Some(src) if src.trim().is_empty() => (None, None),
            Some(src) => match ExclusionRule::parse(src) {
                Ok(rule) => (Some(rule), None),
                Err(e) => {
                    log::warn!("Ignoring exclusion rule {:?}: {}", src, e);
                    (None, Some(e))
                }
            },
        };

        Self {
            line_inputs: config.enable_line_inputs,
            multiline_inputs: config.enable_multiline_inputs,
            rich_text: config.enable_rich_text,
            exclusion,
            rule_error,
        }
    }

    /// Check whether the engine should act on this surface.
    ///
    /// The checks run in this order:
    ///
    /// 1. Surface kind must be enabled
    /// 2. Read-only and disabled surfaces are skipped
    /// 3. Line inputs must carry a free-text type (text, search, tel)
    /// 4. Surfaces matching the exclusion rule are skipped
    pub fn is_eligible(&self, desc: &SurfaceDescriptor) -> bool {
        let kind_enabled = match desc.kind {
            SurfaceKind::LineInput => self.line_inputs,
            SurfaceKind::MultilineInput => self.multiline_inputs,
            SurfaceKind::RichText => self.rich_text,
        };
        if !kind_enabled {
            return false;
        }

        if desc.read_only || desc.disabled {
            return false;
        }

        if desc.kind == SurfaceKind::LineInput && !desc.input_type.accepts_free_text() {
            return false;
        }

        match &self.exclusion {
            Some(rule) => !rule.matches(desc),
            None => true,
        }
    }

    pub fn exclusion_rule(&self) -> Option<&ExclusionRule> {
        self.exclusion.as_ref()
    }

    /// The parse error of a configured rule that was dropped, if any
    pub fn rule_error(&self) -> Option<&RuleParseError> {
        self.rule_error.as_ref()
    }
}

/// One-shot eligibility check compiling the rule on the fly
pub fn is_eligible(desc: &SurfaceDescriptor, config: &EngineConfig) -> bool {
    Eligibility::from_config(config).is_eligible(desc)
}
