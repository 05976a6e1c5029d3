// Kahako Core Library
// Hawaiian kahakō and ʻokina input over editable text surfaces

pub mod eligibility;
pub mod input;
pub mod modifier;
pub mod surface;
pub mod tables;
pub mod transform;
pub mod trigger;

#[cfg(feature = "settings-file")]
pub mod settings;

pub use eligibility::{is_eligible, Eligibility, ExclusionRule, RuleParseError};
pub use input::{
    parse_key_sequence, ChannelMode, ChannelOutcome, EditKind, KeySeqParseError, Keystroke,
    Notification, Simulator,
};
pub use modifier::{ChordModifier, ModifierError, ModifierKey};
pub use surface::{InputType, Surface, SurfaceDescriptor, SurfaceError, SurfaceKind, TextBuffer};
pub use transform::{
    ArmState, Channel, Engine, EngineConfig, EngineError, TransformResult,
};
pub use trigger::Trigger;

#[cfg(feature = "settings-file")]
pub use settings::{default_settings_content, Settings, SettingsError};
