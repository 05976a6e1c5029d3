// Kahako Input Layer
// Notifications, key-sequence scripts and the headless environment

mod event;
pub mod keyseq;
pub mod simulate;

pub use event::{EditKind, Notification};
pub use keyseq::{parse_key_sequence, KeySeqParseError, Keystroke};
pub use simulate::{ChannelMode, ChannelOutcome, Simulator};
