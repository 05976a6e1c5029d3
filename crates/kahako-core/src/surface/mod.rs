// Kahako Surface Adapter
//
// This module defines the interface the engine uses to read and mutate an
// editable region. Environments (form fields, rich-text regions, terminal
// playgrounds) implement `Surface`; the engine never touches text any other way.

mod buffer;
mod descriptor;

pub use buffer::TextBuffer;
pub use descriptor::{InputType, SurfaceDescriptor, SurfaceKind};

/// Error type for surface operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The surface has no caret/selection to operate on
    #[error("surface has no cursor")]
    NoCursor,

    /// A delete asked for more characters than precede the cursor
    #[error("cannot remove {requested} character(s), only {available} before cursor")]
    OutOfRange { requested: usize, available: usize },

    /// The surface went away between notification and mutation
    #[error("surface detached: {0}")]
    Detached(String),
}

/// An editable text region.
///
/// Offsets and counts are in Unicode scalar values, never bytes, so a kahakō
/// vowel always counts as one character.
pub trait Surface {
    /// Static description used for eligibility checks
    fn descriptor(&self) -> &SurfaceDescriptor;

    /// Cursor position, counted in characters from the start of the text
    fn cursor_offset(&self) -> Result<usize, SurfaceError>;

    /// Up to `chars_before_cursor` characters ending at the cursor.
    ///
    /// Shorter than requested when the cursor is near the start.
    fn text_window(&self, chars_before_cursor: usize) -> Result<String, SurfaceError>;

    /// Remove exactly `count` characters ending at the cursor
    fn delete_before_cursor(&mut self, count: usize) -> Result<(), SurfaceError>;

    /// Insert `text` at the cursor and leave the cursor after it
    fn insert_at_cursor(&mut self, text: &str) -> Result<(), SurfaceError>;

    /// Tell observers of the surface that its content changed
    fn notify_changed(&mut self);

    /// Current full text of the surface
    fn value(&self) -> String;
}
