// Kahako In-Memory Surface
// A char-indexed text buffer with a caret, used by the CLI, the TUI and tests

use super::{Surface, SurfaceDescriptor, SurfaceError};

/// Plain in-memory editable surface.
///
/// `cursor` is `None` when the surface has no selection, which is how the
/// "no cursor" failure mode is exercised.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    chars: Vec<char>,
    cursor: Option<usize>,
    descriptor: SurfaceDescriptor,
    change_count: u64,
}

impl TextBuffer {
    /// Create an empty buffer with the cursor at the start
    pub fn new(descriptor: SurfaceDescriptor) -> Self {
        Self {
            chars: Vec::new(),
            cursor: Some(0),
            descriptor,
            change_count: 0,
        }
    }

    /// Create a buffer holding `text` with the cursor at the end
    pub fn with_text(descriptor: SurfaceDescriptor, text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let cursor = Some(chars.len());
        Self {
            chars,
            cursor,
            descriptor,
            change_count: 0,
        }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Place the cursor, clamped to the text length
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = Some(offset.min(self.chars.len()));
    }

    /// Drop the selection entirely
    pub fn clear_cursor(&mut self) {
        self.cursor = None;
    }

    pub fn move_left(&mut self) {
        if let Some(c) = self.cursor {
            self.cursor = Some(c.saturating_sub(1));
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.cursor {
            self.cursor = Some((c + 1).min(self.chars.len()));
        }
    }

    /// Number of `notify_changed` calls observed so far
    pub fn change_count(&self) -> u64 {
        self.change_count
    }

    pub fn descriptor_mut(&mut self) -> &mut SurfaceDescriptor {
        &mut self.descriptor
    }

    /// Apply the edit the environment itself performs for a typed character
    pub fn commit_native(&mut self, text: &str) -> bool {
        self.insert_at_cursor(text).is_ok()
    }

    /// Apply a native backspace. Returns false when nothing was removed.
    pub fn backspace_native(&mut self) -> bool {
        self.delete_before_cursor(1).is_ok()
    }

    /// Apply a native forward delete. Returns false at the end of the text.
    pub fn delete_forward_native(&mut self) -> bool {
        match self.cursor {
            Some(at) if at < self.chars.len() => {
                self.chars.remove(at);
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = Some(0);
    }
}

impl Surface for TextBuffer {
    fn descriptor(&self) -> &SurfaceDescriptor {
        &self.descriptor
    }

    fn cursor_offset(&self) -> Result<usize, SurfaceError> {
        self.cursor.ok_or(SurfaceError::NoCursor)
    }

    fn text_window(&self, chars_before_cursor: usize) -> Result<String, SurfaceError> {
        let end = self.cursor_offset()?;
        let start = end.saturating_sub(chars_before_cursor);
        Ok(self.chars[start..end].iter().collect())
    }

    fn delete_before_cursor(&mut self, count: usize) -> Result<(), SurfaceError> {
        let end = self.cursor_offset()?;
        if count > end {
            return Err(SurfaceError::OutOfRange {
                requested: count,
                available: end,
            });
        }
        self.chars.drain(end - count..end);
        self.cursor = Some(end - count);
        Ok(())
    }

    fn insert_at_cursor(&mut self, text: &str) -> Result<(), SurfaceError> {
        let at = self.cursor_offset()?;
        let inserted: Vec<char> = text.chars().collect();
        let n = inserted.len();
        self.chars.splice(at..at, inserted);
        self.cursor = Some(at + n);
        Ok(())
    }

    fn notify_changed(&mut self) {
        self.change_count += 1;
    }

    fn value(&self) -> String {
        self.text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> TextBuffer {
        TextBuffer::with_text(SurfaceDescriptor::multiline_input(), text)
    }

    #[test]
    fn test_text_window_is_char_based() {
        let b = buffer("hāla");
        assert_eq!(b.text_window(2).unwrap(), "la");
        assert_eq!(b.text_window(3).unwrap(), "āla");
        assert_eq!(b.text_window(10).unwrap(), "hāla");
    }

    #[test]
    fn test_insert_and_delete_in_the_middle() {
        let mut b = buffer("ka");
        b.set_cursor(1);
        b.insert_at_cursor("`").unwrap();
        assert_eq!(b.text(), "k`a");
        assert_eq!(b.cursor(), Some(2));
        b.delete_before_cursor(1).unwrap();
        assert_eq!(b.text(), "ka");
        assert_eq!(b.cursor(), Some(1));
    }

    #[test]
    fn test_delete_past_start_is_rejected() {
        let mut b = buffer("a");
        assert_eq!(
            b.delete_before_cursor(2),
            Err(SurfaceError::OutOfRange {
                requested: 2,
                available: 1
            })
        );
        assert_eq!(b.text(), "a");
    }

    #[test]
    fn test_no_cursor_fails_every_operation() {
        let mut b = buffer("abc");
        b.clear_cursor();
        assert_eq!(b.cursor_offset(), Err(SurfaceError::NoCursor));
        assert_eq!(b.text_window(1), Err(SurfaceError::NoCursor));
        assert_eq!(b.insert_at_cursor("x"), Err(SurfaceError::NoCursor));
        assert_eq!(b.delete_before_cursor(1), Err(SurfaceError::NoCursor));
        assert_eq!(b.text(), "abc");
    }

    #[test]
    fn test_native_edits() {
        let mut b = TextBuffer::new(SurfaceDescriptor::rich_text());
        assert!(b.commit_native("a"));
        assert!(b.commit_native("b"));
        assert!(b.backspace_native());
        assert_eq!(b.text(), "a");
        b.set_cursor(0);
        assert!(!b.backspace_native());
        assert!(b.delete_forward_native());
        assert_eq!(b.text(), "");
        assert!(!b.delete_forward_native());
    }

    #[test]
    fn test_cursor_moves_are_clamped() {
        let mut b = buffer("ab");
        b.move_right();
        assert_eq!(b.cursor(), Some(2));
        b.move_left();
        b.move_left();
        b.move_left();
        assert_eq!(b.cursor(), Some(0));
        b.set_cursor(99);
        assert_eq!(b.cursor(), Some(2));
    }
}
