// Kahako Input Layer - Headless Environment
// Replays keystrokes against an engine and an in-memory surface, firing the
// notifications a real editing environment would

use crate::input::keyseq::{parse_key_sequence, KeySeqParseError, Keystroke};
use crate::input::{EditKind, Notification};
use crate::surface::{SurfaceDescriptor, TextBuffer};
use crate::transform::{Engine, EngineConfig, TransformResult};

/// Which text channels the simulated environment delivers per keystroke
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ChannelMode {
    /// Only the cancellable pre-commit notification
    PreCommit,
    /// Only the after-the-fact notification
    #[strum(to_string = "fallback", serialize = "post-commit")]
    Fallback,
    /// Both, pre-commit first
    #[default]
    Both,
}

impl ChannelMode {
    pub fn fires_pre_commit(&self) -> bool {
        matches!(self, ChannelMode::PreCommit | ChannelMode::Both)
    }

    pub fn fires_fallback(&self) -> bool {
        matches!(self, ChannelMode::Fallback | ChannelMode::Both)
    }

    pub fn cycle(&self) -> Self {
        match self {
            ChannelMode::PreCommit => ChannelMode::Fallback,
            ChannelMode::Fallback => ChannelMode::Both,
            ChannelMode::Both => ChannelMode::PreCommit,
        }
    }
}

/// One notification delivered during a keystroke and what the engine said
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOutcome {
    pub notification: Notification,
    pub result: TransformResult,
}

impl std::fmt::Display for ChannelOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} => {}", self.notification, self.result)
    }
}

/// Edit the environment performs itself unless pre-commit cancels it
enum NativeEdit {
    Insert(String),
    Backspace,
    DeleteForward,
}

/// Headless editing environment.
///
/// Per keystroke it delivers, in order: the chord notification (for
/// chords), the pre-commit notification, the native edit unless
/// cancelled, then the post-commit notification.
#[derive(Debug)]
pub struct Simulator {
    engine: Engine,
    surface: TextBuffer,
    mode: ChannelMode,
}

impl Simulator {
    pub fn new(config: EngineConfig, descriptor: SurfaceDescriptor, mode: ChannelMode) -> Self {
        Self::with_parts(Engine::new(config), TextBuffer::new(descriptor), mode)
    }

    /// Attach `engine` to `surface`, which may already hold text
    pub fn with_parts(mut engine: Engine, surface: TextBuffer, mode: ChannelMode) -> Self {
        engine.observe(&surface);
        Self {
            engine,
            surface,
            mode,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn surface(&self) -> &TextBuffer {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut TextBuffer {
        &mut self.surface
    }

    pub fn mode(&self) -> ChannelMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ChannelMode) {
        self.mode = mode;
    }

    pub fn text(&self) -> String {
        self.surface.text()
    }

    /// Empty the surface and return the engine to idle
    pub fn clear(&mut self) {
        self.surface.clear();
        self.engine.on_focus_or_context_change();
        self.engine.observe(&self.surface);
    }

    /// Parse and replay a key-sequence script
    pub fn run_script(&mut self, script: &str) -> Result<Vec<ChannelOutcome>, KeySeqParseError> {
        let keys = parse_key_sequence(script)?;
        Ok(self.run(&keys))
    }

    pub fn run(&mut self, keys: &[Keystroke]) -> Vec<ChannelOutcome> {
        keys.iter().flat_map(|k| self.press(k)).collect()
    }

    /// Deliver one keystroke
    pub fn press(&mut self, key: &Keystroke) -> Vec<ChannelOutcome> {
        let mut out = Vec::new();
        match key {
            Keystroke::Char(c) => {
                let kind = if self.engine.is_composing() {
                    EditKind::InsertFromComposition
                } else if *c == '\n' {
                    EditKind::InsertLineBreak
                } else {
                    EditKind::InsertText
                };
                self.edit(Some(*c), kind, NativeEdit::Insert(c.to_string()), &mut out);
            }
            Keystroke::Backspace => {
                self.edit(None, EditKind::DeleteBackward, NativeEdit::Backspace, &mut out);
            }
            Keystroke::Delete => {
                self.edit(None, EditKind::DeleteForward, NativeEdit::DeleteForward, &mut out);
            }
            Keystroke::Paste(text) => {
                let mut chars = text.chars();
                let unit = match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                };
                self.edit(unit, EditKind::InsertFromPaste, NativeEdit::Insert(text.clone()), &mut out);
            }
            Keystroke::Chord { key, ctrl, alt } => {
                // An unconsumed chord produces no text: the modifier eats it.
                self.notify(
                    Notification::ModifierChord {
                        key: *key,
                        ctrl: *ctrl,
                        alt: *alt,
                    },
                    &mut out,
                );
            }
            Keystroke::CompositionStart => {
                self.notify(Notification::CompositionStart, &mut out);
            }
            Keystroke::CompositionEnd => {
                self.notify(Notification::CompositionEnd, &mut out);
            }
            Keystroke::Focus => {
                self.notify(Notification::FocusOrContextChange, &mut out);
            }
            Keystroke::Left => {
                self.surface.move_left();
                self.notify(Notification::FocusOrContextChange, &mut out);
            }
            Keystroke::Right => {
                self.surface.move_right();
                self.notify(Notification::FocusOrContextChange, &mut out);
            }
        }
        out
    }

    fn notify(&mut self, notification: Notification, out: &mut Vec<ChannelOutcome>) -> TransformResult {
        let result = self.engine.dispatch(&mut self.surface, &notification);
        out.push(ChannelOutcome {
            notification,
            result: result.clone(),
        });
        result
    }

    fn edit(&mut self, unit: Option<char>, kind: EditKind, native: NativeEdit, out: &mut Vec<ChannelOutcome>) {
        let mut cancelled = false;
        if self.mode.fires_pre_commit() {
            cancelled = self
                .notify(Notification::PreCommitInsert { unit, kind }, out)
                .is_consumed();
        }

        if !cancelled {
            match native {
                NativeEdit::Insert(text) => {
                    self.surface.commit_native(&text);
                }
                NativeEdit::Backspace => {
                    self.surface.backspace_native();
                }
                NativeEdit::DeleteForward => {
                    self.surface.delete_forward_native();
                }
            }
        }

        if self.mode.fires_fallback() {
            self.notify(Notification::PostCommitFallback, out);
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(
            EngineConfig::default(),
            SurfaceDescriptor::multiline_input(),
            ChannelMode::default(),
        )
    }
}
