// Kahako Transform Engine
// Single decision point reconciling the pre-commit, post-commit and chord
// channels over one dead-key state machine
//
// Every notification goes through the same gates before it can touch state:
//
//   installed? -> composition guard -> eligibility -> channel handler
//
// Handlers return `Result<TransformResult, EngineError>`; the public `on_*`
// methods catch the error, log it, force the state idle and let the raw
// keystroke stand.

use smallvec::SmallVec;

use crate::eligibility::Eligibility;
use crate::input::{EditKind, Notification};
use crate::modifier::ChordModifier;
use crate::surface::{Surface, SurfaceError};
use crate::transform::chord::chord_output;
use crate::transform::composition::CompositionGuard;
use crate::transform::deadkeys::{ArmState, DeadKeyState};
use crate::transform::TransformResult;
use crate::Trigger;

/// Engine-facing configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Hide trigger characters until their sequence resolves
    pub strict_dead_keys: bool,
    pub enable_line_inputs: bool,
    pub enable_multiline_inputs: bool,
    pub enable_rich_text: bool,
    /// Selector-style rule; matching surfaces are skipped
    pub exclusion_rule: Option<String>,
    /// Modifiers that turn a vowel keystroke into a chord
    pub chord_modifier: ChordModifier,
    /// Emit a debug trace per decision
    pub debug_logging: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict_dead_keys: false,
            enable_line_inputs: true,
            enable_multiline_inputs: true,
            enable_rich_text: true,
            exclusion_rule: None,
            chord_modifier: ChordModifier::Alt,
            debug_logging: false,
        }
    }
}

/// Failure while handling one notification
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("surface reported an empty text window at cursor {cursor}")]
    EmptyWindow { cursor: usize },
}

/// Which channel produced a decision; used in traces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Channel {
    PreCommit,
    PostCommit,
    Chord,
    Composition,
    Focus,
}

/// The input transformation engine.
///
/// One instance per document or editor. It holds no global state, so any
/// number of engines can coexist. All mutation goes through `&mut self`
/// and every notification runs to completion before the next one.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    eligibility: Eligibility,
    deadkeys: DeadKeyState,
    composition: CompositionGuard,
    installed: bool,
    /// Set when the pre-commit channel handled a keystroke; the post-commit
    /// notification that follows it is then a no-op
    commit_seen: bool,
    /// What the post-commit channel last saw of the surface
    baseline: Option<Snapshot>,
}

/// Cursor and length of a surface at one point in time.
///
/// The post-commit channel only learns that something changed, so it
/// compares against the previous snapshot to tell typing from deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    /// `None` after the caret may have moved without an edit
    cursor: Option<usize>,
    len: usize,
}

impl Snapshot {
    fn take(surface: &dyn Surface) -> Result<Self, SurfaceError> {
        Ok(Self {
            cursor: Some(surface.cursor_offset()?),
            len: surface.value().chars().count(),
        })
    }

    /// Whether `now` is exactly one character inserted at the old cursor
    fn grew_by_one(&self, now: &Snapshot) -> bool {
        now.len == self.len + 1
            && match (self.cursor, now.cursor) {
                (Some(before), Some(after)) => after == before + 1,
                _ => true,
            }
    }
}

impl Engine {
    /// Create an installed engine
    pub fn new(config: EngineConfig) -> Self {
        let eligibility = Eligibility::from_config(&config);
        Self {
            config,
            eligibility,
            deadkeys: DeadKeyState::new(),
            composition: CompositionGuard::default(),
            installed: true,
            commit_seen: false,
            baseline: None,
        }
    }

    /// Start reacting to notifications with fresh state
    pub fn install(&mut self) {
        self.reset_all();
        self.installed = true;
    }

    /// Stop reacting to notifications; every channel returns `NoAction`
    pub fn uninstall(&mut self) {
        self.reset_all();
        self.installed = false;
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Swap the configuration. Dead-key state is reset.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.eligibility = Eligibility::from_config(&config);
        self.config = config;
        self.deadkeys.reset();
    }

    pub fn eligibility(&self) -> &Eligibility {
        &self.eligibility
    }

    pub fn armed_trigger(&self) -> Option<Trigger> {
        self.deadkeys.armed_trigger()
    }

    pub fn arm_state(&self, trigger: Trigger) -> ArmState {
        self.deadkeys.arm_state(trigger)
    }

    pub fn is_composing(&self) -> bool {
        self.composition.is_active()
    }

    /// Force both triggers idle
    pub fn reset(&mut self) {
        self.deadkeys.reset();
    }

    fn reset_all(&mut self) {
        self.deadkeys.reset();
        self.composition.clear();
        self.commit_seen = false;
        self.baseline = None;
    }

    /// Record the current state of `surface` for the post-commit channel.
    ///
    /// Environments call this when the engine is attached to a surface or the
    /// surface text was replaced wholesale. Until a snapshot exists the first
    /// post-commit notification only records one.
    pub fn observe(&mut self, surface: &dyn Surface) {
        self.baseline = Snapshot::take(surface).ok();
    }

    /// Route a notification to its channel handler
    pub fn dispatch(&mut self, surface: &mut dyn Surface, notification: &Notification) -> TransformResult {
        match *notification {
            Notification::PreCommitInsert { unit, kind } => {
                self.on_pre_commit_insert(surface, unit, kind)
            }
            Notification::PostCommitFallback => self.on_post_commit_fallback(surface),
            Notification::ModifierChord { key, ctrl, alt } => {
                self.on_modifier_chord(surface, key, ctrl, alt)
            }
            Notification::CompositionStart => {
                self.on_composition_start();
                TransformResult::NoAction
            }
            Notification::CompositionEnd => {
                self.on_composition_end();
                TransformResult::NoAction
            }
            Notification::FocusOrContextChange => {
                self.on_focus_or_context_change();
                TransformResult::NoAction
            }
        }
    }

    /// A unit is about to be committed.
    ///
    /// A `Consumed` result means the engine already rewrote the surface and
    /// the environment must cancel the native edit.
    pub fn on_pre_commit_insert(
        &mut self,
        surface: &mut dyn Surface,
        unit: Option<char>,
        kind: EditKind,
    ) -> TransformResult {
        if let Some(gated) = self.gate(surface) {
            return gated;
        }
        self.commit_seen = true;
        match self.handle_pre_commit(surface, unit, kind) {
            Ok(result) => {
                self.trace(Channel::PreCommit, unit, &result);
                result
            }
            Err(e) => self.abandon(Channel::PreCommit, e),
        }
    }

    /// The surface has already changed; inspect the text before the cursor.
    pub fn on_post_commit_fallback(&mut self, surface: &mut dyn Surface) -> TransformResult {
        if let Some(gated) = self.gate(surface) {
            // Text committed while composing still moves the baseline
            if self.installed {
                self.observe(surface);
            }
            return gated;
        }
        match self.handle_post_commit(surface) {
            Ok(result) => {
                self.trace(Channel::PostCommit, None, &result);
                result
            }
            Err(e) => self.abandon(Channel::PostCommit, e),
        }
    }

    /// A key went down with modifiers held.
    ///
    /// A `Consumed` result means the key event must be cancelled.
    pub fn on_modifier_chord(
        &mut self,
        surface: &mut dyn Surface,
        key: char,
        ctrl: bool,
        alt: bool,
    ) -> TransformResult {
        if let Some(gated) = self.gate(surface) {
            return gated;
        }
        match self.handle_chord(surface, key, ctrl, alt) {
            Ok(result) => {
                self.trace(Channel::Chord, Some(key), &result);
                result
            }
            Err(e) => self.abandon(Channel::Chord, e),
        }
    }

    pub fn on_composition_start(&mut self) {
        if !self.installed {
            return;
        }
        self.composition.start();
        self.deadkeys.reset();
        if self.config.debug_logging {
            log::debug!("[{}] start: dead keys reset", Channel::Composition);
        }
    }

    pub fn on_composition_end(&mut self) {
        if !self.installed {
            return;
        }
        self.composition.end();
        self.deadkeys.reset();
        self.commit_seen = false;
        if self.config.debug_logging {
            log::debug!("[{}] end: dead keys reset", Channel::Composition);
        }
    }

    /// Focus moved, the caret was placed elsewhere, or the surface changed
    pub fn on_focus_or_context_change(&mut self) {
        if !self.installed {
            return;
        }
        self.deadkeys.reset();
        self.commit_seen = false;
        // The text is unchanged but the caret may be anywhere now
        if let Some(baseline) = self.baseline.as_mut() {
            baseline.cursor = None;
        }
        if self.config.debug_logging {
            log::debug!("[{}] dead keys reset", Channel::Focus);
        }
    }

    /// Shared short-circuits for the text channels
    fn gate(&self, surface: &dyn Surface) -> Option<TransformResult> {
        if !self.installed {
            return Some(TransformResult::NoAction);
        }
        if self.composition.is_active() {
            return Some(TransformResult::PassThrough);
        }
        if !self.eligibility.is_eligible(surface.descriptor()) {
            return Some(TransformResult::NoAction);
        }
        None
    }

    fn handle_pre_commit(
        &mut self,
        surface: &mut dyn Surface,
        unit: Option<char>,
        kind: EditKind,
    ) -> Result<TransformResult, EngineError> {
        let unit = match unit {
            Some(u) if kind.is_typed() => u,
            _ => {
                // Deletes, pastes, drops and unclassified edits
                self.deadkeys.reset();
                return Ok(TransformResult::PassThrough);
            }
        };

        self.drop_stale_arm(surface)?;

        let result = self.deadkeys.feed(unit, self.config.strict_dead_keys);
        self.apply(surface, &result)?;
        Ok(result)
    }

    /// A visible trigger must still sit right before the cursor, otherwise
    /// deleting one char would remove something else (the caret moved, or a
    /// chord inserted text after the trigger).
    fn drop_stale_arm(&mut self, surface: &dyn Surface) -> Result<(), EngineError> {
        let Some(trigger) = self.deadkeys.armed_trigger() else {
            return Ok(());
        };
        if self.deadkeys.arm_state(trigger).suppressed {
            return Ok(());
        }
        let before = surface.text_window(1)?;
        if before.chars().next_back() != Some(trigger.as_char()) {
            if self.config.debug_logging {
                log::debug!("[{}] {} no longer before cursor, disarming", Channel::PreCommit, trigger);
            }
            self.deadkeys.reset();
        }
        Ok(())
    }

    fn handle_post_commit(&mut self, surface: &mut dyn Surface) -> Result<TransformResult, EngineError> {
        if std::mem::take(&mut self.commit_seen) {
            self.observe(surface);
            return Ok(TransformResult::NoAction);
        }

        let now = Snapshot::take(surface)?;
        let cursor = now.cursor.unwrap_or_default();
        let Some(previous) = self.baseline.replace(now) else {
            // Nothing to compare against, so this edit cannot be classified
            self.deadkeys.reset();
            return Ok(TransformResult::NoAction);
        };
        // Exactly one unit committed since the last look. Anything else is a
        // delete, a caret move or a multi-char insert.
        if !previous.grew_by_one(&now) {
            self.deadkeys.reset();
            return Ok(TransformResult::NoAction);
        }

        let window: SmallVec<[char; 2]> = surface.text_window(2)?.chars().collect();
        let Some(&unit) = window.last() else {
            if cursor > 0 {
                return Err(EngineError::EmptyWindow { cursor });
            }
            return Ok(TransformResult::NoAction);
        };
        let preceding = window.len().checked_sub(2).map(|i| window[i]);

        if let Some(trigger) = self.deadkeys.armed_trigger() {
            if preceding != Some(trigger.as_char()) {
                self.deadkeys.reset();
            }
        }

        let result = self.deadkeys.feed_committed(unit);
        self.apply(surface, &result)?;
        self.baseline = Some(Snapshot::take(surface)?);
        Ok(result)
    }

    fn handle_chord(
        &mut self,
        surface: &mut dyn Surface,
        key: char,
        ctrl: bool,
        alt: bool,
    ) -> Result<TransformResult, EngineError> {
        if !self.config.chord_modifier.is_satisfied(ctrl, alt) {
            return Ok(TransformResult::NoAction);
        }
        let Some(out) = chord_output(key) else {
            return Ok(TransformResult::NoAction);
        };
        let result = TransformResult::consumed(out.to_string(), 0);
        self.apply(surface, &result)?;
        // Our own insert is not an edit for the post-commit channel to judge
        self.baseline = Some(Snapshot::take(surface)?);
        Ok(result)
    }

    /// Perform a consumed result on the surface.
    ///
    /// The cursor and delete range are validated before anything changes,
    /// so a failure leaves the surface untouched.
    fn apply(&mut self, surface: &mut dyn Surface, result: &TransformResult) -> Result<(), EngineError> {
        let TransformResult::Consumed {
            inserted_text,
            delete_before_cursor,
        } = result
        else {
            return Ok(());
        };

        let cursor = surface.cursor_offset()?;
        if *delete_before_cursor > cursor {
            return Err(SurfaceError::OutOfRange {
                requested: *delete_before_cursor,
                available: cursor,
            }
            .into());
        }
        if *delete_before_cursor == 0 && inserted_text.is_empty() {
            return Ok(());
        }

        if *delete_before_cursor > 0 {
            surface.delete_before_cursor(*delete_before_cursor)?;
        }
        if !inserted_text.is_empty() {
            surface.insert_at_cursor(inserted_text)?;
        }
        surface.notify_changed();
        Ok(())
    }

    fn abandon(&mut self, channel: Channel, err: EngineError) -> TransformResult {
        log::warn!("[{}] notification abandoned: {}", channel, err);
        self.deadkeys.reset();
        self.baseline = None;
        TransformResult::PassThrough
    }

    fn trace(&self, channel: Channel, unit: Option<char>, result: &TransformResult) {
        if !self.config.debug_logging {
            return;
        }
        let armed = self
            .deadkeys
            .armed_trigger()
            .map_or_else(|| "idle".to_string(), |t| t.to_string());
        match unit {
            Some(u) => log::debug!("[{}] {:?} -> {} (state: {})", channel, u, result, armed),
            None => log::debug!("[{}] -> {} (state: {})", channel, result, armed),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{SurfaceDescriptor, TextBuffer};

    fn buffer() -> TextBuffer {
        TextBuffer::new(SurfaceDescriptor::multiline_input())
    }

    /// Engine attached to `surface` the way an environment does on focus
    fn observing(config: EngineConfig, surface: &TextBuffer) -> Engine {
        let mut engine = Engine::new(config);
        engine.observe(surface);
        engine
    }

    fn strict() -> EngineConfig {
        EngineConfig {
            strict_dead_keys: true,
            ..EngineConfig::default()
        }
    }

    /// Drive one keystroke through the pre-commit channel only
    fn type_pre(engine: &mut Engine, surface: &mut TextBuffer, ch: char) -> TransformResult {
        let result = engine.on_pre_commit_insert(surface, Some(ch), EditKind::InsertText);
        if !result.is_consumed() {
            surface.commit_native(&ch.to_string());
        }
        result
    }

    /// Drive one keystroke through the post-commit channel only
    fn type_post(engine: &mut Engine, surface: &mut TextBuffer, ch: char) -> TransformResult {
        surface.commit_native(&ch.to_string());
        engine.on_post_commit_fallback(surface)
    }

    #[test]
    fn test_pre_commit_macron() {
        let mut engine = Engine::default();
        let mut surface = buffer();
        assert_eq!(type_pre(&mut engine, &mut surface, '`'), TransformResult::PassThrough);
        assert_eq!(surface.text(), "`");
        assert_eq!(
            type_pre(&mut engine, &mut surface, 'a'),
            TransformResult::consumed("ā", 1)
        );
        assert_eq!(surface.text(), "ā");
        assert_eq!(surface.change_count(), 1);
        assert_eq!(engine.armed_trigger(), None);
    }

    #[test]
    fn test_pre_commit_strict_hides_trigger() {
        let mut engine = Engine::new(strict());
        let mut surface = buffer();
        assert!(type_pre(&mut engine, &mut surface, '\\').is_consumed());
        assert_eq!(surface.text(), "");
        assert_eq!(engine.arm_state(Trigger::Upper).suppressed, true);
        type_pre(&mut engine, &mut surface, 'o');
        assert_eq!(surface.text(), "Ō");
    }

    #[test]
    fn test_pre_commit_strict_fallback_resynthesizes() {
        let mut engine = Engine::new(strict());
        let mut surface = buffer();
        type_pre(&mut engine, &mut surface, '`');
        type_pre(&mut engine, &mut surface, 'k');
        assert_eq!(surface.text(), "`k");
        assert_eq!(surface.cursor(), Some(2));
    }

    #[test]
    fn test_pre_commit_delete_resets() {
        let mut engine = Engine::default();
        let mut surface = buffer();
        type_pre(&mut engine, &mut surface, '`');
        let r = engine.on_pre_commit_insert(&mut surface, None, EditKind::DeleteBackward);
        assert_eq!(r, TransformResult::PassThrough);
        surface.backspace_native();
        assert_eq!(engine.armed_trigger(), None);
        type_pre(&mut engine, &mut surface, 'a');
        assert_eq!(surface.text(), "a");
    }

    #[test]
    fn test_pre_commit_paste_resets() {
        let mut engine = Engine::default();
        let mut surface = buffer();
        type_pre(&mut engine, &mut surface, '`');
        let r = engine.on_pre_commit_insert(&mut surface, Some('a'), EditKind::InsertFromPaste);
        assert_eq!(r, TransformResult::PassThrough);
        assert_eq!(engine.armed_trigger(), None);
    }

    #[test]
    fn test_pre_commit_line_break_is_other_char() {
        let mut engine = Engine::default();
        let mut surface = buffer();
        type_pre(&mut engine, &mut surface, '`');
        let r = engine.on_pre_commit_insert(&mut surface, Some('\n'), EditKind::InsertLineBreak);
        assert_eq!(r, TransformResult::PassThrough);
        assert_eq!(engine.armed_trigger(), None);
    }

    #[test]
    fn test_post_commit_macron() {
        let mut surface = buffer();
        let mut engine = observing(EngineConfig::default(), &surface);
        assert_eq!(type_post(&mut engine, &mut surface, '`'), TransformResult::PassThrough);
        assert_eq!(engine.armed_trigger(), Some(Trigger::Lower));
        assert_eq!(
            type_post(&mut engine, &mut surface, 'u'),
            TransformResult::consumed("ū", 2)
        );
        assert_eq!(surface.text(), "ū");
        assert_eq!(surface.cursor(), Some(1));
    }

    #[test]
    fn test_post_commit_ignores_strict_mode() {
        let mut surface = buffer();
        let mut engine = observing(strict(), &surface);
        type_post(&mut engine, &mut surface, '`');
        assert_eq!(surface.text(), "`");
        assert_eq!(engine.arm_state(Trigger::Lower).suppressed, false);
        type_post(&mut engine, &mut surface, 'z');
        assert_eq!(surface.text(), "`z");
    }

    #[test]
    fn test_post_commit_detects_backspace() {
        let mut surface = buffer();
        let mut engine = observing(EngineConfig::default(), &surface);
        type_post(&mut engine, &mut surface, 'k');
        type_post(&mut engine, &mut surface, '`');
        surface.backspace_native();
        assert_eq!(engine.on_post_commit_fallback(&mut surface), TransformResult::NoAction);
        assert_eq!(engine.armed_trigger(), None);
        type_post(&mut engine, &mut surface, 'a');
        assert_eq!(surface.text(), "ka");
    }

    #[test]
    fn test_post_commit_without_baseline_only_records() {
        let mut engine = Engine::default();
        let mut surface = TextBuffer::with_text(SurfaceDescriptor::multiline_input(), "`z");
        surface.backspace_native();
        assert_eq!(engine.on_post_commit_fallback(&mut surface), TransformResult::NoAction);
        assert_eq!(engine.armed_trigger(), None);
        type_post(&mut engine, &mut surface, 'a');
        assert_eq!(surface.text(), "`a");
    }

    #[test]
    fn test_post_commit_delete_after_focus_change_does_not_arm() {
        let mut surface = TextBuffer::with_text(SurfaceDescriptor::multiline_input(), "`z");
        let mut engine = observing(EngineConfig::default(), &surface);
        engine.on_focus_or_context_change();
        surface.backspace_native();
        assert_eq!(engine.on_post_commit_fallback(&mut surface), TransformResult::NoAction);
        assert_eq!(engine.armed_trigger(), None);

        // Typing after the caret jumps is still recognised by length alone
        surface.set_cursor(0);
        engine.on_focus_or_context_change();
        type_post(&mut engine, &mut surface, '`');
        assert_eq!(engine.armed_trigger(), Some(Trigger::Lower));
        assert_eq!(
            type_post(&mut engine, &mut surface, 'o'),
            TransformResult::consumed("ō", 2)
        );
        assert_eq!(surface.text(), "ō`");
    }

    #[test]
    fn test_post_commit_forward_delete_resets() {
        let mut surface = TextBuffer::with_text(SurfaceDescriptor::multiline_input(), "q");
        surface.set_cursor(0);
        let mut engine = observing(EngineConfig::default(), &surface);
        type_post(&mut engine, &mut surface, '`');
        assert_eq!(engine.armed_trigger(), Some(Trigger::Lower));
        surface.delete_forward_native();
        assert_eq!(surface.text(), "`");
        engine.on_post_commit_fallback(&mut surface);
        assert_eq!(engine.armed_trigger(), None);
        type_post(&mut engine, &mut surface, 'e');
        assert_eq!(surface.text(), "`e");
    }

    #[test]
    fn test_post_commit_after_pre_commit_is_noop() {
        let mut engine = Engine::default();
        let mut surface = buffer();
        for ch in ['`', 'a'] {
            type_pre(&mut engine, &mut surface, ch);
            assert_eq!(engine.on_post_commit_fallback(&mut surface), TransformResult::NoAction);
        }
        assert_eq!(surface.text(), "ā");
    }

    #[test]
    fn test_chord_inserts_macron_and_leaves_state_alone() {
        let mut engine = Engine::default();
        let mut surface = buffer();
        type_pre(&mut engine, &mut surface, '`');
        let r = engine.on_modifier_chord(&mut surface, 'e', false, true);
        assert_eq!(r, TransformResult::consumed("ē", 0));
        assert_eq!(surface.text(), "`ē");
        assert_eq!(engine.armed_trigger(), Some(Trigger::Lower));
    }

    #[test]
    fn test_chord_then_vowel_does_not_eat_chord_output() {
        let mut engine = Engine::default();
        let mut surface = buffer();
        type_pre(&mut engine, &mut surface, '`');
        engine.on_modifier_chord(&mut surface, 'e', false, true);
        assert_eq!(type_pre(&mut engine, &mut surface, 'a'), TransformResult::PassThrough);
        assert_eq!(surface.text(), "`ēa");
    }

    #[test]
    fn test_chord_requires_configured_modifier() {
        let mut engine = Engine::default();
        let mut surface = buffer();
        assert_eq!(
            engine.on_modifier_chord(&mut surface, 'a', true, false),
            TransformResult::NoAction
        );
        assert_eq!(
            engine.on_modifier_chord(&mut surface, 'b', false, true),
            TransformResult::NoAction
        );
        assert_eq!(
            engine.on_modifier_chord(&mut surface, '\'', false, true),
            TransformResult::consumed("ʻ", 0)
        );
        assert_eq!(surface.text(), "ʻ");
    }

    #[test]
    fn test_composition_freezes_everything() {
        let mut engine = Engine::default();
        let mut surface = buffer();
        type_pre(&mut engine, &mut surface, '`');
        engine.on_composition_start();
        assert!(engine.is_composing());
        assert_eq!(engine.armed_trigger(), None);
        assert_eq!(type_pre(&mut engine, &mut surface, '`'), TransformResult::PassThrough);
        assert_eq!(type_pre(&mut engine, &mut surface, 'a'), TransformResult::PassThrough);
        assert_eq!(
            engine.on_modifier_chord(&mut surface, 'a', false, true),
            TransformResult::PassThrough
        );
        assert_eq!(engine.armed_trigger(), None);
        engine.on_composition_end();
        assert!(!engine.is_composing());
        assert_eq!(engine.armed_trigger(), None);
        assert_eq!(surface.text(), "``a");
    }

    #[test]
    fn test_focus_change_resets() {
        let mut engine = Engine::default();
        let mut surface = buffer();
        type_pre(&mut engine, &mut surface, '\\');
        engine.on_focus_or_context_change();
        assert_eq!(engine.armed_trigger(), None);
    }

    #[test]
    fn test_ineligible_surface_is_untouched() {
        let mut engine = Engine::default();
        let mut surface = TextBuffer::new(SurfaceDescriptor::line_input("password"));
        assert_eq!(type_pre(&mut engine, &mut surface, '`'), TransformResult::NoAction);
        assert_eq!(type_pre(&mut engine, &mut surface, 'a'), TransformResult::NoAction);
        assert_eq!(surface.text(), "`a");
        assert_eq!(engine.armed_trigger(), None);
    }

    #[test]
    fn test_missing_cursor_lets_keystroke_stand() {
        let mut engine = Engine::default();
        let mut surface = buffer();
        type_pre(&mut engine, &mut surface, '`');
        surface.clear_cursor();
        let r = engine.on_pre_commit_insert(&mut surface, Some('a'), EditKind::InsertText);
        assert_eq!(r, TransformResult::PassThrough);
        assert_eq!(engine.armed_trigger(), None);
        assert_eq!(surface.text(), "`");
    }

    #[test]
    fn test_uninstalled_engine_does_nothing() {
        let mut engine = Engine::default();
        let mut surface = buffer();
        engine.uninstall();
        assert!(!engine.is_installed());
        assert_eq!(type_pre(&mut engine, &mut surface, '`'), TransformResult::NoAction);
        assert_eq!(type_pre(&mut engine, &mut surface, 'a'), TransformResult::NoAction);
        assert_eq!(surface.text(), "`a");

        engine.install();
        type_pre(&mut engine, &mut surface, '`');
        type_pre(&mut engine, &mut surface, 'a');
        assert_eq!(surface.text(), "`aā");
    }

    #[test]
    fn test_dispatch_routes_notifications() {
        let mut surface = buffer();
        let mut engine = observing(EngineConfig::default(), &surface);
        surface.commit_native("`");
        engine.dispatch(&mut surface, &Notification::PostCommitFallback);
        assert_eq!(engine.armed_trigger(), Some(Trigger::Lower));
        engine.dispatch(&mut surface, &Notification::FocusOrContextChange);
        assert_eq!(engine.armed_trigger(), None);
        let r = engine.dispatch(
            &mut surface,
            &Notification::ModifierChord {
                key: 'I',
                ctrl: false,
                alt: true,
            },
        );
        assert_eq!(r, TransformResult::consumed("Ī", 0));
        engine.dispatch(&mut surface, &Notification::CompositionStart);
        assert!(engine.is_composing());
        engine.dispatch(&mut surface, &Notification::CompositionEnd);
        assert!(!engine.is_composing());
    }

    #[test]
    fn test_set_config_resets_and_recompiles() {
        let mut engine = Engine::default();
        let mut surface = buffer();
        type_pre(&mut engine, &mut surface, '`');
        engine.set_config(EngineConfig {
            exclusion_rule: Some("kind == multiline_input".into()),
            ..EngineConfig::default()
        });
        assert_eq!(engine.armed_trigger(), None);
        assert!(engine.eligibility().exclusion_rule().is_some());
        assert_eq!(type_pre(&mut engine, &mut surface, '`'), TransformResult::NoAction);
    }
}
