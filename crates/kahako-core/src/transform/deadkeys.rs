use crate::transform::TransformResult;
use crate::Trigger;

/// Runtime flags of one trigger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArmState {
    pub armed: bool,
    /// The trigger character was hidden instead of committed (strict mode)
    pub suppressed: bool,
}

/// Dead-key state machine.
///
/// Holds one `ArmState` per trigger. At most one trigger is armed: any unit
/// fed while armed resolves and clears the armed trigger before anything
/// else can arm, and a trigger char fed while armed is resolved as a plain
/// "other" character instead of arming.
///
/// There is no timeout. An armed trigger waits for the next unit, a reset,
/// or a focus/composition change.
#[derive(Debug, Clone, Default)]
pub struct DeadKeyState {
    slots: [ArmState; 2],
}

impl DeadKeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The trigger currently armed, if any
    pub fn armed_trigger(&self) -> Option<Trigger> {
        [Trigger::Lower, Trigger::Upper]
            .into_iter()
            .find(|t| self.slots[t.index()].armed)
    }

    pub fn arm_state(&self, trigger: Trigger) -> ArmState {
        self.slots[trigger.index()]
    }

    pub fn is_active(&self) -> bool {
        self.armed_trigger().is_some()
    }

    /// Return both triggers to idle
    pub fn reset(&mut self) {
        self.slots = [ArmState::default(); 2];
    }

    fn arm(&mut self, trigger: Trigger, suppressed: bool) {
        self.reset();
        self.slots[trigger.index()] = ArmState {
            armed: true,
            suppressed,
        };
    }

    /// Feed one unit that has not been committed to the surface yet.
    ///
    /// `strict` hides a trigger char until its sequence resolves. A consumed
    /// result's delete count covers only what is already on the surface: the
    /// trigger char, when it was not hidden.
    pub fn feed(&mut self, unit: char, strict: bool) -> TransformResult {
        if let Some(trigger) = self.armed_trigger() {
            let suppressed = self.slots[trigger.index()].suppressed;
            self.reset();
            let delete = if suppressed { 0 } else { 1 };
            return match trigger.resolve(unit) {
                Some(out) => TransformResult::consumed(out.to_string(), delete),
                // Re-synthesize the hidden trigger in front of the literal char.
                None if suppressed => {
                    TransformResult::consumed(format!("{}{}", trigger.as_char(), unit), 0)
                }
                None => TransformResult::PassThrough,
            };
        }

        if let Some(trigger) = Trigger::from_char(unit) {
            self.arm(trigger, strict);
            return if strict {
                TransformResult::consumed("", 0)
            } else {
                TransformResult::PassThrough
            };
        }

        TransformResult::PassThrough
    }

    /// Feed one unit that the surface has already committed.
    ///
    /// Used when the engine only learns about input after the fact. The
    /// trigger char, if armed, is assumed to be committed right before the
    /// unit, so a resolved sequence removes both. Triggers seen this way are
    /// never suppressed.
    pub fn feed_committed(&mut self, unit: char) -> TransformResult {
        if let Some(trigger) = self.armed_trigger() {
            self.reset();
            return match trigger.resolve(unit) {
                Some(out) => TransformResult::consumed(out.to_string(), 2),
                None => TransformResult::PassThrough,
            };
        }

        if let Some(trigger) = Trigger::from_char(unit) {
            self.arm(trigger, false);
        }
        TransformResult::PassThrough
    }
}
