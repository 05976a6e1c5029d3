/// Tracks native IME composition on the surface.
///
/// `start` and `end` report whether the flag actually flipped. The engine
/// resets dead-key state on every signal regardless, since a repeated
/// `start` still means the environment is composing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositionGuard {
    active: bool,
}

impl CompositionGuard {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self) -> bool {
        !std::mem::replace(&mut self.active, true)
    }

    pub fn end(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }

    pub fn clear(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mut guard = CompositionGuard::default();
        assert!(!guard.is_active());
        assert!(guard.start());
        assert!(!guard.start());
        assert!(guard.is_active());
        assert!(guard.end());
        assert!(!guard.end());
        assert!(!guard.is_active());
    }

    #[test]
    fn test_clear() {
        let mut guard = CompositionGuard::default();
        guard.start();
        guard.clear();
        assert!(!guard.is_active());
    }
}
