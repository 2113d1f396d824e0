//! Player input
//!
//! Two query surfaces over the same key stream:
//! - `is_held` is level state (movement)
//! - `was_triggered` is a release edge, cleared once read (menu actions)

const ACTION_COUNT: usize = 4;

/// Something the player can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Start,
    Restart,
}

impl Action {
    pub const ALL: [Action; ACTION_COUNT] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Start,
        Action::Restart,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Default binding for a `KeyboardEvent.code` value
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            // A for QWERTY, Q for AZERTY
            "KeyA" | "KeyQ" | "ArrowLeft" => Some(Action::MoveLeft),
            "KeyD" | "ArrowRight" => Some(Action::MoveRight),
            "Enter" | "Space" => Some(Action::Start),
            "KeyR" => Some(Action::Restart),
            _ => None,
        }
    }
}

/// Snapshot of held keys plus latched release edges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: [bool; ACTION_COUNT],
    triggered: [bool; ACTION_COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an action as held
    pub fn press(&mut self, action: Action) {
        self.held[action.index()] = true;
    }

    /// Release an action, latching its trigger edge
    pub fn release(&mut self, action: Action) {
        self.held[action.index()] = false;
        self.triggered[action.index()] = true;
    }

    /// Feed a key-down event. Returns false for unbound keys.
    pub fn key_down(&mut self, code: &str) -> bool {
        match Action::from_key_code(code) {
            Some(action) => {
                self.press(action);
                true
            }
            None => false,
        }
    }

    /// Feed a key-up event. Returns false for unbound keys.
    ///
    /// Note that two keys share MoveLeft; releasing either clears it.
    pub fn key_up(&mut self, code: &str) -> bool {
        match Action::from_key_code(code) {
            Some(action) => {
                self.release(action);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn is_held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    /// Read and clear the release edge for `action`
    pub fn was_triggered(&mut self, action: Action) -> bool {
        std::mem::take(&mut self.triggered[action.index()])
    }

    /// Drop all held keys and edges (e.g. on focus loss)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        assert_eq!(Action::from_key_code("KeyA"), Some(Action::MoveLeft));
        assert_eq!(Action::from_key_code("KeyQ"), Some(Action::MoveLeft));
        assert_eq!(Action::from_key_code("KeyD"), Some(Action::MoveRight));
        assert_eq!(Action::from_key_code("KeyR"), Some(Action::Restart));
        assert_eq!(Action::from_key_code("KeyZ"), None);
    }

    #[test]
    fn test_held_is_level() {
        let mut input = InputState::new();
        assert!(input.key_down("KeyD"));
        assert!(input.is_held(Action::MoveRight));
        assert!(input.is_held(Action::MoveRight));
        input.key_up("KeyD");
        assert!(!input.is_held(Action::MoveRight));
    }

    #[test]
    fn test_triggered_is_edge() {
        let mut input = InputState::new();
        input.key_down("KeyR");
        assert!(!input.was_triggered(Action::Restart));
        input.key_up("KeyR");
        assert!(input.was_triggered(Action::Restart));
        // Cleared after read
        assert!(!input.was_triggered(Action::Restart));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut input = InputState::new();
        assert!(!input.key_down("F13"));
        assert!(!input.key_up("F13"));
        assert_eq!(input, InputState::default());
    }
}
