//! Round State Machine
//!
//! NotStarted -> Playing -> Over, with Over -> Playing on restart.

/// Round states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    NotStarted,
    Playing,
    Over,
}

impl RoundState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundState::NotStarted => "not-started",
            RoundState::Playing => "playing",
            RoundState::Over => "over",
        }
    }
}

/// Actions that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAction {
    Start,
    Escape,
    Restart,
}

/// Result of a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from_state: RoundState,
    pub to_state: RoundState,
    pub action: RoundAction,
}

/// Round Finite State Machine
#[derive(Debug, Clone)]
pub struct RoundFsm {
    state: RoundState,
}

impl RoundFsm {
    pub fn new() -> Self {
        Self {
            state: RoundState::NotStarted,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, action: RoundAction) -> bool {
        self.next_state(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: RoundAction) -> TransitionResult {
        let from_state = self.state;

        match self.next_state(action) {
            Some(next_state) => {
                self.state = next_state;
                TransitionResult {
                    success: true,
                    from_state,
                    to_state: next_state,
                    action,
                }
            }
            None => TransitionResult {
                success: false,
                from_state,
                to_state: from_state,
                action,
            },
        }
    }

    fn next_state(&self, action: RoundAction) -> Option<RoundState> {
        match (self.state, action) {
            (RoundState::NotStarted, RoundAction::Start) => Some(RoundState::Playing),
            (RoundState::NotStarted, RoundAction::Restart) => Some(RoundState::Playing),
            (RoundState::Playing, RoundAction::Escape) => Some(RoundState::Over),
            (RoundState::Over, RoundAction::Restart) => Some(RoundState::Playing),
            _ => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == RoundState::Playing
    }

    pub fn is_over(&self) -> bool {
        self.state == RoundState::Over
    }
}

impl Default for RoundFsm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let fsm = RoundFsm::new();
        assert_eq!(fsm.state(), RoundState::NotStarted);
    }

    #[test]
    fn test_round_flow() {
        let mut fsm = RoundFsm::new();
        assert!(fsm.transition(RoundAction::Start).success);
        assert!(fsm.is_playing());
        assert!(fsm.transition(RoundAction::Escape).success);
        assert!(fsm.is_over());
        assert!(fsm.transition(RoundAction::Restart).success);
        assert!(fsm.is_playing());
    }

    #[test]
    fn test_invalid_transitions() {
        let mut fsm = RoundFsm::new();
        let result = fsm.transition(RoundAction::Escape);
        assert!(!result.success);
        assert_eq!(result.to_state, RoundState::NotStarted);

        fsm.transition(RoundAction::Start);
        assert!(!fsm.can_transition(RoundAction::Start), "Already playing");
        assert!(!fsm.can_transition(RoundAction::Restart), "Restart only after the round ends");

        fsm.transition(RoundAction::Escape);
        assert!(!fsm.transition(RoundAction::Escape).success, "Round ends once");
        assert!(!fsm.can_transition(RoundAction::Start));
    }

    #[test]
    fn test_restart_from_fresh_state() {
        let mut fsm = RoundFsm::new();
        let result = fsm.transition(RoundAction::Restart);
        assert!(result.success);
        assert_eq!(result.from_state, RoundState::NotStarted);
        assert_eq!(result.to_state, RoundState::Playing);
    }

    #[test]
    fn test_state_names() {
        assert_eq!(RoundState::NotStarted.as_str(), "not-started");
        assert_eq!(RoundState::Playing.as_str(), "playing");
        assert_eq!(RoundState::Over.as_str(), "over");
    }
}
