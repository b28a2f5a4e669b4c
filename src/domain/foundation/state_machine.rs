//! Validated state transitions for lifecycle enums.

use super::ValidationError;

/// Trait for status enums whose transitions form a state machine.
///
/// Implementors enumerate their valid edges; `transition_to` and
/// `is_terminal` come for free. The interview phase lifecycle is the main
/// implementor.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if moving from self to target is a valid edge.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// All states reachable from the current one in a single step.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs the transition, failing on an invalid edge.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// A state with no outgoing edges is terminal.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Red,
        Green,
        Yellow,
        Off,
    }

    impl StateMachine for Light {
        fn can_transition_to(&self, target: &Self) -> bool {
            use Light::*;
            matches!(
                (self, target),
                (Red, Green) | (Green, Yellow) | (Yellow, Red) | (Red, Off)
            )
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use Light::*;
            match self {
                Red => vec![Green, Off],
                Green => vec![Yellow],
                Yellow => vec![Red],
                Off => vec![],
            }
        }
    }

    #[test]
    fn valid_edge_transitions() {
        assert_eq!(Light::Red.transition_to(Light::Green), Ok(Light::Green));
    }

    #[test]
    fn invalid_edge_is_rejected() {
        assert!(Light::Green.transition_to(Light::Red).is_err());
    }

    #[test]
    fn terminal_state_has_no_edges() {
        assert!(Light::Off.is_terminal());
        assert!(!Light::Red.is_terminal());
    }

    #[test]
    fn edges_agree_with_valid_transitions() {
        for state in [Light::Red, Light::Green, Light::Yellow, Light::Off] {
            for target in state.valid_transitions() {
                assert!(state.can_transition_to(&target));
            }
        }
    }
}
