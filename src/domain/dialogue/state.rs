//! Dialogue state machine.
//!
//! Defines the steps of a diagnostic conversation and the legal edges
//! between them. Re-prompts and further yes/no questions keep the current
//! state and never go through a transition.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The step a conversation is waiting on.
///
/// - `GetName`: asking for the user's name
/// - `GetAge`: asking for the user's age
/// - `GetSymptom`: asking for the primary symptom in free text
/// - `GetSymptomSelection`: the free text was ambiguous, waiting for a menu index
/// - `GetDays`: asking how long the primary symptom has lasted
/// - `GetOtherSymptoms`: yes/no loop over related symptoms
/// - `Closed`: report delivered, only `start` is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    #[default]
    GetName,
    GetAge,
    GetSymptom,
    GetSymptomSelection,
    GetDays,
    GetOtherSymptoms,
    Closed,
}

impl DialogueState {
    /// Returns true once the report has been delivered.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl StateMachine for DialogueState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DialogueState::*;
        matches!(
            (self, target),
            (GetName, GetAge) |
            (GetAge, GetSymptom) |
            // Ambiguous text goes through the menu, a unique match skips it
            (GetSymptom, GetSymptomSelection) |
            (GetSymptom, GetDays) |
            (GetSymptomSelection, GetDays) |
            // No related symptoms to ask about closes immediately
            (GetDays, GetOtherSymptoms) |
            (GetDays, Closed) |
            (GetOtherSymptoms, Closed) |
            // Restart
            (Closed, GetName)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialogueState::*;
        match self {
            GetName => vec![GetAge],
            GetAge => vec![GetSymptom],
            GetSymptom => vec![GetSymptomSelection, GetDays],
            GetSymptomSelection => vec![GetDays],
            GetDays => vec![GetOtherSymptoms, Closed],
            GetOtherSymptoms => vec![Closed],
            Closed => vec![GetName],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [DialogueState; 7] = [
        DialogueState::GetName,
        DialogueState::GetAge,
        DialogueState::GetSymptom,
        DialogueState::GetSymptomSelection,
        DialogueState::GetDays,
        DialogueState::GetOtherSymptoms,
        DialogueState::Closed,
    ];

    mod state_definition {
        use super::*;

        #[test]
        fn default_state_is_get_name() {
            assert_eq!(DialogueState::default(), DialogueState::GetName);
        }

        #[test]
        fn serializes_to_snake_case() {
            let json = serde_json::to_string(&DialogueState::GetSymptomSelection).unwrap();
            assert_eq!(json, "\"get_symptom_selection\"");
        }

        #[test]
        fn deserializes_from_snake_case() {
            let state: DialogueState = serde_json::from_str("\"get_other_symptoms\"").unwrap();
            assert_eq!(state, DialogueState::GetOtherSymptoms);
        }

        #[test]
        fn only_closed_is_closed() {
            let closed: Vec<_> = ALL.iter().filter(|s| s.is_closed()).collect();
            assert_eq!(closed, vec![&DialogueState::Closed]);
        }
    }

    mod transitions {
        use super::*;

        #[test]
        fn forward_path_without_disambiguation_is_valid() {
            let path = [
                DialogueState::GetName,
                DialogueState::GetAge,
                DialogueState::GetSymptom,
                DialogueState::GetDays,
                DialogueState::GetOtherSymptoms,
                DialogueState::Closed,
            ];
            for pair in path.windows(2) {
                assert!(pair[0].can_transition_to(&pair[1]), "{:?}", pair);
            }
        }

        #[test]
        fn days_can_close_directly() {
            assert_eq!(
                DialogueState::GetDays.transition_to(DialogueState::Closed),
                Ok(DialogueState::Closed)
            );
        }

        #[test]
        fn closed_only_restarts_to_get_name() {
            assert_eq!(
                DialogueState::Closed.valid_transitions(),
                vec![DialogueState::GetName]
            );
            assert!(DialogueState::Closed
                .transition_to(DialogueState::GetSymptom)
                .is_err());
        }

        #[test]
        fn cannot_skip_age() {
            assert!(DialogueState::GetName
                .transition_to(DialogueState::GetSymptom)
                .is_err());
        }

        #[test]
        fn no_state_is_terminal() {
            for state in ALL {
                assert!(!state.is_terminal(), "{:?} should have an exit", state);
            }
        }

        #[test]
        fn can_transition_to_is_consistent_with_valid_transitions() {
            for from in ALL {
                for to in ALL {
                    assert_eq!(
                        from.can_transition_to(&to),
                        from.valid_transitions().contains(&to),
                        "{:?} -> {:?}",
                        from,
                        to
                    );
                }
            }
        }
    }
}
