//! Transition resolution
//!
//! Pure functions mapping an action's result type to the stage it leads to.

use crate::schemas::{Action, ResultType, Stage, StageId};

/// Why an action has no usable target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTransition {
    /// `next` from the last stage
    PastLastStage,
    /// `prev` from the first stage
    BeforeFirstStage,
    /// `specific` with no target chosen
    MissingTarget,
    /// `specific` pointing at a stage that is not in the list
    BrokenTarget(StageId),
    /// A result type this client does not recognise
    UnknownResultType,
}

impl std::fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidTransition::PastLastStage => write!(f, "no next stage"),
            InvalidTransition::BeforeFirstStage => write!(f, "no previous stage"),
            InvalidTransition::MissingTarget => write!(f, "no target selected"),
            InvalidTransition::BrokenTarget(id) => write!(f, "target stage {} not found", id),
            InvalidTransition::UnknownResultType => write!(f, "unknown result type"),
        }
    }
}

/// The effective destination of an action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition<'a> {
    /// Move to `stages[index]`
    Stage { index: usize, stage: &'a Stage },
    /// Terminal; the workflow finishes
    Complete,
    /// The action cannot be followed
    Invalid(InvalidTransition),
}

impl<'a> Transition<'a> {
    pub fn is_valid(&self) -> bool {
        !matches!(self, Transition::Invalid(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Transition::Complete)
    }

    /// The destination stage, if the transition leads to one
    pub fn stage(&self) -> Option<&'a Stage> {
        match self {
            Transition::Stage { stage, .. } => Some(stage),
            _ => None,
        }
    }
}

/// Resolve where `action`, taken at `stages[current]`, leads.
///
/// A broken `specific` target only invalidates this action; callers decide
/// whether that matters for the rest of the draft.
pub fn resolve_next<'a>(action: &Action, current: usize, stages: &'a [Stage]) -> Transition<'a> {
    match action.result_type {
        ResultType::Next => {
            let index = current + 1;
            match stages.get(index) {
                Some(stage) => Transition::Stage { index, stage },
                None => Transition::Invalid(InvalidTransition::PastLastStage),
            }
        }
        ResultType::Prev => match current.checked_sub(1) {
            Some(index) if index < stages.len() => Transition::Stage {
                index,
                stage: &stages[index],
            },
            _ => Transition::Invalid(InvalidTransition::BeforeFirstStage),
        },
        ResultType::Complete => Transition::Complete,
        ResultType::Specific => {
            let Some(target) = action.specific_target else {
                return Transition::Invalid(InvalidTransition::MissingTarget);
            };
            match stages.iter().position(|s| s.id == Some(target)) {
                Some(index) => Transition::Stage {
                    index,
                    stage: &stages[index],
                },
                None => Transition::Invalid(InvalidTransition::BrokenTarget(target)),
            }
        }
        ResultType::Unknown => Transition::Invalid(InvalidTransition::UnknownResultType),
    }
}

/// Resolve every action of `stages[current]`.
pub fn outgoing<'a>(current: usize, stages: &'a [Stage]) -> Vec<(&'a Action, Transition<'a>)> {
    stages
        .get(current)
        .map(|stage| {
            stage
                .actions
                .iter()
                .map(|action| (action, resolve_next(action, current, stages)))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::RoleId;

    fn stages() -> Vec<Stage> {
        ["Draft", "Review", "Approve"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Stage::for_role(*name, *name, RoleId(1))
                    .with_id(StageId(10 * (i as u64 + 1)))
                    .with_action(Action::named("Go", ResultType::Next))
            })
            .collect()
    }

    #[test]
    fn test_next_moves_forward() {
        let stages = stages();
        let action = Action::named("Go", ResultType::Next);
        let t = resolve_next(&action, 0, &stages);
        assert_eq!(t.stage().unwrap().name, "Review");
        assert!(matches!(t, Transition::Stage { index: 1, .. }));
    }

    #[test]
    fn test_next_from_last_is_invalid() {
        let stages = stages();
        let action = Action::named("Go", ResultType::Next);
        assert_eq!(
            resolve_next(&action, 2, &stages),
            Transition::Invalid(InvalidTransition::PastLastStage)
        );
    }

    #[test]
    fn test_prev() {
        let stages = stages();
        let action = Action::named("Back", ResultType::Prev);
        assert_eq!(resolve_next(&action, 2, &stages).stage().unwrap().name, "Review");
        assert_eq!(
            resolve_next(&action, 0, &stages),
            Transition::Invalid(InvalidTransition::BeforeFirstStage)
        );
    }

    #[test]
    fn test_complete_is_terminal() {
        let stages = stages();
        let action = Action::named("Finish", ResultType::Complete);
        let t = resolve_next(&action, 1, &stages);
        assert!(t.is_terminal());
        assert!(t.is_valid());
        assert!(t.stage().is_none());
    }

    #[test]
    fn test_specific() {
        let stages = stages();
        let jump = Action::named("Jump", ResultType::Specific).with_target(StageId(30));
        assert!(matches!(resolve_next(&jump, 0, &stages), Transition::Stage { index: 2, .. }));

        let broken = Action::named("Jump", ResultType::Specific).with_target(StageId(99));
        assert_eq!(
            resolve_next(&broken, 0, &stages),
            Transition::Invalid(InvalidTransition::BrokenTarget(StageId(99)))
        );

        let missing = Action::named("Jump", ResultType::Specific);
        assert_eq!(
            resolve_next(&missing, 0, &stages),
            Transition::Invalid(InvalidTransition::MissingTarget)
        );
    }

    #[test]
    fn test_unknown_result_type() {
        let stages = stages();
        let action = Action::named("?", ResultType::Unknown);
        assert!(!resolve_next(&action, 0, &stages).is_valid());
    }

    #[test]
    fn test_outgoing_only_affects_broken_action() {
        let mut stages = stages();
        stages[0].actions.push(Action::named("Jump", ResultType::Specific).with_target(StageId(77)));

        let resolved = outgoing(0, &stages);
        assert_eq!(resolved.len(), 2);
        assert!(resolved[0].1.is_valid());
        assert!(!resolved[1].1.is_valid());
        assert!(outgoing(9, &stages).is_empty());
    }
}
