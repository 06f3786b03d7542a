//! Engagement status lifecycle.
//!
//! Projects and partnership demands share one status enum but differ in who
//! may move them where. Both tables are encoded here as a single lookup so
//! every handler goes through the same guard instead of re-branching on the
//! enum per call site.

use sea_orm::ActiveEnum;
use thiserror::Error;

use crate::models::status::{EngagementKind, EngagementStatus};

/// The caller's relationship to an engagement, derived server-side from the
/// rows (owner column, accepted application) and never from client input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRelationship {
    /// The client who owns a project, or the professional who created a demand.
    Owner,
    /// The professional whose application on the engagement was accepted.
    AcceptedCounterpart,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("the engagement is already in the requested status")]
    NoChange,
    #[error("transition from {from} to {to} is not allowed for this actor")]
    NotAllowed { from: String, to: String },
}

/// The transition table: which target statuses the given actor may request
/// from the given current status.
pub fn allowed_targets(
    kind: &EngagementKind,
    actor: ActorRelationship,
    from: &EngagementStatus,
) -> &'static [EngagementStatus] {
    use ActorRelationship::{AcceptedCounterpart, Owner};
    use EngagementStatus::{Cancelled, Completed, Draft, InProgress, Open};

    match (kind, actor, from) {
        (EngagementKind::Project, Owner, Draft) => &[Open],
        (EngagementKind::Project, Owner, Open) => &[InProgress, Cancelled],
        (EngagementKind::Project, Owner, InProgress) => &[Completed, Cancelled],
        (EngagementKind::Project, AcceptedCounterpart, Open) => &[InProgress],
        (EngagementKind::Project, AcceptedCounterpart, InProgress) => &[Completed],

        (EngagementKind::Partnership, Owner, Draft) => &[Open, Cancelled],
        (EngagementKind::Partnership, Owner, Open) => &[InProgress, Cancelled],
        (EngagementKind::Partnership, Owner, InProgress) => &[Cancelled],
        (EngagementKind::Partnership, AcceptedCounterpart, InProgress) => &[Completed, Cancelled],

        _ => &[],
    }
}

/// Validate a requested transition. `Ok(())` means the caller may persist the
/// new status; any error leaves the stored status untouched.
pub fn check_transition(
    kind: &EngagementKind,
    actor: ActorRelationship,
    current: &EngagementStatus,
    requested: &EngagementStatus,
) -> Result<(), TransitionError> {
    if requested == current {
        return Err(TransitionError::NoChange);
    }

    if allowed_targets(kind, actor, current).contains(requested) {
        Ok(())
    } else {
        Err(TransitionError::NotAllowed {
            from: current.to_value(),
            to: requested.to_value(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    use ActorRelationship::{AcceptedCounterpart, Owner};
    use EngagementStatus::{Cancelled, Completed, Draft, InProgress, Open};

    fn assert_table(
        kind: EngagementKind,
        actor: ActorRelationship,
        expected: &[(EngagementStatus, &[EngagementStatus])],
    ) {
        for from in EngagementStatus::iter() {
            let allowed: &[EngagementStatus] = expected
                .iter()
                .find(|(f, _)| *f == from)
                .map(|(_, to)| *to)
                .unwrap_or(&[]);

            for to in EngagementStatus::iter() {
                let result = check_transition(&kind, actor, &from, &to);
                if to == from {
                    assert_eq!(result, Err(TransitionError::NoChange));
                } else if allowed.contains(&to) {
                    assert_eq!(result, Ok(()), "{from:?} -> {to:?} should be allowed");
                } else {
                    assert!(
                        matches!(result, Err(TransitionError::NotAllowed { .. })),
                        "{from:?} -> {to:?} should be rejected"
                    );
                }
            }
        }
    }

    #[test]
    fn project_owner_transitions() {
        assert_table(
            EngagementKind::Project,
            Owner,
            &[
                (Draft, &[Open]),
                (Open, &[InProgress, Cancelled]),
                (InProgress, &[Completed, Cancelled]),
            ],
        );
    }

    #[test]
    fn project_accepted_professional_transitions() {
        assert_table(
            EngagementKind::Project,
            AcceptedCounterpart,
            &[(Open, &[InProgress]), (InProgress, &[Completed])],
        );
    }

    #[test]
    fn demand_creator_transitions() {
        assert_table(
            EngagementKind::Partnership,
            Owner,
            &[
                (Draft, &[Open, Cancelled]),
                (Open, &[InProgress, Cancelled]),
                (InProgress, &[Cancelled]),
            ],
        );
    }

    #[test]
    fn demand_accepted_partner_transitions() {
        assert_table(
            EngagementKind::Partnership,
            AcceptedCounterpart,
            &[(InProgress, &[Completed, Cancelled])],
        );
    }

    #[test]
    fn terminal_statuses_accept_nothing() {
        for kind in EngagementKind::iter() {
            for actor in [Owner, AcceptedCounterpart] {
                for from in [Completed, Cancelled] {
                    for to in EngagementStatus::iter() {
                        if to == from {
                            continue;
                        }
                        assert!(
                            check_transition(&kind, actor, &from, &to).is_err(),
                            "{kind:?}/{actor:?}: {from:?} -> {to:?} must be rejected"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn requesting_the_current_status_is_no_change() {
        let result = check_transition(&EngagementKind::Project, Owner, &Open, &Open);
        assert_eq!(result, Err(TransitionError::NoChange));
    }

    #[test]
    fn not_allowed_error_names_both_statuses() {
        let err = check_transition(&EngagementKind::Project, Owner, &Draft, &Completed)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "transition from draft to completed is not allowed for this actor"
        );
    }
}
