//! Patch status transitions.
//!
//! The allowed moves are defined by [`PatchStatus::can_transition_to`]; every
//! helper here goes through [`transition`].

use chrono::{DateTime, Utc};

use modelguard_core::errors::PatchError;
use modelguard_core::models::{Patch, PatchStatus};

/// Move `patch` to `next`, or fail without touching it.
pub fn transition(patch: &mut Patch, next: PatchStatus) -> Result<(), PatchError> {
    if !patch.status.can_transition_to(next) {
        return Err(PatchError::InvalidTransition {
            from: patch.status,
            to: next,
        });
    }
    patch.status = next;
    Ok(())
}

pub fn submit_for_validation(patch: &mut Patch) -> Result<(), PatchError> {
    transition(patch, PatchStatus::PendingValidation)
}

/// The host applied the patch at `at`.
pub fn mark_applied(patch: &mut Patch, at: DateTime<Utc>) -> Result<(), PatchError> {
    transition(patch, PatchStatus::Applied)?;
    patch.applied_at = Some(at);
    Ok(())
}

pub fn mark_failed(patch: &mut Patch) -> Result<(), PatchError> {
    transition(patch, PatchStatus::Failed)
}

/// The host reverted an applied patch at `at`.
pub fn mark_rolled_back(patch: &mut Patch, at: DateTime<Utc>) -> Result<(), PatchError> {
    transition(patch, PatchStatus::RolledBack)?;
    patch.rolled_back_at = Some(at);
    Ok(())
}
