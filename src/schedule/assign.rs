use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::{ScheduleRequest, MAX_NAMES};
use crate::error::{AppError, AssignError, RosterError};
use super::fair::assign_with_reuse;
use super::types::{Assignment, GridSize};
use super::unique::assign_unique;

/// Assigns roster names to every (floor, day) slot.
///
/// Without reuse each person is scheduled at most once. With reuse, people are
/// ranked per slot by how little they have served and ties are broken randomly.
/// Size checks run before the random source is touched.
pub fn assign<R: Rng + ?Sized>(
    grid: GridSize,
    roster: &[String],
    allow_reuse: bool,
    rng: &mut R,
) -> Result<Assignment, AssignError> {
    if grid.people_per_floor > roster.len() {
        return Err(AssignError::InsufficientRosterSize {
            people_per_floor: grid.people_per_floor,
            available: roster.len(),
        });
    }

    let needed = grid.total_needed();
    if !allow_reuse && roster.len() < needed {
        return Err(AssignError::InsufficientUniqueNames {
            needed,
            available: roster.len(),
        });
    }

    if grid.slot_count() == 0 {
        return Ok(Assignment::empty(grid));
    }

    debug!(
        floors = grid.floors,
        days = grid.days,
        people_per_floor = grid.people_per_floor,
        roster = roster.len(),
        allow_reuse,
        "assigning slots"
    );

    let assignment = if allow_reuse {
        assign_with_reuse(grid, roster, rng)
    } else {
        assign_unique(grid, roster, rng)
    };
    Ok(assignment)
}

/// A generated schedule plus whether people had to be reused
#[derive(Debug, Clone)]
pub struct SchedulePlan {
    pub assignment: Assignment,
    pub reused: bool,
}

/// Validates a request and runs the engine against a loaded roster.
///
/// Reuse only engages when the caller allowed it and the roster is actually too
/// small; otherwise a short roster is reported, never silently escalated.
pub fn plan_schedule<R: Rng + ?Sized>(
    request: &ScheduleRequest,
    roster: &[String],
    rng: &mut R,
) -> Result<SchedulePlan, AppError> {
    request.validate()?;
    if roster.is_empty() {
        return Err(RosterError::Empty.into());
    }
    if roster.len() > MAX_NAMES {
        return Err(AppError::InvalidInput(format!(
            "Too many names: at most {} are allowed.",
            MAX_NAMES
        )));
    }

    let needed = request.total_needed();
    let short = roster.len() < needed;
    if short {
        if request.allow_reuse {
            warn!(
                needed,
                available = roster.len(),
                "not enough unique names, people will be scheduled more than once"
            );
        } else {
            warn!(
                needed,
                available = roster.len(),
                "not enough unique names and reuse is not allowed"
            );
        }
    }

    let reused = request.allow_reuse && short;
    let assignment = assign(request.grid(), roster, reused, rng)?;
    info!(slots = assignment.len(), reused, "schedule generated");

    Ok(SchedulePlan { assignment, reused })
}
