use rand::seq::SliceRandom;
use rand::Rng;

use super::types::{Assignment, GridSize};

/// Fills the grid from one uniform shuffle of the roster, so nobody repeats.
/// The caller guarantees the roster holds at least `grid.total_needed()` names.
pub fn assign_unique<R: Rng + ?Sized>(
    grid: GridSize,
    roster: &[String],
    rng: &mut R,
) -> Assignment {
    let mut shuffled = roster.to_vec();
    shuffled.shuffle(rng);

    let mut assignment = Assignment::empty(grid);
    let mut idx = 0;
    for slot in grid.fill_order() {
        let chunk = shuffled[idx..idx + grid.people_per_floor].to_vec();
        assignment.slots.insert(slot, chunk);
        idx += grid.people_per_floor;
    }
    assignment
}
