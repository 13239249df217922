use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use super::ledger::{FairnessKey, FairnessLedger};
use super::types::{Assignment, GridSize};

/// Fills the grid allowing repeats, picking the least-served people for each slot.
///
/// For every slot the roster is ranked by `(times on this floor, total times)`.
/// People sharing a key are shuffled among themselves so ties don't fall back
/// to input order, but a group is never mixed with a fairer or busier one.
pub fn assign_with_reuse<R: Rng + ?Sized>(
    grid: GridSize,
    roster: &[String],
    rng: &mut R,
) -> Assignment {
    let mut ledger = FairnessLedger::new();
    let mut assignment = Assignment::empty(grid);

    for slot in grid.fill_order() {
        let mut ranked: Vec<(FairnessKey, &str)> = roster
            .iter()
            .map(|name| (ledger.key(name, slot.floor), name.as_str()))
            .collect();

        // Stable, so equal keys keep roster order until shuffled below
        ranked.sort_by_key(|(key, _)| *key);
        for group in ranked.chunk_by_mut(|a, b| a.0 == b.0) {
            group.shuffle(rng);
        }

        let selected: Vec<String> = ranked
            .iter()
            .take(grid.people_per_floor)
            .map(|(_, name)| name.to_string())
            .collect();

        for name in &selected {
            ledger.record(name, slot.floor);
        }
        trace!(floor = slot.floor, day = slot.day, ?selected, "filled slot");
        assignment.slots.insert(slot, selected);
    }

    assignment
}
