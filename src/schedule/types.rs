use std::collections::BTreeMap;

/// A single (floor, day) cell in the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot {
    pub floor: usize,
    pub day: usize,
}

impl Slot {
    pub fn new(floor: usize, day: usize) -> Self {
        Slot { floor, day }
    }
}

/// Grid dimensions for one assignment run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub floors: usize,
    pub days: usize,
    pub people_per_floor: usize,
}

impl GridSize {
    pub fn new(floors: usize, days: usize, people_per_floor: usize) -> Self {
        GridSize { floors, days, people_per_floor }
    }

    pub fn slot_count(&self) -> usize {
        self.floors.saturating_mul(self.days)
    }

    /// Total number of names needed to fill every slot without repeats
    pub fn total_needed(&self) -> usize {
        self.slot_count().saturating_mul(self.people_per_floor)
    }

    /// Slots in fill order: days outer, floors inner
    pub fn fill_order(&self) -> impl Iterator<Item = Slot> {
        let floors = self.floors;
        (0..self.days).flat_map(move |day| (0..floors).map(move |floor| Slot::new(floor, day)))
    }
}

/// Result of one run: slot -> people on duty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub grid: GridSize,
    pub slots: BTreeMap<Slot, Vec<String>>,
}

impl Assignment {
    pub fn empty(grid: GridSize) -> Self {
        Assignment { grid, slots: BTreeMap::new() }
    }

    pub fn get(&self, floor: usize, day: usize) -> Option<&[String]> {
        self.slots.get(&Slot::new(floor, day)).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Iterates filled slots in fill order
    pub fn iter_fill_order(&self) -> impl Iterator<Item = (Slot, &[String])> + '_ {
        self.grid
            .fill_order()
            .filter_map(move |slot| self.slots.get(&slot).map(|names| (slot, names.as_slice())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_order_is_days_outer() {
        let grid = GridSize::new(2, 2, 1);
        let order: Vec<Slot> = grid.fill_order().collect();
        assert_eq!(
            order,
            vec![Slot::new(0, 0), Slot::new(1, 0), Slot::new(0, 1), Slot::new(1, 1)]
        );
    }

    #[test]
    fn test_total_needed_saturates() {
        let grid = GridSize::new(usize::MAX, 2, 3);
        assert_eq!(grid.total_needed(), usize::MAX);
        assert_eq!(GridSize::new(4, 5, 2).total_needed(), 40);
    }

    #[test]
    fn test_zero_floors_has_no_slots() {
        let grid = GridSize::new(0, 5, 1);
        assert_eq!(grid.fill_order().count(), 0);
        assert_eq!(grid.slot_count(), 0);
    }
}
