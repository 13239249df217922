use std::collections::{BTreeMap, HashMap};

use super::types::Assignment;

/// Ranking key for a candidate; lower is fairer.
/// Ordered by times served on the floor first, then total times served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FairnessKey {
    pub on_floor: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Tally {
    per_floor: HashMap<usize, u32>,
    total: u32,
}

/// Per-run record of how often each person has served each floor
#[derive(Debug, Clone, Default)]
pub struct FairnessLedger {
    tallies: HashMap<String, Tally>,
}

impl FairnessLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the ledger by replaying an assignment in fill order
    pub fn from_assignment(assignment: &Assignment) -> Self {
        let mut ledger = Self::new();
        for (slot, names) in assignment.iter_fill_order() {
            for name in names {
                ledger.record(name, slot.floor);
            }
        }
        ledger
    }

    pub fn key(&self, name: &str, floor: usize) -> FairnessKey {
        match self.tallies.get(name) {
            Some(tally) => FairnessKey {
                on_floor: tally.per_floor.get(&floor).copied().unwrap_or(0),
                total: tally.total,
            },
            None => FairnessKey::default(),
        }
    }

    pub fn record(&mut self, name: &str, floor: usize) {
        let tally = self.tallies.entry(name.to_string()).or_default();
        *tally.per_floor.entry(floor).or_insert(0) += 1;
        tally.total += 1;
    }

    pub fn on_floor(&self, name: &str, floor: usize) -> u32 {
        self.key(name, floor).on_floor
    }

    pub fn total(&self, name: &str) -> u32 {
        self.tallies.get(name).map(|t| t.total).unwrap_or(0)
    }

    /// Duty counts for every roster member, in roster order
    pub fn summary(&self, roster: &[String], floors: usize) -> Vec<ServiceSummary> {
        roster
            .iter()
            .map(|name| ServiceSummary {
                name: name.clone(),
                per_floor: (0..floors)
                    .map(|floor| (floor + 1, self.on_floor(name, floor)))
                    .collect(),
                total: self.total(name),
            })
            .collect()
    }
}

/// How often one person was scheduled, keyed by 1-based floor number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSummary {
    pub name: String,
    pub per_floor: BTreeMap<usize, u32>,
    pub total: u32,
}
