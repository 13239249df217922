pub mod types;
pub mod ledger;
pub mod unique;
pub mod fair;
pub mod assign;

pub use types::{Assignment, GridSize};
pub use ledger::{FairnessLedger, ServiceSummary};
pub use assign::plan_schedule;
