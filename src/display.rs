use serde::Serialize;

use crate::schedule::{Assignment, FairnessLedger, ServiceSummary};

/// Floors-by-days grid ready for printing or export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleTable {
    pub columns: Vec<String>,
    pub rows: Vec<ScheduleRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    pub floor: String,
    pub cells: Vec<String>,
}

impl ScheduleTable {
    pub fn from_assignment(assignment: &Assignment) -> Self {
        let grid = assignment.grid;
        let columns = (1..=grid.days).map(|d| format!("Day {}", d)).collect();
        let rows = (0..grid.floors)
            .map(|floor| ScheduleRow {
                floor: format!("Floor {}", floor + 1),
                cells: (0..grid.days)
                    .map(|day| assignment.get(floor, day).map(|n| n.join(", ")).unwrap_or_default())
                    .collect(),
            })
            .collect();
        ScheduleTable { columns, rows }
    }
}

/// Renders the table as aligned text columns
pub fn render_table(table: &ScheduleTable) -> String {
    let label_width = table.rows.iter().map(|r| r.floor.chars().count()).max().unwrap_or(0);
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            table
                .rows
                .iter()
                .filter_map(|r| r.cells.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&" ".repeat(label_width));
    for (header, width) in table.columns.iter().zip(&widths) {
        out.push_str(&format!("  {:<width$}", header, width = *width));
    }
    out.push('\n');

    for row in &table.rows {
        out.push_str(&format!("{:<width$}", row.floor, width = label_width));
        for (cell, width) in row.cells.iter().zip(&widths) {
            out.push_str(&format!("  {:<width$}", cell, width = *width));
        }
        out.push('\n');
    }

    // Trailing pad from the last column isn't useful in a terminal
    out.lines().map(str::trim_end).collect::<Vec<_>>().join("\n") + "\n"
}

/// Duty counts per person, rebuilt from the assignment
pub fn service_summary(assignment: &Assignment, roster: &[String]) -> Vec<ServiceSummary> {
    FairnessLedger::from_assignment(assignment).summary(roster, assignment.grid.floors)
}

/// Prints a generated schedule, plus duty counts when people were reused
pub fn print_schedule(assignment: &Assignment, roster: &[String], reused: bool) {
    let table = ScheduleTable::from_assignment(assignment);
    println!("Random assignment generated!\n");
    print!("{}", render_table(&table));

    if reused {
        println!("\nDuty count per person (people were scheduled more than once):");
        for entry in service_summary(assignment, roster) {
            let floors: Vec<String> = entry
                .per_floor
                .iter()
                .map(|(floor, count)| format!("F{}: {}", floor, count))
                .collect();
            println!("  {} - total {} ({})", entry.name, entry.total, floors.join(", "));
        }
    }
}
