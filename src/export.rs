use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use csv::WriterBuilder;
use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::display::{render_table, ScheduleTable};
use crate::error::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Text,
    Json,
    Xlsx,
}

impl ExportFormat {
    /// Picks the format from the extension; no extension means CSV
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match ext.as_deref() {
            None | Some("csv") => Ok(ExportFormat::Csv),
            Some("txt") => Ok(ExportFormat::Text),
            Some("json") => Ok(ExportFormat::Json),
            Some("xlsx") => Ok(ExportFormat::Xlsx),
            Some(other) => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Writes the table as CSV: `Floor,Day 1,...` then one record per floor
pub fn write_csv<W: Write>(writer: W, table: &ScheduleTable) -> Result<(), ExportError> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    let mut header = vec!["Floor"];
    header.extend(table.columns.iter().map(String::as_str));
    wtr.write_record(&header)?;

    for row in &table.rows {
        let mut record = vec![row.floor.as_str()];
        record.extend(row.cells.iter().map(String::as_str));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Builds an xlsx workbook with the same layout as the CSV export
pub fn xlsx_bytes(table: &ScheduleTable) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    sheet.write_string(0, 0, "Floor")?;
    for (col, header) in (1u16..).zip(&table.columns) {
        sheet.write_string(0, col, header)?;
    }
    for (row_idx, row) in (1u32..).zip(&table.rows) {
        sheet.write_string(row_idx, 0, &row.floor)?;
        for (col, cell) in (1u16..).zip(&row.cells) {
            sheet.write_string(row_idx, col, cell)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Writes the table in the given format
pub fn write_schedule_to<W: Write>(
    mut writer: W,
    table: &ScheduleTable,
    format: ExportFormat,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => write_csv(writer, table),
        ExportFormat::Text => {
            writeln!(writer, "Generated {}", Local::now().format("%Y-%m-%d %H:%M"))?;
            writeln!(writer)?;
            write!(writer, "{}", render_table(table))?;
            Ok(())
        }
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, table)?;
            writeln!(writer)?;
            Ok(())
        }
        ExportFormat::Xlsx => {
            writer.write_all(&xlsx_bytes(table)?)?;
            Ok(())
        }
    }
}

/// Saves the table to a file, choosing the format from its extension
pub fn write_schedule<P: AsRef<Path>>(
    path: P,
    table: &ScheduleTable,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let format = ExportFormat::from_path(path)?;
    let file = File::create(path)?;
    write_schedule_to(file, table, format)?;
    info!(path = %path.display(), ?format, "schedule saved");
    Ok(())
}
