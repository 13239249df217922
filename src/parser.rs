use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::RosterError;

/// Supported names file layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFormat {
    /// One name per line
    Text,
    /// Header row, names in the first column
    Csv,
    /// First worksheet, header row, names in the first column
    Spreadsheet,
}

impl RosterFormat {
    /// Picks the format from the file extension (case-insensitive)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RosterError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        Self::from_extension(&ext)
    }

    pub fn from_extension(ext: &str) -> Result<Self, RosterError> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "txt" => Ok(RosterFormat::Text),
            "csv" => Ok(RosterFormat::Csv),
            "xlsx" | "xls" => Ok(RosterFormat::Spreadsheet),
            other => Err(RosterError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Removes empty names and repeats, keeping the first occurrence
pub fn dedupe_names<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|n| !n.is_empty() && seen.insert(n.clone()))
        .collect()
}

/// First-column cells of the first worksheet, below the header row
fn spreadsheet_names<R: Read>(mut reader: R) -> Result<Vec<String>, RosterError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(buf))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Ok(Vec::new()),
    };

    let names = range
        .rows()
        .skip(1)
        .filter_map(|row| match row.first() {
            None | Some(Data::Empty) => None,
            Some(cell) => Some(cell.to_string().trim().to_string()),
        })
        .filter(|name| !name.is_empty())
        .collect();
    Ok(names)
}

/// Parses names from a reader in the given format
pub fn parse_roster<R: Read>(
    reader: R,
    format: RosterFormat,
) -> Result<Vec<String>, RosterError> {
    let raw: Vec<String> = match format {
        RosterFormat::Text => {
            let mut names = Vec::new();
            for line in BufReader::new(reader).lines() {
                let line = line?;
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    names.push(trimmed.to_string());
                }
            }
            names
        }
        RosterFormat::Csv => {
            let mut csv_reader = ReaderBuilder::new()
                .has_headers(true)
                .flexible(true)
                .from_reader(reader);
            let mut names = Vec::new();
            for result in csv_reader.records() {
                let record = result?;
                let name = record.get(0).unwrap_or("").trim();
                if !name.is_empty() {
                    names.push(name.to_string());
                }
            }
            names
        }
        RosterFormat::Spreadsheet => spreadsheet_names(reader)?,
    };

    Ok(dedupe_names(raw))
}

/// Loads a deduplicated roster from a names file
pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<Vec<String>, RosterError> {
    let path = path.as_ref();
    let format = RosterFormat::from_path(path)?;
    let file = File::open(path)?;
    let names = parse_roster(file, format)?;
    if names.is_empty() {
        return Err(RosterError::Empty);
    }
    debug!(path = %path.display(), count = names.len(), "loaded roster");
    Ok(names)
}
