//! CSV upload → TrainingDataset
//!
//! Header-driven: the first non-blank record names the columns. Only schema
//! columns are parsed as numbers, so extra text columns (batch ids, dates)
//! are carried through untouched and then ignored.

use crate::error::{Error, Result};
use crate::logic::features::{validate_columns, FEATURE_LAYOUT, TARGET_NAME};

use super::TrainingDataset;

const UTF8_BOM: char = '\u{feff}';

pub fn parse_csv(bytes: &[u8]) -> Result<TrainingDataset> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::DataFormat(format!("Could not parse CSV: not UTF-8 ({e})")))?;
    let text = text.trim_start_matches(UTF8_BOM);

    let mut records = read_records(text).into_iter();

    let header = records
        .next()
        .map(|record| record.cells)
        .ok_or_else(|| Error::DataFormat("Could not parse CSV: file is empty".to_string()))?;
    validate_columns(&header)?;

    // Required columns in layout order, target last
    let required: Vec<(&str, usize)> = FEATURE_LAYOUT
        .iter()
        .copied()
        .chain(std::iter::once(TARGET_NAME))
        .filter_map(|name| header.iter().position(|h| h == name).map(|i| (name, i)))
        .collect();

    let mut table: Vec<Vec<f64>> = Vec::new();
    for Record { line: line_number, cells } in records {
        let mut row = Vec::with_capacity(required.len());
        for &(name, position) in &required {
            let cell = cells.get(position).map(String::as_str).unwrap_or("");
            if cell.is_empty() {
                return Err(Error::DataFormat(format!(
                    "line {line_number}: missing value for column '{name}'"
                )));
            }
            let value: f64 = cell.parse().map_err(|_| {
                Error::DataFormat(format!(
                    "line {line_number}, column '{name}': '{cell}' is not a number"
                ))
            })?;
            if !value.is_finite() {
                return Err(Error::DataFormat(format!(
                    "line {line_number}, column '{name}': value must be finite"
                )));
            }
            row.push(value);
        }
        table.push(row);
    }

    if table.is_empty() {
        return Err(Error::DataFormat("Could not parse CSV: no data rows".to_string()));
    }

    let columns: Vec<&str> = required.iter().map(|(name, _)| *name).collect();
    TrainingDataset::from_table(&columns, &table)
}

/// One CSV record and the line it starts on (1-based)
#[derive(Debug, PartialEq)]
struct Record {
    line: usize,
    cells: Vec<String>,
}

/// Split the whole text into records.
///
/// Double-quoted cells may hold commas, `""` escapes and line breaks. Cells
/// are trimmed and blank records skipped.
fn read_records(text: &str) -> Vec<Record> {
    let mut records = Vec::new();
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                cells.push(current.trim().to_string());
                current.clear();
            }
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                cells.push(current.trim().to_string());
                current.clear();
                push_record(&mut records, record_line, std::mem::take(&mut cells));
                line += 1;
                record_line = line;
            }
            '\n' => {
                current.push(c);
                line += 1;
            }
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());
    push_record(&mut records, record_line, cells);

    records
}

fn push_record(records: &mut Vec<Record>, line: usize, cells: Vec<String>) {
    let blank = cells.len() == 1 && cells[0].is_empty();
    if !blank {
        records.push(Record { line, cells });
    }
}

#[cfg(test)]
mod tests {
    use super::{read_records, Record};

    fn cells(text: &str) -> Vec<Vec<String>> {
        read_records(text).into_iter().map(|r| r.cells).collect()
    }

    #[test]
    fn test_split_plain() {
        assert_eq!(cells("a, b ,c"), vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_split_quoted_comma_and_escape() {
        assert_eq!(
            cells(r#""kiln, east",1.5,"say ""hi""""#),
            vec![vec!["kiln, east", "1.5", r#"say "hi""#]]
        );
    }

    #[test]
    fn test_split_trailing_empty_and_crlf() {
        assert_eq!(cells("1,2,\r\n3,4,5\r\n"), vec![vec!["1", "2", ""], vec!["3", "4", "5"]]);
    }

    #[test]
    fn test_quoted_line_break_stays_in_cell() {
        let records = read_records("note,x\n\"first\r\nsecond\",1\n\n\"a\",2\n");
        assert_eq!(
            records,
            vec![
                Record { line: 1, cells: vec!["note".into(), "x".into()] },
                Record { line: 2, cells: vec!["first\r\nsecond".into(), "1".into()] },
                Record { line: 5, cells: vec!["a".into(), "2".into()] },
            ]
        );
    }
}
