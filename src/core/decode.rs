use crate::domain::model::{Record, RecordSet};
use crate::utils::error::{CheckError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use serde_json::Value;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

/// Input formats accepted by the upload operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xls,
    Xlsx,
}

impl FileFormat {
    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(FileFormat::Csv),
            Some("xls") => Ok(FileFormat::Xls),
            Some("xlsx") => Ok(FileFormat::Xlsx),
            _ => Err(CheckError::InputError {
                message: format!("Unsupported file type: {}", path),
            }),
        }
    }
}

/// Decode raw file bytes into the generic record set the extractor
/// consumes. The first row is taken as the header row.
pub fn decode(format: FileFormat, bytes: &[u8]) -> Result<RecordSet> {
    match format {
        FileFormat::Csv => decode_csv(bytes),
        FileFormat::Xls | FileFormat::Xlsx => decode_spreadsheet(bytes),
    }
}

fn decode_csv(bytes: &[u8]) -> Result<RecordSet> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut data = HashMap::new();
        for (i, cell) in row.iter().enumerate() {
            let Some(column) = columns.get(i) else {
                continue;
            };
            let value = if cell.is_empty() {
                Value::Null
            } else {
                Value::String(cell.to_string())
            };
            data.insert(column.clone(), value);
        }
        records.push(Record { data });
    }

    Ok(RecordSet { records, columns })
}

fn decode_spreadsheet(bytes: &[u8]) -> Result<RecordSet> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CheckError::InputError {
            message: "Spreadsheet contains no sheets".to_string(),
        })??;

    let mut rows = range.rows();
    let columns: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let name = cell.to_string().trim().to_string();
                if name.is_empty() {
                    format!("column{}", i + 1)
                } else {
                    name
                }
            })
            .collect(),
        None => Vec::new(),
    };

    let mut records = Vec::new();
    for row in rows {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        let mut data = HashMap::new();
        for (i, cell) in row.iter().enumerate() {
            let Some(column) = columns.get(i) else {
                continue;
            };
            data.insert(column.clone(), cell_to_value(cell));
        }
        records.push(Record { data });
    }

    Ok(RecordSet { records, columns })
}

/// Spreadsheet cells keep their native type so the normalizer can repair
/// numeric phone numbers; anything exotic degrades to text.
pub(crate) fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => Value::Number((*i).into()),
        Data::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Data::Bool(b) => Value::Bool(*b),
        Data::Error(_) => Value::Null,
        other => Value::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_from_path() {
        assert_eq!(FileFormat::from_path("contacts.csv").unwrap(), FileFormat::Csv);
        assert_eq!(FileFormat::from_path("contacts.XLSX").unwrap(), FileFormat::Xlsx);
        assert_eq!(
            FileFormat::from_path("uploads/1700000000-contacts.xls").unwrap(),
            FileFormat::Xls
        );
        assert!(FileFormat::from_path("contacts.txt").is_err());
        assert!(FileFormat::from_path("contacts").is_err());
    }

    #[test]
    fn test_decode_csv_basic() {
        let bytes = b"phonenumber,name\n9876543210,Asha\n,Blank\n98765 43210,Dup\n";
        let set = decode_csv(bytes).unwrap();

        assert_eq!(set.columns, vec!["phonenumber", "name"]);
        assert_eq!(set.records.len(), 3);
        assert_eq!(set.records[0].data["phonenumber"], json!("9876543210"));
        // Empty cells decode to null, not to an empty string.
        assert_eq!(set.records[1].data["phonenumber"], Value::Null);
        assert_eq!(set.records[2].data["name"], json!("Dup"));
    }

    #[test]
    fn test_decode_csv_ragged_rows() {
        let bytes = b"phonenumber,name\n9876543210\n";
        let set = decode_csv(bytes).unwrap();

        assert_eq!(set.records.len(), 1);
        assert_eq!(set.records[0].data["phonenumber"], json!("9876543210"));
        assert!(!set.records[0].data.contains_key("name"));
    }

    #[test]
    fn test_decode_csv_empty_file() {
        let set = decode_csv(b"").unwrap();
        assert!(set.columns.is_empty());
        assert!(set.records.is_empty());
    }

    #[test]
    fn test_cell_to_value_mapping() {
        assert_eq!(cell_to_value(&Data::Empty), Value::Null);
        assert_eq!(
            cell_to_value(&Data::String("9876543210".to_string())),
            json!("9876543210")
        );
        assert_eq!(cell_to_value(&Data::Int(9876543210)), json!(9876543210i64));
        assert_eq!(cell_to_value(&Data::Float(9.87654321e9)), json!(9876543210.0));
        assert_eq!(cell_to_value(&Data::Bool(true)), json!(true));
    }

    #[test]
    fn test_decode_rejects_garbage_spreadsheet() {
        assert!(decode_spreadsheet(b"definitely not a workbook").is_err());
    }
}
