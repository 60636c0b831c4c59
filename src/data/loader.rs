use std::collections::BTreeMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDate;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{columns, CellValue, Dataset, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a metrics dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xls` / `.ods` – spreadsheet export (recommended)
/// * `.csv`  – same columns, comma separated
/// * `.json` – `[{ "Plataforma": "...", "Fecha": "05/01/2024", ...metrics }, ...]`
///
/// Header labels are trimmed of surrounding whitespace before anything looks
/// at them.  `Plataforma` and `Fecha` must exist after trimming.  Metric
/// cells are loaded raw; forcing them to numbers is the coercion pass's job.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => load_workbook(path),
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Date parsing
// ---------------------------------------------------------------------------

/// Accepted `Fecha` formats.  The exports use day-first dates; ISO is also
/// accepted since it is unambiguous.
const DATE_FORMATS: [&str; 3] = ["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];

/// `row` is the source row number as a user would see it (header row = 1).
fn parse_day_first(s: &str, row: usize) -> Result<NaiveDate, LoadError> {
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(LoadError::DateParse {
        row,
        value: s.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Header handling
// ---------------------------------------------------------------------------

struct Header {
    labels: Vec<String>,
    platform_idx: usize,
    date_idx: usize,
}

/// Trim every label and locate the two required columns.
fn index_header(raw_labels: Vec<String>) -> Result<Header, LoadError> {
    let labels: Vec<String> = raw_labels.iter().map(|l| l.trim().to_string()).collect();

    let platform_idx = labels
        .iter()
        .position(|l| l == columns::PLATFORM)
        .ok_or_else(|| LoadError::MissingColumn(columns::PLATFORM.to_string()))?;
    let date_idx = labels
        .iter()
        .position(|l| l == columns::DATE)
        .ok_or_else(|| LoadError::MissingColumn(columns::DATE.to_string()))?;

    Ok(Header {
        labels,
        platform_idx,
        date_idx,
    })
}

fn platform_from_str(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let header = index_header(
        reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>(),
    )?;

    let mut records = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let row_no = i + 2; // header is row 1
        let row = result?;

        let platform = row
            .get(header.platform_idx)
            .and_then(platform_from_str);

        let date = match row.get(header.date_idx).map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(parse_day_first(s, row_no)?),
        };

        let mut metrics = BTreeMap::new();
        for (col_idx, value) in row.iter().enumerate() {
            if col_idx == header.platform_idx || col_idx == header.date_idx {
                continue;
            }
            let Some(label) = header.labels.get(col_idx) else {
                continue;
            };
            let cell = if value.trim().is_empty() {
                CellValue::Missing
            } else {
                CellValue::Text(value.to_string())
            };
            metrics.insert(label.clone(), cell);
        }

        records.push(Record {
            platform,
            date,
            metrics,
        });
    }

    Ok(Dataset::from_records(records, header.labels))
}

// ---------------------------------------------------------------------------
// Workbook loader (xlsx / xls / ods via calamine)
// ---------------------------------------------------------------------------

/// Reads the first worksheet.  The exports put everything on one sheet.
fn load_workbook(path: &Path) -> Result<Dataset, LoadError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(LoadError::NoWorksheet)?;
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows = range.rows();
    let header = index_header(
        rows.next()
            .ok_or(LoadError::NoWorksheet)?
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>(),
    )?;

    let mut records = Vec::new();

    for (i, row) in rows.enumerate() {
        let row_no = i + 2;

        let platform = match row.get(header.platform_idx) {
            None | Some(Data::Empty) => None,
            Some(Data::String(s)) => platform_from_str(s),
            Some(other) => Some(other.to_string()),
        };

        let date = workbook_date(row.get(header.date_idx), row_no)?;

        let mut metrics = BTreeMap::new();
        for (col_idx, label) in header.labels.iter().enumerate() {
            if col_idx == header.platform_idx || col_idx == header.date_idx {
                continue;
            }
            let cell = row.get(col_idx).map_or(CellValue::Missing, workbook_cell);
            metrics.insert(label.clone(), cell);
        }

        records.push(Record {
            platform,
            date,
            metrics,
        });
    }

    Ok(Dataset::from_records(records, header.labels))
}

fn workbook_date(cell: Option<&Data>, row: usize) -> Result<Option<NaiveDate>, LoadError> {
    match cell {
        None | Some(Data::Empty) => Ok(None),
        Some(Data::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Data::String(s)) => parse_day_first(s.trim(), row).map(Some),
        Some(Data::DateTimeIso(s)) => parse_day_first(s.trim(), row).map(Some),
        Some(Data::DateTime(dt)) => {
            dt.as_datetime()
                .map(|t| Some(t.date()))
                .ok_or_else(|| LoadError::DateParse {
                    row,
                    value: dt.as_f64().to_string(),
                })
        }
        Some(other) => Err(LoadError::DateParse {
            row,
            value: other.to_string(),
        }),
    }
}

fn workbook_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Missing,
        Data::String(s) if s.trim().is_empty() => CellValue::Missing,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        // serial date in a metric column: keep the raw number
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        // #DIV/0! and friends are data-quality issues, not load failures
        Data::Error(_) => CellValue::Missing,
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Plataforma": "Instagram", "Fecha": "05/01/2024", "Seguidores": 1000 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;
    let rows = root.as_array().ok_or(LoadError::JsonShape)?;

    let mut records = Vec::new();
    let mut labels = vec![columns::PLATFORM.to_string(), columns::DATE.to_string()];

    for (i, row) in rows.iter().enumerate() {
        let row_no = i + 1; // no header row in JSON
        let obj = row.as_object().ok_or(LoadError::JsonShape)?;

        let mut platform = None;
        let mut date = None;
        let mut metrics = BTreeMap::new();

        for (key, value) in obj {
            let label = key.trim();
            if label == columns::PLATFORM {
                platform = value.as_str().and_then(platform_from_str);
            } else if label == columns::DATE {
                date = match value {
                    JsonValue::Null => None,
                    JsonValue::String(s) if s.trim().is_empty() => None,
                    JsonValue::String(s) => Some(parse_day_first(s.trim(), row_no)?),
                    other => {
                        return Err(LoadError::DateParse {
                            row: row_no,
                            value: other.to_string(),
                        })
                    }
                };
            } else {
                if !labels.iter().any(|l| l == label) {
                    labels.push(label.to_string());
                }
                metrics.insert(label.to_string(), json_cell(value));
            }
        }

        records.push(Record {
            platform,
            date,
            metrics,
        });
    }

    Ok(Dataset::from_records(records, labels))
}

fn json_cell(value: &JsonValue) -> CellValue {
    match value {
        JsonValue::Null => CellValue::Missing,
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) => CellValue::Number(f),
            None => CellValue::Text(n.to_string()),
        },
        JsonValue::String(s) if s.trim().is_empty() => CellValue::Missing,
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
