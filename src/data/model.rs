use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Column labels
// ---------------------------------------------------------------------------

/// Canonical column labels of the metrics export (trimmed form).
pub mod columns {
    pub const PLATFORM: &str = "Plataforma";
    pub const DATE: &str = "Fecha";
    pub const FOLLOWERS: &str = "Seguidores";
    pub const REACH: &str = "Alcance";
    pub const INTERACTIONS: &str = "Interacciones";
    pub const ENGAGEMENT_RATE: &str = "Engagement Rate";
    pub const POST_COUNT: &str = "Cantidad de Posts";
    pub const FOLLOWER_GROWTH_PCT: &str = "Crecimiento de Seguidores (%)";
    pub const CTR: &str = "CTR";
    /// Derived: `Interacciones / Seguidores * 1000`.
    pub const INTERACTIONS_PER_1000: &str = "Interacciones por 1000 seguidores";

    /// Columns forced to numeric semantics by the coercion pass.
    pub const NUMERIC: [&str; 7] = [
        FOLLOWERS,
        REACH,
        INTERACTIONS,
        ENGAGEMENT_RATE,
        POST_COUNT,
        FOLLOWER_GROWTH_PCT,
        CTR,
    ];
}

// ---------------------------------------------------------------------------
// CellValue – a single metric cell
// ---------------------------------------------------------------------------

/// A metric cell as read from the source file.
///
/// `Missing` is an explicit marker distinct from zero; numeric access goes
/// through [`CellValue::as_f64`] so missing values propagate as `None`
/// instead of NaN.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Numeric view of the cell; `None` for text and missing cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            // Missing renders blank, like an empty spreadsheet cell
            CellValue::Missing => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// One row of platform metrics for one date.
///
/// Rows lacking a platform or date are preserved as loaded; downstream
/// stages decide what to do with them (the filter excludes undated rows).
#[derive(Debug, Clone)]
pub struct Record {
    pub platform: Option<String>,
    pub date: Option<NaiveDate>,
    /// Metric columns keyed by trimmed header label.
    pub metrics: BTreeMap<String, CellValue>,
}

impl Record {
    /// Numeric value of a metric column; `None` when absent, textual, or
    /// missing.
    pub fn metric(&self, column: &str) -> Option<f64> {
        self.metrics.get(column).and_then(CellValue::as_f64)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full loaded dataset with pre-computed platform set and date bounds.
/// Row order is source file order.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records (rows).
    pub records: Vec<Record>,
    /// Column labels in source-header order (trimmed), used for table display.
    pub columns: Vec<String>,
    /// Sorted set of distinct platform names present.
    pub platforms: BTreeSet<String>,
    /// Earliest and latest dates present; `None` when no record has a date.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl Dataset {
    /// Build platform and date indices from the loaded records.
    pub fn from_records(records: Vec<Record>, columns: Vec<String>) -> Self {
        let mut platforms = BTreeSet::new();
        let mut date_range: Option<(NaiveDate, NaiveDate)> = None;

        for rec in &records {
            if let Some(p) = &rec.platform {
                platforms.insert(p.clone());
            }
            if let Some(d) = rec.date {
                date_range = Some(match date_range {
                    Some((min, max)) => (min.min(d), max.max(d)),
                    None => (d, d),
                });
            }
        }

        Dataset {
            records,
            columns,
            platforms,
            date_range,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Register a derived column so the table shows it after the source
    /// columns. No-op when the label is already present.
    pub fn add_column(&mut self, label: &str) {
        if !self.columns.iter().any(|c| c == label) {
            self.columns.push(label.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(platform: Option<&str>, date: Option<NaiveDate>) -> Record {
        Record {
            platform: platform.map(str::to_string),
            date,
            metrics: BTreeMap::new(),
        }
    }

    #[test]
    fn dataset_indexes_platforms_and_date_bounds() {
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let ds = Dataset::from_records(
            vec![
                rec(Some("Instagram"), Some(d2)),
                rec(Some("Facebook"), Some(d1)),
                rec(None, None),
            ],
            vec![columns::PLATFORM.into(), columns::DATE.into()],
        );
        assert_eq!(ds.len(), 3);
        assert!(ds.platforms.contains("Instagram"));
        assert!(ds.platforms.contains("Facebook"));
        assert_eq!(ds.platforms.len(), 2);
        assert_eq!(ds.date_range, Some((d1, d2)));
    }

    #[test]
    fn dataset_without_dates_has_no_range() {
        let ds = Dataset::from_records(vec![rec(Some("X"), None)], vec![]);
        assert_eq!(ds.date_range, None);
    }

    #[test]
    fn add_column_is_idempotent() {
        let mut ds = Dataset::from_records(vec![], vec!["A".into()]);
        ds.add_column("B");
        ds.add_column("B");
        assert_eq!(ds.columns, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn missing_cell_is_not_numeric() {
        assert_eq!(CellValue::Missing.as_f64(), None);
        assert_eq!(CellValue::Text("N/A".into()).as_f64(), None);
        assert_eq!(CellValue::Number(3.0).as_f64(), Some(3.0));
    }
}
