use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Permissive numeric coercion
// ---------------------------------------------------------------------------

/// Force the given columns to numeric semantics.
///
/// Text that parses as a finite float becomes a number; everything else
/// becomes missing.  Invalid numeric text is a data-quality signal, not a
/// failure, so this never errors.  Columns a record does not carry are
/// skipped, and running the pass twice leaves the dataset unchanged.
///
/// All of the "permissive parsing" policy lives here; the loaders hand
/// cells over raw.
pub fn coerce_numeric(dataset: &mut Dataset, targets: &[&str]) {
    for rec in &mut dataset.records {
        for &col in targets {
            if let Some(cell) = rec.metrics.get_mut(col) {
                let coerced = coerce_cell(cell);
                *cell = coerced;
            }
        }
    }
}

fn coerce_cell(cell: &CellValue) -> CellValue {
    match cell {
        CellValue::Number(v) if v.is_finite() => CellValue::Number(*v),
        // non-finite values must never leak into charts
        CellValue::Number(_) => CellValue::Missing,
        CellValue::Text(s) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => CellValue::Number(v),
            _ => CellValue::Missing,
        },
        CellValue::Missing => CellValue::Missing,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::model::Record;

    fn dataset(cells: &[(&str, CellValue)]) -> Dataset {
        let mut metrics = BTreeMap::new();
        for (col, cell) in cells {
            metrics.insert(col.to_string(), cell.clone());
        }
        Dataset::from_records(
            vec![Record {
                platform: Some("Instagram".into()),
                date: None,
                metrics,
            }],
            Vec::new(),
        )
    }

    fn cell<'a>(ds: &'a Dataset, col: &str) -> &'a CellValue {
        ds.records[0].metrics.get(col).unwrap()
    }

    #[test]
    fn numeric_text_becomes_a_number() {
        let mut ds = dataset(&[("Seguidores", CellValue::Text(" 1234.5 ".into()))]);
        coerce_numeric(&mut ds, &["Seguidores"]);
        assert_eq!(cell(&ds, "Seguidores"), &CellValue::Number(1234.5));
    }

    #[test]
    fn garbage_text_becomes_missing_not_an_error() {
        let mut ds = dataset(&[("Seguidores", CellValue::Text("N/A".into()))]);
        coerce_numeric(&mut ds, &["Seguidores"]);
        assert_eq!(cell(&ds, "Seguidores"), &CellValue::Missing);
    }

    #[test]
    fn non_finite_numbers_become_missing() {
        let mut ds = dataset(&[("CTR", CellValue::Number(f64::INFINITY))]);
        coerce_numeric(&mut ds, &["CTR"]);
        assert_eq!(cell(&ds, "CTR"), &CellValue::Missing);
    }

    #[test]
    fn absent_columns_are_skipped() {
        let mut ds = dataset(&[("Alcance", CellValue::Text("7".into()))]);
        coerce_numeric(&mut ds, &["Seguidores", "Alcance"]);
        assert_eq!(cell(&ds, "Alcance"), &CellValue::Number(7.0));
        assert!(!ds.records[0].metrics.contains_key("Seguidores"));
    }

    #[test]
    fn coercion_is_idempotent() {
        let mut once = dataset(&[
            ("Seguidores", CellValue::Text("100".into())),
            ("Alcance", CellValue::Text("nope".into())),
            ("CTR", CellValue::Missing),
        ]);
        coerce_numeric(&mut once, &["Seguidores", "Alcance", "CTR"]);
        let mut twice = once.clone();
        coerce_numeric(&mut twice, &["Seguidores", "Alcance", "CTR"]);

        for col in ["Seguidores", "Alcance", "CTR"] {
            assert_eq!(cell(&once, col), cell(&twice, col));
        }
    }
}
