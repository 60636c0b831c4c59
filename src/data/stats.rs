use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::model::Record;

// ---------------------------------------------------------------------------
// Summary statistics and chart series over filtered records
// ---------------------------------------------------------------------------

/// Mean of a metric column, ignoring missing values.
///
/// `None` when no record carries a value — the KPI widgets render that as
/// "–" instead of a NaN.
pub fn mean_metric<'a, I>(records: I, column: &str) -> Option<f64>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for rec in records {
        if let Some(v) = rec.metric(column) {
            sum += v;
            count += 1;
        }
    }
    (count > 0).then(|| sum / count as f64)
}

/// Per-platform `(date, value)` series for one metric column.
///
/// Rows with a missing value, no date, or no platform are dropped before
/// charting, so a gap in the data is a gap in the chart rather than a zero.
/// Within each platform the dataset's row order is preserved; platforms
/// iterate in name order.
pub fn platform_series<'a, I>(records: I, column: &str) -> BTreeMap<String, Vec<(NaiveDate, f64)>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut series: BTreeMap<String, Vec<(NaiveDate, f64)>> = BTreeMap::new();
    for rec in records {
        let (Some(platform), Some(date), Some(value)) =
            (rec.platform.as_ref(), rec.date, rec.metric(column))
        else {
            continue;
        };
        series
            .entry(platform.clone())
            .or_default()
            .push((date, value));
    }
    series
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::model::CellValue;

    fn rec(platform: &str, ymd: Option<(i32, u32, u32)>, value: Option<f64>) -> Record {
        let mut metrics = BTreeMap::new();
        metrics.insert(
            "Seguidores".to_string(),
            value.map_or(CellValue::Missing, CellValue::Number),
        );
        Record {
            platform: Some(platform.to_string()),
            date: ymd.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            metrics,
        }
    }

    #[test]
    fn mean_skips_missing_values() {
        let records = vec![
            rec("A", None, Some(100.0)),
            rec("A", None, None),
            rec("A", None, Some(300.0)),
        ];
        assert_eq!(mean_metric(&records, "Seguidores"), Some(200.0));
    }

    #[test]
    fn mean_of_all_missing_is_none() {
        let records = vec![rec("A", None, None)];
        assert_eq!(mean_metric(&records, "Seguidores"), None);
        assert_eq!(mean_metric(std::iter::empty::<&Record>(), "Seguidores"), None);
    }

    #[test]
    fn series_drop_missing_values_and_undated_rows() {
        let records = vec![
            rec("Instagram", Some((2024, 1, 5)), Some(1000.0)),
            rec("Instagram", Some((2024, 1, 6)), None),
            rec("Instagram", None, Some(1200.0)),
            rec("Facebook", Some((2024, 1, 5)), Some(500.0)),
        ];
        let series = platform_series(&records, "Seguidores");
        assert_eq!(series.len(), 2);
        assert_eq!(series["Instagram"].len(), 1);
        assert_eq!(
            series["Instagram"][0],
            (NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(), 1000.0)
        );
        assert_eq!(series["Facebook"].len(), 1);
    }
}
