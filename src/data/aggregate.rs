use super::model::{columns, Record};

// ---------------------------------------------------------------------------
// Monthly post totals
// ---------------------------------------------------------------------------

/// Summed post count for one (month, platform) group.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAggregate {
    /// Fixed-width `YYYY-MM` label derived from the record date.
    pub month: String,
    pub platform: String,
    pub posts: f64,
}

/// Group records by (month, platform) and sum `Cantidad de Posts`.
///
/// A missing post count contributes 0 to its group's sum; a group whose rows
/// are all missing still appears with a total of 0.  Records without a date
/// or platform cannot be assigned to a group and are skipped (the filter
/// upstream already excludes them).  Output order is first-seen order of
/// each group key, so identical input always yields identical output.
pub fn monthly_post_totals<'a, I>(records: I) -> Vec<MonthlyAggregate>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: Vec<MonthlyAggregate> = Vec::new();

    for rec in records {
        let (Some(date), Some(platform)) = (rec.date, rec.platform.as_ref()) else {
            continue;
        };
        let month = date.format("%Y-%m").to_string();
        let posts = rec.metric(columns::POST_COUNT).unwrap_or(0.0);

        match groups
            .iter_mut()
            .find(|g| g.month == month && g.platform == *platform)
        {
            Some(group) => group.posts += posts,
            None => groups.push(MonthlyAggregate {
                month,
                platform: platform.clone(),
                posts,
            }),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::CellValue;

    fn rec(platform: &str, ymd: (i32, u32, u32), posts: Option<f64>) -> Record {
        let mut metrics = BTreeMap::new();
        metrics.insert(
            columns::POST_COUNT.to_string(),
            posts.map_or(CellValue::Missing, CellValue::Number),
        );
        Record {
            platform: Some(platform.to_string()),
            date: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2),
            metrics,
        }
    }

    #[test]
    fn sums_per_month_and_platform_in_first_seen_order() {
        let records = vec![
            rec("Instagram", (2024, 1, 5), Some(3.0)),
            rec("Facebook", (2024, 1, 8), Some(1.0)),
            rec("Instagram", (2024, 1, 20), Some(4.0)),
            rec("Instagram", (2024, 2, 10), Some(2.0)),
        ];
        let totals = monthly_post_totals(&records);
        assert_eq!(
            totals,
            vec![
                MonthlyAggregate {
                    month: "2024-01".into(),
                    platform: "Instagram".into(),
                    posts: 7.0
                },
                MonthlyAggregate {
                    month: "2024-01".into(),
                    platform: "Facebook".into(),
                    posts: 1.0
                },
                MonthlyAggregate {
                    month: "2024-02".into(),
                    platform: "Instagram".into(),
                    posts: 2.0
                },
            ]
        );
    }

    #[test]
    fn missing_post_counts_sum_as_zero() {
        let records = vec![
            rec("Instagram", (2024, 1, 5), Some(3.0)),
            rec("Instagram", (2024, 1, 6), None),
        ];
        let totals = monthly_post_totals(&records);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].posts, 3.0);
    }

    #[test]
    fn all_missing_group_still_appears_with_zero_total() {
        let records = vec![rec("TikTok", (2024, 3, 1), None)];
        let totals = monthly_post_totals(&records);
        assert_eq!(totals[0].posts, 0.0);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(monthly_post_totals(std::iter::empty::<&Record>()).is_empty());
    }
}
