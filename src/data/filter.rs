use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Filter criteria: selected platforms + inclusive date range
// ---------------------------------------------------------------------------

/// User-selected platform set plus an inclusive `[start, end]` date range.
/// Rebuilt from the UI controls on every interaction; nothing here persists.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub platforms: BTreeSet<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            platforms: BTreeSet::new(),
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        }
    }
}

impl FilterCriteria {
    /// Criteria that keep everything: all platforms, the dataset's full
    /// date range.  The range falls back to `[MIN, MAX]` when no record
    /// carries a date.
    pub fn select_all(dataset: &Dataset) -> Self {
        let (start, end) = dataset
            .date_range
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        FilterCriteria {
            platforms: dataset.platforms.clone(),
            start,
            end,
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Indices of records passing the criteria, in dataset order.
///
/// A record passes when its platform is a member of the selected set and its
/// date lies inside the inclusive range.  A record without a platform can
/// never be a member; a record without a date can never satisfy the range.
/// Never mutates the dataset; an empty result is a valid outcome, not an
/// error.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            let platform_ok = rec
                .platform
                .as_ref()
                .is_some_and(|p| criteria.platforms.contains(p));
            let date_ok = rec
                .date
                .is_some_and(|d| d >= criteria.start && d <= criteria.end);
            platform_ok && date_ok
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::model::Record;

    fn rec(platform: Option<&str>, date: Option<(i32, u32, u32)>) -> Record {
        Record {
            platform: platform.map(str::to_string),
            date: date.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            metrics: BTreeMap::new(),
        }
    }

    fn sample() -> Dataset {
        Dataset::from_records(
            vec![
                rec(Some("Instagram"), Some((2024, 1, 5))),
                rec(Some("Facebook"), Some((2024, 2, 10))),
                rec(Some("Instagram"), Some((2024, 3, 1))),
                rec(Some("TikTok"), None),
                rec(None, Some((2024, 1, 20))),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn select_all_keeps_every_dated_record_with_a_platform() {
        let ds = sample();
        let criteria = FilterCriteria::select_all(&ds);
        // identity over everything that can satisfy both predicates
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 1, 2]);
    }

    #[test]
    fn records_without_a_date_are_excluded_under_any_range() {
        let ds = sample();
        let mut criteria = FilterCriteria::select_all(&ds);
        criteria.start = NaiveDate::MIN;
        criteria.end = NaiveDate::MAX;
        assert!(!filtered_indices(&ds, &criteria).contains(&3));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let ds = sample();
        let criteria = FilterCriteria {
            platforms: ds.platforms.clone(),
            start: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
        };
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 1]);
    }

    #[test]
    fn platform_membership_is_exact() {
        let ds = sample();
        let criteria = FilterCriteria {
            platforms: ["Instagram".to_string()].into(),
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        };
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 2]);
    }

    #[test]
    fn empty_platform_set_yields_empty_result_not_an_error() {
        let ds = sample();
        let criteria = FilterCriteria {
            platforms: BTreeSet::new(),
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        };
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    #[test]
    fn filtering_does_not_mutate_the_dataset() {
        let ds = sample();
        let before = ds.len();
        let _ = filtered_indices(&ds, &FilterCriteria::default());
        assert_eq!(ds.len(), before);
    }
}
