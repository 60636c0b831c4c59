use chrono::NaiveDate;

use crate::color::ColorMap;
use crate::data::aggregate::{monthly_post_totals, MonthlyAggregate};
use crate::data::coerce::coerce_numeric;
use crate::data::derive::add_interactions_per_1000;
use crate::data::filter::{filtered_indices, FilterCriteria};
use crate::data::model::{columns, Dataset, Record};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until the user loads a file).  Read-only once
    /// the cleaning passes in [`AppState::set_dataset`] have run.
    pub dataset: Option<Dataset>,

    /// Current platform + date-range selection.
    pub criteria: FilterCriteria,

    /// Indices of records passing the current criteria (cached).
    pub visible_indices: Vec<usize>,

    /// Monthly post totals over the visible records (cached).
    pub monthly_posts: Vec<MonthlyAggregate>,

    /// Platform → chart colour.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            criteria: FilterCriteria::default(),
            visible_indices: Vec::new(),
            monthly_posts: Vec::new(),
            color_map: ColorMap::default(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: run the cleaning passes once, select
    /// everything, and rebuild the caches.
    pub fn set_dataset(&mut self, mut dataset: Dataset) {
        coerce_numeric(&mut dataset, &columns::NUMERIC);
        add_interactions_per_1000(&mut dataset);

        self.criteria = FilterCriteria::select_all(&dataset);
        self.color_map = ColorMap::new(&dataset.platforms);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
        self.refilter();
    }

    /// Recompute `visible_indices` and the monthly aggregates after a
    /// criteria change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.criteria);
            self.monthly_posts =
                monthly_post_totals(self.visible_indices.iter().map(|&i| &ds.records[i]));
        }
    }

    /// The records passing the current criteria, in dataset order.
    pub fn visible_records(&self) -> impl Iterator<Item = &Record> + '_ {
        let dataset = self.dataset.as_ref();
        self.visible_indices
            .iter()
            .filter_map(move |&i| dataset.map(|ds| &ds.records[i]))
    }

    /// Toggle a single platform in the selection.
    pub fn toggle_platform(&mut self, platform: &str) {
        if !self.criteria.platforms.remove(platform) {
            self.criteria.platforms.insert(platform.to_string());
        }
        self.refilter();
    }

    /// Select every platform present in the dataset.
    pub fn select_all_platforms(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria.platforms = ds.platforms.clone();
        }
        self.refilter();
    }

    /// Clear the platform selection (hides everything).
    pub fn select_no_platforms(&mut self) {
        self.criteria.platforms.clear();
        self.refilter();
    }

    /// Apply a new date range.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.criteria.start = start;
        self.criteria.end = end;
        self.refilter();
    }

    /// Reset the date range to the dataset's full span.
    pub fn reset_date_range(&mut self) {
        if let Some((start, end)) = self.dataset.as_ref().and_then(|ds| ds.date_range) {
            self.set_date_range(start, end);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::model::CellValue;

    fn dataset() -> Dataset {
        let mut records = Vec::new();
        for (platform, ymd, followers) in [
            ("Instagram", (2024, 1, 5), "1000"),
            ("Facebook", (2024, 2, 10), "N/A"),
        ] {
            let mut metrics = BTreeMap::new();
            metrics.insert(
                columns::FOLLOWERS.to_string(),
                CellValue::Text(followers.to_string()),
            );
            records.push(Record {
                platform: Some(platform.to_string()),
                date: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2),
                metrics,
            });
        }
        Dataset::from_records(records, Vec::new())
    }

    #[test]
    fn set_dataset_cleans_and_selects_everything() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        let ds = state.dataset.as_ref().unwrap();
        // coercion ran: "1000" is numeric, "N/A" is missing
        assert_eq!(ds.records[0].metric(columns::FOLLOWERS), Some(1000.0));
        assert!(ds.records[1].metrics[columns::FOLLOWERS].is_missing());
        // everything selected and visible
        assert_eq!(state.criteria.platforms.len(), 2);
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn toggling_a_platform_refilters() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        state.toggle_platform("Facebook");
        assert_eq!(state.visible_indices, vec![0]);
        state.toggle_platform("Facebook");
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn narrowing_the_date_range_refilters() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        state.set_date_range(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
        );
        assert_eq!(state.visible_indices, vec![1]);

        state.reset_date_range();
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn deselecting_everything_empties_the_caches() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        state.select_no_platforms();
        assert!(state.visible_indices.is_empty());
        assert!(state.monthly_posts.is_empty());
    }
}
