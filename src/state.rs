use std::collections::BTreeSet;

use crate::analysis::Summary;
use crate::color::ColorMap;
use crate::data::filter::{FilterState, filtered_indices, init_filter_state};
use crate::data::model::{Column, EmployeeRecord, HrDataset};

// ---------------------------------------------------------------------------
// Chart windows
// ---------------------------------------------------------------------------

/// The floating windows the app can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    GenderCount,
    SalaryByDepartment,
    PayGapByDepartment,
    GenderHeatmap,
    SummaryTables,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::GenderCount,
        ChartKind::SalaryByDepartment,
        ChartKind::PayGapByDepartment,
        ChartKind::GenderHeatmap,
        ChartKind::SummaryTables,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::GenderCount => "Gender Count in Organization",
            ChartKind::SalaryByDepartment => "Average Salary by Department",
            ChartKind::PayGapByDepartment => "Gender Pay Gap by Department",
            ChartKind::GenderHeatmap => "Gender Distribution by Department",
            ChartKind::SummaryTables => "Summary Tables",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<HrDataset>,

    /// Per-column filter selections.
    pub filters: FilterState,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregates over the visible records (cached).
    pub summary: Option<Summary>,

    /// Gender colours shared by the charts and the filter panel.
    pub color_map: Option<ColorMap>,

    /// Which chart windows are open, indexed by [`ChartKind`].
    pub open_windows: [bool; ChartKind::ALL.len()],

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            summary: None,
            color_map: None,
            open_windows: [true; ChartKind::ALL.len()],
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, initialise filters and colours.
    pub fn set_dataset(&mut self, dataset: HrDataset) {
        self.filters = init_filter_state(&dataset);
        self.color_map = dataset
            .unique_values
            .get(&Column::Gender)
            .map(ColorMap::new);
        self.dataset = Some(dataset);
        self.summary = None;
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` and the summary after a filter change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let visible = filtered_indices(ds, &self.filters);
        if self.summary.is_some() && visible == self.visible_indices {
            return;
        }
        log::debug!("{} of {} records pass the filters", visible.len(), ds.len());

        let records: Vec<EmployeeRecord> = visible.iter().map(|&i| ds.records[i].clone()).collect();
        self.summary = Some(Summary::compute(&records));
        self.visible_indices = visible;
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: Column, value: &str) {
        let selected = self.filters.entry(column).or_default();
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: Column) {
        if let Some(ds) = &self.dataset {
            if let Some(all_vals) = ds.unique_values.get(&column) {
                self.filters.insert(column, all_vals.clone());
                self.refilter();
            }
        }
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: Column) {
        self.filters.insert(column, BTreeSet::new());
        self.refilter();
    }

    pub fn is_open(&self, kind: ChartKind) -> bool {
        self.open_windows[kind.index()]
    }

    pub fn window_flag(&mut self, kind: ChartKind) -> &mut bool {
        &mut self.open_windows[kind.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_csv_reader;

    const SAMPLE: &str = "\
Name,Gender,Department,Location,Salary,Rating
Ana,Female,IT,Berlin,\"$52,000\",Very Good
Ben,Male,IT,Berlin,\"$48,000\",Good
Cy,Male,Sales,Paris,\"$30,000\",Fair
";

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(load_csv_reader(SAMPLE.as_bytes()).unwrap());
        state
    }

    #[test]
    fn loading_computes_summary_over_everything() {
        let state = loaded();
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.summary.as_ref().unwrap().employees, 3);
        assert!(state.color_map.is_some());
        assert!(ChartKind::ALL.iter().all(|k| state.is_open(*k)));
    }

    #[test]
    fn toggling_a_value_recomputes_the_summary() {
        let mut state = loaded();
        state.toggle_filter_value(Column::Department, "Sales");
        assert_eq!(state.visible_indices, vec![0, 1]);
        let summary = state.summary.as_ref().unwrap();
        assert_eq!(summary.employees, 2);
        assert_eq!(summary.avg_salary_by_department[0].value, 50000.0);

        state.toggle_filter_value(Column::Department, "Sales");
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn select_none_then_all() {
        let mut state = loaded();
        state.select_none(Column::Gender);
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.summary.as_ref().unwrap().employees, 0);

        state.select_all(Column::Gender);
        assert_eq!(state.visible_indices.len(), 3);
    }

    #[test]
    fn window_flags_toggle() {
        let mut state = AppState::default();
        *state.window_flag(ChartKind::GenderHeatmap) = false;
        assert!(!state.is_open(ChartKind::GenderHeatmap));
        assert!(state.is_open(ChartKind::GenderCount));
    }
}
