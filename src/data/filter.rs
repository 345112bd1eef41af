use std::collections::{BTreeMap, BTreeSet};

use super::model::{Column, HrDataset};

// ---------------------------------------------------------------------------
// Filter predicate: which unique values are selected per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps column → set of selected values.
/// If a column is absent it means "no filter" (show all).
pub type FilterState = BTreeMap<Column, BTreeSet<String>>;

/// Initialise a [`FilterState`] with all values selected (i.e., show everything).
pub fn init_filter_state(dataset: &HrDataset) -> FilterState {
    dataset
        .unique_values
        .iter()
        .map(|(col, vals)| (*col, vals.clone()))
        .collect()
}

/// Return indices of records that pass all active filters.
///
/// A record passes a column filter when:
/// * The column is not present in `filters` → passes (no constraint)
/// * Every unique value of the column is selected → passes, even when the
///   record has no value for that column
/// * The filter set for that column is empty → fails
/// * The record's value for that column is in the selected set → passes
pub fn filtered_indices(dataset: &HrDataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            for (col, selected) in filters {
                if let Some(all_vals) = dataset.unique_values.get(col) {
                    if selected.len() == all_vals.len() {
                        continue; // everything selected, no filtering needed
                    }
                }
                match rec.category(*col) {
                    Some(val) if selected.contains(val) => {}
                    _ => return false,
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect()
}
