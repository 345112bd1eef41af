use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::data::model::{Column, EmployeeRecord};

use super::{Count, GroupCounts, GroupValue, Pivot, Share};

pub const MALE: &str = "Male";
pub const FEMALE: &str = "Female";

// ---------------------------------------------------------------------------
// Building blocks
// ---------------------------------------------------------------------------

/// Arithmetic mean; NaN for an empty input.
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}

/// Mean of the parsed salaries, skipping missing ones.
pub fn mean_salary<'a>(records: impl IntoIterator<Item = &'a EmployeeRecord>) -> f64 {
    mean(records.into_iter().filter_map(|r| r.salary))
}

/// Split records by a categorical column.  Records missing the key are
/// dropped; groups iterate in ascending key order.
pub fn group_by(records: &[EmployeeRecord], key: Column) -> BTreeMap<&str, Vec<&EmployeeRecord>> {
    let mut groups: BTreeMap<&str, Vec<&EmployeeRecord>> = BTreeMap::new();
    for rec in records {
        if let Some(k) = rec.category(key) {
            groups.entry(k).or_default().push(rec);
        }
    }
    groups
}

/// Descending by value with NaN placed last.  Stable, so equal values keep
/// their incoming (key) order.
fn sort_descending(values: &mut [GroupValue]) {
    values.sort_by(|a, b| match (a.value.is_nan(), b.value.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal),
    });
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

/// Occurrences of each non-missing value in the order values were first seen.
pub fn counts_in_order<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> Vec<Count> {
    let mut counts: Vec<Count> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();

    for value in values.into_iter().flatten() {
        match position.get(value) {
            Some(&i) => counts[i].count += 1,
            None => {
                position.insert(value, counts.len());
                counts.push(Count {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts
}

/// Occurrences of each non-missing value, most frequent first.  Ties keep
/// the order in which values were first seen.
pub fn value_counts<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> Vec<Count> {
    let mut counts = counts_in_order(values);
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// `value_counts` of `value` inside every group of `group`.
pub fn grouped_value_counts(
    records: &[EmployeeRecord],
    group: Column,
    value: Column,
) -> Vec<GroupCounts> {
    group_by(records, group)
        .into_iter()
        .map(|(key, members)| GroupCounts {
            group: key.to_string(),
            counts: value_counts(members.iter().map(|r| r.category(value))),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Salary
// ---------------------------------------------------------------------------

/// Mean salary per group, highest first.  A group whose salaries are all
/// missing has a NaN mean and sorts last.
pub fn mean_salary_by(records: &[EmployeeRecord], key: Column) -> Vec<GroupValue> {
    let mut out: Vec<GroupValue> = group_by(records, key)
        .into_iter()
        .map(|(k, members)| GroupValue {
            group: k.to_string(),
            value: mean_salary(members),
        })
        .collect();
    sort_descending(&mut out);
    out
}

/// Male mean salary minus female mean salary.
///
/// NaN when either side has no salary to average; a one-sided group is not a
/// zero gap.
pub fn pay_gap<'a>(records: impl IntoIterator<Item = &'a EmployeeRecord> + Clone) -> f64 {
    let male = mean_salary(
        records
            .clone()
            .into_iter()
            .filter(|r| r.gender.as_deref() == Some(MALE)),
    );
    let female = mean_salary(
        records
            .into_iter()
            .filter(|r| r.gender.as_deref() == Some(FEMALE)),
    );
    male - female
}

/// Pay gap per group in ascending key order.
pub fn pay_gap_by(records: &[EmployeeRecord], key: Column) -> Vec<GroupValue> {
    group_by(records, key)
        .into_iter()
        .map(|(k, members)| GroupValue {
            group: k.to_string(),
            value: pay_gap(members.iter().copied()),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

/// Mean of `Rating_Numeric` over rated records.
pub fn mean_rating(records: &[EmployeeRecord]) -> Option<f64> {
    let avg = mean(records.iter().filter_map(|r| r.rating_numeric.map(f64::from)));
    (!avg.is_nan()).then_some(avg)
}

/// Share of each raw rating label in percent, most frequent first.
pub fn rating_distribution(records: &[EmployeeRecord]) -> Vec<Share> {
    let counts = value_counts(records.iter().map(|r| r.rating.as_deref()));
    let total: usize = counts.iter().map(|c| c.count).sum();

    counts
        .into_iter()
        .map(|c| Share {
            percent: c.count as f64 / total as f64 * 100.0,
            value: c.value,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Cross tabulation
// ---------------------------------------------------------------------------

/// Count of named employees for every (`rows`, `columns`) pair, zero filled.
///
/// Records missing either key or a name are not counted.
pub fn pivot_count(records: &[EmployeeRecord], rows: Column, columns: Column) -> Pivot {
    let mut cells: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    let mut row_keys: BTreeSet<&str> = BTreeSet::new();
    let mut col_keys: BTreeSet<&str> = BTreeSet::new();

    for rec in records.iter().filter(|r| r.name.is_some()) {
        let (Some(r), Some(c)) = (rec.category(rows), rec.category(columns)) else {
            continue;
        };
        row_keys.insert(r);
        col_keys.insert(c);
        *cells.entry((r, c)).or_default() += 1;
    }

    let counts = row_keys
        .iter()
        .map(|r| {
            col_keys
                .iter()
                .map(|c| cells.get(&(*r, *c)).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    Pivot {
        rows: row_keys.into_iter().map(str::to_string).collect(),
        columns: col_keys.into_iter().map(str::to_string).collect(),
        counts,
    }
}
