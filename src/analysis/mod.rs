/// Descriptive statistics over the employee records.
///
/// Every aggregate is a plain value built from a slice of records, so the
/// report printer and the chart windows share the same numbers.
pub mod aggregate;

use serde::Serialize;

use crate::data::model::{Column, EmployeeRecord};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Number of occurrences of one categorical value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Count {
    pub value: String,
    pub count: usize,
}

/// Value counts inside one group, e.g. genders within a department.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupCounts {
    pub group: String,
    pub counts: Vec<Count>,
}

/// One numeric result per group.  NaN means "undefined for this group".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupValue {
    pub group: String,
    pub value: f64,
}

/// Share of a categorical value in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub value: String,
    pub percent: f64,
}

/// Two-way count table; `counts[row][column]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Pivot {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl Pivot {
    /// Largest cell, 0 for an empty table.
    pub fn max(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// All aggregates for one set of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub employees: usize,
    pub gender_counts: Vec<Count>,
    /// Same counts in first-appearance order, the order the count chart uses.
    #[serde(skip)]
    pub gender_counts_by_appearance: Vec<Count>,
    pub gender_by_department: Vec<GroupCounts>,
    pub gender_by_location: Vec<GroupCounts>,
    pub avg_salary_by_department: Vec<GroupValue>,
    pub avg_salary_by_location: Vec<GroupValue>,
    pub avg_rating: Option<f64>,
    pub rating_distribution: Vec<Share>,
    pub pay_gap_by_department: Vec<GroupValue>,
    pub pay_gap_by_location: Vec<GroupValue>,
    pub gender_distribution: Pivot,
}

impl Summary {
    pub fn compute(records: &[EmployeeRecord]) -> Self {
        use aggregate::*;

        Summary {
            employees: records.len(),
            gender_counts: value_counts(records.iter().map(|r| r.gender.as_deref())),
            gender_counts_by_appearance: counts_in_order(records.iter().map(|r| r.gender.as_deref())),
            gender_by_department: grouped_value_counts(records, Column::Department, Column::Gender),
            gender_by_location: grouped_value_counts(records, Column::Location, Column::Gender),
            avg_salary_by_department: mean_salary_by(records, Column::Department),
            avg_salary_by_location: mean_salary_by(records, Column::Location),
            avg_rating: mean_rating(records),
            rating_distribution: rating_distribution(records),
            pay_gap_by_department: pay_gap_by(records, Column::Department),
            pay_gap_by_location: pay_gap_by(records, Column::Location),
            gender_distribution: pivot_count(records, Column::Department, Column::Gender),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_nothing_is_empty() {
        let summary = Summary::compute(&[]);
        assert_eq!(summary.employees, 0);
        assert!(summary.gender_counts.is_empty());
        assert!(summary.avg_salary_by_department.is_empty());
        assert_eq!(summary.avg_rating, None);
        assert!(summary.gender_distribution.is_empty());
        assert_eq!(summary.gender_distribution.max(), 0);
    }

    #[test]
    fn chart_gender_order_follows_the_file() {
        let people = [("Ana", "Female"), ("Ben", "Male"), ("Cy", "Male"), ("Di", "Other")];
        let records: Vec<EmployeeRecord> = people
            .iter()
            .map(|(name, gender)| EmployeeRecord {
                name: Some(name.to_string()),
                gender: Some(gender.to_string()),
                ..Default::default()
            })
            .collect();
        let summary = Summary::compute(&records);

        let by_count: Vec<&str> = summary.gender_counts.iter().map(|c| c.value.as_str()).collect();
        let by_appearance: Vec<&str> = summary
            .gender_counts_by_appearance
            .iter()
            .map(|c| c.value.as_str())
            .collect();
        assert_eq!(by_count, vec!["Male", "Female", "Other"]);
        assert_eq!(by_appearance, vec!["Female", "Male", "Other"]);

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("gender_counts_by_appearance").is_none());
    }

    #[test]
    fn summary_serializes_nan_as_null() {
        let record = EmployeeRecord {
            name: Some("Ana".into()),
            gender: Some("Female".into()),
            department: Some("IT".into()),
            salary: Some(50000.0),
            ..Default::default()
        };
        let summary = Summary::compute(&[record]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["pay_gap_by_department"][0]["group"], "IT");
        assert!(json["pay_gap_by_department"][0]["value"].is_null());
        assert_eq!(json["avg_salary_by_department"][0]["value"], 50000.0);
    }
}
