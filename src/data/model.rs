use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Rating – the categorical performance label
// ---------------------------------------------------------------------------

/// Performance rating labels as they appear in the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rating {
    NotRated,
    Poor,
    Fair,
    Average,
    Good,
    VeryGood,
}

impl Rating {
    /// All labels, best first.
    pub const ALL: [Rating; 6] = [
        Rating::VeryGood,
        Rating::Good,
        Rating::Average,
        Rating::Fair,
        Rating::Poor,
        Rating::NotRated,
    ];

    /// Exact, case-sensitive lookup of a source label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.label() == label)
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::VeryGood => "Very Good",
            Rating::Good => "Good",
            Rating::Average => "Average",
            Rating::Fair => "Fair",
            Rating::Poor => "Poor",
            Rating::NotRated => "Not Rated",
        }
    }

    /// Numeric encoding, 5 (Very Good) down to 0 (Not Rated).
    pub fn score(self) -> u8 {
        match self {
            Rating::VeryGood => 5,
            Rating::Good => 4,
            Rating::Average => 3,
            Rating::Fair => 2,
            Rating::Poor => 1,
            Rating::NotRated => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Column – the fields of an employee record
// ---------------------------------------------------------------------------

/// Source columns expected in every input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Name,
    Gender,
    Department,
    Location,
    Salary,
    Rating,
}

impl Column {
    pub const REQUIRED: [Column; 6] = [
        Column::Name,
        Column::Gender,
        Column::Department,
        Column::Location,
        Column::Salary,
        Column::Rating,
    ];

    /// Columns with a small set of distinct values; used for grouping and filtering.
    pub const CATEGORICAL: [Column; 3] = [Column::Gender, Column::Department, Column::Location];

    pub fn header(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Gender => "Gender",
            Column::Department => "Department",
            Column::Location => "Location",
            Column::Salary => "Salary",
            Column::Rating => "Rating",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ---------------------------------------------------------------------------
// EmployeeRecord – one row of the source file
// ---------------------------------------------------------------------------

/// A single employee row after cleaning.  Empty cells are `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmployeeRecord {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    /// The salary cell exactly as read, e.g. `"$52,000"`.
    pub salary_text: String,
    /// Parsed salary; `None` when the cell could not be parsed.
    pub salary: Option<f64>,
    pub rating: Option<String>,
    /// `Rating_Numeric`: the rating label mapped through [`Rating::score`].
    pub rating_numeric: Option<u8>,
}

impl EmployeeRecord {
    /// Categorical value for `column`; `None` for non-categorical columns.
    pub fn category(&self, column: Column) -> Option<&str> {
        match column {
            Column::Gender => self.gender.as_deref(),
            Column::Department => self.department.as_deref(),
            Column::Location => self.location.as_deref(),
            Column::Rating => self.rating.as_deref(),
            Column::Name => self.name.as_deref(),
            Column::Salary => None,
        }
    }
}

// ---------------------------------------------------------------------------
// HrDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed column indices.
#[derive(Debug, Clone, Default)]
pub struct HrDataset {
    /// All records in file order.
    pub records: Vec<EmployeeRecord>,
    /// Normalized (trimmed) header names in file order.
    pub column_names: Vec<String>,
    /// For each categorical column the sorted set of distinct values.
    pub unique_values: BTreeMap<Column, BTreeSet<String>>,
}

impl HrDataset {
    /// Build column indices from the loaded records.
    pub fn from_records(records: Vec<EmployeeRecord>, column_names: Vec<String>) -> Self {
        let mut unique_values: BTreeMap<Column, BTreeSet<String>> = BTreeMap::new();

        for column in Column::CATEGORICAL {
            let values = unique_values.entry(column).or_default();
            for rec in &records {
                if let Some(val) = rec.category(column) {
                    values.insert(val.to_string());
                }
            }
        }

        HrDataset {
            records,
            column_names,
            unique_values,
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
}
