use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use csv::StringRecord;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::clean::{is_na, non_empty, normalize_header, parse_salary, rating_score};
use super::model::{Column, EmployeeRecord, HrDataset};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DataError {
    #[error("missing required column '{0}'")]
    MissingColumn(Column),
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an HR dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` (or no extension) – header row plus one employee per line
/// * `.parquet` / `.pq`       – same columns, any Arrow type (cast to text)
pub fn load_file(path: &Path) -> Result<HrDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" | "" => {
            let file = File::open(path)
                .with_context(|| format!("opening CSV file {}", path.display()))?;
            load_csv_reader(file)
        }
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} employee records with columns {:?}",
        dataset.len(),
        dataset.column_names
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Raw rows – cells before cleaning
// ---------------------------------------------------------------------------

/// One row exactly as read. Extra columns in the source are ignored and
/// cells missing from a short row read as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Department")]
    department: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Salary")]
    salary: String,
    #[serde(rename = "Rating")]
    rating: String,
}

impl RawRow {
    fn into_record(self) -> EmployeeRecord {
        let salary = parse_salary(&self.salary);
        let rating_numeric = rating_score(&self.rating);
        EmployeeRecord {
            name: non_empty(&self.name),
            gender: non_empty(&self.gender),
            department: non_empty(&self.department),
            location: non_empty(&self.location),
            salary_text: self.salary,
            salary,
            rating: non_empty(&self.rating),
            rating_numeric,
        }
    }
}

fn require_columns(headers: &[String]) -> Result<(), DataError> {
    for column in Column::REQUIRED {
        if !headers.iter().any(|h| h == column.header()) {
            return Err(DataError::MissingColumn(column));
        }
    }
    Ok(())
}

/// Clean raw rows and report what could not be interpreted.
fn finish(rows: Vec<RawRow>, column_names: Vec<String>) -> HrDataset {
    let records: Vec<EmployeeRecord> = rows.into_iter().map(RawRow::into_record).collect();

    let bad_salaries = records
        .iter()
        .filter(|r| r.salary.is_none() && !is_na(r.salary_text.trim()))
        .count();
    if bad_salaries > 0 {
        log::warn!("{bad_salaries} salary value(s) could not be parsed and are treated as missing");
    }

    let unknown_ratings = records
        .iter()
        .filter(|r| r.rating.is_some() && r.rating_numeric.is_none())
        .count();
    if unknown_ratings > 0 {
        log::warn!("{unknown_ratings} rating label(s) are not in the rating map");
    }

    HrDataset::from_records(records, column_names)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read CSV from any source.  Header names are trimmed before the required
/// columns are located, so `" Salary "` matches `Salary`.  Rows may be
/// shorter or longer than the header; only the header shape is enforced.
pub fn load_csv_reader<R: Read>(source: R) -> Result<HrDataset> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(normalize_header)
        .collect();

    require_columns(&headers)?;
    reader.set_headers(StringRecord::from(headers.clone()));

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(row);
    }

    Ok(finish(rows, headers))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the same columns as the CSV export.
///
/// Column types are not constrained: every required column is cast to text
/// and goes through the same cleaning as CSV cells, so a numeric `Salary`
/// column works as well as a currency-formatted one.
fn load_parquet(path: &Path) -> Result<HrDataset> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| normalize_header(f.name()))
        .collect();
    require_columns(&headers)?;

    let index_of = |column: Column| {
        headers
            .iter()
            .position(|h| h == column.header())
            .ok_or(DataError::MissingColumn(column))
    };
    let indices = [
        index_of(Column::Name)?,
        index_of(Column::Gender)?,
        index_of(Column::Department)?,
        index_of(Column::Location)?,
        index_of(Column::Salary)?,
        index_of(Column::Rating)?,
    ];

    let reader = builder.build().context("building parquet reader")?;
    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let columns = indices
            .iter()
            .map(|&i| cast(batch.column(i), &DataType::Utf8).map_err(anyhow::Error::from))
            .collect::<Result<Vec<ArrayRef>>>()
            .context("casting parquet columns to text")?;

        for row in 0..batch.num_rows() {
            let cell = |c: usize| text_cell(&columns[c], row);
            rows.push(RawRow {
                name: cell(0),
                gender: cell(1),
                department: cell(2),
                location: cell(3),
                salary: cell(4),
                rating: cell(5),
            });
        }
    }

    Ok(finish(rows, headers))
}

/// Read one cell of a Utf8 array; nulls read as empty cells.
fn text_cell(col: &ArrayRef, row: usize) -> String {
    if col.is_null(row) {
        return String::new();
    }
    col.as_string::<i32>().value(row).to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{Float64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::analysis::aggregate::{rating_distribution, value_counts};

    const SAMPLE: &str = "\
Name ,Gender, Department,Location,Salary ,Rating
Ana,Female,IT,Berlin,\"$52,000\",Very Good
Ben,Male,IT,Berlin,\"$48,500\",Good
Cy,Male,Sales,Paris,unknown,Excellent
Di,,Sales,Paris,,Not Rated
";

    #[test]
    fn csv_headers_are_trimmed_and_rows_cleaned() {
        let ds = load_csv_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(
            ds.column_names,
            vec!["Name", "Gender", "Department", "Location", "Salary", "Rating"]
        );
        assert_eq!(ds.len(), 4);

        let ana = &ds.records[0];
        assert_eq!(ana.name.as_deref(), Some("Ana"));
        assert_eq!(ana.salary_text, "$52,000");
        assert_eq!(ana.salary, Some(52000.0));
        assert_eq!(ana.rating_numeric, Some(5));
    }

    #[test]
    fn malformed_cells_become_missing() {
        let ds = load_csv_reader(SAMPLE.as_bytes()).unwrap();

        let cy = &ds.records[2];
        assert_eq!(cy.salary, None);
        assert_eq!(cy.salary_text, "unknown");
        assert_eq!(cy.rating.as_deref(), Some("Excellent"));
        assert_eq!(cy.rating_numeric, None);

        let di = &ds.records[3];
        assert_eq!(di.gender, None);
        assert_eq!(di.salary, None);
        assert_eq!(di.rating_numeric, Some(0));
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let csv = "Name,Gender,Department,Location,Salary\nAna,Female,IT,Berlin,1\n";
        let err = load_csv_reader(csv.as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DataError>(),
            Some(&DataError::MissingColumn(Column::Rating))
        );
        assert!(err.to_string().contains("Rating"));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "Id,Name,Gender,Department,Location,Salary,Rating\n\
                   7,Ana,Female,IT,Berlin,\"$1,000\",Fair\n";
        let ds = load_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.records[0].salary, Some(1000.0));
        assert_eq!(ds.records[0].rating_numeric, Some(2));
    }

    #[test]
    fn na_tokens_are_missing_values() {
        let csv = "Name,Gender,Department,Location,Salary,Rating\n\
                   Ana,Female,IT,Berlin,\"$52,000\",Good\n\
                   Ben,N/A,IT,Berlin,\"$48,000\",NA\n\
                   Cy,Male,NULL,Paris,N/A,Fair\n";
        let ds = load_csv_reader(csv.as_bytes()).unwrap();

        let ben = &ds.records[1];
        assert_eq!(ben.gender, None);
        assert_eq!(ben.rating, None);
        assert_eq!(ben.rating_numeric, None);
        assert_eq!(ben.salary, Some(48000.0));

        let cy = &ds.records[2];
        assert_eq!(cy.department, None);
        assert_eq!(cy.salary, None);

        let gender_counts = value_counts(ds.records.iter().map(|r| r.gender.as_deref()));
        let genders: Vec<&str> = gender_counts
            .iter()
            .map(|c| c.value.as_str())
            .collect();
        assert_eq!(genders, vec!["Female", "Male"]);
        let ratings: Vec<String> = rating_distribution(&ds.records)
            .into_iter()
            .map(|s| s.value)
            .collect();
        assert!(!ratings.iter().any(|r| r == "NA"));
        assert_eq!(ratings.len(), 2);
        assert!(!ds.unique_values[&Column::Gender].contains("N/A"));
    }

    #[test]
    fn short_rows_fill_missing_trailing_cells() {
        let csv = "Name,Gender,Department,Location,Salary,Rating\n\
                   Ana,Female,IT,Berlin,\"$52,000\"\n\
                   Ben,Male,IT,Berlin,\"$48,000\",Good\n";
        let ds = load_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].salary, Some(52000.0));
        assert_eq!(ds.records[0].rating, None);
        assert_eq!(ds.records[0].rating_numeric, None);
        assert_eq!(ds.records[1].rating_numeric, Some(4));
    }

    #[test]
    fn loads_parquet_with_numeric_salary_and_nulls() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(" Name ", DataType::Utf8, false),
            Field::new("Gender", DataType::Utf8, true),
            Field::new("Department", DataType::Utf8, false),
            Field::new("Location", DataType::Utf8, false),
            Field::new("Salary", DataType::Float64, true),
            Field::new("Rating", DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Ana", "Ben"])),
                Arc::new(StringArray::from(vec![None, Some("Male")])),
                Arc::new(StringArray::from(vec!["IT", "IT"])),
                Arc::new(StringArray::from(vec!["Berlin", "Paris"])),
                Arc::new(Float64Array::from(vec![Some(52000.0), None])),
                Arc::new(StringArray::from(vec!["Very Good", "Poor"])),
            ],
        )
        .unwrap();

        let path = std::env::temp_dir().join("hr-panda-loader-test.parquet");
        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.column_names[0], "Name");
        assert_eq!(ds.len(), 2);
        let ana = &ds.records[0];
        assert_eq!(ana.gender, None);
        assert_eq!(ana.salary, Some(52000.0));
        assert_eq!(ana.rating_numeric, Some(5));
        let ben = &ds.records[1];
        assert_eq!(ben.salary, None);
        assert_eq!(ben.salary_text, "");
    }

    #[test]
    fn unsupported_extension_fails() {
        let err = load_file(Path::new("employees.xlsx")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DataError>(),
            Some(&DataError::UnsupportedExtension("xlsx".to_string()))
        );
    }

    #[test]
    fn missing_file_fails() {
        let path = std::env::temp_dir().join("hr-panda-does-not-exist.csv");
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn loads_csv_from_disk() {
        let path = std::env::temp_dir().join("hr-panda-loader-test.csv");
        std::fs::write(&path, SAMPLE).unwrap();
        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(ds.len(), 4);
    }
}
