use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray, UInt64Array};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::analysis::{Count, GroupCounts, GroupValue, Share, Summary};
use crate::data::model::{Column, EmployeeRecord};

// ---------------------------------------------------------------------------
// Text report
// ---------------------------------------------------------------------------

/// Render the console report: a preview of the raw rows followed by every
/// aggregate in `summary`.
pub fn render_text(records: &[EmployeeRecord], head: usize, summary: &Summary) -> Result<String> {
    let mut out = String::new();

    section(&mut out, "Data preview", preview_batch(records, head)?)?;
    section(&mut out, "Gender count", counts_batch(Column::Gender, &summary.gender_counts)?)?;
    section(
        &mut out,
        "Gender by department",
        grouped_counts_batch(Column::Department, Column::Gender, &summary.gender_by_department)?,
    )?;
    section(
        &mut out,
        "Gender by location",
        grouped_counts_batch(Column::Location, Column::Gender, &summary.gender_by_location)?,
    )?;
    section(
        &mut out,
        "Average salary by department",
        values_batch(Column::Department, "Salary", &summary.avg_salary_by_department)?,
    )?;
    section(
        &mut out,
        "Average salary by location",
        values_batch(Column::Location, "Salary", &summary.avg_salary_by_location)?,
    )?;

    match summary.avg_rating {
        Some(avg) => writeln!(out, "Average Rating: {avg:.2}\n")?,
        None => writeln!(out, "Average Rating: n/a\n")?,
    }

    section(&mut out, "Rating frequency (%)", shares_batch(&summary.rating_distribution)?)?;
    section(
        &mut out,
        "Gender pay gap by department",
        values_batch(Column::Department, "Pay gap", &summary.pay_gap_by_department)?,
    )?;
    section(
        &mut out,
        "Gender pay gap by location",
        values_batch(Column::Location, "Pay gap", &summary.pay_gap_by_location)?,
    )?;

    Ok(out)
}

/// The summary as pretty JSON.  Undefined values (NaN) become `null`.
pub fn render_json(summary: &Summary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("serializing summary")
}

fn section(out: &mut String, title: &str, batch: RecordBatch) -> Result<()> {
    let table = pretty_format_batches(&[batch]).context("formatting table")?;
    writeln!(out, "{title}")?;
    writeln!(out, "{table}")?;
    writeln!(out)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Record batches
// ---------------------------------------------------------------------------

fn text_column<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> ArrayRef {
    Arc::new(values.into_iter().collect::<StringArray>())
}

/// First `head` rows with the cells as they were read.
pub fn preview_batch(records: &[EmployeeRecord], head: usize) -> Result<RecordBatch> {
    let rows = &records[..head.min(records.len())];
    let batch = RecordBatch::try_from_iter(vec![
        ("Name", text_column(rows.iter().map(|r| r.name.as_deref()))),
        ("Gender", text_column(rows.iter().map(|r| r.gender.as_deref()))),
        ("Department", text_column(rows.iter().map(|r| r.department.as_deref()))),
        ("Location", text_column(rows.iter().map(|r| r.location.as_deref()))),
        ("Salary", text_column(rows.iter().map(|r| Some(r.salary_text.as_str())))),
        ("Rating", text_column(rows.iter().map(|r| r.rating.as_deref()))),
    ])?;
    Ok(batch)
}

pub fn counts_batch(key: Column, counts: &[Count]) -> Result<RecordBatch> {
    let batch = RecordBatch::try_from_iter(vec![
        (key.header(), text_column(counts.iter().map(|c| Some(c.value.as_str())))),
        (
            "count",
            Arc::new(UInt64Array::from_iter_values(counts.iter().map(|c| c.count as u64))) as ArrayRef,
        ),
    ])?;
    Ok(batch)
}

/// Long format: one line per (group, value) pair.
pub fn grouped_counts_batch(group: Column, value: Column, groups: &[GroupCounts]) -> Result<RecordBatch> {
    let flat: Vec<(&str, &Count)> = groups
        .iter()
        .flat_map(|g| g.counts.iter().map(move |c| (g.group.as_str(), c)))
        .collect();

    let batch = RecordBatch::try_from_iter(vec![
        (group.header(), text_column(flat.iter().map(|(g, _)| Some(*g)))),
        (value.header(), text_column(flat.iter().map(|(_, c)| Some(c.value.as_str())))),
        (
            "count",
            Arc::new(UInt64Array::from_iter_values(flat.iter().map(|(_, c)| c.count as u64))) as ArrayRef,
        ),
    ])?;
    Ok(batch)
}

pub fn values_batch(key: Column, label: &str, values: &[GroupValue]) -> Result<RecordBatch> {
    let batch = RecordBatch::try_from_iter(vec![
        (key.header(), text_column(values.iter().map(|v| Some(v.group.as_str())))),
        (
            label,
            Arc::new(Float64Array::from_iter_values(values.iter().map(|v| v.value))) as ArrayRef,
        ),
    ])?;
    Ok(batch)
}

pub fn shares_batch(shares: &[Share]) -> Result<RecordBatch> {
    let batch = RecordBatch::try_from_iter(vec![
        ("Rating", text_column(shares.iter().map(|s| Some(s.value.as_str())))),
        (
            "percent",
            Arc::new(Float64Array::from_iter_values(shares.iter().map(|s| s.percent))) as ArrayRef,
        ),
    ])?;
    Ok(batch)
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

    #[test]
    fn text_report_lists_every_section_in_order() {
        let ds = load_csv_reader(SAMPLE.as_bytes()).unwrap();
        let summary = Summary::compute(&ds.records);
        let text = render_text(&ds.records, 5, &summary).unwrap();

        let titles = [
            "Data preview",
            "Gender count",
            "Gender by department",
            "Gender by location",
            "Average salary by department",
            "Average salary by location",
            "Average Rating: 3.67",
            "Rating frequency (%)",
            "Gender pay gap by department",
            "Gender pay gap by location",
        ];
        let positions: Vec<usize> = titles.iter().map(|t| text.find(t).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert!(text.contains("$52,000"));
        assert!(text.contains("-4000"));
        assert!(text.contains("NaN"));
    }

    #[test]
    fn preview_is_limited_to_head() {
        let ds = load_csv_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(preview_batch(&ds.records, 2).unwrap().num_rows(), 2);
        assert_eq!(preview_batch(&ds.records, 50).unwrap().num_rows(), 3);
    }

    #[test]
    fn grouped_counts_are_flattened() {
        let ds = load_csv_reader(SAMPLE.as_bytes()).unwrap();
        let summary = Summary::compute(&ds.records);
        let batch =
            grouped_counts_batch(Column::Department, Column::Gender, &summary.gender_by_department).unwrap();
        // IT: Female, Male; Sales: Male
        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.num_columns(), 3);
    }

    #[test]
    fn json_report_round_trips_through_serde() {
        let ds = load_csv_reader(SAMPLE.as_bytes()).unwrap();
        let summary = Summary::compute(&ds.records);
        let json = render_json(&summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["employees"], 3);
        assert_eq!(value["gender_counts"][0]["value"], "Male");
    }
}
