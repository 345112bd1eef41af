use std::sync::Arc;

use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const FIRST_NAMES: [&str; 12] = [
    "Ava", "Ben", "Chloe", "Dev", "Elena", "Farid", "Grace", "Hiro", "Isla", "Jonas", "Kemi", "Luis",
];
const LAST_NAMES: [&str; 8] = [
    "Nguyen", "Okafor", "Patel", "Quinn", "Rossi", "Schmidt", "Tanaka", "Usman",
];
const LOCATIONS: [&str; 4] = ["New York", "Chicago", "Austin", "Seattle"];
const RATINGS: [(&str, f64); 6] = [
    ("Very Good", 0.15),
    ("Good", 0.30),
    ("Average", 0.30),
    ("Fair", 0.12),
    ("Poor", 0.05),
    ("Not Rated", 0.08),
];

/// (department, base salary, share of women)
const DEPARTMENTS: [(&str, f64, f64); 6] = [
    ("Engineering", 98_000.0, 0.30),
    ("Sales", 72_000.0, 0.45),
    ("Marketing", 68_000.0, 0.60),
    ("Finance", 85_000.0, 0.50),
    ("Legal", 110_000.0, 0.40),
    // Single-gender department: its pay gap is undefined.
    ("Reception", 41_000.0, 1.0),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// `52000.0` → `"$52,000"`
fn format_currency(amount: f64) -> String {
    let digits = (amount.round() as i64).to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}

struct Employee {
    name: String,
    gender: &'static str,
    department: &'static str,
    location: &'static str,
    salary: Option<f64>,
    rating: &'static str,
}

fn generate(rng: &mut SimpleRng, count: usize) -> Vec<Employee> {
    (0..count)
        .map(|i| {
            let (department, base, female_share) = DEPARTMENTS[i % DEPARTMENTS.len()];
            let gender = if rng.next_f64() < female_share { "Female" } else { "Male" };
            // Built-in gap so the chart has something to show.
            let adjust = if gender == "Male" { 1.06 } else { 1.0 };
            let salary = (rng.gauss(base, base * 0.12) * adjust).max(25_000.0);

            let mut roll = rng.next_f64();
            let rating = RATINGS
                .iter()
                .find(|(_, weight)| {
                    roll -= weight;
                    roll < 0.0
                })
                .map_or("Not Rated", |(label, _)| *label);

            Employee {
                name: format!("{} {}", rng.pick(&FIRST_NAMES), rng.pick(&LAST_NAMES)),
                gender,
                department,
                location: rng.pick(&LOCATIONS),
                // A few unparseable cells to exercise the cleaning step.
                salary: (i % 37 != 36).then_some(salary.round()),
                rating,
            }
        })
        .collect()
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let employees = generate(&mut rng, 240);

    // Write CSV; the padded header mirrors real HR exports.
    let csv_path = "HR Analytics.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    writer
        .write_record(["Name", "Gender", "Department", "Location", "Salary ", "Rating"])
        .expect("Failed to write CSV header");
    for e in &employees {
        let salary = e.salary.map_or_else(|| "pending".to_string(), format_currency);
        writer
            .write_record([e.name.as_str(), e.gender, e.department, e.location, salary.as_str(), e.rating])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");

    // Write Parquet with a numeric salary column.
    let schema = Arc::new(Schema::new(vec![
        Field::new("Name", DataType::Utf8, false),
        Field::new("Gender", DataType::Utf8, false),
        Field::new("Department", DataType::Utf8, false),
        Field::new("Location", DataType::Utf8, false),
        Field::new("Salary", DataType::Float64, true),
        Field::new("Rating", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(employees.iter().map(|e| e.name.as_str()))),
            Arc::new(StringArray::from_iter_values(employees.iter().map(|e| e.gender))),
            Arc::new(StringArray::from_iter_values(employees.iter().map(|e| e.department))),
            Arc::new(StringArray::from_iter_values(employees.iter().map(|e| e.location))),
            Arc::new(employees.iter().map(|e| e.salary).collect::<Float64Array>()),
            Arc::new(StringArray::from_iter_values(employees.iter().map(|e| e.rating))),
        ],
    )
    .expect("Failed to create RecordBatch");

    let parquet_path = "HR Analytics.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!(
        "Wrote {} employees to {csv_path} and {parquet_path}",
        employees.len()
    );
}
