//! Writes a deterministic synthetic dataset (`startup_data.csv` and
//! `startup_data.parquet`) into the directory given as the first argument,
//! or the current directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "Year")]
    year: i64,
    #[serde(rename = "Region")]
    region: &'static str,
    #[serde(rename = "Program")]
    program: &'static str,
    #[serde(rename = "Startup")]
    startup: &'static str,
    #[serde(rename = "Funding(Million$)")]
    funding: f64,
    #[serde(rename = "Revenue(Million$)")]
    revenue: f64,
    #[serde(rename = "Employees")]
    employees: u32,
    #[serde(rename = "Innovation_Score")]
    innovation_score: f64,
}

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

    /// Uniform in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let u = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + (hi - lo) * u
    }
}

/// (startup, region, program, base funding in M$)
const STARTUPS: [(&str, &str, &str, f64); 10] = [
    ("AgroNext", "North", "MSH Ignite", 1.2),
    ("MediCore", "South", "MSH Accelerator", 3.5),
    ("FinLeap", "West", "MSH Accelerator", 4.0),
    ("EduSpark", "East", "MSH Ignite", 0.8),
    ("GreenGrid", "North", "MSH Scale", 5.5),
    ("LogiChain", "West", "MSH Scale", 2.7),
    ("HealthHive", "South", "MSH Ignite", 1.5),
    ("CodeCraft", "East", "MSH Accelerator", 2.1),
    ("SolarSeed", "Central", "MSH Scale", 3.1),
    ("UrbanNest", "Central", "MSH Ignite", 1.0),
];

const YEARS: std::ops::RangeInclusive<i64> = 2021..=2025;

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();
    for year in YEARS {
        // Funding and innovation both drift upward over the years.
        let growth = 1.0 + 0.18 * (year - YEARS.start()) as f64;
        for &(startup, region, program, base) in &STARTUPS {
            let funding = round2(base * growth * rng.uniform(0.85, 1.15));
            let revenue = round2(funding * rng.uniform(0.3, 0.9));
            let employees = (funding * rng.uniform(8.0, 14.0)).round() as u32 + 3;
            let innovation = round2((5.0 + growth * rng.uniform(1.0, 2.0)).min(10.0));
            rows.push(Row {
                year,
                region,
                program,
                startup,
                funding,
                revenue,
                employees,
                innovation_score: innovation,
            });
        }
    }
    rows
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Year", DataType::Int64, false),
        Field::new("Region", DataType::Utf8, false),
        Field::new("Program", DataType::Utf8, false),
        Field::new("Startup", DataType::Utf8, false),
        Field::new("Funding(Million$)", DataType::Float64, false),
        Field::new("Revenue(Million$)", DataType::Float64, false),
        Field::new("Employees", DataType::UInt32, false),
        Field::new("Innovation_Score", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.region))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.program))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.startup))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.funding))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.revenue))),
            Arc::new(UInt32Array::from_iter_values(rows.iter().map(|r| r.employees))),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|r| r.innovation_score),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let rows = generate(&mut SimpleRng::new(42));

    let csv_path = out_dir.join("startup_data.csv");
    write_csv(&csv_path, &rows).with_context(|| format!("writing {}", csv_path.display()))?;

    let parquet_path = out_dir.join("startup_data.parquet");
    write_parquet(&parquet_path, &rows)
        .with_context(|| format!("writing {}", parquet_path.display()))?;

    println!(
        "Wrote {} rows ({} startups × {} years) to {} and {}",
        rows.len(),
        STARTUPS.len(),
        YEARS.count(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
