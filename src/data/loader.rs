use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray, PrimitiveArray, StringArray};
use arrow::compute::kernels::cast::{CastOptions, can_cast_types, cast_with_options};
use arrow::datatypes::{ArrowPrimitiveType, DataType, Float64Type, Int64Type, UInt32Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::DataError;
use super::model::{
    COL_EMPLOYEES, COL_FUNDING, COL_INNOVATION, COL_PROGRAM, COL_REGION, COL_REVENUE,
    COL_STARTUP, COL_YEAR, StartupRecord, StartupTable,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a startup dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the eight dataset columns (recommended)
/// * `.json`    – `[{ "Year": 2025, "Region": "...", ... }, ...]`
/// * `.parquet` – the same eight columns, any integer/float physical type
pub fn load_file(path: &Path) -> Result<StartupTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} startup rows from {} ({} years, {} regions, {} programs)",
        table.len(),
        path.display(),
        table.years.len(),
        table.regions.len(),
        table.programs.len()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Load cache
// ---------------------------------------------------------------------------

/// Memoizes loaded tables per path for the lifetime of the process.
///
/// Filter changes never re-read the file; only a path that has not been
/// seen before hits the filesystem.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, Arc<StartupTable>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `path`, loading it on first use.
    ///
    /// A relative path and the absolute path of the same file share one
    /// entry.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<StartupTable>> {
        if let Some(table) = self.lookup(path) {
            log::debug!("Cache hit for {}", path.display());
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(load_file(path)?);
        if let Ok(canonical) = path.canonicalize() {
            self.entries.insert(canonical, Arc::clone(&table));
        }
        // Also keyed as given, so the entry stays reachable if the file
        // is later removed and can no longer be canonicalized.
        self.entries.insert(path.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.lookup(path).is_some()
    }

    fn lookup(&self, path: &Path) -> Option<&Arc<StartupTable>> {
        self.entries.get(path).or_else(|| {
            path.canonicalize()
                .ok()
                .and_then(|canonical| self.entries.get(&canonical))
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one startup-year per row.
/// Column order does not matter and unknown columns are ignored.
fn load_csv(path: &Path) -> Result<StartupTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<StartupRecord>().enumerate() {
        // Data rows count from 1; the header is not a row.
        let record = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        records.push(record);
    }

    Ok(StartupTable::from_records(records)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Year": 2025, "Region": "West", "Program": "MSH Ignite",
///     "Startup": "AgroNext", "Funding(Million$)": 3.2,
///     "Revenue(Million$)": 1.1, "Employees": 24, "Innovation_Score": 7.8
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<StartupTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let records: Vec<StartupRecord> = serde_json::from_str(&text).context("parsing JSON")?;
    Ok(StartupTable::from_records(records)?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the dataset columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): numeric columns are cast to the
/// record's types, so `Int32` years or `Float32` scores are accepted.
fn load_parquet(path: &Path) -> Result<StartupTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let year = column_as(&batch, COL_YEAR, &DataType::Int64)?;
        let region = column_as(&batch, COL_REGION, &DataType::Utf8)?;
        let program = column_as(&batch, COL_PROGRAM, &DataType::Utf8)?;
        let name = column_as(&batch, COL_STARTUP, &DataType::Utf8)?;
        let funding = column_as(&batch, COL_FUNDING, &DataType::Float64)?;
        let revenue = column_as(&batch, COL_REVENUE, &DataType::Float64)?;
        let employees = column_as(&batch, COL_EMPLOYEES, &DataType::UInt32)?;
        let innovation = column_as(&batch, COL_INNOVATION, &DataType::Float64)?;

        let year = year.as_primitive::<Int64Type>();
        let region = region.as_string::<i32>();
        let program = program.as_string::<i32>();
        let name = name.as_string::<i32>();
        let funding = funding.as_primitive::<Float64Type>();
        let revenue = revenue.as_primitive::<Float64Type>();
        let employees = employees.as_primitive::<UInt32Type>();
        let innovation = innovation.as_primitive::<Float64Type>();

        for row in 0..batch.num_rows() {
            let abs_row = row_offset + row;
            records.push(StartupRecord {
                year: primitive_at(year, COL_YEAR, row, abs_row)?,
                region: string_at(region, COL_REGION, row, abs_row)?,
                program: string_at(program, COL_PROGRAM, row, abs_row)?,
                name: string_at(name, COL_STARTUP, row, abs_row)?,
                funding: measurement_at(funding, row),
                revenue: measurement_at(revenue, row),
                employees: primitive_at(employees, COL_EMPLOYEES, row, abs_row)?,
                innovation_score: measurement_at(innovation, row),
            });
        }
        row_offset += batch.num_rows();
    }

    Ok(StartupTable::from_records(records)?)
}

// -- Parquet / Arrow helpers --

/// Look up a column by name and cast it to the type the record expects.
///
/// The cast is strict: a value that cannot be converted (`"abc"` in a
/// float column, a negative employee count) fails instead of turning
/// into a null.
fn column_as(batch: &RecordBatch, name: &str, to: &DataType) -> Result<ArrayRef, DataError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| DataError::MissingColumn(name.to_string()))?;
    let col = batch.column(idx);
    if !can_cast_types(col.data_type(), to) {
        return Err(DataError::UnsupportedType {
            column: name.to_string(),
            found: format!("{:?}", col.data_type()),
        });
    }
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    cast_with_options(col, to, &options).map_err(|e| DataError::Unparsable {
        column: name.to_string(),
        reason: e.to_string(),
    })
}

/// A null measurement reads as `NaN`, like a blank CSV cell.
fn measurement_at(arr: &PrimitiveArray<Float64Type>, row: usize) -> f64 {
    if arr.is_null(row) {
        f64::NAN
    } else {
        arr.value(row)
    }
}

fn primitive_at<T: ArrowPrimitiveType>(
    arr: &PrimitiveArray<T>,
    column: &str,
    row: usize,
    abs_row: usize,
) -> Result<T::Native, DataError> {
    if arr.is_null(row) {
        return Err(DataError::NullValue {
            column: column.to_string(),
            row: abs_row,
        });
    }
    Ok(arr.value(row))
}

fn string_at(
    arr: &StringArray,
    column: &str,
    row: usize,
    abs_row: usize,
) -> Result<String, DataError> {
    if arr.is_null(row) {
        return Err(DataError::NullValue {
            column: column.to_string(),
            row: abs_row,
        });
    }
    Ok(arr.value(row).to_string())
}
