use std::collections::BTreeSet;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::error::DataError;

// ---------------------------------------------------------------------------
// Column names – exactly as they appear in the source file header
// ---------------------------------------------------------------------------

pub const COL_YEAR: &str = "Year";
pub const COL_REGION: &str = "Region";
pub const COL_PROGRAM: &str = "Program";
pub const COL_STARTUP: &str = "Startup";
pub const COL_FUNDING: &str = "Funding(Million$)";
pub const COL_REVENUE: &str = "Revenue(Million$)";
pub const COL_EMPLOYEES: &str = "Employees";
pub const COL_INNOVATION: &str = "Innovation_Score";

/// All columns in display order.
pub const COLUMNS: [&str; 8] = [
    COL_YEAR,
    COL_REGION,
    COL_PROGRAM,
    COL_STARTUP,
    COL_FUNDING,
    COL_REVENUE,
    COL_EMPLOYEES,
    COL_INNOVATION,
];

// ---------------------------------------------------------------------------
// StartupRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single startup observation for one year.
///
/// Blank measurement cells load as `NaN` and are skipped by the
/// aggregates, so one incomplete row does not hide the rest of the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartupRecord {
    #[serde(rename = "Year")]
    pub year: i64,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Program")]
    pub program: String,
    #[serde(rename = "Startup")]
    pub name: String,
    #[serde(rename = "Funding(Million$)", deserialize_with = "nan_if_missing")]
    pub funding: f64,
    #[serde(rename = "Revenue(Million$)", deserialize_with = "nan_if_missing")]
    pub revenue: f64,
    #[serde(rename = "Employees", deserialize_with = "whole_number")]
    pub employees: u32,
    #[serde(rename = "Innovation_Score", deserialize_with = "nan_if_missing")]
    pub innovation_score: f64,
}

/// A blank CSV cell or a JSON `null` becomes `NaN`.
fn nan_if_missing<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::NAN))
}

/// Accepts `12` as well as `12.0`; fractions and negatives are rejected.
fn whole_number<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let v = f64::deserialize(d)?;
    if v.fract() != 0.0 || v < 0.0 || v > u32::MAX as f64 {
        return Err(D::Error::custom(format!("expected a whole employee count, got {v}")));
    }
    Ok(v as u32)
}

impl StartupRecord {
    /// Cell text for the given column, formatted for the data grid.
    pub fn cell(&self, column: &str) -> String {
        match column {
            COL_YEAR => self.year.to_string(),
            COL_REGION => self.region.clone(),
            COL_PROGRAM => self.program.clone(),
            COL_STARTUP => self.name.clone(),
            COL_FUNDING => format!("{:.2}", self.funding),
            COL_REVENUE => format!("{:.2}", self.revenue),
            COL_EMPLOYEES => self.employees.to_string(),
            COL_INNOVATION => format!("{:.1}", self.innovation_score),
            _ => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// StartupTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with the sorted unique values of the
/// filterable dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct StartupTable {
    /// All rows, in file order. Never mutated after loading.
    pub records: Vec<StartupRecord>,
    pub years: BTreeSet<i64>,
    pub regions: BTreeSet<String>,
    pub programs: BTreeSet<String>,
}

impl StartupTable {
    /// Build the dimension indices from the loaded rows.
    ///
    /// A table without rows has no year to select, so it is rejected.
    pub fn from_records(records: Vec<StartupRecord>) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::Empty);
        }

        let mut years = BTreeSet::new();
        let mut regions = BTreeSet::new();
        let mut programs = BTreeSet::new();
        for rec in &records {
            years.insert(rec.year);
            regions.insert(rec.region.clone());
            programs.insert(rec.program.clone());
        }

        Ok(StartupTable {
            records,
            years,
            regions,
            programs,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent year present in the data.
    pub fn latest_year(&self) -> Option<i64> {
        self.years.last().copied()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(
        name: &str,
        year: i64,
        region: &str,
        program: &str,
        funding: f64,
        revenue: f64,
        employees: u32,
        innovation_score: f64,
    ) -> StartupRecord {
        StartupRecord {
            year,
            region: region.to_string(),
            program: program.to_string(),
            name: name.to_string(),
            funding,
            revenue,
            employees,
            innovation_score,
        }
    }

    /// Small fixture spanning two years, two regions and two programs.
    pub(crate) fn sample_table() -> StartupTable {
        StartupTable::from_records(vec![
            record("AgroNext", 2024, "North", "MSH Ignite", 2.0, 1.0, 10, 7.0),
            record("MediCore", 2024, "South", "MSH Accelerator", 4.0, 3.0, 20, 8.0),
            record("AgroNext", 2025, "North", "MSH Ignite", 3.0, 2.5, 14, 7.5),
            record("MediCore", 2025, "South", "MSH Accelerator", 6.0, 4.5, 30, 9.0),
            record("FinLeap", 2025, "North", "MSH Accelerator", 5.0, 2.0, 12, 8.5),
        ])
        .unwrap()
    }

    #[test]
    fn dimensions_are_sorted_and_unique() {
        let table = sample_table();
        assert_eq!(table.years.iter().copied().collect::<Vec<_>>(), vec![2024, 2025]);
        assert_eq!(
            table.regions.iter().cloned().collect::<Vec<_>>(),
            vec!["North".to_string(), "South".to_string()]
        );
        assert_eq!(table.programs.len(), 2);
        assert_eq!(table.latest_year(), Some(2025));
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(matches!(
            StartupTable::from_records(Vec::new()),
            Err(DataError::Empty)
        ));
    }

    #[test]
    fn cells_use_display_precision() {
        let rec = record("X", 2025, "East", "P", 1.234, 5.0, 3, 7.26);
        assert_eq!(rec.cell(COL_FUNDING), "1.23");
        assert_eq!(rec.cell(COL_REVENUE), "5.00");
        assert_eq!(rec.cell(COL_INNOVATION), "7.3");
        assert_eq!(rec.cell(COL_STARTUP), "X");
    }
}
