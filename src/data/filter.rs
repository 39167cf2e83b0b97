use std::fmt;

use super::model::{StartupRecord, StartupTable};

// ---------------------------------------------------------------------------
// Choice – one dimension of the sidebar selection
// ---------------------------------------------------------------------------

/// A categorical selection that is either a wildcard or a single value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    /// Whether `value` passes this choice.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(v) => v == value,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => write!(f, "All"),
            Choice::Only(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Selection – the full filter predicate
// ---------------------------------------------------------------------------

/// Year is always pinned; region and program may be wildcarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub year: i64,
    pub region: Choice,
    pub program: Choice,
}

impl Selection {
    /// Initial selection: the latest year, all regions, all programs.
    pub fn default_for(table: &StartupTable) -> Self {
        Selection {
            year: table.latest_year().unwrap_or_default(),
            region: Choice::All,
            program: Choice::All,
        }
    }

    pub fn matches(&self, record: &StartupRecord) -> bool {
        record.year == self.year
            && self.region.matches(&record.region)
            && self.program.matches(&record.program)
    }
}

/// Return indices (in table order) of rows that pass the selection.
pub fn filtered_indices(table: &StartupTable, selection: &Selection) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect()
}
