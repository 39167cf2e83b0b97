use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::filter::{Choice, Selection, filtered_indices};
use crate::data::loader::DatasetCache;
use crate::data::model::StartupTable;
use crate::data::stats::{Kpis, YearlyTrend, yearly_trend};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Everything derived from the table (subset, KPIs, trend, colours) is
/// cached here and only recomputed when the selection or the table changes.
pub struct AppState {
    /// Memoized loads, keyed by path.
    pub cache: DatasetCache,

    /// Path of the table currently shown.
    pub source: PathBuf,

    pub table: Arc<StartupTable>,

    /// Current sidebar selection.
    pub selection: Selection,

    /// Indices of rows passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    pub kpis: Kpis,

    /// Per-year means over the whole table.
    pub trend: Vec<YearlyTrend>,

    /// Bar colours by region.
    pub region_colors: ColorMap,

    /// Scatter colours by startup name.
    pub startup_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state around an already loaded table.
    pub fn new(cache: DatasetCache, source: PathBuf, table: Arc<StartupTable>) -> Self {
        let selection = Selection::default_for(&table);
        let visible_indices = filtered_indices(&table, &selection);
        let kpis = Kpis::compute(&table, &visible_indices);
        Self {
            cache,
            source,
            region_colors: region_colors(&table),
            startup_colors: startup_colors(&table),
            trend: yearly_trend(&table),
            table,
            selection,
            visible_indices,
            kpis,
            status_message: None,
        }
    }

    /// Ingest a newly loaded table: reset the selection and all derived data.
    pub fn set_table(&mut self, source: PathBuf, table: Arc<StartupTable>) {
        self.selection = Selection::default_for(&table);
        self.trend = yearly_trend(&table);
        self.region_colors = region_colors(&table);
        self.startup_colors = startup_colors(&table);
        self.table = table;
        self.source = source;
        self.status_message = None;
        self.refilter();
    }

    /// Load `path` through the cache and switch to it. On failure the
    /// current table stays and the error is surfaced in the status line.
    pub fn open(&mut self, path: &Path) {
        if self.cache.contains(path) {
            log::info!("Reusing cached table for {}", path.display());
        }
        match self.cache.get_or_load(path) {
            Ok(table) => self.set_table(path.to_path_buf(), table),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Recompute `visible_indices` and the KPIs after a selection change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.table, &self.selection);
        self.kpis = Kpis::compute(&self.table, &self.visible_indices);
        log::debug!(
            "Selection year={} region={} program={} → {} rows",
            self.selection.year,
            self.selection.region,
            self.selection.program,
            self.visible_indices.len()
        );
    }

    pub fn set_year(&mut self, year: i64) {
        if self.selection.year != year {
            self.selection.year = year;
            self.refilter();
        }
    }

    pub fn set_region(&mut self, region: Choice) {
        if self.selection.region != region {
            self.selection.region = region;
            self.refilter();
        }
    }

    pub fn set_program(&mut self, program: Choice) {
        if self.selection.program != program {
            self.selection.program = program;
            self.refilter();
        }
    }
}

fn region_colors(table: &StartupTable) -> ColorMap {
    ColorMap::new(table.regions.iter().map(String::as_str))
}

fn startup_colors(table: &StartupTable) -> ColorMap {
    ColorMap::new(table.records.iter().map(|r| r.name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_table;

    fn state() -> AppState {
        AppState::new(
            DatasetCache::new(),
            PathBuf::from("startup_data.csv"),
            Arc::new(sample_table()),
        )
    }

    #[test]
    fn starts_on_latest_year_with_kpis() {
        let s = state();
        assert_eq!(s.selection.year, 2025);
        assert_eq!(s.visible_indices, vec![2, 3, 4]);
        assert_eq!(s.kpis.count, 3);
        assert_eq!(s.trend.len(), 2);
    }

    #[test]
    fn selection_changes_recompute_kpis() {
        let mut s = state();
        s.set_region(Choice::Only("South".to_string()));
        assert_eq!(s.visible_indices, vec![3]);
        assert_eq!(s.kpis.avg_funding, 6.0);

        s.set_year(2024);
        assert_eq!(s.visible_indices, vec![1]);

        s.set_program(Choice::Only("MSH Ignite".to_string()));
        assert!(s.visible_indices.is_empty());
        assert!(s.kpis.avg_revenue.is_nan());
    }

    #[test]
    fn failed_open_keeps_current_table() {
        let mut s = state();
        let dir = tempfile::tempdir().unwrap();
        s.open(&dir.path().join("missing.csv"));

        assert!(s.status_message.as_deref().unwrap().starts_with("Error:"));
        assert_eq!(s.table.len(), 5);
        assert_eq!(s.source, PathBuf::from("startup_data.csv"));
    }

    #[test]
    fn successful_open_resets_selection() {
        let mut s = state();
        s.set_year(2024);
        s.status_message = Some("stale".to_string());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.csv");
        std::fs::write(
            &path,
            "Year,Region,Program,Startup,Funding(Million$),Revenue(Million$),Employees,Innovation_Score\n\
             2030,West,MSH Ignite,Orbit,1.0,0.5,4,6.0\n",
        )
        .unwrap();
        s.open(&path);

        assert_eq!(s.source, path);
        assert_eq!(s.selection.year, 2030);
        assert_eq!(s.visible_indices, vec![0]);
        assert!(s.status_message.is_none());
        assert_ne!(
            s.region_colors.color_for("West"),
            eframe::egui::Color32::GRAY
        );
    }
}
