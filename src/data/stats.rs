use std::collections::BTreeMap;

use super::model::StartupTable;

/// Arithmetic mean of the non-NaN values; `NaN` when there are none.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let (sum, n) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 { f64::NAN } else { sum / n as f64 }
}

// ---------------------------------------------------------------------------
// KPIs over the filtered subset
// ---------------------------------------------------------------------------

/// The four metric cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kpis {
    pub count: usize,
    pub avg_funding: f64,
    pub avg_revenue: f64,
    pub avg_innovation: f64,
}

impl Kpis {
    /// Aggregate the rows at `indices`. An empty subset gives `NaN` means.
    pub fn compute(table: &StartupTable, indices: &[usize]) -> Self {
        let rows = || indices.iter().map(|&i| &table.records[i]);
        Kpis {
            count: indices.len(),
            avg_funding: mean(rows().map(|r| r.funding)),
            avg_revenue: mean(rows().map(|r| r.revenue)),
            avg_innovation: mean(rows().map(|r| r.innovation_score)),
        }
    }

    pub fn count_label(&self) -> String {
        self.count.to_string()
    }

    pub fn funding_label(&self) -> String {
        format!("{:.2}", self.avg_funding)
    }

    pub fn revenue_label(&self) -> String {
        format!("{:.2}", self.avg_revenue)
    }

    pub fn innovation_label(&self) -> String {
        format!("{:.1}", self.avg_innovation)
    }
}

// ---------------------------------------------------------------------------
// Yearly trend over the whole table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearlyTrend {
    pub year: i64,
    pub avg_funding: f64,
    pub avg_innovation: f64,
}

/// Per-year means of funding and innovation score, ascending by year.
///
/// Ignores the current selection: the trend always covers every row.
pub fn yearly_trend(table: &StartupTable) -> Vec<YearlyTrend> {
    let mut groups: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (i, rec) in table.records.iter().enumerate() {
        groups.entry(rec.year).or_default().push(i);
    }

    groups
        .into_iter()
        .map(|(year, idx)| {
            let rows = || idx.iter().map(|&i| &table.records[i]);
            YearlyTrend {
                year,
                avg_funding: mean(rows().map(|r| r.funding)),
                avg_innovation: mean(rows().map(|r| r.innovation_score)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{Choice, Selection, filtered_indices};
    use crate::data::model::tests::{record, sample_table};

    #[test]
    fn mean_of_empty_is_nan() {
        assert!(mean(std::iter::empty()).is_nan());
        assert_eq!(mean([1.0, 2.0, 6.0]), 3.0);
    }

    #[test]
    fn mean_skips_missing_values() {
        assert_eq!(mean([1.0, f64::NAN, 5.0]), 3.0);
        assert!(mean([f64::NAN, f64::NAN]).is_nan());
    }

    #[test]
    fn blank_cells_do_not_poison_kpis_or_trend() {
        let table = StartupTable::from_records(vec![
            record("AgroNext", 2025, "North", "MSH Ignite", 2.0, f64::NAN, 10, 7.0),
            record("MediCore", 2025, "South", "MSH Ignite", f64::NAN, 3.0, 20, 9.0),
            record("FinLeap", 2025, "North", "MSH Ignite", 4.0, 5.0, 12, f64::NAN),
        ])
        .unwrap();
        let kpis = Kpis::compute(&table, &[0, 1, 2]);

        assert_eq!(kpis.count, 3);
        assert_eq!(kpis.avg_funding, 3.0);
        assert_eq!(kpis.avg_revenue, 4.0);
        assert_eq!(kpis.avg_innovation, 8.0);

        let trend = yearly_trend(&table);
        assert_eq!(trend[0].avg_funding, 3.0);
        assert_eq!(trend[0].avg_innovation, 8.0);
    }

    #[test]
    fn kpis_are_exact_column_means() {
        let table = sample_table();
        let sel = Selection::default_for(&table);
        let idx = filtered_indices(&table, &sel);
        let kpis = Kpis::compute(&table, &idx);

        let n = idx.len() as f64;
        let funding: f64 = idx.iter().map(|&i| table.records[i].funding).sum();
        let revenue: f64 = idx.iter().map(|&i| table.records[i].revenue).sum();
        let innovation: f64 = idx.iter().map(|&i| table.records[i].innovation_score).sum();

        assert_eq!(kpis.count, 3);
        assert_eq!(kpis.avg_funding, funding / n);
        assert_eq!(kpis.avg_revenue, revenue / n);
        assert_eq!(kpis.avg_innovation, innovation / n);
        assert_eq!(kpis.funding_label(), "4.67");
        assert_eq!(kpis.revenue_label(), "3.00");
        assert_eq!(kpis.innovation_label(), "8.3");
    }

    #[test]
    fn empty_subset_gives_nan_without_panicking() {
        let table = sample_table();
        let sel = Selection {
            year: 1999,
            region: Choice::All,
            program: Choice::All,
        };
        let kpis = Kpis::compute(&table, &filtered_indices(&table, &sel));
        assert_eq!(kpis.count, 0);
        assert!(kpis.avg_funding.is_nan());
        assert!(kpis.avg_revenue.is_nan());
        assert!(kpis.avg_innovation.is_nan());
        assert_eq!(kpis.count_label(), "0");
        assert_eq!(kpis.funding_label(), "NaN");
        assert_eq!(kpis.innovation_label(), "NaN");
    }

    #[test]
    fn trend_groups_whole_table_by_year() {
        let table = sample_table();
        let trend = yearly_trend(&table);
        assert_eq!(trend.len(), 2);

        assert_eq!(trend[0].year, 2024);
        assert_eq!(trend[0].avg_funding, 3.0);
        assert_eq!(trend[0].avg_innovation, 7.5);

        assert_eq!(trend[1].year, 2025);
        assert_eq!(trend[1].avg_funding, (3.0 + 6.0 + 5.0) / 3.0);
        assert_eq!(trend[1].avg_innovation, (7.5 + 9.0 + 8.5) / 3.0);
    }
}
