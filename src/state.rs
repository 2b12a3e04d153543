use std::path::Path;

use crate::analytics::aggregate::{group_and_sum, top_n, AggregatedTable};
use crate::analytics::metrics::{compute, SalesMetrics};
use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::filter::{apply, FilterCriteria};
use crate::data::loader::load_file;
use crate::data::model::{distinct, GroupKey, SaleRecord, SalesDataset, ValueField};

/// Columns summed by the "por linha" / "por vendedor" charts.
pub const CHART_FIELDS: [ValueField; 3] =
    [ValueField::Value, ValueField::Cost, ValueField::Profit];

// ---------------------------------------------------------------------------
// Derived view: everything the page renders for one set of criteria
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub filtered: Vec<SaleRecord>,
    pub metrics: SalesMetrics,
    pub by_product_line: AggregatedTable,
    pub by_salesperson: AggregatedTable,
    pub top_products: AggregatedTable,
}

impl DashboardView {
    pub fn build(records: &[SaleRecord], criteria: &FilterCriteria, top: usize) -> Self {
        let filtered = apply(records, criteria);
        DashboardView {
            metrics: compute(&filtered),
            by_product_line: group_and_sum(&filtered, GroupKey::ProductLine, &CHART_FIELDS),
            by_salesperson: group_and_sum(&filtered, GroupKey::Salesperson, &CHART_FIELDS),
            top_products: top_n(&filtered, ValueField::Value, GroupKey::Product, top),
            filtered,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<SalesDataset>,

    /// Current filter selections.
    pub criteria: FilterCriteria,

    /// Result of the last recomputation.
    pub view: Option<DashboardView>,

    pub line_colors: ColorMap,
    pub salesperson_colors: ColorMap,

    /// Load failure shown instead of the dashboard.
    pub load_error: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            dataset: None,
            criteria: FilterCriteria::default(),
            view: None,
            line_colors: ColorMap::default(),
            salesperson_colors: ColorMap::default(),
            load_error: None,
        }
    }

    /// Load `path`, replacing the current dataset. On failure the dashboard is
    /// cleared and only the error is kept.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} sales records from {}",
                    dataset.len(),
                    path.display()
                );
                if dataset.is_empty() {
                    log::warn!("{} has a header but no sales records", path.display());
                }
                self.config.data_path = path.to_path_buf();
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.dataset = None;
                self.view = None;
                self.load_error = Some(e.to_string());
            }
        }
    }

    /// Ingest a newly loaded dataset, reset filters and colours.
    pub fn set_dataset(&mut self, dataset: SalesDataset) {
        self.line_colors = ColorMap::new(
            distinct(&dataset.records, GroupKey::ProductLine)
                .iter()
                .map(String::as_str),
        );
        self.salesperson_colors =
            ColorMap::new(dataset.options.salespeople.iter().map(String::as_str));

        self.criteria = FilterCriteria::default();
        self.dataset = Some(dataset);
        self.load_error = None;
        self.refresh();
    }

    /// Replace the criteria; recomputes only when they changed.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        if criteria != self.criteria {
            self.criteria = criteria;
            self.refresh();
        }
    }

    pub fn reset_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    /// Recompute the view from the dataset and the current criteria.
    pub fn refresh(&mut self) {
        self.view = self.dataset.as_ref().map(|ds| {
            let view = DashboardView::build(&ds.records, &self.criteria, self.config.top_n);
            log::debug!(
                "Recomputed dashboard: {} of {} records match {:?}",
                view.filtered.len(),
                ds.len(),
                self.criteria
            );
            view
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn dataset() -> SalesDataset {
        let mut rows = vec![
            record("1", "A", 100.0),
            record("1", "A", 50.0),
            record("2", "B", 200.0),
        ];
        rows[2].product_line = "EPI".into();
        rows[2].product = "Máscara".into();
        SalesDataset::from_records(rows)
    }

    #[test]
    fn view_over_everything() {
        let ds = dataset();
        let view = DashboardView::build(&ds.records, &FilterCriteria::default(), 10);
        assert_eq!(view.filtered.len(), 3);
        assert_eq!(view.metrics.invoice_count, 2);
        assert_eq!(view.metrics.total_value, 350.0);
        assert_eq!(view.by_product_line.rows.len(), 2);
        assert_eq!(
            view.by_salesperson.series(ValueField::Value),
            vec![("A", 150.0), ("B", 200.0)]
        );
        assert_eq!(view.top_products.rows[0].key, "Máscara");
    }

    #[test]
    fn set_dataset_builds_view_and_resets_filters() {
        let mut state = AppState::new(DashboardConfig::default());
        state.criteria.salesperson = Some("Z".into());
        state.set_dataset(dataset());

        assert!(state.criteria.is_empty());
        let view = state.view.as_ref().expect("view");
        assert_eq!(view.filtered.len(), 3);
        assert_ne!(
            state.salesperson_colors.color_for("A"),
            state.salesperson_colors.color_for("B")
        );
    }

    #[test]
    fn changing_criteria_recomputes() {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(dataset());

        state.set_criteria(FilterCriteria {
            salesperson: Some("B".into()),
            ..Default::default()
        });
        let view = state.view.as_ref().expect("view");
        assert_eq!(view.metrics.invoice_count, 1);
        assert_eq!(view.metrics.total_value, 200.0);

        assert!(!state.criteria.is_empty());

        state.reset_filters();
        assert!(state.criteria.is_empty());
        assert_eq!(state.view.as_ref().map(|v| v.filtered.len()), Some(3));
    }

    #[test]
    fn top_n_follows_config() {
        let mut config = DashboardConfig::default();
        config.top_n = 1;
        let mut state = AppState::new(config);
        state.set_dataset(dataset());
        assert_eq!(state.view.as_ref().map(|v| v.top_products.rows.len()), Some(1));
    }

    #[test]
    fn failed_load_halts_the_dashboard() {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(dataset());

        state.load_path(Path::new("/nonexistent/painel_vendas/df_vendas.csv"));
        assert!(state.dataset.is_none());
        assert!(state.view.is_none());
        let msg = state.load_error.as_deref().expect("error message");
        assert!(msg.starts_with("Arquivo 'df_vendas.csv' não encontrado"));
    }
}
