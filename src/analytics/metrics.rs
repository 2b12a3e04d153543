use std::collections::HashSet;

use serde::Serialize;

use crate::data::model::SaleRecord;

/// Headline figures shown above the charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SalesMetrics {
    /// Distinct invoice numbers, not rows.
    pub invoice_count: usize,
    pub total_quantity: f64,
    pub total_value: f64,
    pub total_cost: f64,
    pub total_profit: f64,
}

/// Compute the five metrics over a (possibly empty) record set.
pub fn compute(records: &[SaleRecord]) -> SalesMetrics {
    let invoices: HashSet<&str> = records.iter().map(|r| r.invoice.as_str()).collect();

    records.iter().fold(
        SalesMetrics {
            invoice_count: invoices.len(),
            ..SalesMetrics::default()
        },
        |mut acc, r| {
            acc.total_quantity += r.quantity;
            acc.total_value += r.value;
            acc.total_cost += r.cost;
            acc.total_profit += r.profit;
            acc
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, FilterCriteria};
    use crate::data::model::tests::record;

    fn scenario() -> Vec<SaleRecord> {
        vec![
            record("1", "A", 100.0),
            record("1", "A", 50.0),
            record("2", "B", 200.0),
        ]
    }

    #[test]
    fn empty_set_is_all_zero() {
        assert_eq!(compute(&[]), SalesMetrics::default());
    }

    #[test]
    fn counts_distinct_invoices() {
        let m = compute(&scenario());
        assert_eq!(m.invoice_count, 2);
        assert_eq!(m.total_value, 350.0);
        assert_eq!(m.total_quantity, 3.0);
        assert!((m.total_cost - 210.0).abs() < 1e-9);
        assert!((m.total_profit - 140.0).abs() < 1e-9);
    }

    #[test]
    fn metrics_of_filtered_subset() {
        let criteria = FilterCriteria {
            salesperson: Some("B".into()),
            ..Default::default()
        };
        let m = compute(&apply(&scenario(), &criteria));
        assert_eq!(m.invoice_count, 1);
        assert_eq!(m.total_value, 200.0);
    }

    #[test]
    fn match_all_filter_preserves_metrics() {
        let records = scenario();
        let everything = FilterCriteria {
            min_value: Some(0.0),
            ..Default::default()
        };
        assert_eq!(compute(&apply(&records, &everything)), compute(&records));
    }
}
