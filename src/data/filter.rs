use serde::{Deserialize, Serialize};

use super::model::SaleRecord;

// ---------------------------------------------------------------------------
// Filter criteria: one optional constraint per control
// ---------------------------------------------------------------------------

/// Current selections of the filter panel.
///
/// `None` means "Todos" (no constraint). Value bounds are inclusive and are not
/// checked against each other: `min > max` simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub salesperson: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
    pub status: Option<String>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl FilterCriteria {
    /// Whether no constraint is set.
    pub fn is_empty(&self) -> bool {
        *self == FilterCriteria::default()
    }

    /// A record passes when every present constraint holds.
    pub fn matches(&self, record: &SaleRecord) -> bool {
        fn text_ok(wanted: &Option<String>, actual: &str) -> bool {
            wanted.as_deref().map_or(true, |w| w == actual)
        }

        text_ok(&self.salesperson, &record.salesperson)
            && text_ok(&self.month, &record.month)
            && text_ok(&self.year, &record.year)
            && text_ok(&self.status, &record.status)
            && self.min_value.map_or(true, |min| record.value >= min)
            && self.max_value.map_or(true, |max| record.value <= max)
    }
}

/// Return the records passing all active criteria, in input order.
pub fn apply(records: &[SaleRecord], criteria: &FilterCriteria) -> Vec<SaleRecord> {
    records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;
    use proptest::prelude::*;

    fn scenario() -> Vec<SaleRecord> {
        vec![
            record("1", "A", 100.0),
            record("1", "A", 50.0),
            record("2", "B", 200.0),
        ]
    }

    #[test]
    fn no_criteria_keeps_everything() {
        let records = scenario();
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert_eq!(apply(&records, &criteria), records);
    }

    #[test]
    fn salesperson_filter_is_exact() {
        let records = scenario();
        let criteria = FilterCriteria {
            salesperson: Some("B".into()),
            ..Default::default()
        };
        assert_eq!(apply(&records, &criteria), vec![records[2].clone()]);

        let lowercase = FilterCriteria {
            salesperson: Some("b".into()),
            ..Default::default()
        };
        assert!(apply(&records, &lowercase).is_empty());
    }

    #[test]
    fn bounds_are_inclusive() {
        let records = scenario();
        let criteria = FilterCriteria {
            min_value: Some(50.0),
            max_value: Some(100.0),
            ..Default::default()
        };
        let out = apply(&records, &criteria);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].value, 100.0);
        assert_eq!(out[1].value, 50.0);
    }

    #[test]
    fn inverted_bounds_yield_empty() {
        let criteria = FilterCriteria {
            min_value: Some(150.0),
            max_value: Some(100.0),
            ..Default::default()
        };
        assert!(apply(&scenario(), &criteria).is_empty());
    }

    #[test]
    fn criteria_are_conjunctive() {
        let mut records = scenario();
        records[2].month = "2".into();
        records[2].status = "Cancelada".into();

        let criteria = FilterCriteria {
            month: Some("2".into()),
            status: Some("Faturada".into()),
            ..Default::default()
        };
        assert!(apply(&records, &criteria).is_empty());

        let criteria = FilterCriteria {
            month: Some("2".into()),
            year: Some("2024".into()),
            status: Some("Cancelada".into()),
            ..Default::default()
        };
        assert_eq!(apply(&records, &criteria).len(), 1);
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let criteria = FilterCriteria {
            salesperson: Some("A".into()),
            ..Default::default()
        };
        assert!(apply(&[], &criteria).is_empty());
    }

    fn arb_record() -> impl Strategy<Value = SaleRecord> {
        (
            prop::sample::select(vec!["A", "B", "C"]),
            prop::sample::select(vec!["1", "2"]),
            0u32..500,
        )
            .prop_map(|(salesperson, month, value)| {
                let mut r = record("9", salesperson, value as f64);
                r.month = month.to_string();
                r
            })
    }

    fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
        (
            prop::option::of(prop::sample::select(vec!["A", "B", "Z"])),
            prop::option::of(prop::sample::select(vec!["1", "2"])),
            prop::option::of(0u32..500),
            prop::option::of(0u32..500),
        )
            .prop_map(|(salesperson, month, min, max)| FilterCriteria {
                salesperson: salesperson.map(str::to_string),
                month: month.map(str::to_string),
                min_value: min.map(f64::from),
                max_value: max.map(f64::from),
                ..Default::default()
            })
    }

    proptest! {
        #[test]
        fn prop_filter_is_subset_and_idempotent(
            records in prop::collection::vec(arb_record(), 0..40),
            criteria in arb_criteria(),
        ) {
            let once = apply(&records, &criteria);
            prop_assert!(once.iter().all(|r| records.contains(r)));
            prop_assert!(once.iter().all(|r| criteria.matches(r)));
            prop_assert_eq!(apply(&once, &criteria), once);
        }
    }
}
