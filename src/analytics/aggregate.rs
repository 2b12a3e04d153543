use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::model::{GroupKey, SaleRecord, ValueField};

/// Number of products in the default ranking.
pub const DEFAULT_TOP_N: usize = 10;

/// One group: its key plus one sum per requested value field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedRow {
    pub key: String,
    /// Same order as [`AggregatedTable::fields`].
    pub sums: Vec<f64>,
}

/// Result of a group-by: the grouping column, the summed columns and the rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedTable {
    pub key: GroupKey,
    pub fields: Vec<ValueField>,
    pub rows: Vec<AggregatedRow>,
}

impl AggregatedTable {
    /// Sum of `field` in `row`, if this table summed that field.
    pub fn value(&self, row: &AggregatedRow, field: ValueField) -> Option<f64> {
        let idx = self.fields.iter().position(|f| *f == field)?;
        row.sums.get(idx).copied()
    }

    /// `(key, sum)` pairs for one field, in row order.
    pub fn series(&self, field: ValueField) -> Vec<(&str, f64)> {
        self.rows
            .iter()
            .filter_map(|row| Some((row.key.as_str(), self.value(row, field)?)))
            .collect()
    }
}

/// Partition `records` by `key` and sum each of `fields` per partition.
///
/// Rows come out in ascending key order.
pub fn group_and_sum(
    records: &[SaleRecord],
    key: GroupKey,
    fields: &[ValueField],
) -> AggregatedTable {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

    for record in records {
        let sums = groups
            .entry(key.of(record))
            .or_insert_with(|| vec![0.0; fields.len()]);
        for (sum, field) in sums.iter_mut().zip(fields) {
            *sum += field.of(record);
        }
    }

    AggregatedTable {
        key,
        fields: fields.to_vec(),
        rows: groups
            .into_iter()
            .map(|(k, sums)| AggregatedRow {
                key: k.to_string(),
                sums,
            })
            .collect(),
    }
}

/// The `n` groups of `key` with the largest summed `rank_field`, descending.
///
/// Equal sums keep ascending key order.
pub fn top_n(
    records: &[SaleRecord],
    rank_field: ValueField,
    key: GroupKey,
    n: usize,
) -> AggregatedTable {
    let mut table = group_and_sum(records, key, &[rank_field]);
    // `sort_by` is stable, so ties stay in key order.
    table
        .rows
        .sort_by(|a, b| b.sums[0].total_cmp(&a.sums[0]));
    table.rows.truncate(n);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;
    use proptest::prelude::*;

    fn sales() -> Vec<SaleRecord> {
        let mut rows = vec![
            record("1", "Ana", 100.0),
            record("1", "Bruno", 50.0),
            record("2", "Ana", 25.0),
            record("3", "Carla", 300.0),
        ];
        rows[0].product = "Seringa".into();
        rows[1].product = "Gaze".into();
        rows[2].product = "Seringa".into();
        rows[3].product = "Máscara".into();
        rows[3].product_line = "EPI".into();
        rows
    }

    #[test]
    fn groups_by_salesperson() {
        let table = group_and_sum(
            &sales(),
            GroupKey::Salesperson,
            &[ValueField::Value, ValueField::Quantity],
        );
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].key, "Ana");
        assert_eq!(table.rows[0].sums, vec![125.0, 2.0]);
        assert_eq!(table.value(&table.rows[2], ValueField::Value), Some(300.0));
        assert_eq!(table.value(&table.rows[2], ValueField::Cost), None);
    }

    #[test]
    fn groups_by_product_line() {
        let table = group_and_sum(
            &sales(),
            GroupKey::ProductLine,
            &[ValueField::Value, ValueField::Cost, ValueField::Profit],
        );
        let series = table.series(ValueField::Value);
        assert_eq!(series, vec![("Descartáveis", 175.0), ("EPI", 300.0)]);
    }

    #[test]
    fn empty_input_gives_no_rows() {
        let table = group_and_sum(&[], GroupKey::Product, &[ValueField::Value]);
        assert!(table.rows.is_empty());
        let top = top_n(&[], ValueField::Value, GroupKey::Product, 10);
        assert!(top.rows.is_empty());
    }

    #[test]
    fn ranks_products_descending() {
        let table = top_n(&sales(), ValueField::Value, GroupKey::Product, DEFAULT_TOP_N);
        let keys: Vec<_> = table.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["Máscara", "Seringa", "Gaze"]);
        assert_eq!(table.rows[1].sums, vec![125.0]);
    }

    #[test]
    fn truncates_to_n() {
        let table = top_n(&sales(), ValueField::Value, GroupKey::Product, 2);
        assert_eq!(table.rows.len(), 2);
        let none = top_n(&sales(), ValueField::Value, GroupKey::Product, 0);
        assert!(none.rows.is_empty());
    }

    #[test]
    fn ties_keep_key_order() {
        let rows = vec![
            record("1", "Zeca", 10.0),
            record("2", "Ana", 10.0),
            record("3", "Maria", 10.0),
        ];
        let table = top_n(&rows, ValueField::Value, GroupKey::Salesperson, 2);
        let keys: Vec<_> = table.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["Ana", "Maria"]);
    }

    fn arb_records() -> impl Strategy<Value = Vec<SaleRecord>> {
        prop::collection::vec(
            (prop::sample::select(vec!["A", "B", "C", "D", "E"]), 0u32..1000),
            0..50,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (seller, cents))| {
                    record(&i.to_string(), seller, f64::from(cents) / 100.0)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_grouping_conserves_totals(records in arb_records()) {
            let table = group_and_sum(&records, GroupKey::Salesperson, &[ValueField::Value]);
            let grouped: f64 = table.rows.iter().map(|r| r.sums[0]).sum();
            let direct: f64 = records.iter().map(|r| r.value).sum();
            prop_assert!((grouped - direct).abs() < 1e-6);
        }

        #[test]
        fn prop_top_n_is_ranked_subset(records in arb_records(), n in 0usize..7) {
            let all = group_and_sum(&records, GroupKey::Salesperson, &[ValueField::Value]);
            let top = top_n(&records, ValueField::Value, GroupKey::Salesperson, n);

            prop_assert!(top.rows.len() <= n);
            prop_assert_eq!(top.rows.len(), n.min(all.rows.len()));
            for row in &top.rows {
                prop_assert!(all.rows.contains(row));
            }
            for pair in top.rows.windows(2) {
                prop_assert!(pair[0].sums[0] >= pair[1].sums[0]);
            }
            if let Some(floor) = top.rows.last().map(|r| r.sums[0]) {
                for row in all.rows.iter().filter(|r| !top.rows.contains(r)) {
                    prop_assert!(row.sums[0] <= floor);
                }
            }
        }
    }
}
