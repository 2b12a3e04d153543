/// Pure analytics over a filtered record set.
///
/// ```text
///   &[SaleRecord]
///        │
///        ├──► metrics    five headline figures
///        ├──► aggregate  group-by sums and top-N ranking
///        ▼
///     format            pt-BR money / quantity strings
/// ```

pub mod aggregate;
pub mod format;
pub mod metrics;
