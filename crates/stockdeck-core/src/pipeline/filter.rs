use crate::StockRecord;

/// Keep records whose trading symbol contains `query`, ignoring case.
///
/// An empty query keeps everything. Records without a symbol only survive
/// the empty query. Relative order is preserved.
pub fn filter_by_symbol<R>(records: &[R], query: &str) -> Vec<R>
where
    R: AsRef<StockRecord> + Clone,
{
    if query.is_empty() {
        return records.to_vec();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record
                .as_ref()
                .symbol()
                .is_some_and(|symbol| symbol.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
