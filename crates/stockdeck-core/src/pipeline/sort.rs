use std::cmp::Ordering;

use crate::{SortDirection, SortKey, StockRecord};

/// Numeric value `key` reads from a record. Non-finite values count as missing.
pub fn sort_value(record: &StockRecord, key: SortKey) -> Option<f64> {
    let value = match key {
        SortKey::Change => Some(record.percentage_change),
        SortKey::CapitalPrice => record.capital_price(),
        SortKey::FuturesPrice => record.futures_price(),
    };
    value.filter(|value| value.is_finite())
}

/// Total order on optional values: numbers by `direction`, then all
/// missing values last regardless of direction.
fn compare_values(a: Option<f64>, b: Option<f64>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ordering = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort into a new vector; ties keep their input order.
pub fn sort_records<R>(records: &[R], key: SortKey, direction: SortDirection) -> Vec<R>
where
    R: AsRef<StockRecord> + Clone,
{
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        compare_values(
            sort_value(a.as_ref(), key),
            sort_value(b.as_ref(), key),
            direction,
        )
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(id: i64, capital: Option<f64>, futures: Option<f64>, change: f64) -> StockRecord {
        StockRecord::new(id, Some("SYM"), capital, futures, change).expect("valid record")
    }

    fn ids(records: &[StockRecord]) -> Vec<String> {
        records.iter().map(|record| record.id.to_string()).collect()
    }

    #[test]
    fn sorts_futures_descending() {
        let records = vec![
            priced(1, Some(1.0), Some(105.0), 0.0),
            priced(2, Some(1.0), Some(99.0), 0.0),
            priced(3, Some(1.0), Some(150.0), 0.0),
        ];

        let sorted = sort_records(&records, SortKey::FuturesPrice, SortDirection::Descending);

        let values: Vec<_> = sorted.iter().map(|r| r.futures_price()).collect();
        assert_eq!(values, vec![Some(150.0), Some(105.0), Some(99.0)]);
    }

    #[test]
    fn sorts_change_ascending_including_negatives() {
        let records = vec![
            priced(1, None, None, 1.5),
            priced(2, None, None, -2.0),
            priced(3, None, None, 0.0),
        ];
        let sorted = sort_records(&records, SortKey::Change, SortDirection::Ascending);
        assert_eq!(ids(&sorted), vec!["2", "3", "1"]);
    }

    #[test]
    fn missing_prices_sort_last_in_both_directions() {
        let records = vec![
            priced(1, None, None, 0.0),
            priced(2, Some(10.0), None, 0.0),
            priced(3, Some(5.0), None, 0.0),
        ];

        let ascending = sort_records(&records, SortKey::CapitalPrice, SortDirection::Ascending);
        let descending = sort_records(&records, SortKey::CapitalPrice, SortDirection::Descending);

        assert_eq!(ids(&ascending), vec!["3", "2", "1"]);
        assert_eq!(ids(&descending), vec!["2", "3", "1"]);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let records = vec![
            priced(1, Some(7.0), None, 0.0),
            priced(2, Some(3.0), None, 0.0),
            priced(3, Some(7.0), None, 0.0),
            priced(4, None, None, 0.0),
            priced(5, None, None, 0.0),
        ];

        let descending = sort_records(&records, SortKey::CapitalPrice, SortDirection::Descending);
        let ascending = sort_records(&records, SortKey::CapitalPrice, SortDirection::Ascending);

        assert_eq!(ids(&descending), vec!["1", "3", "2", "4", "5"]);
        assert_eq!(ids(&ascending), vec!["2", "1", "3", "4", "5"]);
    }

    #[test]
    fn input_is_not_mutated() {
        let records = vec![priced(1, None, None, 1.0), priced(2, None, None, 2.0)];
        let before = records.clone();
        let _ = sort_records(&records, SortKey::Change, SortDirection::Descending);
        assert_eq!(records, before);
    }
}
