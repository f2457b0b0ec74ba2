//! Behavior-driven tests for the filter → sort → paginate pipeline
//!
//! These tests verify WHAT the user sees for a given collection and view:
//! which records match, in which order, and how they are split into pages.
//! Property checks run over many generated collections from a seeded RNG.

use stockdeck_core::pipeline::{
    filter_by_symbol, paginate, shape, sort_records, sort_value, PAGE_SIZE,
};
use stockdeck_core::{
    Density, Orientation, RecordId, SortDirection, SortKey, StockRecord, ViewState,
};

const SYMBOLS: [&str; 12] = [
    "TCS", "INFY", "RELIANCE", "HDFCBANK", "ICICIBANK", "SBIN", "TATAMOTORS", "TATASTEEL",
    "ITC", "M&M", "WIPRO", "TECHM",
];

fn record(
    id: i64,
    symbol: Option<&str>,
    capital: Option<f64>,
    futures: Option<f64>,
    change: f64,
) -> StockRecord {
    StockRecord::new(id, symbol, capital, futures, change).expect("valid record")
}

/// Random collection with deliberate ties, missing prices and missing symbols.
fn random_collection(rng: &mut fastrand::Rng) -> Vec<StockRecord> {
    let size = rng.usize(0..60);
    (0..size as i64)
        .map(|id| {
            let symbol = if rng.u8(..10) == 0 {
                None
            } else {
                Some(SYMBOLS[rng.usize(..SYMBOLS.len())])
            };
            let price = |rng: &mut fastrand::Rng| {
                if rng.u8(..8) == 0 {
                    None
                } else {
                    Some(f64::from(rng.u16(90..110)))
                }
            };
            let capital = price(rng);
            let futures = price(rng);
            let change = f64::from(rng.i8(-3..=3)) / 2.0;
            record(id, symbol, capital, futures, change)
        })
        .collect()
}

fn ids(records: &[StockRecord]) -> Vec<RecordId> {
    records.iter().map(|record| record.id.clone()).collect()
}

fn five_records() -> Vec<StockRecord> {
    vec![
        record(1, Some("TCS"), Some(3712.2), Some(3715.75), -0.45),
        record(2, Some("INFY"), Some(1450.0), Some(1452.1), 1.1),
        record(3, Some("RELIANCE"), Some(2890.5), Some(2888.0), 0.0),
        record(4, Some("ITC"), Some(410.3), Some(411.0), 0.7),
        record(5, Some("TATAMOTORS"), Some(980.0), Some(985.4), -1.3),
    ]
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn when_filtering_any_collection_exactly_the_matching_symbols_remain_in_order() {
    let mut rng = fastrand::Rng::with_seed(2024);
    let queries = ["", "t", "TA", "bank", "m&m", "zzz", "Tcs"];

    for _ in 0..200 {
        // Given: A random collection and a query
        let records = random_collection(&mut rng);
        let query = queries[rng.usize(..queries.len())];

        // When: The collection is filtered
        let filtered = filter_by_symbol(&records, query);

        // Then: The result is the order-preserving subsequence of matches
        let expected: Vec<StockRecord> = records
            .iter()
            .filter(|record| {
                query.is_empty()
                    || record
                        .symbol()
                        .is_some_and(|symbol| symbol.to_lowercase().contains(&query.to_lowercase()))
            })
            .cloned()
            .collect();
        assert_eq!(filtered, expected, "query {query:?}");
    }
}

#[test]
fn when_query_is_empty_all_five_records_are_returned_unchanged() {
    // Given: Five records
    let records = five_records();

    // When: Filtering with an empty query
    let filtered = filter_by_symbol(&records, "");

    // Then: All five come back in the same order
    assert_eq!(filtered, records);
}

#[test]
fn when_query_matches_nothing_the_result_is_empty_not_an_error() {
    let filtered = filter_by_symbol(&five_records(), "NOPE");
    assert!(filtered.is_empty());
}

// =============================================================================
// Sorting
// =============================================================================

#[test]
fn when_sorting_any_collection_the_result_is_a_stable_permutation() {
    let mut rng = fastrand::Rng::with_seed(77);
    let directions = [SortDirection::Ascending, SortDirection::Descending];

    for _ in 0..200 {
        // Given: A random collection, key and direction
        let records = random_collection(&mut rng);
        let key = SortKey::ALL[rng.usize(..SortKey::ALL.len())];
        let direction = directions[rng.usize(..2)];

        // When: The collection is sorted
        let sorted = sort_records(&records, key, direction);

        // Then: It is a permutation of the input
        let mut before = ids(&records);
        let mut after = ids(&sorted);
        before.sort_by_key(ToString::to_string);
        after.sort_by_key(ToString::to_string);
        assert_eq!(before, after);

        // And: Numbers are ordered, missing values come last
        let values: Vec<Option<f64>> = sorted.iter().map(|r| sort_value(r, key)).collect();
        let first_missing = values.iter().position(Option::is_none).unwrap_or(values.len());
        assert!(values[first_missing..].iter().all(Option::is_none));
        for pair in values[..first_missing].windows(2) {
            let (a, b) = (pair[0].expect("present"), pair[1].expect("present"));
            match direction {
                SortDirection::Ascending => assert!(a <= b),
                SortDirection::Descending => assert!(a >= b),
            }
        }

        // And: Records with equal keys keep their input order
        let position = |id: &RecordId| records.iter().position(|r| &r.id == id);
        for pair in sorted.windows(2) {
            if sort_value(&pair[0], key) == sort_value(&pair[1], key) {
                assert!(position(&pair[0].id) < position(&pair[1].id));
            }
        }
    }
}

#[test]
fn when_sorted_ascending_then_descending_then_ascending_ties_keep_their_order() {
    let mut rng = fastrand::Rng::with_seed(5);

    for _ in 0..100 {
        // Given: A collection already sorted ascending
        let records = random_collection(&mut rng);
        let ascending = sort_records(&records, SortKey::Change, SortDirection::Ascending);

        // When: It is sorted descending and back
        let descending = sort_records(&ascending, SortKey::Change, SortDirection::Descending);
        let round_trip = sort_records(&descending, SortKey::Change, SortDirection::Ascending);

        // Then: The original ascending order is restored
        assert_eq!(ids(&round_trip), ids(&ascending));
    }
}

#[test]
fn when_sorting_by_futures_descending_highest_price_comes_first() {
    // Given: Futures prices 105, 99, 150
    let records = vec![
        record(1, Some("A"), Some(100.0), Some(105.0), 0.0),
        record(2, Some("B"), Some(100.0), Some(99.0), 0.0),
        record(3, Some("C"), Some(100.0), Some(150.0), 0.0),
    ];

    // When: Sorted by futures price, descending
    let sorted = sort_records(&records, SortKey::FuturesPrice, SortDirection::Descending);

    // Then: 150, 105, 99
    let prices: Vec<Option<f64>> = sorted.iter().map(StockRecord::futures_price).collect();
    assert_eq!(prices, vec![Some(150.0), Some(105.0), Some(99.0)]);
}

#[test]
fn when_a_price_is_missing_the_record_sorts_last_in_both_directions() {
    let records = vec![
        record(1, Some("A"), None, Some(1.0), 0.0),
        record(2, Some("B"), Some(5.0), Some(1.0), 0.0),
        record(3, Some("C"), Some(2.0), Some(1.0), 0.0),
    ];

    for direction in [SortDirection::Ascending, SortDirection::Descending] {
        let sorted = sort_records(&records, SortKey::CapitalPrice, direction);
        assert_eq!(sorted[2].id, RecordId::Number(1), "{direction}");
    }
}

// =============================================================================
// Pagination
// =============================================================================

#[test]
fn when_paginating_any_size_page_bounds_hold() {
    for count in 0..=80_usize {
        // Given: A collection of `count` items
        let items: Vec<usize> = (0..count).collect();

        // When: First and last pages are requested
        let first = paginate(&items, PAGE_SIZE, 1);
        let last = paginate(&items, PAGE_SIZE, usize::MAX);

        // Then: Page count and slice lengths follow the page size
        let expected_pages = count.div_ceil(PAGE_SIZE).max(1);
        assert_eq!(first.total_pages, expected_pages);
        assert_eq!(first.items.len(), count.min(PAGE_SIZE));
        assert_eq!(last.page_number, expected_pages);

        let expected_last = match (count, count % PAGE_SIZE) {
            (0, _) => 0,
            (_, 0) => PAGE_SIZE,
            (_, rest) => rest,
        };
        assert_eq!(last.items.len(), expected_last, "count {count}");
        assert_eq!(first.total_items, count);
    }
}

#[test]
fn when_page_number_is_out_of_range_it_is_clamped() {
    let items: Vec<usize> = (0..40).collect();

    let below = paginate(&items, PAGE_SIZE, 0);
    assert_eq!(below.page_number, 1);
    assert_eq!(below.items.first(), Some(&0));

    let third = paginate(&items, PAGE_SIZE, 3);
    assert_eq!(third.items, vec![36, 37, 38, 39]);
    assert!(third.has_prev());
    assert!(!third.has_next());
}

// =============================================================================
// View state and the whole chain
// =============================================================================

#[test]
fn when_data_changing_preferences_change_the_page_resets_and_cosmetic_ones_do_not() {
    let mut rng = fastrand::Rng::with_seed(9);

    for _ in 0..100 {
        // Given: A view sitting on page 4
        let mut view = ViewState::default();
        view.go_to_page(4, 10);

        // When: A random preference changes
        let resets = match rng.u8(..6) {
            0 => {
                view.set_search_query("ta");
                true
            }
            1 => {
                view.set_sort_key(SortKey::ALL[rng.usize(..3)]);
                true
            }
            2 => {
                view.toggle_sort_direction();
                true
            }
            3 => {
                view.set_orientation(Orientation::FuturesFirst);
                false
            }
            4 => {
                view.toggle_density();
                false
            }
            _ => {
                view.set_density(Density::Compact);
                false
            }
        };

        // Then: Only query, key and direction send the user back to page 1
        let expected = if resets { 1 } else { 4 };
        assert_eq!(view.current_page(), expected);
    }
}

#[test]
fn when_shaping_the_view_matches_are_filtered_sorted_and_paged() {
    // Given: 40 records, half of them TATA symbols, and a view asking for page 2
    let records: Vec<StockRecord> = (1..=40)
        .map(|id| {
            let symbol = if id % 2 == 0 { "TATASTEEL" } else { "INFY" };
            record(id, Some(symbol), Some(id as f64), Some(id as f64 + 1.0), 0.0)
        })
        .collect();
    let mut view = ViewState::default();
    view.set_search_query("tata");
    view.set_sort_key(SortKey::CapitalPrice);
    view.go_to_page(2, 2);

    // When: The visible page is computed
    let page = shape(&records, &view);

    // Then: 20 matches, highest capital first, page 2 has the last two
    assert_eq!(page.total_items, 20);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.page_number, 2);
    let visible: Vec<&RecordId> = page.items.iter().map(|record| &record.id).collect();
    assert_eq!(visible, vec![&RecordId::Number(4), &RecordId::Number(2)]);
}
