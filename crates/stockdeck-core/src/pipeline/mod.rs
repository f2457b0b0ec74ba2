//! Filter → sort → paginate.
//!
//! Every stage is pure: inputs are borrowed and a new collection is
//! returned. [`shape`] runs the whole chain for a given [`ViewState`].

mod filter;
mod paginate;
mod sort;

pub use filter::filter_by_symbol;
pub use paginate::{paginate, total_pages, Page, PAGE_SIZE};
pub use sort::{sort_records, sort_value};

use crate::{StockRecord, ViewState};

/// Records matching the view's query, in the view's order.
pub fn ordered_matches<'a>(records: &'a [StockRecord], view: &ViewState) -> Vec<&'a StockRecord> {
    let refs: Vec<&StockRecord> = records.iter().collect();
    let matches = filter_by_symbol(&refs, view.search_query());
    let ordered = sort_records(&matches, view.sort_key(), view.sort_direction());
    tracing::debug!(
        total = records.len(),
        matched = ordered.len(),
        query = view.search_query(),
        sort = %view.sort_key(),
        direction = %view.sort_direction(),
        "shaped watchlist"
    );
    ordered
}

/// The page of records the user sees for `view`.
pub fn shape<'a>(records: &'a [StockRecord], view: &ViewState) -> Page<&'a StockRecord> {
    paginate(&ordered_matches(records, view), PAGE_SIZE, view.current_page())
}
