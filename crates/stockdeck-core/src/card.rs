//! Per-record values derived for a list row or grid card.

use serde::Serialize;

use crate::format::{format_inr, format_percentage, relative_time};
use crate::{Movement, Orientation, RecordId, SortKey, StockRecord, UtcDateTime, ViewState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockCard {
    pub id: RecordId,
    pub symbol: Option<String>,
    /// Price in the headline slot: futures when sorting by futures, capital otherwise.
    pub headline_price: Option<f64>,
    pub primary_label: &'static str,
    pub primary_price: Option<f64>,
    pub secondary_label: &'static str,
    pub secondary_price: Option<f64>,
    /// `"F - C = 3.55"` or `"C - F = -3.55"`, depending on orientation.
    pub spread: Option<String>,
    pub change: f64,
    pub movement: Movement,
    /// Age of the record's own timestamp, e.g. `"3 min ago"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

impl StockCard {
    pub fn derive(record: &StockRecord, view: &ViewState, now: UtcDateTime) -> Self {
        let capital = record.capital_price();
        let futures = record.futures_price();

        let headline_price = match view.sort_key() {
            SortKey::FuturesPrice => futures,
            SortKey::CapitalPrice | SortKey::Change => capital,
        };

        let (primary_label, primary_price, secondary_label, secondary_price) =
            match view.orientation() {
                Orientation::FuturesFirst => ("F", futures, "C", capital),
                Orientation::CapitalFirst => ("C", capital, "F", futures),
            };

        let spread = primary_price.zip(secondary_price).map(|(primary, secondary)| {
            format!(
                "{primary_label} - {secondary_label} = {:.2}",
                primary - secondary
            )
        });

        Self {
            id: record.id.clone(),
            symbol: record.symbol().map(str::to_owned),
            headline_price,
            primary_label,
            primary_price,
            secondary_label,
            secondary_price,
            spread,
            change: record.percentage_change,
            movement: record.movement(),
            updated: record
                .last_updated_timestamp
                .map(|timestamp| relative_time(timestamp, now)),
        }
    }

    pub fn headline_text(&self) -> String {
        self.headline_price
            .map(format_inr)
            .unwrap_or_else(|| "--".to_owned())
    }

    /// `"0.45 %"` with the sign carried by [`Movement`].
    pub fn change_text(&self) -> String {
        format!("{} %", format_percentage(self.change))
    }
}
