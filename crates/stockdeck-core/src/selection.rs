//! Detail resolution for the selected record.
//!
//! The selection is only an id. It is resolved against the current
//! collection every time, so a refresh that drops the record turns an open
//! detail into "Stock data missing entirely." instead of showing stale data.

use serde::Serialize;

use crate::format::{format_futures_difference, format_inr, format_percentage, relative_time};
use crate::{Movement, RecordId, StockRecord, UtcDateTime};

/// Title shown when the record has no usable symbol.
pub const UNKNOWN_STOCK_TITLE: &str = "Unknown Stock";

/// Why a record cannot be shown in detail. Variants are listed in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailIssue {
    RecordNotFound,
    MissingCapitalPrice,
    MissingFuturesPrice,
    MissingSymbol,
}

impl DetailIssue {
    pub const fn message(self) -> &'static str {
        match self {
            Self::RecordNotFound => "Stock data missing entirely.",
            Self::MissingCapitalPrice => "Missing Capital Market Price.",
            Self::MissingFuturesPrice => "Missing Futures Price.",
            Self::MissingSymbol => "Missing Trading Symbol.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailResolution<'a> {
    Complete(&'a StockRecord),
    Incomplete {
        record: Option<&'a StockRecord>,
        issues: Vec<DetailIssue>,
    },
}

impl DetailResolution<'_> {
    pub fn issues(&self) -> &[DetailIssue] {
        match self {
            Self::Complete(_) => &[],
            Self::Incomplete { issues, .. } => issues,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }
}

/// Look `id` up in `records` and list everything that blocks a detail view.
pub fn resolve_detail<'a>(records: &'a [StockRecord], id: &RecordId) -> DetailResolution<'a> {
    let Some(record) = records.iter().find(|record| record.id.matches(id)) else {
        return DetailResolution::Incomplete {
            record: None,
            issues: vec![DetailIssue::RecordNotFound],
        };
    };

    let mut issues = Vec::new();
    if record.capital_price().is_none() {
        issues.push(DetailIssue::MissingCapitalPrice);
    }
    if record.futures_price().is_none() {
        issues.push(DetailIssue::MissingFuturesPrice);
    }
    if record.symbol().is_none() {
        issues.push(DetailIssue::MissingSymbol);
    }

    if issues.is_empty() {
        DetailResolution::Complete(record)
    } else {
        DetailResolution::Incomplete {
            record: Some(record),
            issues,
        }
    }
}

/// Owned detail content handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailView {
    Ready(Box<DetailCard>),
    Missing {
        title: String,
        issues: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailCard {
    pub record: StockRecord,
    pub symbol: String,
    pub capital_price: String,
    pub futures_price: String,
    pub futures_difference: String,
    pub change: String,
    pub movement: Movement,
    pub updated: Option<String>,
    pub trend: Vec<f64>,
}

impl DetailView {
    /// Build the detail for `id`. `trend` is used only when the record is complete.
    pub fn build(
        records: &[StockRecord],
        id: &RecordId,
        trend: Vec<f64>,
        now: UtcDateTime,
    ) -> Self {
        match resolve_detail(records, id) {
            DetailResolution::Complete(record) => Self::ready(record, trend, now),
            DetailResolution::Incomplete { record, issues } => Self::Missing {
                title: record
                    .and_then(StockRecord::symbol)
                    .unwrap_or(UNKNOWN_STOCK_TITLE)
                    .to_owned(),
                issues: issues
                    .into_iter()
                    .map(|issue| issue.message().to_owned())
                    .collect(),
            },
        }
    }

    fn ready(record: &StockRecord, trend: Vec<f64>, now: UtcDateTime) -> Self {
        let capital = record.capital_price().unwrap_or_default();
        let futures = record.futures_price().unwrap_or_default();
        Self::Ready(Box::new(DetailCard {
            record: record.clone(),
            symbol: record.symbol().unwrap_or(UNKNOWN_STOCK_TITLE).to_owned(),
            capital_price: format_inr(capital),
            futures_price: format_inr(futures),
            futures_difference: format_futures_difference(capital, futures),
            change: format!("{}%", format_percentage(record.percentage_change)),
            movement: record.movement(),
            updated: record
                .last_updated_timestamp
                .map(|timestamp| relative_time(timestamp, now)),
            trend,
        }))
    }

    pub fn issues(&self) -> &[String] {
        match self {
            Self::Ready(_) => &[],
            Self::Missing { issues, .. } => issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<StockRecord> {
        vec![
            StockRecord::new(1, Some("TCS"), Some(3712.2), Some(3715.75), -0.45).expect("valid"),
            StockRecord::new(2, Some("EICHERMOT"), None, Some(4620.0), 1.2).expect("valid"),
            StockRecord::new(3, Some(""), None, None, 0.0).expect("valid"),
        ]
    }

    #[test]
    fn complete_record_resolves() {
        let records = records();
        let resolution = resolve_detail(&records, &RecordId::Number(1));
        assert_eq!(resolution, DetailResolution::Complete(&records[0]));
        assert!(resolution.issues().is_empty());
    }

    #[test]
    fn missing_capital_price_is_the_only_issue() {
        let records = records();
        let resolution = resolve_detail(&records, &RecordId::Number(2));
        assert_eq!(resolution.issues(), &[DetailIssue::MissingCapitalPrice]);
    }

    #[test]
    fn issues_are_listed_in_display_order() {
        let records = records();
        let resolution = resolve_detail(&records, &RecordId::Number(3));
        assert_eq!(
            resolution.issues(),
            &[
                DetailIssue::MissingCapitalPrice,
                DetailIssue::MissingFuturesPrice,
                DetailIssue::MissingSymbol,
            ]
        );
    }

    #[test]
    fn digit_text_id_resolves_from_parsed_input() {
        let records = vec![
            StockRecord::new("7", Some("WIPRO"), Some(250.0), Some(251.0), 0.1).expect("valid"),
        ];
        let id: RecordId = "7".parse().expect("infallible");
        assert_eq!(
            resolve_detail(&records, &id),
            DetailResolution::Complete(&records[0])
        );
    }

    #[test]
    fn absent_record_lists_only_not_found() {
        let records = records();
        let resolution = resolve_detail(&records, &RecordId::from("nope"));
        assert_eq!(resolution.issues(), &[DetailIssue::RecordNotFound]);
        assert_eq!(
            DetailIssue::RecordNotFound.message(),
            "Stock data missing entirely."
        );
    }

    #[test]
    fn missing_view_uses_symbol_or_unknown_title() {
        let now = UtcDateTime::now();
        let records = records();

        let view = DetailView::build(&records, &RecordId::Number(2), Vec::new(), now);
        assert_eq!(
            view,
            DetailView::Missing {
                title: "EICHERMOT".to_owned(),
                issues: vec!["Missing Capital Market Price.".to_owned()],
            }
        );

        let view = DetailView::build(&records, &RecordId::Number(3), Vec::new(), now);
        assert!(
            matches!(view, DetailView::Missing { ref title, .. } if title == UNKNOWN_STOCK_TITLE)
        );
    }

    #[test]
    fn ready_view_formats_prices() {
        let records = records();
        let view = DetailView::build(
            &records,
            &RecordId::Number(1),
            vec![3712.5],
            UtcDateTime::now(),
        );
        let DetailView::Ready(card) = view else {
            panic!("expected ready detail");
        };
        assert_eq!(card.capital_price, "₹3,712.20");
        assert_eq!(card.futures_difference, "▲ ₹3.55");
        assert_eq!(card.change, "0.45%");
        assert_eq!(card.movement, Movement::Negative);
        assert_eq!(card.trend, vec![3712.5]);
        assert_eq!(card.updated, None);
    }
}
