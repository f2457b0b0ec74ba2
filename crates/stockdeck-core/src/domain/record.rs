use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{UtcDateTime, ValidationError};

/// Record identifier as shipped in the dataset: either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl RecordId {
    /// Equality on the rendered form, so `Number(7)` matches `Text("7")`.
    pub fn matches(&self, other: &RecordId) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(number), Self::Text(text)) | (Self::Text(text), Self::Number(number)) => {
                *text == number.to_string()
            }
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl FromStr for RecordId {
    type Err = std::convert::Infallible;

    /// Numeric input becomes [`RecordId::Number`], anything else [`RecordId::Text`].
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        Ok(trimmed
            .parse::<i64>()
            .map(Self::Number)
            .unwrap_or_else(|_| Self::Text(trimmed.to_owned())))
    }
}

/// Direction of the day's move. Zero change counts as positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    Positive,
    Negative,
}

impl Movement {
    pub fn of(change: f64) -> Self {
        if change >= 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

/// One instrument snapshot with capital-market and futures prices.
///
/// Field names on the wire match the shipped dataset exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub id: RecordId,
    #[serde(default)]
    pub trading_symbol: Option<String>,
    #[serde(default)]
    pub capital_market_last_traded_price: Option<f64>,
    #[serde(default)]
    pub futures_last_traded_price: Option<f64>,
    pub percentage_change: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_timestamp: Option<UtcDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

impl StockRecord {
    pub fn new(
        id: impl Into<RecordId>,
        trading_symbol: Option<&str>,
        capital_price: Option<f64>,
        futures_price: Option<f64>,
        percentage_change: f64,
    ) -> Result<Self, ValidationError> {
        let record = Self {
            id: id.into(),
            trading_symbol: trading_symbol.map(str::to_owned),
            capital_market_last_traded_price: capital_price,
            futures_last_traded_price: futures_price,
            percentage_change,
            last_updated_timestamp: None,
            about: None,
        };
        record.validate()?;
        Ok(record)
    }

    pub fn with_timestamp(mut self, timestamp: UtcDateTime) -> Self {
        self.last_updated_timestamp = Some(timestamp);
        self
    }

    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.percentage_change.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                field: "percentageChange",
            });
        }
        validate_optional_finite(
            "capitalMarketLastTradedPrice",
            self.capital_market_last_traded_price,
        )?;
        validate_optional_finite("futuresLastTradedPrice", self.futures_last_traded_price)?;
        Ok(())
    }

    /// Trading symbol, treating an empty string as absent.
    pub fn symbol(&self) -> Option<&str> {
        self.trading_symbol
            .as_deref()
            .filter(|symbol| !symbol.is_empty())
    }

    pub fn capital_price(&self) -> Option<f64> {
        self.capital_market_last_traded_price
    }

    pub fn futures_price(&self) -> Option<f64> {
        self.futures_last_traded_price
    }

    pub fn is_complete(&self) -> bool {
        self.symbol().is_some() && self.capital_price().is_some() && self.futures_price().is_some()
    }

    pub fn movement(&self) -> Movement {
        Movement::of(self.percentage_change)
    }
}

impl AsRef<StockRecord> for StockRecord {
    fn as_ref(&self) -> &StockRecord {
        self
    }
}

fn validate_optional_finite(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(value) = value {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteValue { field });
        }
    }
    Ok(())
}
