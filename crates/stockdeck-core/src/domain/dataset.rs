use std::collections::HashSet;
use std::path::Path;

use crate::{CoreError, StockRecord, ValidationError};

const BUNDLED_DATASET: &str = include_str!("../../data/stocks.json");

/// The fixed, pre-shipped collection the simulated source draws from.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<StockRecord>,
}

impl Dataset {
    /// Dataset compiled into the binary.
    pub fn bundled() -> Result<Self, CoreError> {
        Self::from_json(BUNDLED_DATASET)
    }

    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        let records: Vec<StockRecord> = serde_json::from_str(text)?;
        Ok(Self::from_records(records)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Validates every record and that ids are unique by their rendered form.
    pub fn from_records(records: Vec<StockRecord>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            record.validate()?;
            if !seen.insert(record.id.to_string()) {
                return Err(ValidationError::DuplicateRecordId {
                    id: record.id.to_string(),
                });
            }
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[StockRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
