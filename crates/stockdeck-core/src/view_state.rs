//! Display preferences and navigation state.
//!
//! Search query, sort key and sort direction change *which* records are
//! shown and in what order, so touching any of them sends the user back to
//! page 1. Orientation and density only change how the same records are
//! drawn and leave the page alone.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{RecordId, ValidationError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Change,
    CapitalPrice,
    FuturesPrice,
}

impl SortKey {
    pub const ALL: [Self; 3] = [Self::Change, Self::CapitalPrice, Self::FuturesPrice];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Change => "change",
            Self::CapitalPrice => "capital",
            Self::FuturesPrice => "futures",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Change => "Percentage Change",
            Self::CapitalPrice => "Capital Market Price",
            Self::FuturesPrice => "Futures Price",
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "change" => Ok(Self::Change),
            "capital" | "capital_price" => Ok(Self::CapitalPrice),
            "futures" | "futures_price" => Ok(Self::FuturesPrice),
            _ => Err(ValidationError::InvalidSortKey {
                value: input.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(ValidationError::InvalidSortDirection {
                value: input.to_owned(),
            }),
        }
    }
}

/// Which of the two prices is shown as primary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    FuturesFirst,
    #[default]
    CapitalFirst,
}

impl Orientation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FuturesFirst => "futures-first",
            Self::CapitalFirst => "capital-first",
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "futures-first" | "futures" | "futures-capital" => Ok(Self::FuturesFirst),
            "capital-first" | "capital" | "capital-futures" => Ok(Self::CapitalFirst),
            _ => Err(ValidationError::InvalidOrientation {
                value: input.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Density {
    Compact,
    #[default]
    Grid,
}

impl Density {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Compact => Self::Grid,
            Self::Grid => Self::Compact,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Grid => "grid",
        }
    }
}

impl Display for Density {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Density {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "compact" | "list" => Ok(Self::Compact),
            "grid" => Ok(Self::Grid),
            _ => Err(ValidationError::InvalidDensity {
                value: input.to_owned(),
            }),
        }
    }
}

/// Process-local view state. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    search_query: String,
    sort_key: SortKey,
    sort_direction: SortDirection,
    orientation: Orientation,
    density: Density,
    current_page: usize,
    selected_record_id: Option<RecordId>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            sort_key: SortKey::default(),
            sort_direction: SortDirection::default(),
            orientation: Orientation::default(),
            density: Density::default(),
            current_page: 1,
            selected_record_id: None,
        }
    }
}

impl ViewState {
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn selected_record_id(&self) -> Option<&RecordId> {
        self.selected_record_id.as_ref()
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.current_page = 1;
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
        self.current_page = 1;
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.sort_direction = direction;
        self.current_page = 1;
    }

    pub fn toggle_sort_direction(&mut self) {
        self.set_sort_direction(self.sort_direction.toggled());
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn set_density(&mut self, density: Density) {
        self.density = density;
    }

    pub fn toggle_density(&mut self) {
        self.density = self.density.toggled();
    }

    /// Move to `page`, clamped to `[1, total_pages]`.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
        self.current_page = page.clamp(1, total_pages.max(1));
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.go_to_page(self.current_page.saturating_add(1), total_pages);
    }

    /// Pull the page back in range after the collection changed.
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.go_to_page(self.current_page, total_pages);
    }

    pub fn prev_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    pub fn select(&mut self, id: RecordId) {
        self.selected_record_id = Some(id);
    }

    pub fn close_detail(&mut self) {
        self.selected_record_id = None;
    }
}
