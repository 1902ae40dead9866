//! User-selected search filters.

use serde::{Deserialize, Serialize};

use super::FuelSelection;

/// Whether the selected companies are the only ones wanted or the ones to avoid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyMode {
    #[default]
    Include,
    Exclude,
}

/// Ranking criterion for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Distance,
    Price,
}

/// Search filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub fuel: FuelSelection,

    /// Company names to include or exclude. Empty disables the filter.
    pub companies: Vec<String>,

    pub company_mode: CompanyMode,

    /// Maximum per-litre price. Zero means unlimited.
    pub max_price: f64,

    /// Corridor radius around the route path, in km.
    pub max_distance_km: f64,

    /// Skip stations whose opening hours say they are closed.
    pub only_open: bool,

    pub sort_by: SortBy,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            fuel: FuelSelection::default(),
            companies: Vec::new(),
            company_mode: CompanyMode::Include,
            max_price: 0.0,
            max_distance_km: 50.0,
            only_open: false,
            sort_by: SortBy::Distance,
        }
    }
}

impl FilterSettings {
    /// True when `price` satisfies the price cap.
    pub fn price_allowed(&self, price: f64) -> bool {
        self.max_price <= 0.0 || price <= self.max_price
    }
}
