//! Fuel kinds and per-station price tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// One of the five fuels tracked in the price feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelKind {
    Gasoline95E5,
    Gasoline98E5,
    DieselA,
    DieselPremium,
    Lpg,
}

impl FuelKind {
    pub const ALL: [FuelKind; 5] = [
        FuelKind::Gasoline95E5,
        FuelKind::Gasoline98E5,
        FuelKind::DieselA,
        FuelKind::DieselPremium,
        FuelKind::Lpg,
    ];

    /// Machine name, as used in the HTTP API.
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelKind::Gasoline95E5 => "gasoline_95_e5",
            FuelKind::Gasoline98E5 => "gasoline_98_e5",
            FuelKind::DieselA => "diesel_a",
            FuelKind::DieselPremium => "diesel_premium",
            FuelKind::Lpg => "lpg",
        }
    }

    /// Label used by the Spanish price feed and its users.
    pub fn label(&self) -> &'static str {
        match self {
            FuelKind::Gasoline95E5 => "Gasolina 95 E5",
            FuelKind::Gasoline98E5 => "Gasolina 98 E5",
            FuelKind::DieselA => "Gasóleo A",
            FuelKind::DieselPremium => "Gasóleo Premium",
            FuelKind::Lpg => "GLP",
        }
    }
}

impl fmt::Display for FuelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The fuel a search is about: a specific kind, or whichever is cheapest.
///
/// Parses from either the machine name or the feed label, plus `any`/`all`.
///
/// # Examples
///
/// ```
/// use refuel_server::domain::{FuelKind, FuelSelection};
///
/// let diesel: FuelSelection = "Gasóleo A".parse().unwrap();
/// assert_eq!(diesel, FuelSelection::Kind(FuelKind::DieselA));
///
/// let any: FuelSelection = "all".parse().unwrap();
/// assert_eq!(any, FuelSelection::Any);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FuelSelection {
    Any,
    Kind(FuelKind),
}

impl Default for FuelSelection {
    fn default() -> Self {
        FuelSelection::Kind(FuelKind::Gasoline95E5)
    }
}

impl FromStr for FuelSelection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("any") || trimmed.eq_ignore_ascii_case("all") {
            return Ok(FuelSelection::Any);
        }
        FuelKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == trimmed || kind.label() == trimmed)
            .map(FuelSelection::Kind)
            .ok_or_else(|| DomainError::UnknownFuel(trimmed.to_string()))
    }
}

impl TryFrom<String> for FuelSelection {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FuelSelection> for String {
    fn from(selection: FuelSelection) -> Self {
        selection.to_string()
    }
}

impl fmt::Display for FuelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuelSelection::Any => f.write_str("any"),
            FuelSelection::Kind(kind) => f.write_str(kind.as_str()),
        }
    }
}

/// Per-litre prices in euros. `None`, zero, or negative means the fuel is
/// not sold or has no data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelPrices {
    pub gasoline_95_e5: Option<f64>,
    pub gasoline_98_e5: Option<f64>,
    pub diesel_a: Option<f64>,
    pub diesel_premium: Option<f64>,
    pub lpg: Option<f64>,
}

impl FuelPrices {
    /// Usable price for one fuel kind.
    pub fn get(&self, kind: FuelKind) -> Option<f64> {
        let raw = match kind {
            FuelKind::Gasoline95E5 => self.gasoline_95_e5,
            FuelKind::Gasoline98E5 => self.gasoline_98_e5,
            FuelKind::DieselA => self.diesel_a,
            FuelKind::DieselPremium => self.diesel_premium,
            FuelKind::Lpg => self.lpg,
        };
        raw.filter(|p| p.is_finite() && *p > 0.0)
    }

    /// Sets the raw price for one fuel kind.
    pub fn set(&mut self, kind: FuelKind, price: Option<f64>) {
        let slot = match kind {
            FuelKind::Gasoline95E5 => &mut self.gasoline_95_e5,
            FuelKind::Gasoline98E5 => &mut self.gasoline_98_e5,
            FuelKind::DieselA => &mut self.diesel_a,
            FuelKind::DieselPremium => &mut self.diesel_premium,
            FuelKind::Lpg => &mut self.lpg,
        };
        *slot = price;
    }

    /// Builder form of [`FuelPrices::set`].
    pub fn with(mut self, kind: FuelKind, price: f64) -> Self {
        self.set(kind, Some(price));
        self
    }

    /// Cheapest usable price across all fuels.
    pub fn min_positive(&self) -> Option<f64> {
        FuelKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind))
            .min_by(f64::total_cmp)
    }

    /// Relevant per-litre price for a selection. `Any` resolves to the
    /// cheapest fuel the station sells.
    pub fn for_selection(&self, selection: FuelSelection) -> Option<f64> {
        match selection {
            FuelSelection::Any => self.min_positive(),
            FuelSelection::Kind(kind) => self.get(kind),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn price() -> impl Strategy<Value = Option<f64>> {
        prop_oneof![Just(None), (-1.0f64..3.0).prop_map(Some)]
    }

    proptest! {
        /// The cheapest price never exceeds any individual usable price
        #[test]
        fn min_positive_is_lower_bound(p in proptest::array::uniform5(price())) {
            let prices = FuelPrices {
                gasoline_95_e5: p[0],
                gasoline_98_e5: p[1],
                diesel_a: p[2],
                diesel_premium: p[3],
                lpg: p[4],
            };

            match prices.min_positive() {
                Some(min) => {
                    prop_assert!(min > 0.0);
                    for kind in FuelKind::ALL {
                        if let Some(price) = prices.get(kind) {
                            prop_assert!(min <= price);
                        }
                    }
                }
                None => {
                    for kind in FuelKind::ALL {
                        prop_assert!(prices.get(kind).is_none());
                    }
                }
            }
        }

        /// Display and FromStr agree for every selection
        #[test]
        fn display_parses_back(idx in 0usize..6) {
            let selection = if idx == 5 {
                FuelSelection::Any
            } else {
                FuelSelection::Kind(FuelKind::ALL[idx])
            };
            prop_assert_eq!(selection.to_string().parse::<FuelSelection>().unwrap(), selection);
        }
    }
}
