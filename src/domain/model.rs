use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Separator between city codes in a flight path, e.g. `ORD-DEN-LAX`.
pub const PATH_SEPARATOR: char = '-';

/// A scheduled flight: its number, the ordered cities it visits and the
/// passengers booked on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    pub flight_number: String,
    pub cities: Vec<String>,
    pub passengers: u32,
}

impl Route {
    pub fn new(flight_number: impl Into<String>, cities: Vec<String>, passengers: u32) -> Self {
        Self {
            flight_number: flight_number.into(),
            cities,
            passengers,
        }
    }

    /// 從 `ORD-DEN-LAX` 形式的航線字串建立 Route
    pub fn from_path(flight_number: impl Into<String>, path: &str, passengers: u32) -> Self {
        let cities = path
            .split(PATH_SEPARATOR)
            .map(str::trim)
            .filter(|city| !city.is_empty())
            .map(str::to_string)
            .collect();
        Self::new(flight_number, cities, passengers)
    }

    /// Path identity used as the key for replacements.
    pub fn path(&self) -> String {
        self.cities.join(&PATH_SEPARATOR.to_string())
    }

    /// Number of intermediate stops between origin and destination.
    pub fn layover_count(&self) -> usize {
        self.cities.len().saturating_sub(2)
    }

    pub fn with_passengers(&self, passengers: u32) -> Self {
        Self {
            passengers,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfitabilityResult {
    pub profitable: Vec<Route>,
    pub eliminated: Vec<Route>,
}

/// One eliminated route together with the profitable route chosen to absorb it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplacementPairing {
    pub eliminated: Route,
    pub replacement: Route,
    /// Cumulative nearest-city distance, in nautical miles.
    pub metric_nm: f64,
    pub profit_before: f64,
    pub profit_after: f64,
}

/// Eliminated flight path → chosen replacement, ordered by path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplacementMapping {
    pairings: BTreeMap<String, ReplacementPairing>,
}

impl ReplacementMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pairing: ReplacementPairing) {
        self.pairings.insert(pairing.eliminated.path(), pairing);
    }

    /// Replacement route for the given eliminated path.
    pub fn get(&self, eliminated_path: &str) -> Option<&Route> {
        self.pairings
            .get(eliminated_path)
            .map(|pairing| &pairing.replacement)
    }

    pub fn pairing(&self, eliminated_path: &str) -> Option<&ReplacementPairing> {
        self.pairings.get(eliminated_path)
    }

    pub fn pairings(&self) -> impl Iterator<Item = &ReplacementPairing> {
        self.pairings.values()
    }

    pub fn len(&self) -> usize {
        self.pairings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationOutcome {
    /// Surviving routes after passengers have been reallocated.
    pub profitable: Vec<Route>,
    pub eliminated: Vec<Route>,
    pub mapping: ReplacementMapping,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_from_path() {
        let route = Route::from_path("UA100", "ORD - DEN-LAX", 120);
        assert_eq!(route.cities, vec!["ORD", "DEN", "LAX"]);
        assert_eq!(route.path(), "ORD-DEN-LAX");
        assert_eq!(route.layover_count(), 1);
    }

    #[test]
    fn test_layover_count_never_underflows() {
        let route = Route::from_path("UA1", "ORD", 10);
        assert_eq!(route.layover_count(), 0);
    }

    #[test]
    fn test_with_passengers_leaves_original_untouched() {
        let route = Route::from_path("UA100", "ORD-LAX", 50);
        let updated = route.with_passengers(80);
        assert_eq!(route.passengers, 50);
        assert_eq!(updated.passengers, 80);
        assert_eq!(updated.path(), route.path());
    }

    #[test]
    fn test_mapping_keyed_by_eliminated_path() {
        let eliminated = Route::from_path("UA2", "ORD-MSP", 30);
        let replacement = Route::from_path("UA1", "ORD-DEN", 90);
        let mut mapping = ReplacementMapping::new();
        mapping.insert(ReplacementPairing {
            eliminated: eliminated.clone(),
            replacement: replacement.clone(),
            metric_nm: 600.0,
            profit_before: -100.0,
            profit_after: 20000.0,
        });

        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("ORD-MSP"), Some(&replacement));
        assert!(mapping.get("ORD-DEN").is_none());
    }
}
