use crate::config::model::ReallocationPolicy;
use crate::domain::model::{ReplacementMapping, Route};
use crate::utils::error::{OptimizerError, Result};
use std::collections::HashMap;

pub struct PassengerReallocator {
    aircraft_capacity: u32,
    policy: ReallocationPolicy,
}

impl PassengerReallocator {
    pub fn new(aircraft_capacity: u32, policy: ReallocationPolicy) -> Self {
        Self {
            aircraft_capacity,
            policy,
        }
    }

    /// Moves passengers of every eliminated route onto its replacement and
    /// returns updated copies of the profitable routes, each capped at
    /// aircraft capacity.
    pub fn accommodate(
        &self,
        profitable: &[Route],
        eliminated: &[Route],
        mapping: &ReplacementMapping,
    ) -> Result<Vec<Route>> {
        let updated_passengers = match self.policy {
            ReallocationPolicy::LastWriteWins => self.last_write_wins(eliminated, mapping)?,
            ReallocationPolicy::Accumulate => self.accumulate(eliminated, mapping)?,
        };

        let routes = profitable
            .iter()
            .map(|route| match updated_passengers.get(&route.path()) {
                Some(&passengers) => route.with_passengers(passengers),
                None if route.passengers > self.aircraft_capacity => {
                    tracing::warn!(
                        "⚠️ Flight {} carries {} passengers, capping at {}",
                        route.flight_number,
                        route.passengers,
                        self.aircraft_capacity
                    );
                    route.with_passengers(self.aircraft_capacity)
                }
                None => route.clone(),
            })
            .collect();

        Ok(routes)
    }

    // 同一條替代航線只保留最後處理的結果
    fn last_write_wins(
        &self,
        eliminated: &[Route],
        mapping: &ReplacementMapping,
    ) -> Result<HashMap<String, u32>> {
        let mut updated = HashMap::new();

        for dead_route in eliminated {
            let replacement = Self::replacement_for(dead_route, mapping)?;
            let accommodated =
                u64::from(dead_route.passengers) + u64::from(replacement.passengers);
            let capped = self.cap(accommodated);

            tracing::debug!(
                "Flight {} -> {}: {} passengers",
                dead_route.flight_number,
                replacement.flight_number,
                capped
            );
            updated.insert(replacement.path(), capped);
        }

        Ok(updated)
    }

    fn accumulate(
        &self,
        eliminated: &[Route],
        mapping: &ReplacementMapping,
    ) -> Result<HashMap<String, u32>> {
        let mut totals: HashMap<String, u64> = HashMap::new();

        for dead_route in eliminated {
            let replacement = Self::replacement_for(dead_route, mapping)?;
            *totals
                .entry(replacement.path())
                .or_insert_with(|| u64::from(replacement.passengers)) +=
                u64::from(dead_route.passengers);
        }

        Ok(totals
            .into_iter()
            .map(|(path, total)| (path, self.cap(total)))
            .collect())
    }

    fn replacement_for<'m>(dead_route: &Route, mapping: &'m ReplacementMapping) -> Result<&'m Route> {
        mapping
            .get(&dead_route.path())
            .ok_or_else(|| OptimizerError::ProcessingError {
                message: format!(
                    "Eliminated flight {} ({}) has no replacement",
                    dead_route.flight_number,
                    dead_route.path()
                ),
            })
    }

    fn cap(&self, passengers: u64) -> u32 {
        passengers.min(u64::from(self.aircraft_capacity)) as u32
    }
}
