use crate::core::cost_model::RouteCostModel;
use crate::domain::model::{ReplacementMapping, ReplacementPairing, Route};
use crate::domain::ports::Reporter;
use crate::utils::error::{OptimizerError, Result};

/// Picks, for an eliminated route, the profitable route whose cities lie
/// closest to every city the eliminated route served.
pub struct RouteSimilarityMatcher<'a> {
    cost_model: RouteCostModel<'a>,
}

impl<'a> RouteSimilarityMatcher<'a> {
    pub fn new(cost_model: RouteCostModel<'a>) -> Self {
        Self { cost_model }
    }

    /// Σ over eliminated cities of the distance to the nearest candidate city.
    pub fn cumulative_distance_metric(
        &self,
        candidate_cities: &[String],
        eliminated_cities: &[String],
    ) -> Result<f64> {
        if candidate_cities.is_empty() {
            return Err(OptimizerError::ValidationError {
                message: "Candidate route has no cities".to_string(),
            });
        }

        let geo = self.cost_model.geo();
        let mut sum_of_min_distances = 0.0;
        for eliminated_city in eliminated_cities {
            let mut nearest = f64::INFINITY;
            for candidate_city in candidate_cities {
                nearest = nearest.min(geo.between(eliminated_city, candidate_city)?);
            }
            sum_of_min_distances += nearest;
        }

        Ok(sum_of_min_distances)
    }

    /// Smallest metric wins; on a tie the earlier candidate is kept.
    pub fn find_replacement<'r>(
        &self,
        profitable: &'r [Route],
        eliminated: &Route,
    ) -> Result<&'r Route> {
        self.closest_match(profitable, eliminated)
            .map(|(route, _)| route)
    }

    fn closest_match<'r>(
        &self,
        profitable: &'r [Route],
        eliminated: &Route,
    ) -> Result<(&'r Route, f64)> {
        let mut best: Option<(&'r Route, f64)> = None;

        for candidate in profitable {
            let metric = self.cumulative_distance_metric(&candidate.cities, &eliminated.cities)?;
            // 嚴格小於才替換，保留掃描順序中的第一個
            let is_better = match best {
                Some((_, best_metric)) => metric < best_metric,
                None => true,
            };
            if is_better {
                best = Some((candidate, metric));
            }
        }

        best.ok_or_else(|| OptimizerError::ProcessingError {
            message: format!(
                "No profitable route left to replace flight {} ({})",
                eliminated.flight_number,
                eliminated.path()
            ),
        })
    }

    /// Matches every eliminated route and reports each pairing with the
    /// profit of the eliminated route and of its replacement.
    pub fn find_replacement_paths(
        &self,
        profitable: &[Route],
        eliminated: &[Route],
        reporter: &dyn Reporter,
    ) -> Result<ReplacementMapping> {
        let mut mapping = ReplacementMapping::new();

        for dead_route in eliminated {
            let (replacement, metric_nm) = self.closest_match(profitable, dead_route)?;
            let pairing = ReplacementPairing {
                eliminated: dead_route.clone(),
                replacement: replacement.clone(),
                metric_nm,
                profit_before: self.cost_model.profit(dead_route)?,
                profit_after: self.cost_model.profit(replacement)?,
            };

            reporter.report_replacement(&pairing);
            mapping.insert(pairing);
        }

        Ok(mapping)
    }
}
