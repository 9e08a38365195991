use crate::config::model::ModelConfig;
use crate::core::cost_model::RouteCostModel;
use crate::core::matcher::RouteSimilarityMatcher;
use crate::core::profitability::ProfitabilityFilter;
use crate::core::reallocator::PassengerReallocator;
use crate::domain::model::{OptimizationOutcome, Route};
use crate::domain::ports::{CoordinateLookup, Reporter};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Runs the filter, matcher and reallocator in sequence over one route set.
pub struct RouteOptimizer<'a> {
    model: &'a ModelConfig,
    lookup: &'a dyn CoordinateLookup,
}

impl<'a> RouteOptimizer<'a> {
    pub fn new(model: &'a ModelConfig, lookup: &'a dyn CoordinateLookup) -> Self {
        Self { model, lookup }
    }

    pub fn optimize(&self, routes: &[Route], reporter: &dyn Reporter) -> Result<OptimizationOutcome> {
        // 配置錯誤必須在處理任何航線前中止
        self.model.validate()?;

        let cost_model = RouteCostModel::new(self.model, self.lookup);

        let partition = ProfitabilityFilter::new(cost_model)
            .partition(routes, self.model.profit_threshold)?;

        let mapping = RouteSimilarityMatcher::new(cost_model).find_replacement_paths(
            &partition.profitable,
            &partition.eliminated,
            reporter,
        )?;
        reporter.report_mapping(&mapping);

        let profitable = PassengerReallocator::new(
            self.model.aircraft_capacity,
            self.model.reallocation_policy,
        )
        .accommodate(&partition.profitable, &partition.eliminated, &mapping)?;

        Ok(OptimizationOutcome {
            profitable,
            eliminated: partition.eliminated,
            mapping,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::coordinates::CoordinateTable;
    use crate::config::model::ReallocationPolicy;
    use crate::core::geo::EARTH_RADIUS_NM;
    use crate::domain::model::{Coordinate, ReplacementMapping, ReplacementPairing};
    use crate::utils::error::OptimizerError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingReporter {
        replacements: Mutex<Vec<String>>,
        mappings: Mutex<usize>,
    }

    impl Reporter for RecordingReporter {
        fn report_replacement(&self, pairing: &ReplacementPairing) {
            self.replacements
                .lock()
                .unwrap()
                .push(pairing.eliminated.flight_number.clone());
        }

        fn report_mapping(&self, _mapping: &ReplacementMapping) {
            *self.mappings.lock().unwrap() += 1;
        }
    }

    // Hubs one flight hour (485nm) apart on the equator, with small
    // satellite airports next to each hub.
    fn network() -> CoordinateTable {
        let hour = (485.0 / EARTH_RADIUS_NM).to_degrees();
        let mut table = CoordinateTable::new();
        for (code, lon) in [
            ("HUB", 0.0),
            ("EAS", hour),
            ("WES", -hour),
            ("SAT", hour + 0.2),
            ("SWS", -hour - 0.2),
        ] {
            table.insert(code, Coordinate::new(0.0, lon)).unwrap();
        }
        table
    }

    fn schedule() -> Vec<Route> {
        vec![
            Route::from_path("F100", "HUB-EAS", 150),
            Route::from_path("F200", "HUB-WES", 120),
            Route::from_path("F300", "HUB-SAT", 30),
            Route::from_path("F400", "SWS-HUB", 25),
            Route::from_path("F500", "HUB-SAT", 100),
        ]
    }

    #[test]
    fn test_optimize_end_to_end() {
        let table = network();
        let model = ModelConfig::default();
        let reporter = RecordingReporter::default();

        let outcome = RouteOptimizer::new(&model, &table)
            .optimize(&schedule(), &reporter)
            .unwrap();

        let kept: Vec<&str> = outcome.profitable.iter().map(|r| r.flight_number.as_str()).collect();
        let dropped: Vec<&str> = outcome.eliminated.iter().map(|r| r.flight_number.as_str()).collect();
        assert_eq!(kept, vec!["F100", "F200", "F500"]);
        assert_eq!(dropped, vec!["F300", "F400"]);

        // F300 shares HUB-SAT with F500; F400 is nearest to HUB-WES
        assert_eq!(outcome.mapping.get("HUB-SAT").unwrap().flight_number, "F500");
        assert_eq!(outcome.mapping.get("SWS-HUB").unwrap().flight_number, "F200");

        assert_eq!(outcome.profitable[0].passengers, 150);
        assert_eq!(outcome.profitable[1].passengers, 145);
        assert_eq!(outcome.profitable[2].passengers, 130);

        assert_eq!(*reporter.replacements.lock().unwrap(), vec!["F300", "F400"]);
        assert_eq!(*reporter.mappings.lock().unwrap(), 1);
    }

    #[test]
    fn test_replacements_are_profitable_members() {
        let table = network();
        let model = ModelConfig {
            profit_threshold: 30_000.0,
            ..ModelConfig::default()
        };

        let outcome = RouteOptimizer::new(&model, &table)
            .optimize(&schedule(), &RecordingReporter::default())
            .unwrap();

        assert_eq!(outcome.mapping.len(), outcome.eliminated.len());
        for pairing in outcome.mapping.pairings() {
            assert!(outcome
                .profitable
                .iter()
                .any(|route| route.flight_number == pairing.replacement.flight_number));
        }
        assert!(outcome.profitable.iter().all(|r| r.passengers <= model.aircraft_capacity));
    }

    #[test]
    fn test_unknown_city_aborts_without_outcome() {
        let table = network();
        let model = ModelConfig::default();
        let mut routes = schedule();
        routes.push(Route::from_path("F900", "HUB-NOPE", 180));

        let err = RouteOptimizer::new(&model, &table)
            .optimize(&routes, &RecordingReporter::default())
            .unwrap_err();
        assert!(matches!(err, OptimizerError::LookupError { city } if city == "NOPE"));
    }

    #[test]
    fn test_invalid_model_rejected_before_processing() {
        let table = network();
        let model = ModelConfig {
            cruise_speed_knots: -1.0,
            ..ModelConfig::default()
        };
        let reporter = RecordingReporter::default();

        let err = RouteOptimizer::new(&model, &table)
            .optimize(&schedule(), &reporter)
            .unwrap_err();
        assert!(matches!(err, OptimizerError::InvalidConfigValueError { .. }));
        assert!(reporter.replacements.lock().unwrap().is_empty());
    }

    #[test]
    fn test_everything_eliminated_has_no_replacement() {
        let table = network();
        let model = ModelConfig {
            profit_threshold: 1e9,
            reallocation_policy: ReallocationPolicy::Accumulate,
            ..ModelConfig::default()
        };

        let err = RouteOptimizer::new(&model, &table)
            .optimize(&schedule(), &RecordingReporter::default())
            .unwrap_err();
        assert!(matches!(err, OptimizerError::ProcessingError { .. }));
    }

    #[test]
    fn test_nothing_eliminated_returns_input() {
        let table = network();
        let model = ModelConfig {
            profit_threshold: -1e9,
            ..ModelConfig::default()
        };
        let routes = schedule();

        let outcome = RouteOptimizer::new(&model, &table)
            .optimize(&routes, &RecordingReporter::default())
            .unwrap();
        assert_eq!(outcome.profitable, routes);
        assert!(outcome.mapping.is_empty());
    }
}
