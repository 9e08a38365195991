use crate::config::model::ModelConfig;
use crate::core::geo::GeoDistance;
use crate::domain::model::Route;
use crate::domain::ports::CoordinateLookup;
use crate::utils::error::{OptimizerError, Result};
use serde::Serialize;

/// Cost and income breakdown of a single route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteEstimate {
    pub distance_nm: f64,
    pub flight_hours: f64,
    pub operating_cost: f64,
    pub layover_cost: f64,
    pub income: f64,
}

impl RouteEstimate {
    pub fn total_cost(&self) -> f64 {
        self.operating_cost + self.layover_cost
    }

    pub fn profit(&self) -> f64 {
        self.income - self.total_cost()
    }
}

/// Operating cost comes from flight time (distance / cruise speed) plus a
/// fixed layover penalty per intermediate stop. Income is ticket price times
/// passengers.
#[derive(Clone, Copy)]
pub struct RouteCostModel<'a> {
    model: &'a ModelConfig,
    geo: GeoDistance<'a>,
}

impl<'a> RouteCostModel<'a> {
    pub fn new(model: &'a ModelConfig, lookup: &'a dyn CoordinateLookup) -> Self {
        Self {
            model,
            geo: GeoDistance::new(lookup),
        }
    }

    pub fn model(&self) -> &'a ModelConfig {
        self.model
    }

    pub fn geo(&self) -> GeoDistance<'a> {
        self.geo
    }

    pub fn estimate(&self, route: &Route) -> Result<RouteEstimate> {
        // 少於兩個城市無法計算飛行時間
        if route.cities.len() < 2 {
            return Err(OptimizerError::ValidationError {
                message: format!(
                    "Flight {} has {} cities in its path '{}', at least 2 are required",
                    route.flight_number,
                    route.cities.len(),
                    route.path()
                ),
            });
        }

        let distance_nm = self.geo.path_length(&route.cities)?;
        let flight_hours = distance_nm / self.model.cruise_speed_knots;
        let operating_cost = flight_hours * self.model.operational_cost_per_hour;

        let layover_hours = route.layover_count() as f64 * self.model.layover_hours_per_stop;
        let layover_cost = layover_hours * self.model.layover_cost_per_hour;

        Ok(RouteEstimate {
            distance_nm,
            flight_hours,
            operating_cost,
            layover_cost,
            income: self.income(route),
        })
    }

    pub fn cost(&self, route: &Route) -> Result<f64> {
        Ok(self.estimate(route)?.total_cost())
    }

    pub fn income(&self, route: &Route) -> f64 {
        self.model.avg_ticket_price * f64::from(route.passengers)
    }

    pub fn profit(&self, route: &Route) -> Result<f64> {
        Ok(self.estimate(route)?.profit())
    }
}
