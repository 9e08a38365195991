use crate::core::cost_model::RouteCostModel;
use crate::domain::model::{ProfitabilityResult, Route};
use crate::utils::error::Result;

pub struct ProfitabilityFilter<'a> {
    cost_model: RouteCostModel<'a>,
}

impl<'a> ProfitabilityFilter<'a> {
    pub fn new(cost_model: RouteCostModel<'a>) -> Self {
        Self { cost_model }
    }

    /// A route survives iff `income - cost >= threshold`. Both output lists
    /// keep the input order.
    pub fn partition(&self, routes: &[Route], threshold: f64) -> Result<ProfitabilityResult> {
        let mut result = ProfitabilityResult::default();

        for route in routes {
            let profit = self.cost_model.profit(route)?;
            tracing::debug!(
                "Flight {} ({}) profit {:.2}",
                route.flight_number,
                route.path(),
                profit
            );

            if profit >= threshold {
                result.profitable.push(route.clone());
            } else {
                result.eliminated.push(route.clone());
            }
        }

        tracing::info!(
            "✂️ {} profitable, {} eliminated (threshold {:.2})",
            result.profitable.len(),
            result.eliminated.len(),
            threshold
        );

        Ok(result)
    }
}
