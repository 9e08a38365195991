use crate::utils::error::Result;
use crate::utils::validation::{
    validate_finite_f64, validate_non_negative_f64, validate_positive_f64,
    validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_PROFIT_THRESHOLD: f64 = 10_000.0;
/// Average cruise speed of a Boeing 737 MAX.
pub const DEFAULT_CRUISE_SPEED_KNOTS: f64 = 485.0;
pub const DEFAULT_OPERATIONAL_COST_PER_HOUR: f64 = 5757.0;
pub const DEFAULT_LAYOVER_HOURS_PER_STOP: f64 = 1.5;
pub const DEFAULT_LAYOVER_COST_PER_HOUR: f64 = 150.0;
pub const DEFAULT_AVG_TICKET_PRICE: f64 = 384.85;
pub const DEFAULT_AIRCRAFT_CAPACITY: u32 = 204;
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 5;

/// How passengers from several eliminated routes sharing one replacement are merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum ReallocationPolicy {
    /// 只保留最後處理的被淘汰航線（與既有行為一致）
    #[default]
    LastWriteWins,
    /// 累加所有被淘汰航線的乘客，最後再套用機位上限
    Accumulate,
}

impl fmt::Display for ReallocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReallocationPolicy::LastWriteWins => write!(f, "last-write-wins"),
            ReallocationPolicy::Accumulate => write!(f, "accumulate"),
        }
    }
}

/// Tunable constants of the cost model and the passenger merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
#[serde(default)]
pub struct ModelConfig {
    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_PROFIT_THRESHOLD))]
    pub profit_threshold: f64,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_CRUISE_SPEED_KNOTS))]
    pub cruise_speed_knots: f64,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_OPERATIONAL_COST_PER_HOUR))]
    pub operational_cost_per_hour: f64,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_LAYOVER_HOURS_PER_STOP))]
    pub layover_hours_per_stop: f64,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_LAYOVER_COST_PER_HOUR))]
    pub layover_cost_per_hour: f64,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_AVG_TICKET_PRICE))]
    pub avg_ticket_price: f64,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_AIRCRAFT_CAPACITY))]
    pub aircraft_capacity: u32,

    #[cfg_attr(
        feature = "cli",
        arg(long, value_enum, default_value_t = ReallocationPolicy::LastWriteWins)
    )]
    pub reallocation_policy: ReallocationPolicy,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            profit_threshold: DEFAULT_PROFIT_THRESHOLD,
            cruise_speed_knots: DEFAULT_CRUISE_SPEED_KNOTS,
            operational_cost_per_hour: DEFAULT_OPERATIONAL_COST_PER_HOUR,
            layover_hours_per_stop: DEFAULT_LAYOVER_HOURS_PER_STOP,
            layover_cost_per_hour: DEFAULT_LAYOVER_COST_PER_HOUR,
            avg_ticket_price: DEFAULT_AVG_TICKET_PRICE,
            aircraft_capacity: DEFAULT_AIRCRAFT_CAPACITY,
            reallocation_policy: ReallocationPolicy::default(),
        }
    }
}

impl Validate for ModelConfig {
    fn validate(&self) -> Result<()> {
        validate_finite_f64("model.profit_threshold", self.profit_threshold)?;
        validate_positive_f64("model.cruise_speed_knots", self.cruise_speed_knots)?;
        validate_non_negative_f64(
            "model.operational_cost_per_hour",
            self.operational_cost_per_hour,
        )?;
        validate_non_negative_f64("model.layover_hours_per_stop", self.layover_hours_per_stop)?;
        validate_non_negative_f64("model.layover_cost_per_hour", self.layover_cost_per_hour)?;
        validate_non_negative_f64("model.avg_ticket_price", self.avg_ticket_price)?;
        validate_positive_number(
            "model.aircraft_capacity",
            self.aircraft_capacity as usize,
            1,
        )?;
        Ok(())
    }
}

/// Where city coordinates come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinateSource {
    /// CSV table with `code,latitude,longitude` columns.
    File { path: String },
    /// HTTP service answering `GET {endpoint}/{code}`.
    Service {
        endpoint: String,
        concurrent_requests: usize,
        timeout_seconds: Option<u64>,
    },
}

impl Validate for CoordinateSource {
    fn validate(&self) -> Result<()> {
        match self {
            CoordinateSource::File { path } => {
                crate::utils::validation::validate_path("coordinates.file", path)
            }
            CoordinateSource::Service {
                endpoint,
                concurrent_requests,
                ..
            } => {
                validate_url("coordinates.endpoint", endpoint)?;
                validate_positive_number("coordinates.concurrent_requests", *concurrent_requests, 1)
            }
        }
    }
}
