//! Great-circle distances between cities, in nautical miles.

use crate::domain::model::Coordinate;
use crate::domain::ports::CoordinateLookup;
use crate::utils::error::Result;

/// Mean Earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Haversine distance between two coordinates.
pub fn haversine_nm(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_NM * c
}

/// City-level distance on top of a coordinate lookup.
#[derive(Clone, Copy)]
pub struct GeoDistance<'a> {
    lookup: &'a dyn CoordinateLookup,
}

impl<'a> GeoDistance<'a> {
    pub fn new(lookup: &'a dyn CoordinateLookup) -> Self {
        Self { lookup }
    }

    pub fn between(&self, from_city: &str, to_city: &str) -> Result<f64> {
        let from = self.lookup.coordinate(from_city)?;
        let to = self.lookup.coordinate(to_city)?;
        Ok(haversine_nm(from, to))
    }

    /// Sum of the legs between consecutive cities.
    pub fn path_length(&self, cities: &[String]) -> Result<f64> {
        cities
            .windows(2)
            .map(|leg| self.between(&leg[0], &leg[1]))
            .sum()
    }
}
