use crate::domain::model::{Coordinate, Route};
use crate::domain::ports::CoordinateLookup;
use crate::utils::error::{OptimizerError, Result};
use crate::utils::validation::validate_range;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// In-memory city code → coordinate table.
#[derive(Debug, Clone, Default)]
pub struct CoordinateTable {
    coordinates: HashMap<String, Coordinate>,
}

#[derive(Debug, Deserialize)]
struct CoordinateRow {
    code: String,
    latitude: f64,
    longitude: f64,
}

impl CoordinateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, city: impl Into<String>, coordinate: Coordinate) -> Result<()> {
        let city = city.into();
        validate_range(
            &format!("{}.latitude", city),
            coordinate.latitude,
            -90.0,
            90.0,
        )
        .and_then(|_| {
            validate_range(
                &format!("{}.longitude", city),
                coordinate.longitude,
                -180.0,
                180.0,
            )
        })
        .map_err(|e| OptimizerError::ValidationError {
            message: e.to_string(),
        })?;

        self.coordinates.insert(city, coordinate);
        Ok(())
    }

    /// 讀取 `code,latitude,longitude` 格式的座標表
    pub fn from_csv(data: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data);

        let mut table = Self::new();
        for row in reader.deserialize::<CoordinateRow>() {
            let row = row?;
            table.insert(row.code, Coordinate::new(row.latitude, row.longitude))?;
        }

        tracing::debug!("Loaded {} city coordinates", table.len());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

impl CoordinateLookup for CoordinateTable {
    fn coordinate(&self, city: &str) -> Result<Coordinate> {
        self.coordinates
            .get(city)
            .copied()
            .ok_or_else(|| OptimizerError::LookupError {
                city: city.to_string(),
            })
    }
}

/// Distinct city codes served by the given routes, sorted.
pub fn cities_in(routes: &[Route]) -> BTreeSet<String> {
    routes
        .iter()
        .flat_map(|route| route.cities.iter().cloned())
        .collect()
}

#[derive(Debug, Deserialize)]
struct CoordinateResponse {
    latitude: f64,
    longitude: f64,
}

/// Prefetches coordinates from an HTTP service answering `GET {endpoint}/{code}`.
pub struct HttpCoordinateSource {
    client: Client,
    endpoint: String,
    concurrent_requests: usize,
    timeout: Option<Duration>,
}

impl HttpCoordinateSource {
    pub fn new(
        client: Client,
        endpoint: impl Into<String>,
        concurrent_requests: usize,
        timeout_seconds: Option<u64>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            concurrent_requests: concurrent_requests.max(1),
            timeout: timeout_seconds.map(Duration::from_secs),
        }
    }

    fn city_url(&self, city: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), city)
    }

    /// 並行查詢所有城市座標；任一城市失敗即中止
    pub async fn resolve_all(&self, cities: &BTreeSet<String>) -> Result<CoordinateTable> {
        tracing::info!(
            "🌐 Resolving {} cities from {} ({} concurrent requests)",
            cities.len(),
            self.endpoint,
            self.concurrent_requests
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrent_requests));
        let mut tasks = JoinSet::new();

        for city in cities {
            let client = self.client.clone();
            let url = self.city_url(city);
            let city = city.clone();
            let timeout = self.timeout;
            let semaphore = Arc::clone(&semaphore);

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.map_err(|e| {
                    OptimizerError::ProcessingError {
                        message: format!("Coordinate request limiter closed: {}", e),
                    }
                })?;
                let coordinate = fetch_coordinate(&client, &url, &city, timeout).await?;
                Ok::<_, OptimizerError>((city, coordinate))
            });
        }

        let mut table = CoordinateTable::new();
        while let Some(joined) = tasks.join_next().await {
            let (city, coordinate) = joined.map_err(|e| OptimizerError::ProcessingError {
                message: format!("Coordinate request task failed: {}", e),
            })??;
            table.insert(city, coordinate)?;
        }

        Ok(table)
    }
}

async fn fetch_coordinate(
    client: &Client,
    url: &str,
    city: &str,
    timeout: Option<Duration>,
) -> Result<Coordinate> {
    let mut request = client.get(url);
    if let Some(timeout) = timeout {
        request = request.timeout(timeout);
    }

    tracing::debug!("Requesting coordinate for {} from {}", city, url);
    let response = request.send().await?;

    if response.status() == StatusCode::NOT_FOUND {
        return Err(OptimizerError::LookupError {
            city: city.to_string(),
        });
    }

    let body: CoordinateResponse = response.error_for_status()?.json().await?;
    Ok(Coordinate::new(body.latitude, body.longitude))
}
