//! Route list format: CSV with a `flight_number,flight_path,passengers` header,
//! where `flight_path` is a `-` separated list of city codes.

use crate::domain::model::Route;
use crate::utils::error::{OptimizerError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct RouteRow {
    flight_number: String,
    flight_path: String,
    passengers: u32,
}

/// 解析航線檔，保留檔案中的順序
pub fn parse_routes(data: &[u8]) -> Result<Vec<Route>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut routes = Vec::new();
    for row in reader.deserialize::<RouteRow>() {
        let row = row?;
        routes.push(Route::from_path(row.flight_number, &row.flight_path, row.passengers));
    }

    tracing::debug!("Parsed {} routes", routes.len());
    Ok(routes)
}

pub fn serialize_routes(routes: &[Route]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for route in routes {
        writer.serialize(RouteRow {
            flight_number: route.flight_number.clone(),
            flight_path: route.path(),
            passengers: route.passengers,
        })?;
    }

    writer
        .into_inner()
        .map_err(|e| OptimizerError::ProcessingError {
            message: format!("Failed to flush route writer: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_file_order() {
        let data = b"flight_number,flight_path,passengers\n\
UA300, SFO-DEN-ORD ,150\n\
UA100,ORD-LAX,80\n\
UA200,JFK-ATL,0\n";

        let routes = parse_routes(data).unwrap();

        assert_eq!(routes.len(), 3);
        assert_eq!(routes[0].flight_number, "UA300");
        assert_eq!(routes[0].cities, vec!["SFO", "DEN", "ORD"]);
        assert_eq!(routes[1].flight_number, "UA100");
        assert_eq!(routes[2].passengers, 0);
    }

    #[test]
    fn test_negative_passengers_rejected() {
        let data = b"flight_number,flight_path,passengers\nUA1,ORD-LAX,-5\n";
        let err = parse_routes(data).unwrap_err();
        assert!(matches!(err, OptimizerError::CsvError(_)));
    }

    #[test]
    fn test_serialized_output_is_readable_input() {
        let routes = vec![
            Route::from_path("UA1", "ORD-DEN-LAX", 204),
            Route::from_path("UA2", "BOS-MIA", 12),
        ];

        let data = serialize_routes(&routes).unwrap();
        let text = String::from_utf8(data.clone()).unwrap();
        assert!(text.starts_with("flight_number,flight_path,passengers\n"));
        assert!(text.contains("UA1,ORD-DEN-LAX,204"));

        assert_eq!(parse_routes(&data).unwrap(), routes);
    }
}
