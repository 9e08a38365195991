use crate::config::model::ModelConfig;
use crate::domain::model::OptimizationOutcome;
use crate::utils::error::{OptimizerError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{Cursor, Write};
use zip::write::{FileOptions, ZipWriter};

pub const JSON_REPORT_FILE: &str = "replacements.json";
pub const CSV_REPORT_FILE: &str = "replacements.csv";
pub const ARCHIVE_FILE: &str = "optimization_output.zip";

#[derive(Debug, Clone, Serialize)]
pub struct ReplacementRow {
    pub eliminated_flight: String,
    pub eliminated_path: String,
    pub eliminated_passengers: u32,
    pub replacement_flight: String,
    pub replacement_path: String,
    pub metric_nm: f64,
    pub profit_before: f64,
    pub profit_after: f64,
}

/// Run summary plus one row per eliminated route.
#[derive(Debug, Clone, Serialize)]
pub struct ReplacementReport {
    pub generated_at: DateTime<Utc>,
    pub profit_threshold: f64,
    pub aircraft_capacity: u32,
    pub routes_kept: usize,
    pub routes_eliminated: usize,
    pub passengers_kept: u64,
    pub replacements: Vec<ReplacementRow>,
}

impl ReplacementReport {
    pub fn from_outcome(outcome: &OptimizationOutcome, model: &ModelConfig) -> Self {
        let replacements = outcome
            .mapping
            .pairings()
            .map(|pairing| ReplacementRow {
                eliminated_flight: pairing.eliminated.flight_number.clone(),
                eliminated_path: pairing.eliminated.path(),
                eliminated_passengers: pairing.eliminated.passengers,
                replacement_flight: pairing.replacement.flight_number.clone(),
                replacement_path: pairing.replacement.path(),
                metric_nm: pairing.metric_nm,
                profit_before: pairing.profit_before,
                profit_after: pairing.profit_after,
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            profit_threshold: model.profit_threshold,
            aircraft_capacity: model.aircraft_capacity,
            routes_kept: outcome.profitable.len(),
            routes_eliminated: outcome.eliminated.len(),
            passengers_kept: outcome
                .profitable
                .iter()
                .map(|route| u64::from(route.passengers))
                .sum(),
            replacements,
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &self.replacements {
            writer.serialize(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| OptimizerError::ProcessingError {
                message: format!("Failed to flush report writer: {}", e),
            })
    }

    /// 依格式名稱產生報表檔案 (檔名, 內容)
    pub fn render(&self, format: &str) -> Result<(String, Vec<u8>)> {
        match format {
            "json" => Ok((JSON_REPORT_FILE.to_string(), self.to_json()?)),
            "csv" => Ok((CSV_REPORT_FILE.to_string(), self.to_csv()?)),
            other => Err(OptimizerError::ConfigValidationError {
                field: "report_formats".to_string(),
                message: format!("Unsupported report format: {}", other),
            }),
        }
    }
}

/// 將所有輸出檔打包成 ZIP
pub fn bundle_archive(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for (name, data) in files {
        zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
        zip.write_all(data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ReplacementMapping, ReplacementPairing, Route};

    fn sample_outcome() -> OptimizationOutcome {
        let kept = Route::from_path("UA1", "ORD-DEN", 180);
        let dropped = Route::from_path("UA2", "ORD-MSP", 20);
        let mut mapping = ReplacementMapping::new();
        mapping.insert(ReplacementPairing {
            eliminated: dropped.clone(),
            replacement: Route::from_path("UA1", "ORD-DEN", 160),
            metric_nm: 512.5,
            profit_before: -3100.0,
            profit_after: 45000.0,
        });

        OptimizationOutcome {
            profitable: vec![kept],
            eliminated: vec![dropped],
            mapping,
        }
    }

    #[test]
    fn test_report_summary() {
        let report = ReplacementReport::from_outcome(&sample_outcome(), &ModelConfig::default());

        assert_eq!(report.routes_kept, 1);
        assert_eq!(report.routes_eliminated, 1);
        assert_eq!(report.passengers_kept, 180);
        assert_eq!(report.replacements.len(), 1);
        assert_eq!(report.replacements[0].replacement_flight, "UA1");
    }

    #[test]
    fn test_render_formats() {
        let report = ReplacementReport::from_outcome(&sample_outcome(), &ModelConfig::default());

        let (name, json) = report.render("json").unwrap();
        assert_eq!(name, JSON_REPORT_FILE);
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["replacements"][0]["eliminated_path"], "ORD-MSP");

        let (name, csv_data) = report.render("csv").unwrap();
        assert_eq!(name, CSV_REPORT_FILE);
        let text = String::from_utf8(csv_data).unwrap();
        assert!(text.starts_with("eliminated_flight,eliminated_path"));
        assert!(text.contains("UA2,ORD-MSP,20,UA1,ORD-DEN"));

        assert!(report.render("xml").is_err());
    }

    #[test]
    fn test_bundle_archive_contains_every_file() {
        let files = vec![
            ("profitable_flights.txt".to_string(), b"a".to_vec()),
            (JSON_REPORT_FILE.to_string(), b"{}".to_vec()),
        ];

        let data = bundle_archive(&files).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();

        assert_eq!(archive.len(), 2);
        assert!(archive.by_name("profitable_flights.txt").is_ok());
        assert!(archive.by_name(JSON_REPORT_FILE).is_ok());
    }
}
