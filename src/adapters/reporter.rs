use crate::domain::model::{ReplacementMapping, ReplacementPairing};
use crate::domain::ports::Reporter;

/// Writes replacement decisions to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report_replacement(&self, pairing: &ReplacementPairing) {
        tracing::info!(
            "REPLACEMENT: Flight {}: {} -> Flight {}: {}",
            pairing.eliminated.flight_number,
            pairing.eliminated.path(),
            pairing.replacement.flight_number,
            pairing.replacement.path()
        );
        tracing::info!(
            "            $ {:.2}   ->   $ {:.2}",
            pairing.profit_before,
            pairing.profit_after
        );
    }

    fn report_mapping(&self, mapping: &ReplacementMapping) {
        tracing::info!("🔁 {} eliminated routes have a replacement", mapping.len());
        for pairing in mapping.pairings() {
            tracing::debug!(
                "{} => {} ({}) metric={:.1}nm",
                pairing.eliminated.path(),
                pairing.replacement.flight_number,
                pairing.replacement.path(),
                pairing.metric_nm
            );
        }
    }
}
