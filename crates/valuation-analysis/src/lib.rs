pub mod estimator;
pub mod growth;
pub mod history;
pub mod report;
pub mod sources;

pub use estimator::*;
pub use growth::*;
pub use history::*;
pub use sources::*;

use analysis_core::{
    AnalysisError, EarningsPoint, EstimateSource, FundamentalSnapshot, PricePoint, ValuationBand,
    ValuationContext, ValuationReport,
};
use rand::Rng;

/// Multi-source valuation engine.
///
/// Wires the historical ratio statistics, the growth model and the estimate
/// sources into one report. Sources are interchangeable strategies; a
/// failing source is logged and skipped so the remaining ones still produce
/// a report.
pub struct ValuationEngine {
    sources: Vec<Box<dyn EstimateSource>>,
    growth: GrowthModel,
}

impl ValuationEngine {
    pub fn new() -> Self {
        Self::with_sources(vec![
            Box::new(ModelEstimateSource),
            Box::new(AnalystConsensusSource),
            Box::new(SectorBaselineSource),
        ])
    }

    pub fn with_sources(sources: Vec<Box<dyn EstimateSource>>) -> Self {
        Self {
            sources,
            growth: GrowthModel::new(),
        }
    }

    /// Full valuation for one symbol.
    ///
    /// Historical statistics drive the band when at least
    /// [`MIN_RATIO_PAIRS`] usable price/earnings pairs exist; otherwise the
    /// engine falls back to a current-P/E band and marks the resulting
    /// estimates degraded. Missing price or forward EPS is fatal.
    pub fn analyze<R: Rng + ?Sized>(
        &self,
        symbol: &str,
        snapshot: &FundamentalSnapshot,
        earnings: &[EarningsPoint],
        prices: &[PricePoint],
        rng: &mut R,
    ) -> Result<ValuationReport, AnalysisError> {
        let current_price = snapshot
            .current_price
            .filter(|p| *p > 0.0)
            .ok_or_else(|| AnalysisError::MissingField("current_price".to_string()))?;
        let forward_eps = snapshot
            .forward_eps
            .filter(|e| *e > 0.0)
            .ok_or_else(|| AnalysisError::MissingField("forward_eps".to_string()))?;

        let pairs = pair_history(prices, earnings);
        let (band, ratio_cv, band_degraded) = match PeRatioStatistics::from_pairs(&pairs) {
            Ok(stats) => (
                stats.valuation_band(),
                Some(stats.coefficient_of_variation),
                false,
            ),
            Err(AnalysisError::InsufficientData(reason)) => {
                // Thin earnings history: price the band off today's multiple
                let current_pe = snapshot
                    .trailing_pe
                    .or(snapshot.forward_pe)
                    .filter(|pe| *pe > 0.0)
                    .unwrap_or(current_price / forward_eps);
                tracing::warn!(
                    "Falling back to current-P/E valuation band for {}: {}",
                    symbol,
                    reason
                );
                (ValuationBand::from_current_pe(current_pe), None, true)
            }
            Err(e) => return Err(e),
        };

        let growth_rates = self.growth.growth_rates(snapshot, rng)?;

        let ctx = ValuationContext {
            current_price,
            forward_eps,
            forward_pe: snapshot.forward_pe,
            sector: snapshot.sector,
            growth_rates,
            band,
            ratio_cv,
            band_degraded,
        };

        let mut estimates = Vec::new();
        for source in &self.sources {
            match source.estimates(&ctx) {
                Ok(mut batch) => estimates.append(&mut batch),
                Err(e) => {
                    tracing::warn!("Estimate source {} failed for {}: {}", source.name(), symbol, e)
                }
            }
        }

        report::aggregate(symbol, current_price, estimates)
    }
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self::new()
    }
}
