use analysis_core::{
    AnalysisError, EstimateSource, HorizonEstimate, Sector, ValuationBand, ValuationContext,
    FALLBACK_VOLATILITY_FACTOR,
};

use crate::estimator::{ValuationEstimator, HORIZON_YEARS};

/// This model's own bands (historical statistics or the current-P/E
/// fallback, whichever the context carries).
pub struct ModelEstimateSource;

pub const MODEL_SOURCE_NAME: &str = "valuation-model";

impl EstimateSource for ModelEstimateSource {
    fn name(&self) -> &'static str {
        MODEL_SOURCE_NAME
    }

    fn estimates(&self, ctx: &ValuationContext) -> Result<Vec<HorizonEstimate>, AnalysisError> {
        Ok(HORIZON_YEARS
            .iter()
            .map(|&years| {
                ValuationEstimator::horizon_estimate(
                    self.name(),
                    years,
                    ctx.current_price,
                    ctx.forward_eps,
                    ctx.growth_rates[(years - 1) as usize],
                    &ctx.band,
                    ctx.band_degraded,
                )
            })
            .collect())
    }
}

/// Consensus proxy: the market's forward multiple, spread by the observed
/// ratio volatility when available.
pub struct AnalystConsensusSource;

impl EstimateSource for AnalystConsensusSource {
    fn name(&self) -> &'static str {
        "analyst-consensus"
    }

    fn estimates(&self, ctx: &ValuationContext) -> Result<Vec<HorizonEstimate>, AnalysisError> {
        let forward_pe = ctx
            .forward_pe
            .filter(|pe| *pe > 0.0)
            .ok_or_else(|| AnalysisError::MissingField("forward_pe".to_string()))?;

        let factor = ctx
            .ratio_cv
            .map(|cv| (2.0 * cv).min(0.5))
            .unwrap_or(FALLBACK_VOLATILITY_FACTOR);
        let band = ValuationBand::from_mean(forward_pe, factor);

        Ok(HORIZON_YEARS
            .iter()
            .map(|&years| {
                ValuationEstimator::horizon_estimate(
                    self.name(),
                    years,
                    ctx.current_price,
                    ctx.forward_eps,
                    ctx.growth_rates[(years - 1) as usize],
                    &band,
                    false,
                )
            })
            .collect())
    }
}

/// Sector-baseline estimate from typical sector multiples. Always marked
/// degraded: it is a simulated baseline, not observed company data.
pub struct SectorBaselineSource;

/// Typical P/E multiple when the sector is unknown
pub const DEFAULT_SECTOR_PE: f64 = 16.0;

fn sector_typical_pe(sector: Option<Sector>) -> f64 {
    match sector {
        Some(Sector::Technology) => 24.0,
        Some(Sector::Healthcare) => 20.0,
        Some(Sector::ConsumerDefensive) => 19.0,
        Some(Sector::ConsumerCyclical) => 18.0,
        Some(Sector::CommunicationServices) => 18.0,
        Some(Sector::Industrials) => 17.0,
        Some(Sector::Utilities) => 16.0,
        Some(Sector::RealEstate) => 15.0,
        Some(Sector::BasicMaterials) => 14.0,
        Some(Sector::FinancialServices) => 13.0,
        Some(Sector::Energy) => 11.0,
        None => DEFAULT_SECTOR_PE,
    }
}

impl EstimateSource for SectorBaselineSource {
    fn name(&self) -> &'static str {
        "sector-baseline"
    }

    fn estimates(&self, ctx: &ValuationContext) -> Result<Vec<HorizonEstimate>, AnalysisError> {
        let band =
            ValuationBand::from_mean(sector_typical_pe(ctx.sector), FALLBACK_VOLATILITY_FACTOR);

        Ok(HORIZON_YEARS
            .iter()
            .map(|&years| {
                ValuationEstimator::horizon_estimate(
                    self.name(),
                    years,
                    ctx.current_price,
                    ctx.forward_eps,
                    ctx.growth_rates[(years - 1) as usize],
                    &band,
                    true,
                )
            })
            .collect())
    }
}
