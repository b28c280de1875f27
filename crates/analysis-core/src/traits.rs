use crate::{AnalysisError, HorizonEstimate, Sector, ValuationBand};

/// Shared inputs handed to every estimate source for one symbol
#[derive(Debug, Clone)]
pub struct ValuationContext {
    pub current_price: f64,
    pub forward_eps: f64,
    pub forward_pe: Option<f64>,
    pub sector: Option<Sector>,
    /// Projected growth rate per horizon year (index 0 = year 1)
    pub growth_rates: [f64; 3],
    /// Band derived from historical ratios, or the current-P/E fallback
    pub band: ValuationBand,
    /// Coefficient of variation of the historical ratio series, when known
    pub ratio_cv: Option<f64>,
    /// True when `band` came from the fallback path
    pub band_degraded: bool,
}

/// A price-target estimator strategy.
///
/// Sources are interchangeable: each produces one estimate per horizon from
/// the same context, and the report layer aggregates whatever succeeded.
pub trait EstimateSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn estimates(&self, ctx: &ValuationContext) -> Result<Vec<HorizonEstimate>, AnalysisError>;
}
