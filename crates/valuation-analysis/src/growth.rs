use analysis_core::{AnalysisError, FundamentalSnapshot, Sector};
use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::Normal;

/// Growth is never projected below this floor
pub const GROWTH_FLOOR: f64 = 0.02;

/// Base growth rate when the sector is unknown
pub const DEFAULT_SECTOR_GROWTH: f64 = 0.08;

const DECAY_PER_YEAR: f64 = 0.10;
const UNCERTAINTY_STD_DEV: f64 = 0.1;
// Normal(1, 0.1) draw, bounded at three standard deviations
const UNCERTAINTY_MIN: f64 = 0.7;
const UNCERTAINTY_MAX: f64 = 1.3;

/// Projects forward earnings growth per horizon year from sector and
/// company attributes, with a caller-supplied randomness source.
pub struct GrowthModel;

impl GrowthModel {
    pub fn new() -> Self {
        Self
    }

    /// Typical annual earnings growth by sector
    pub fn sector_base_rate(sector: Option<Sector>) -> f64 {
        match sector {
            Some(Sector::Technology) => 0.12,
            Some(Sector::Healthcare) => 0.10,
            Some(Sector::CommunicationServices) => 0.09,
            Some(Sector::ConsumerCyclical) => 0.08,
            Some(Sector::Industrials) => 0.07,
            Some(Sector::FinancialServices) => 0.06,
            Some(Sector::BasicMaterials) => 0.06,
            Some(Sector::ConsumerDefensive) => 0.05,
            Some(Sector::RealEstate) => 0.05,
            Some(Sector::Energy) => 0.04,
            Some(Sector::Utilities) => 0.03,
            None => DEFAULT_SECTOR_GROWTH,
        }
    }

    // Mega caps grow slower, small caps faster
    fn size_multiplier(market_cap: Option<f64>) -> f64 {
        match market_cap {
            Some(mc) if mc > 100e9 => 0.8,
            Some(mc) if mc > 10e9 => 0.9,
            Some(mc) if mc < 1e9 => 1.2,
            _ => 1.0,
        }
    }

    fn profitability_multiplier(profit_margin: Option<f64>) -> f64 {
        match profit_margin {
            Some(m) if m > 0.20 => 1.1,
            Some(m) if m < 0.05 => 0.9,
            _ => 1.0,
        }
    }

    fn leverage_multiplier(debt_to_equity: Option<f64>) -> f64 {
        match debt_to_equity {
            Some(d) if d > 1.0 => 0.9,
            Some(d) if d < 0.3 => 1.05,
            _ => 1.0,
        }
    }

    /// Growth rate per horizon year (index 0 = year 1).
    ///
    /// Each year applies the combined company adjustment, a 10% decay per
    /// additional year out, and an independent bounded uncertainty draw.
    pub fn growth_rates<R: Rng + ?Sized>(
        &self,
        snapshot: &FundamentalSnapshot,
        rng: &mut R,
    ) -> Result<[f64; 3], AnalysisError> {
        let base = Self::sector_base_rate(snapshot.sector);
        let adjustment = Self::size_multiplier(snapshot.market_cap)
            * Self::profitability_multiplier(snapshot.profit_margin)
            * Self::leverage_multiplier(snapshot.debt_to_equity);

        let uncertainty = Normal::new(1.0, UNCERTAINTY_STD_DEV)
            .map_err(|e| AnalysisError::CalculationError(e.to_string()))?;

        let mut rates = [0.0; 3];
        for (year_index, rate) in rates.iter_mut().enumerate() {
            let decay = (1.0 - DECAY_PER_YEAR).powi(year_index as i32);
            let draw = uncertainty
                .sample(rng)
                .clamp(UNCERTAINTY_MIN, UNCERTAINTY_MAX);
            *rate = (base * adjustment * decay * draw).max(GROWTH_FLOOR);
        }
        Ok(rates)
    }
}

impl Default for GrowthModel {
    fn default() -> Self {
        Self::new()
    }
}
