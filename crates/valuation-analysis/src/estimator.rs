use analysis_core::{BandTargets, HorizonEstimate, RecommendedAction, ValuationBand};

/// Forward horizons, in years
pub const HORIZON_YEARS: [u32; 3] = [1, 2, 3];

// Widens the two outermost bands
const RISK_ADJUSTMENT: f64 = 0.05;

/// Builds per-horizon target-price estimates from a valuation band and a
/// projected growth rate.
pub struct ValuationEstimator;

impl ValuationEstimator {
    /// Target prices and recommendation for one horizon.
    ///
    /// Future EPS compounds the horizon's growth rate over `years`; each
    /// band multiple prices that future EPS, with the extremes pushed out
    /// by the risk adjustment.
    pub fn horizon_estimate(
        source: &str,
        years: u32,
        current_price: f64,
        forward_eps: f64,
        growth_rate: f64,
        band: &ValuationBand,
        degraded: bool,
    ) -> HorizonEstimate {
        let future_eps = forward_eps * (1.0 + growth_rate).powi(years as i32);

        let targets = BandTargets {
            conservative_low: future_eps * band.conservative_low * (1.0 - RISK_ADJUSTMENT),
            moderate_low: future_eps * band.moderate_low,
            target_mean: future_eps * band.target_mean,
            moderate_high: future_eps * band.moderate_high,
            aggressive_high: future_eps * band.aggressive_high * (1.0 + RISK_ADJUSTMENT),
        };

        let (action, confidence) = Self::action_for(current_price, &targets);

        let zone = |low: f64, high: f64| format!("${:.2}–${:.2}", low, high);
        HorizonEstimate {
            years,
            source: source.to_string(),
            future_eps,
            action,
            confidence,
            buy_zone: zone(targets.conservative_low, targets.moderate_low),
            hold_zone: zone(targets.moderate_low, targets.moderate_high),
            sell_zone: zone(targets.moderate_high, targets.aggressive_high),
            targets,
            degraded,
        }
    }

    /// Six-way ladder over the five target levels, with a confidence that
    /// rises toward either extreme.
    fn action_for(price: f64, targets: &BandTargets) -> (RecommendedAction, f64) {
        if price < targets.conservative_low {
            (RecommendedAction::StrongBuy, 0.9)
        } else if price < targets.moderate_low {
            (RecommendedAction::Buy, 0.75)
        } else if price < targets.target_mean {
            (RecommendedAction::Accumulate, 0.6)
        } else if price < targets.moderate_high {
            (RecommendedAction::Hold, 0.5)
        } else if price < targets.aggressive_high {
            (RecommendedAction::Reduce, 0.6)
        } else {
            (RecommendedAction::Sell, 0.85)
        }
    }
}
