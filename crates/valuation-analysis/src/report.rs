use analysis_core::{AnalysisError, HorizonConsensus, HorizonEstimate, ValuationReport};
use statrs::statistics::Statistics;

use crate::estimator::HORIZON_YEARS;
use crate::history::percentile;
use crate::sources::MODEL_SOURCE_NAME;

/// Fold the surviving estimates into per-horizon consensus statistics and
/// one overall recommendation.
///
/// Estimates from failed sources never reach this point; zero estimates is
/// the one fatal case.
pub fn aggregate(
    symbol: &str,
    current_price: f64,
    estimates: Vec<HorizonEstimate>,
) -> Result<ValuationReport, AnalysisError> {
    if estimates.is_empty() {
        return Err(AnalysisError::InsufficientData(
            "No estimate source produced a target".to_string(),
        ));
    }
    if current_price <= 0.0 {
        return Err(AnalysisError::CalculationError(
            "Current price must be positive for return calculation".to_string(),
        ));
    }

    let mut horizons = Vec::new();
    for &years in &HORIZON_YEARS {
        let horizon: Vec<&HorizonEstimate> =
            estimates.iter().filter(|e| e.years == years).collect();
        if horizon.is_empty() {
            continue;
        }

        let means: Vec<f64> = horizon.iter().map(|e| e.targets.target_mean).collect();
        let mean = means.as_slice().mean();
        let std_dev = means.as_slice().population_std_dev();

        let mut sorted = means.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let high_target = horizon
            .iter()
            .map(|e| e.targets.aggressive_high)
            .fold(f64::NEG_INFINITY, f64::max);
        let low_target = horizon
            .iter()
            .map(|e| e.targets.conservative_low)
            .fold(f64::INFINITY, f64::min);

        horizons.push(HorizonConsensus {
            years,
            mean_target: mean,
            median_target: percentile(&sorted, 50.0),
            std_dev,
            ci_68: (mean - std_dev, mean + std_dev),
            ci_95: (mean - 2.0 * std_dev, mean + 2.0 * std_dev),
            high_target,
            low_target,
            potential_return_pct: (mean - current_price) / current_price * 100.0,
            sources: horizon.len(),
        });
    }

    // The model's own one-year call leads the report; anything else means
    // the model source contributed nothing and the verdict is second-hand.
    let preferred = estimates
        .iter()
        .filter(|e| e.source == MODEL_SOURCE_NAME)
        .min_by_key(|e| e.years);
    let (action, confidence, fallback_verdict) = match preferred {
        Some(estimate) => (estimate.action, estimate.confidence, false),
        None => {
            let first = &estimates[0];
            (first.action, first.confidence, true)
        }
    };

    let degraded = fallback_verdict
        || estimates
            .iter()
            .filter(|e| e.source == MODEL_SOURCE_NAME)
            .any(|e| e.degraded);

    Ok(ValuationReport {
        symbol: symbol.to_string(),
        action,
        category: action.category(),
        confidence,
        horizons,
        estimates,
        degraded,
    })
}
