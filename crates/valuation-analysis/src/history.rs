use analysis_core::{AnalysisError, EarningsPoint, PricePoint, ValuationBand};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Minimum usable price/earnings pairs for the historical model
pub const MIN_RATIO_PAIRS: usize = 5;

/// An earnings report paired with the first trading price at or after it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPeRatio {
    pub date: DateTime<Utc>,
    pub price: f64,
    pub eps: f64,
    pub ratio: f64,
}

/// Pair each positive-EPS earnings report with the first price at or after
/// its date. Reports with no later price, or non-positive EPS, are skipped.
pub fn pair_history(prices: &[PricePoint], earnings: &[EarningsPoint]) -> Vec<HistoricalPeRatio> {
    let mut pairs = Vec::new();
    for report in earnings {
        if report.eps <= 0.0 {
            continue;
        }
        if let Some(bar) = prices.iter().find(|p| p.date >= report.date) {
            pairs.push(HistoricalPeRatio {
                date: report.date,
                price: bar.close,
                eps: report.eps,
                ratio: bar.close / report.eps,
            });
        }
    }
    pairs
}

/// Distribution statistics over a historical P/E ratio series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeRatioStatistics {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub p10: f64,
    pub p25: f64,
    pub p75: f64,
    pub p90: f64,
    /// Coefficient of variation (std/mean), the volatility proxy
    pub coefficient_of_variation: f64,
    /// Relative drift of the recent five ratios vs the earliest five
    pub trend: f64,
    pub samples: usize,
}

pub(crate) fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

impl PeRatioStatistics {
    pub fn from_pairs(pairs: &[HistoricalPeRatio]) -> Result<Self, AnalysisError> {
        if pairs.len() < MIN_RATIO_PAIRS {
            return Err(AnalysisError::InsufficientData(format!(
                "Need at least {} price/earnings pairs for historical valuation, got {}",
                MIN_RATIO_PAIRS,
                pairs.len()
            )));
        }

        let ratios: Vec<f64> = pairs.iter().map(|p| p.ratio).collect();
        let mean = ratios.as_slice().mean();
        if mean == 0.0 {
            return Err(AnalysisError::CalculationError(
                "Mean P/E ratio is zero".to_string(),
            ));
        }
        let std_dev = ratios.as_slice().population_std_dev();

        let mut sorted = ratios.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        // Trend needs two non-overlapping five-sample windows
        let trend = if ratios.len() >= 10 {
            let earliest = ratios[..5].mean();
            let recent = ratios[ratios.len() - 5..].mean();
            if earliest != 0.0 {
                (recent - earliest) / earliest
            } else {
                0.0
            }
        } else {
            0.0
        };

        Ok(Self {
            mean,
            median: percentile(&sorted, 50.0),
            std_dev,
            p10: percentile(&sorted, 10.0),
            p25: percentile(&sorted, 25.0),
            p75: percentile(&sorted, 75.0),
            p90: percentile(&sorted, 90.0),
            coefficient_of_variation: std_dev / mean,
            trend,
            samples: ratios.len(),
        })
    }

    /// Band spread driven by ratio volatility, capped at 0.5
    pub fn volatility_factor(&self) -> f64 {
        (2.0 * self.coefficient_of_variation).min(0.5)
    }

    pub fn valuation_band(&self) -> ValuationBand {
        ValuationBand::from_mean(self.mean, self.volatility_factor())
    }
}
