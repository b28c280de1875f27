use analysis_core::{AnalysisError, PricePoint};
use chrono::{DateTime, Utc};

use crate::indicators::*;

/// Minimum series length for indicator calculation
pub const MIN_BARS: usize = 50;

/// All indicator series for a symbol, aligned bar-for-bar with the input.
///
/// Every column has the same length as the price series; entries inside an
/// indicator's warm-up window are `None`.
#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    pub dates: Vec<DateTime<Utc>>,
    pub closes: Vec<f64>,
    pub sma_20: Vec<Option<f64>>,
    pub sma_50: Vec<Option<f64>>,
    pub ema_12: Vec<Option<f64>>,
    pub ema_26: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
    pub macd_histogram: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub bb_upper: Vec<Option<f64>>,
    pub bb_middle: Vec<Option<f64>>,
    pub bb_lower: Vec<Option<f64>>,
    pub stoch_k: Vec<Option<f64>>,
    pub stoch_d: Vec<Option<f64>>,
    pub atr: Vec<Option<f64>>,
}

/// One bar's slice of the frame, as consumed by the scorer
#[derive(Debug, Clone, Copy)]
pub struct IndicatorRow {
    pub date: DateTime<Utc>,
    pub close: f64,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub rsi: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
    pub stoch_k: Option<f64>,
    pub stoch_d: Option<f64>,
}

impl IndicatorFrame {
    pub fn compute(points: &[PricePoint]) -> Result<Self, AnalysisError> {
        if points.len() < MIN_BARS {
            return Err(AnalysisError::InsufficientData(format!(
                "Need at least {} bars for technical analysis, got {}",
                MIN_BARS,
                points.len()
            )));
        }

        let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
        let macd_result = macd(&closes, 12, 26, 9);
        let bb = bollinger_bands(&closes, 20, 2.0);
        let stoch = stochastic(points, 14, 3);

        Ok(Self {
            dates: points.iter().map(|p| p.date).collect(),
            sma_20: sma(&closes, 20),
            sma_50: sma(&closes, 50),
            ema_12: ema(&closes, 12),
            ema_26: ema(&closes, 26),
            macd: macd_result.macd,
            macd_signal: macd_result.signal,
            macd_histogram: macd_result.histogram,
            rsi: rsi(&closes, 14),
            bb_upper: bb.upper,
            bb_middle: bb.middle,
            bb_lower: bb.lower,
            stoch_k: stoch.k,
            stoch_d: stoch.d,
            atr: atr(points, 14),
            closes,
        })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn row(&self, i: usize) -> IndicatorRow {
        IndicatorRow {
            date: self.dates[i],
            close: self.closes[i],
            sma_20: self.sma_20[i],
            sma_50: self.sma_50[i],
            macd: self.macd[i],
            macd_signal: self.macd_signal[i],
            rsi: self.rsi[i],
            bb_upper: self.bb_upper[i],
            bb_lower: self.bb_lower[i],
            stoch_k: self.stoch_k[i],
            stoch_d: self.stoch_d[i],
        }
    }
}
