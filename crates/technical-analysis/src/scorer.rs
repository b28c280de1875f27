use analysis_core::{Signal, SignalCategory, SignalRecord};
use serde::{Deserialize, Serialize};

use crate::frame::{IndicatorFrame, IndicatorRow};

/// Per-indicator weights; the defaults sum to 100 so the composite
/// strength is naturally bounded to [-100, 100].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalWeights {
    pub ma_cross: i32,
    pub macd_cross: i32,
    pub rsi: i32,
    pub bollinger: i32,
    pub stochastic: i32,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            ma_cross: 20,
            macd_cross: 25,
            rsi: 20,
            bollinger: 15,
            stochastic: 20,
        }
    }
}

/// Scoring thresholds and weights. Buy and sell thresholds are symmetric by
/// default but adjustable independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub buy_threshold: i32,
    pub sell_threshold: i32,
    pub weights: SignalWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            buy_threshold: 20,
            sell_threshold: 20,
            weights: SignalWeights::default(),
        }
    }
}

fn ma_cross_signal(row: &IndicatorRow) -> Signal {
    match (row.sma_20, row.sma_50) {
        (Some(fast), Some(slow)) if fast > slow => Signal::Bullish,
        (Some(fast), Some(slow)) if fast < slow => Signal::Bearish,
        _ => Signal::Neutral,
    }
}

fn macd_cross_signal(row: &IndicatorRow) -> Signal {
    match (row.macd, row.macd_signal) {
        (Some(line), Some(signal)) if line > signal => Signal::Bullish,
        (Some(line), Some(signal)) if line < signal => Signal::Bearish,
        _ => Signal::Neutral,
    }
}

fn rsi_signal(row: &IndicatorRow) -> Signal {
    match row.rsi {
        Some(rsi) if rsi < 30.0 => Signal::Bullish,
        Some(rsi) if rsi > 70.0 => Signal::Bearish,
        _ => Signal::Neutral,
    }
}

fn bollinger_signal(row: &IndicatorRow) -> Signal {
    match (row.bb_lower, row.bb_upper) {
        (Some(lower), _) if row.close < lower => Signal::Bullish,
        (_, Some(upper)) if row.close > upper => Signal::Bearish,
        _ => Signal::Neutral,
    }
}

fn stochastic_signal(row: &IndicatorRow) -> Signal {
    match (row.stoch_k, row.stoch_d) {
        (Some(k), Some(d)) if k < 20.0 && d < 20.0 => Signal::Bullish,
        (Some(k), Some(d)) if k > 80.0 && d > 80.0 => Signal::Bearish,
        _ => Signal::Neutral,
    }
}

/// Score a single bar. Pure function of that bar's indicator row: an
/// indicator still inside its warm-up window votes neutral.
pub fn score_row(row: &IndicatorRow, config: &ScoringConfig) -> SignalRecord {
    let ma = ma_cross_signal(row);
    let macd = macd_cross_signal(row);
    let rsi = rsi_signal(row);
    let bollinger = bollinger_signal(row);
    let stochastic = stochastic_signal(row);

    let w = &config.weights;
    let strength = ma.value() * w.ma_cross
        + macd.value() * w.macd_cross
        + rsi.value() * w.rsi
        + bollinger.value() * w.bollinger
        + stochastic.value() * w.stochastic;

    let category = if strength >= config.buy_threshold {
        SignalCategory::Buy
    } else if strength <= -config.sell_threshold {
        SignalCategory::Sell
    } else {
        SignalCategory::Hold
    };

    SignalRecord {
        date: row.date,
        price: row.close,
        ma_signal: ma,
        macd_signal: macd,
        rsi_signal: rsi,
        bollinger_signal: bollinger,
        stochastic_signal: stochastic,
        strength,
        category,
    }
}

/// Score every bar of the frame, producing one record per input bar.
pub fn score_series(frame: &IndicatorFrame, config: &ScoringConfig) -> Vec<SignalRecord> {
    (0..frame.len())
        .map(|i| score_row(&frame.row(i), config))
        .collect()
}
