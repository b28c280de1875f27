use analysis_core::PricePoint;

/// Simple Moving Average, aligned to the input series.
///
/// The first `period - 1` entries are `None`; the rolling sum keeps the
/// update O(1) per bar.
pub fn sma(data: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; data.len()];
    if period == 0 || data.len() < period {
        return result;
    }

    let mut sum: f64 = data[..period].iter().sum();
    result[period - 1] = Some(sum / period as f64);

    for i in period..data.len() {
        sum += data[i] - data[i - period];
        result[i] = Some(sum / period as f64);
    }
    result
}

/// Exponential Moving Average, aligned to the input series.
///
/// Seeded with the SMA of the first window, then the standard recursion.
pub fn ema(data: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; data.len()];
    if period == 0 || data.len() < period {
        return result;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut prev: f64 = data[..period].iter().sum::<f64>() / period as f64;
    result[period - 1] = Some(prev);

    for i in period..data.len() {
        prev = (data[i] - prev) * multiplier + prev;
        result[i] = Some(prev);
    }
    result
}

/// Relative Strength Index with Wilder smoothing, aligned to the input.
///
/// Undefined for the first `period` bars (the oscillator consumes
/// bar-to-bar changes).
pub fn rsi(data: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; data.len()];
    if period == 0 || data.len() < period + 1 {
        return result;
    }

    let mut gains = Vec::with_capacity(data.len() - 1);
    let mut losses = Vec::with_capacity(data.len() - 1);
    for i in 1..data.len() {
        let change = data[i] - data[i - 1];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(change.abs());
        }
    }

    let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;
    result[period] = Some(rsi_value(avg_gain, avg_loss));

    for i in period..gains.len() {
        avg_gain = (avg_gain * (period - 1) as f64 + gains[i]) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + losses[i]) / period as f64;
        result[i + 1] = Some(rsi_value(avg_gain, avg_loss));
    }
    result
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// MACD (Moving Average Convergence Divergence)
pub struct MacdResult {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

pub fn macd(data: &[f64], fast_period: usize, slow_period: usize, signal_period: usize) -> MacdResult {
    let n = data.len();
    let empty = MacdResult {
        macd: vec![None; n],
        signal: vec![None; n],
        histogram: vec![None; n],
    };
    if fast_period == 0 || slow_period == 0 || signal_period == 0 || slow_period < fast_period {
        return empty;
    }

    let ema_fast = ema(data, fast_period);
    let ema_slow = ema(data, slow_period);

    let mut macd_line = vec![None; n];
    for i in 0..n {
        if let (Some(f), Some(s)) = (ema_fast[i], ema_slow[i]) {
            macd_line[i] = Some(f - s);
        }
    }

    // Signal line is an EMA over the defined span of the MACD line
    let defined: Vec<f64> = macd_line.iter().flatten().copied().collect();
    let offset = n - defined.len();
    let mut signal_line = vec![None; n];
    for (j, v) in ema(&defined, signal_period).into_iter().enumerate() {
        signal_line[offset + j] = v;
    }

    let histogram = (0..n)
        .map(|i| match (macd_line[i], signal_line[i]) {
            (Some(m), Some(s)) => Some(m - s),
            _ => None,
        })
        .collect();

    MacdResult {
        macd: macd_line,
        signal: signal_line,
        histogram,
    }
}

/// Bollinger Bands
pub struct BollingerBands {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

pub fn bollinger_bands(data: &[f64], period: usize, std_dev: f64) -> BollingerBands {
    let n = data.len();
    let middle = sma(data, period);
    let mut upper = vec![None; n];
    let mut lower = vec![None; n];

    if period > 0 && n >= period {
        for i in period - 1..n {
            if let Some(mean) = middle[i] {
                let window = &data[i + 1 - period..=i];
                let variance: f64 =
                    window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period as f64;
                let std = variance.sqrt();
                upper[i] = Some(mean + std_dev * std);
                lower[i] = Some(mean - std_dev * std);
            }
        }
    }

    BollingerBands { upper, middle, lower }
}

/// Stochastic Oscillator
pub struct StochasticResult {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
}

pub fn stochastic(points: &[PricePoint], k_period: usize, d_period: usize) -> StochasticResult {
    let n = points.len();
    let mut k = vec![None; n];
    let mut d = vec![None; n];
    if k_period == 0 || n < k_period {
        return StochasticResult { k, d };
    }

    for i in k_period - 1..n {
        let window = &points[i + 1 - k_period..=i];
        let highest = window.iter().map(|p| p.high).fold(f64::NEG_INFINITY, f64::max);
        let lowest = window.iter().map(|p| p.low).fold(f64::INFINITY, f64::min);

        // Flat window: no range to locate the close in
        k[i] = Some(if highest == lowest {
            50.0
        } else {
            100.0 * (points[i].close - lowest) / (highest - lowest)
        });
    }

    let defined: Vec<f64> = k.iter().flatten().copied().collect();
    let offset = n - defined.len();
    for (j, v) in sma(&defined, d_period).into_iter().enumerate() {
        d[offset + j] = v;
    }

    StochasticResult { k, d }
}

/// Average True Range: rolling mean of the true range, aligned to the input.
pub fn atr(points: &[PricePoint], period: usize) -> Vec<Option<f64>> {
    let n = points.len();
    let mut result = vec![None; n];
    if period == 0 || n < period + 1 {
        return result;
    }

    let mut true_ranges = Vec::with_capacity(n - 1);
    for i in 1..n {
        let high_low = points[i].high - points[i].low;
        let high_close = (points[i].high - points[i - 1].close).abs();
        let low_close = (points[i].low - points[i - 1].close).abs();
        true_ranges.push(high_low.max(high_close).max(low_close));
    }

    let mut sum: f64 = true_ranges[..period].iter().sum();
    result[period] = Some(sum / period as f64);

    for i in period..true_ranges.len() {
        sum += true_ranges[i] - true_ranges[i - period];
        result[i + 1] = Some(sum / period as f64);
    }
    result
}
