use crate::{AnalysisError, PricePoint};

/// Check the OHLCV series invariants: each bar internally consistent,
/// volume non-negative, dates strictly ascending with no duplicates.
pub fn validate_series(points: &[PricePoint]) -> Result<(), AnalysisError> {
    for (i, p) in points.iter().enumerate() {
        if !(p.open.is_finite() && p.high.is_finite() && p.low.is_finite() && p.close.is_finite()) {
            return Err(AnalysisError::InvalidData(format!(
                "bar {} has a non-finite price",
                i
            )));
        }
        if p.high < p.open.max(p.close) {
            return Err(AnalysisError::InvalidData(format!(
                "bar {} high {} below open/close",
                i, p.high
            )));
        }
        if p.low > p.open.min(p.close) {
            return Err(AnalysisError::InvalidData(format!(
                "bar {} low {} above open/close",
                i, p.low
            )));
        }
        if p.volume < 0.0 {
            return Err(AnalysisError::InvalidData(format!(
                "bar {} has negative volume",
                i
            )));
        }
    }

    for (i, pair) in points.windows(2).enumerate() {
        if pair[1].date <= pair[0].date {
            return Err(AnalysisError::InvalidData(format!(
                "bar dates not strictly ascending at index {}",
                i + 1
            )));
        }
    }

    Ok(())
}
