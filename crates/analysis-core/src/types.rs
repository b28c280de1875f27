use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV price bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// One reported earnings-per-share figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsPoint {
    pub date: DateTime<Utc>,
    pub eps: f64,
}

/// Point-in-time fundamental data for a symbol.
///
/// Provider feeds are sparse, so every numeric field is optional; the
/// valuation engine decides which absences are fatal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FundamentalSnapshot {
    pub current_price: Option<f64>,
    pub forward_eps: Option<f64>,
    pub forward_pe: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub sector: Option<Sector>,
    pub market_cap: Option<f64>,
    pub profit_margin: Option<f64>,
    pub debt_to_equity: Option<f64>,
}

/// GICS-style sector classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sector {
    Technology,
    Healthcare,
    FinancialServices,
    ConsumerCyclical,
    ConsumerDefensive,
    Industrials,
    Energy,
    Utilities,
    RealEstate,
    BasicMaterials,
    CommunicationServices,
}

impl Sector {
    /// Parse a provider sector label (case-insensitive, tolerant of the
    /// common spelling variants across data vendors).
    pub fn from_name(name: &str) -> Option<Sector> {
        let n = name.to_lowercase();
        if n.contains("health") {
            Some(Sector::Healthcare)
        } else if n.contains("tech") {
            Some(Sector::Technology)
        } else if n.contains("financial") {
            Some(Sector::FinancialServices)
        } else if n.contains("consumer cyclical") || n.contains("consumer discretionary") {
            Some(Sector::ConsumerCyclical)
        } else if n.contains("consumer defensive") || n.contains("consumer staples") {
            Some(Sector::ConsumerDefensive)
        } else if n.contains("industrial") {
            Some(Sector::Industrials)
        } else if n.contains("energy") {
            Some(Sector::Energy)
        } else if n.contains("utilit") {
            Some(Sector::Utilities)
        } else if n.contains("real estate") {
            Some(Sector::RealEstate)
        } else if n.contains("material") {
            Some(Sector::BasicMaterials)
        } else if n.contains("communication") || n.contains("telecom") {
            Some(Sector::CommunicationServices)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Technology => "Technology",
            Sector::Healthcare => "Healthcare",
            Sector::FinancialServices => "Financial Services",
            Sector::ConsumerCyclical => "Consumer Cyclical",
            Sector::ConsumerDefensive => "Consumer Defensive",
            Sector::Industrials => "Industrials",
            Sector::Energy => "Energy",
            Sector::Utilities => "Utilities",
            Sector::RealEstate => "Real Estate",
            Sector::BasicMaterials => "Basic Materials",
            Sector::CommunicationServices => "Communication Services",
        }
    }
}

/// Per-indicator vote on one bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Signal {
    Bullish,
    #[default]
    Neutral,
    Bearish,
}

impl Signal {
    pub fn value(&self) -> i32 {
        match self {
            Signal::Bullish => 1,
            Signal::Neutral => 0,
            Signal::Bearish => -1,
        }
    }
}

/// Collapsed trade recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalCategory {
    Buy,
    Hold,
    Sell,
}

impl SignalCategory {
    pub fn to_label(&self) -> &'static str {
        match self {
            SignalCategory::Buy => "Buy",
            SignalCategory::Hold => "Hold",
            SignalCategory::Sell => "Sell",
        }
    }
}

/// Scored technical signals for a single bar.
///
/// Immutable once produced; strength is the weighted sum of the five
/// indicator votes and stays within [-100, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub date: DateTime<Utc>,
    pub price: f64,
    pub ma_signal: Signal,
    pub macd_signal: Signal,
    pub rsi_signal: Signal,
    pub bollinger_signal: Signal,
    pub stochastic_signal: Signal,
    pub strength: i32,
    pub category: SignalCategory,
}

/// Valuation action ladder, strongest conviction first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendedAction {
    StrongBuy,
    Buy,
    Accumulate,
    Hold,
    Reduce,
    Sell,
}

impl RecommendedAction {
    pub fn category(&self) -> SignalCategory {
        match self {
            RecommendedAction::StrongBuy | RecommendedAction::Buy | RecommendedAction::Accumulate => {
                SignalCategory::Buy
            }
            RecommendedAction::Hold => SignalCategory::Hold,
            RecommendedAction::Reduce | RecommendedAction::Sell => SignalCategory::Sell,
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            RecommendedAction::StrongBuy => "Strong Buy",
            RecommendedAction::Buy => "Buy",
            RecommendedAction::Accumulate => "Accumulate",
            RecommendedAction::Hold => "Hold",
            RecommendedAction::Reduce => "Reduce",
            RecommendedAction::Sell => "Sell",
        }
    }
}

/// Five named P/E multiples, monotonically non-decreasing and clamped to
/// [0.3x mean, 3.0x mean].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationBand {
    pub conservative_low: f64,
    pub moderate_low: f64,
    pub target_mean: f64,
    pub moderate_high: f64,
    pub aggressive_high: f64,
}

/// Default spread applied when no historical ratio volatility is available
pub const FALLBACK_VOLATILITY_FACTOR: f64 = 0.2;

impl ValuationBand {
    /// Build the band around a mean multiple with the given volatility
    /// factor. Clamping is order-preserving, so the band stays monotonic.
    pub fn from_mean(mean: f64, volatility_factor: f64) -> Self {
        let clamp = |m: f64| m.clamp(0.3 * mean, 3.0 * mean);
        Self {
            conservative_low: clamp(mean * (1.0 - 2.0 * volatility_factor)),
            moderate_low: clamp(mean * (1.0 - volatility_factor)),
            target_mean: clamp(mean),
            moderate_high: clamp(mean * (1.0 + volatility_factor)),
            aggressive_high: clamp(mean * (1.0 + 2.0 * volatility_factor)),
        }
    }

    /// Degraded band used when historical statistics are unavailable
    pub fn from_current_pe(pe: f64) -> Self {
        Self::from_mean(pe, FALLBACK_VOLATILITY_FACTOR)
    }

    pub fn multiples(&self) -> [f64; 5] {
        [
            self.conservative_low,
            self.moderate_low,
            self.target_mean,
            self.moderate_high,
            self.aggressive_high,
        ]
    }

    pub fn is_monotonic(&self) -> bool {
        self.multiples().windows(2).all(|w| w[0] <= w[1])
    }
}

/// Per-band target prices for one horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandTargets {
    pub conservative_low: f64,
    pub moderate_low: f64,
    pub target_mean: f64,
    pub moderate_high: f64,
    pub aggressive_high: f64,
}

/// One source's price-target estimate for one horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonEstimate {
    pub years: u32,
    pub source: String,
    pub future_eps: f64,
    pub targets: BandTargets,
    pub action: RecommendedAction,
    pub confidence: f64,
    pub buy_zone: String,
    pub hold_zone: String,
    pub sell_zone: String,
    /// True when produced by a fallback path rather than observed history
    pub degraded: bool,
}

/// Consensus statistics across estimate sources for one horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonConsensus {
    pub years: u32,
    pub mean_target: f64,
    pub median_target: f64,
    pub std_dev: f64,
    pub ci_68: (f64, f64),
    pub ci_95: (f64, f64),
    pub high_target: f64,
    pub low_target: f64,
    pub potential_return_pct: f64,
    pub sources: usize,
}

/// Full valuation output for a symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationReport {
    pub symbol: String,
    pub action: RecommendedAction,
    pub category: SignalCategory,
    pub confidence: f64,
    pub horizons: Vec<HorizonConsensus>,
    pub estimates: Vec<HorizonEstimate>,
    pub degraded: bool,
}

/// Combined output of the per-symbol pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolAnalysis {
    pub symbol: String,
    pub signals: Vec<SignalRecord>,
    pub valuation: Option<ValuationReport>,
}

impl SymbolAnalysis {
    /// Signal record for the most recent bar
    pub fn latest_signal(&self) -> Option<&SignalRecord> {
        self.signals.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_parses_vendor_labels() {
        assert_eq!(Sector::from_name("Technology"), Some(Sector::Technology));
        assert_eq!(Sector::from_name("consumer staples"), Some(Sector::ConsumerDefensive));
        assert_eq!(Sector::from_name("Consumer Cyclical"), Some(Sector::ConsumerCyclical));
        assert_eq!(Sector::from_name("Biotechnology & Health"), Some(Sector::Healthcare));
        assert_eq!(Sector::from_name("Telecom Services"), Some(Sector::CommunicationServices));
        assert_eq!(Sector::from_name("Frontier Shipping"), None);
    }

    #[test]
    fn band_from_mean_matches_volatility_spread() {
        let band = ValuationBand::from_mean(20.0, 0.2);
        assert_eq!(band.multiples(), [12.0, 16.0, 20.0, 24.0, 28.0]);
        assert!(band.is_monotonic());
    }

    #[test]
    fn band_clamps_extremes_and_stays_monotonic() {
        // factor 0.5 would put the bottom multiple at zero without the clamp
        let band = ValuationBand::from_mean(20.0, 0.5);
        assert!((band.conservative_low - 6.0).abs() < 1e-9);
        assert!((band.aggressive_high - 40.0).abs() < 1e-9);
        assert!(band.is_monotonic());
        for m in band.multiples() {
            assert!(m >= 0.3 * 20.0 && m <= 3.0 * 20.0);
        }
    }

    #[test]
    fn action_collapses_to_three_categories() {
        assert_eq!(RecommendedAction::StrongBuy.category(), SignalCategory::Buy);
        assert_eq!(RecommendedAction::Accumulate.category(), SignalCategory::Buy);
        assert_eq!(RecommendedAction::Hold.category(), SignalCategory::Hold);
        assert_eq!(RecommendedAction::Reduce.category(), SignalCategory::Sell);
        assert_eq!(RecommendedAction::Sell.category(), SignalCategory::Sell);
    }

    #[test]
    fn report_serializes_for_presentation_handoff() {
        let report = ValuationReport {
            symbol: "ACME".to_string(),
            action: RecommendedAction::Buy,
            category: SignalCategory::Buy,
            confidence: 0.75,
            horizons: vec![],
            estimates: vec![],
            degraded: false,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"symbol\":\"ACME\""));
        let back: ValuationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
