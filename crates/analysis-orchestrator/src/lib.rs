use analysis_core::{
    validate_series, AnalysisError, EarningsPoint, FundamentalSnapshot, PricePoint, SymbolAnalysis,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use technical_analysis::{score_series, IndicatorFrame, ScoringConfig};
use valuation_analysis::ValuationEngine;

/// Everything the pipeline needs for one symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolInput {
    pub symbol: String,
    pub points: Vec<PricePoint>,
    pub snapshot: Option<FundamentalSnapshot>,
    pub earnings: Vec<EarningsPoint>,
}

/// Runs the full per-symbol pipeline and fans it out across a batch.
pub struct AnalysisOrchestrator {
    scoring: ScoringConfig,
    valuation: ValuationEngine,
}

impl AnalysisOrchestrator {
    pub fn new() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            valuation: ValuationEngine::new(),
        }
    }

    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_valuation(mut self, valuation: ValuationEngine) -> Self {
        self.valuation = valuation;
        self
    }

    /// Analyze one symbol: validate, compute indicators, score every bar,
    /// then value the company when a fundamental snapshot is available.
    ///
    /// A valuation failure degrades the result to signals-only; a signal
    /// failure fails the symbol.
    pub fn analyze_symbol(
        &self,
        input: &SymbolInput,
        seed: u64,
    ) -> Result<SymbolAnalysis, AnalysisError> {
        tracing::info!(
            "Starting analysis for {} ({} bars)",
            input.symbol,
            input.points.len()
        );

        validate_series(&input.points)?;
        let frame = IndicatorFrame::compute(&input.points)?;
        let signals = score_series(&frame, &self.scoring);

        let valuation = match &input.snapshot {
            Some(snapshot) => {
                let mut rng = StdRng::seed_from_u64(seed);
                match self.valuation.analyze(
                    &input.symbol,
                    snapshot,
                    &input.earnings,
                    &input.points,
                    &mut rng,
                ) {
                    Ok(report) => Some(report),
                    Err(e) => {
                        tracing::warn!("Valuation failed for {}: {}", input.symbol, e);
                        None
                    }
                }
            }
            None => None,
        };

        Ok(SymbolAnalysis {
            symbol: input.symbol.clone(),
            signals,
            valuation,
        })
    }

    /// Analyze a batch of symbols in parallel.
    ///
    /// Symbols are independent, so the batch fans out over the rayon pool;
    /// each symbol gets its own rng stream derived from the base seed, and
    /// one symbol's failure never aborts the others.
    pub fn analyze_batch(
        &self,
        inputs: &[SymbolInput],
        base_seed: u64,
    ) -> Vec<(String, Result<SymbolAnalysis, AnalysisError>)> {
        inputs
            .par_iter()
            .enumerate()
            .map(|(i, input)| {
                let seed = symbol_seed(base_seed, i as u64);
                (input.symbol.clone(), self.analyze_symbol(input, seed))
            })
            .collect()
    }
}

impl Default for AnalysisOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

// Splitmix-style mix so neighbouring indices land on distant streams
fn symbol_seed(base_seed: u64, index: u64) -> u64 {
    let mut z = base_seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
