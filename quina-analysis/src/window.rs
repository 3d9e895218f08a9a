use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use quina_data::models::Draw;
use crate::error::AnalysisError;
use crate::features::{DrawFeatures, compute_features};
use crate::frequency::{
    Combination, GlobalFrequency, combination_frequency, gap_frequency, global_frequency,
};
use crate::inspect::{CardReport, inspect};
use crate::scorer::{Classification, classify};
use crate::summary::{Summary, summarize};

/// Nombre de paires et de trincas retenues par défaut.
pub const DEFAULT_TOP_COMBINATIONS: usize = 10;

/// Toutes les analyses d'une fenêtre de tirages, calculées en une passe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowAnalysis {
    pub features: Vec<DrawFeatures>,
    pub frequency: GlobalFrequency,
    pub pairs: Vec<Combination>,
    pub triples: Vec<Combination>,
    pub gaps: BTreeMap<u8, u32>,
    pub summary: Summary,
}

impl WindowAnalysis {
    pub fn compute(draws: &[Draw], top_n: usize) -> Result<Self, AnalysisError> {
        if draws.is_empty() {
            return Err(AnalysisError::EmptyWindow);
        }

        let features = compute_features(draws)?;
        debug!(draws = draws.len(), "caractéristiques calculées");

        let frequency = global_frequency(draws);
        let pairs = combination_frequency(draws, 2, top_n)?;
        let triples = combination_frequency(draws, 3, top_n)?;
        let gaps = gap_frequency(draws);
        debug!(
            numbers = frequency.as_map().len(),
            pairs = pairs.len(),
            triples = triples.len(),
            "fréquences calculées"
        );

        let summary = summarize(&features)?;
        debug!(
            overall_mean = summary.overall_mean,
            amplitude_mean = summary.amplitude_mean,
            "résumé calculé"
        );

        Ok(Self { features, frequency, pairs, triples, gaps, summary })
    }

    pub fn classify(&self, card: &[u8; 5]) -> Classification {
        classify(card, &self.summary)
    }

    pub fn inspect(&self, card: &[u8; 5]) -> CardReport {
        inspect(card, &self.frequency, &self.gaps, &self.pairs, &self.triples)
    }
}
