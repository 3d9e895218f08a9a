use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::features::{Band, DrawFeatures};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandSummary {
    pub mean: f64,
    /// Mode du nombre de numéros tirés dans la faixa.
    pub most_common: u8,
}

/// Résumé agrégé d'une fenêtre de tirages.
///
/// Départage des égalités : le mode retient la plus petite valeur, la ligne
/// et la colonne les plus fréquentes retiennent le plus petit indice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub draws: usize,
    pub low: BandSummary,
    pub mid: BandSummary,
    pub high: BandSummary,
    /// Moyenne des moyennes par tirage.
    pub overall_mean: f64,
    pub amplitude_mean: f64,
    pub consecutive_mean: f64,
    pub consecutive_max: u8,
    /// Indice de ligne 0..=7 (ligne 0 = numéros 1-10).
    pub top_row: usize,
    /// Colonne 0..=9 (chiffre des unités).
    pub top_column: usize,
}

impl Summary {
    pub fn band(&self, band: Band) -> &BandSummary {
        match band {
            Band::Low => &self.low,
            Band::Mid => &self.mid,
            Band::High => &self.high,
        }
    }
}

pub fn summarize(features: &[DrawFeatures]) -> Result<Summary, AnalysisError> {
    if features.is_empty() {
        return Err(AnalysisError::EmptyWindow);
    }
    let n = features.len() as f64;

    let band_summary = |band: Band| BandSummary {
        mean: features.iter().map(|f| f.band(band) as f64).sum::<f64>() / n,
        most_common: mode(features.iter().map(|f| f.band(band))),
    };

    let mut row_sums = [0u32; 8];
    let mut column_sums = [0u32; 10];
    for f in features {
        for (total, &count) in row_sums.iter_mut().zip(&f.rows) {
            *total += count as u32;
        }
        for (total, &count) in column_sums.iter_mut().zip(&f.columns) {
            *total += count as u32;
        }
    }

    Ok(Summary {
        draws: features.len(),
        low: band_summary(Band::Low),
        mid: band_summary(Band::Mid),
        high: band_summary(Band::High),
        overall_mean: features.iter().map(|f| f.mean).sum::<f64>() / n,
        amplitude_mean: features.iter().map(|f| f.amplitude as f64).sum::<f64>() / n,
        consecutive_mean: features.iter().map(|f| f.consecutive as f64).sum::<f64>() / n,
        consecutive_max: features.iter().map(|f| f.consecutive).max().unwrap_or(0),
        top_row: argmax(&row_sums),
        top_column: argmax(&column_sums),
    })
}

/// Valeur la plus fréquente ; à égalité, la plus petite. 0 sur une entrée vide.
fn mode(values: impl Iterator<Item = u8>) -> u8 {
    let mut counts: BTreeMap<u8, u32> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    let mut best: Option<(u8, u32)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map_or(0, |(value, _)| value)
}

/// Premier indice du maximum.
fn argmax(values: &[u32]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}
