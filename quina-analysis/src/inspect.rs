use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use quina_data::models::Draw;
use crate::features::compute::{even_count, gaps, quadrants, shared_count, sum};
use crate::frequency::{Combination, GlobalFrequency};
use crate::round2;

/// Détail d'une grille face à l'historique de la fenêtre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardReport {
    pub numbers: [u8; 5],
    pub sum: u16,
    pub evens: u8,
    pub odds: u8,
    /// Fréquence moyenne des 5 numéros, arrondie à 2 décimales.
    pub frequency_mean: f64,
    pub quadrants: [u8; 4],
    pub gaps: [u8; 4],
    /// Écarts de la grille déjà observés dans l'historique.
    pub common_gaps: Vec<u8>,
    pub historical_pairs: Vec<Combination>,
    pub historical_triples: Vec<Combination>,
}

pub fn inspect(
    card: &[u8; 5],
    frequency: &GlobalFrequency,
    gap_counts: &BTreeMap<u8, u32>,
    pairs: &[Combination],
    triples: &[Combination],
) -> CardReport {
    let mut sorted = *card;
    sorted.sort_unstable();

    let evens = even_count(&sorted);
    let card_gaps = gaps(&sorted);

    let mut common_gaps: Vec<u8> = card_gaps
        .iter()
        .copied()
        .filter(|g| gap_counts.contains_key(g))
        .collect();
    common_gaps.sort_unstable();
    common_gaps.dedup();

    let frequency_mean =
        sorted.iter().map(|&n| frequency.count(n) as f64).sum::<f64>() / sorted.len() as f64;

    CardReport {
        numbers: sorted,
        sum: sum(&sorted),
        evens,
        odds: sorted.len() as u8 - evens,
        frequency_mean: round2(frequency_mean),
        quadrants: quadrants(&sorted),
        gaps: card_gaps,
        common_gaps,
        historical_pairs: pairs.iter().filter(|c| c.is_in(&sorted)).cloned().collect(),
        historical_triples: triples.iter().filter(|c| c.is_in(&sorted)).cloned().collect(),
    }
}

/// Tirages partageant au moins `min_shared` numéros avec la grille.
pub fn similar_draws<'a>(card: &[u8; 5], draws: &'a [Draw], min_shared: u8) -> Vec<&'a Draw> {
    draws
        .iter()
        .filter(|d| shared_count(card, &d.numbers) >= min_shared)
        .collect()
}
