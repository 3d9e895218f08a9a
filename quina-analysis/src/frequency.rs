use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use quina_data::models::{Draw, PICK_COUNT, POOL_SIZE};
use crate::error::AnalysisError;

/// Nombre d'apparitions de chaque numéro sur la fenêtre.
/// Seuls les numéros sortis ont une entrée ; `count` renvoie 0 pour les autres.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalFrequency {
    counts: BTreeMap<u8, u32>,
}

impl GlobalFrequency {
    pub fn count(&self, number: u8) -> u32 {
        self.counts.get(&number).copied().unwrap_or(0)
    }

    /// Par numéro croissant.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts.iter().map(|(&n, &c)| (n, c))
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn as_map(&self) -> &BTreeMap<u8, u32> {
        &self.counts
    }

    /// Les 80 numéros, du plus fréquent au moins fréquent. Tri stable sur
    /// l'ordre croissant : à égalité, le plus petit numéro passe devant, et les
    /// numéros jamais sortis ferment la marche.
    pub fn ranked(&self) -> Vec<(u8, u32)> {
        let mut ranked: Vec<(u8, u32)> = (1..=POOL_SIZE).map(|n| (n, self.count(n))).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    pub fn top(&self, k: usize) -> Vec<u8> {
        self.ranked().into_iter().take(k).map(|(n, _)| n).collect()
    }
}

pub fn global_frequency(draws: &[Draw]) -> GlobalFrequency {
    let mut counts = BTreeMap::new();
    for draw in draws {
        for &n in &draw.numbers {
            *counts.entry(n).or_insert(0) += 1;
        }
    }
    GlobalFrequency { counts }
}

/// Paire, trinca, ... et nombre de tirages qui la contiennent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    pub numbers: Vec<u8>,
    pub count: u32,
}

impl Combination {
    pub fn is_in(&self, card: &[u8]) -> bool {
        self.numbers.iter().all(|n| card.contains(n))
    }
}

/// Sous-ensembles de `size` éléments, en ordre lexicographique.
pub fn combinations(items: &[u8], size: usize) -> Vec<Vec<u8>> {
    fn walk(items: &[u8], size: usize, start: usize, current: &mut Vec<u8>, out: &mut Vec<Vec<u8>>) {
        if current.len() == size {
            out.push(current.clone());
            return;
        }
        for i in start..items.len() {
            current.push(items[i]);
            walk(items, size, i + 1, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    walk(items, size, 0, &mut Vec::with_capacity(size), &mut out);
    out
}

/// Combinaisons les plus fréquentes parmi les tirages (paires pour `size` = 2,
/// trincas pour 3). Classement par nombre décroissant ; à égalité, la
/// combinaison rencontrée en premier reste devant (tri stable).
pub fn combination_frequency(
    draws: &[Draw],
    size: usize,
    top_n: usize,
) -> Result<Vec<Combination>, AnalysisError> {
    if size == 0 || size > PICK_COUNT {
        return Err(AnalysisError::InvalidCombinationSize(size));
    }

    let mut index: HashMap<Vec<u8>, usize> = HashMap::new();
    let mut ranked: Vec<Combination> = Vec::new();

    for draw in draws {
        let mut sorted = draw.numbers;
        sorted.sort_unstable();
        for combo in combinations(&sorted, size) {
            match index.get(&combo) {
                Some(&i) => ranked[i].count += 1,
                None => {
                    index.insert(combo.clone(), ranked.len());
                    ranked.push(Combination { numbers: combo, count: 1 });
                }
            }
        }
    }

    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(top_n);
    Ok(ranked)
}

/// Fréquence de chaque écart entre numéros consécutifs, par écart croissant.
pub fn gap_frequency(draws: &[Draw]) -> BTreeMap<u8, u32> {
    let mut counts = BTreeMap::new();
    for draw in draws {
        let mut sorted = draw.numbers;
        sorted.sort_unstable();
        for pair in sorted.windows(2) {
            *counts.entry(pair[1] - pair[0]).or_insert(0) += 1;
        }
    }
    counts
}
