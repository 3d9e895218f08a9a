use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};
use tracing::debug;

use quina_data::models::{PICK_COUNT, POOL_SIZE};
use crate::config::{GeneratorConfig, Strategy};
use crate::error::AnalysisError;
use crate::features::Band;
use crate::features::compute::{column_numbers, row_numbers};
use crate::frequency::GlobalFrequency;
use crate::scorer::{ScoredCandidate, Status, classify};
use crate::summary::Summary;

/// Grille générée ; jamais modifiée, seulement scorée.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub numbers: [u8; 5],
    pub strategy: Strategy,
}

/// Grille en construction : refuse les doublons et tout ajout au-delà de 5.
struct CardBuilder {
    numbers: Vec<u8>,
}

impl CardBuilder {
    fn new() -> Self {
        Self { numbers: Vec::with_capacity(PICK_COUNT) }
    }

    fn is_full(&self) -> bool {
        self.numbers.len() >= PICK_COUNT
    }

    fn offer(&mut self, number: u8) -> bool {
        if self.is_full() || self.numbers.contains(&number) {
            return false;
        }
        self.numbers.push(number);
        true
    }

    /// Complète uniformément dans 1..=80 puis trie.
    fn finish<R: Rng + ?Sized>(mut self, rng: &mut R) -> [u8; 5] {
        while !self.is_full() {
            self.offer(rng.random_range(1..=POOL_SIZE));
        }
        let mut card = [0u8; 5];
        card.copy_from_slice(&self.numbers);
        card.sort_unstable();
        card
    }
}

fn frequency_card<R: Rng + ?Sized>(pool: &[u8], rng: &mut R) -> [u8; 5] {
    let mut card = CardBuilder::new();
    while !card.is_full() {
        match pool.choose(rng) {
            Some(&n) => {
                card.offer(n);
            }
            None => break,
        }
    }
    card.finish(rng)
}

/// Étapes dans l'ordre : les deux numéros les plus fréquents, un numéro de la
/// colonne dominante, un de la ligne dominante, un par faixa (faixas dans un
/// ordre tiré au sort), puis complément aléatoire. Un numéro déjà présent ou
/// une grille pleine font sauter l'étape.
fn structure_card<R: Rng + ?Sized>(
    leaders: &[u8],
    column_pool: &[u8],
    row_pool: &[u8],
    rng: &mut R,
) -> [u8; 5] {
    let mut card = CardBuilder::new();
    for &n in leaders {
        card.offer(n);
    }
    if let Some(&n) = column_pool.choose(rng) {
        card.offer(n);
    }
    if let Some(&n) = row_pool.choose(rng) {
        card.offer(n);
    }
    let mut bands = Band::ALL;
    bands.shuffle(rng);
    for band in bands {
        card.offer(rng.random_range(band.range()));
    }
    card.finish(rng)
}

pub fn random_card<R: Rng + ?Sized>(rng: &mut R) -> [u8; 5] {
    CardBuilder::new().finish(rng)
}

/// Génère `config.count` grilles de 5 numéros distincts, triés, dans 1..=80.
pub fn generate<R: Rng + ?Sized>(
    summary: &Summary,
    frequency: &GlobalFrequency,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<Candidate>, AnalysisError> {
    config.validate()?;

    let pool = frequency.top(config.top_k);
    let leaders = frequency.top(2);
    let column_pool = column_numbers(summary.top_column);
    let row_pool = row_numbers(summary.top_row);

    let candidates: Vec<Candidate> = (0..config.count)
        .map(|_| {
            let numbers = match config.strategy {
                Strategy::Frequency => frequency_card(&pool, rng),
                Strategy::Structure => structure_card(&leaders, &column_pool, &row_pool, rng),
                Strategy::Random => random_card(rng),
            };
            Candidate { numbers, strategy: config.strategy }
        })
        .collect();

    debug!(strategy = %config.strategy, count = candidates.len(), "grilles générées");
    Ok(candidates)
}

/// Tire `attempts` grilles uniformes, garde les favorables et renvoie les
/// `keep` meilleures (score décroissant, ordre de tirage à égalité).
pub fn best_of_random<R: Rng + ?Sized>(
    summary: &Summary,
    attempts: usize,
    keep: usize,
    rng: &mut R,
) -> Vec<ScoredCandidate> {
    let mut favorable: Vec<ScoredCandidate> = (0..attempts)
        .filter_map(|_| {
            let numbers = random_card(rng);
            let classification = classify(&numbers, summary);
            (classification.status == Status::Favorable).then(|| ScoredCandidate {
                candidate: Candidate { numbers, strategy: Strategy::Random },
                classification,
            })
        })
        .collect();

    debug!(attempts, favorable = favorable.len(), "tirage aléatoire filtré");

    favorable.sort_by(|a, b| b.classification.score.cmp(&a.classification.score));
    favorable.truncate(keep);
    favorable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::compute::{column_of, row_of};
    use crate::features::compute_features;
    use crate::frequency::global_frequency;
    use crate::make_test_draws;
    use crate::summary::summarize;
    use assert_matches::assert_matches;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fixtures() -> (Summary, GlobalFrequency) {
        let draws = make_test_draws(60);
        let summary = summarize(&compute_features(&draws).unwrap()).unwrap();
        (summary, global_frequency(&draws))
    }

    fn assert_valid(card: &[u8; 5]) {
        assert!(card.iter().all(|&n| (1..=80).contains(&n)), "hors limites: {:?}", card);
        assert!(card.windows(2).all(|w| w[0] < w[1]), "non trié ou doublon: {:?}", card);
    }

    #[test]
    fn test_all_strategies_valid() {
        let (summary, freq) = fixtures();
        let mut rng = StdRng::seed_from_u64(42);
        for strategy in [Strategy::Frequency, Strategy::Structure, Strategy::Random] {
            let config = GeneratorConfig { strategy, count: 50, ..Default::default() };
            let candidates = generate(&summary, &freq, &config, &mut rng).unwrap();
            assert_eq!(candidates.len(), 50);
            for c in &candidates {
                assert_valid(&c.numbers);
                assert_eq!(c.strategy, strategy);
            }
        }
    }

    #[test]
    fn test_frequency_stays_in_pool() {
        let (summary, freq) = fixtures();
        let config = GeneratorConfig { top_k: 12, count: 40, ..Default::default() };
        let pool = freq.top(12);
        let mut rng = StdRng::seed_from_u64(7);
        for c in generate(&summary, &freq, &config, &mut rng).unwrap() {
            assert!(c.numbers.iter().all(|n| pool.contains(n)), "{:?} hors pool {:?}", c.numbers, pool);
        }
    }

    #[test]
    fn test_frequency_minimal_pool() {
        let (summary, freq) = fixtures();
        let config = GeneratorConfig { top_k: 5, count: 3, ..Default::default() };
        let mut top = freq.top(5);
        top.sort_unstable();
        let mut rng = StdRng::seed_from_u64(1);
        for c in generate(&summary, &freq, &config, &mut rng).unwrap() {
            assert_eq!(c.numbers.to_vec(), top);
        }
    }

    #[test]
    fn test_structure_seeds_leaders() {
        let (summary, freq) = fixtures();
        let leaders = freq.top(2);
        let config = GeneratorConfig { strategy: Strategy::Structure, count: 20, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(3);
        for c in generate(&summary, &freq, &config, &mut rng).unwrap() {
            assert!(leaders.iter().all(|n| c.numbers.contains(n)));
        }
    }

    #[test]
    fn test_structure_covers_top_column_and_row() {
        let (summary, freq) = fixtures();
        let config = GeneratorConfig { strategy: Strategy::Structure, count: 2000, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(9);
        for c in generate(&summary, &freq, &config, &mut rng).unwrap() {
            assert!(
                c.numbers.iter().any(|&n| column_of(n) == summary.top_column),
                "{:?} sans numéro de la colonne {}",
                c.numbers,
                summary.top_column
            );
            assert!(
                c.numbers.iter().any(|&n| row_of(n) == summary.top_row),
                "{:?} sans numéro de la ligne {}",
                c.numbers,
                summary.top_row
            );
        }
    }

    #[test]
    fn test_structure_last_slot_spreads_over_bands() {
        let mut rng = StdRng::seed_from_u64(5);
        // Leaders, colonne et ligne remplissent 4 places : la 5e vient d'une faixa
        let mut seen = [0u32; 3];
        for _ in 0..600 {
            let card = structure_card(&[1, 2], &[3], &[4], &mut rng);
            for &n in card.iter().filter(|&&n| n > 4) {
                seen[Band::of(n).index()] += 1;
            }
        }
        assert_eq!(seen.iter().sum::<u32>(), 600);
        assert!(seen.iter().all(|&c| c > 100), "répartition {:?}", seen);
    }

    #[test]
    fn test_structure_card_skips_collisions() {
        let mut rng = StdRng::seed_from_u64(11);
        // Colonne et ligne ne proposent que des numéros déjà présents
        let card = structure_card(&[10, 20], &[10], &[20], &mut rng);
        assert_valid(&card);
        assert!(card.contains(&10) && card.contains(&20));
    }

    #[test]
    fn test_seed_determinism() {
        let (summary, freq) = fixtures();
        let config = GeneratorConfig { strategy: Strategy::Structure, count: 10, ..Default::default() };
        let a = generate(&summary, &freq, &config, &mut StdRng::seed_from_u64(123)).unwrap();
        let b = generate(&summary, &freq, &config, &mut StdRng::seed_from_u64(123)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let (summary, freq) = fixtures();
        let config = GeneratorConfig { top_k: 3, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(0);
        assert_matches!(
            generate(&summary, &freq, &config, &mut rng),
            Err(AnalysisError::InvalidConfig(_))
        );
    }

    #[test]
    fn test_best_of_random_sorted_and_favorable() {
        let (summary, _) = fixtures();
        let mut rng = StdRng::seed_from_u64(2024);
        let best = best_of_random(&summary, 1000, 5, &mut rng);
        assert!(best.len() <= 5);
        for s in &best {
            assert_eq!(s.classification.status, Status::Favorable);
            assert_valid(&s.candidate.numbers);
        }
        assert!(best.windows(2).all(|w| w[0].classification.score >= w[1].classification.score));
    }
}
