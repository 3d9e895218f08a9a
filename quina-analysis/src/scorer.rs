use serde::{Deserialize, Serialize};

use quina_data::models::Draw;
use crate::features::{Band, DrawFeatures};
use crate::features::compute::shared_count;
use crate::generator::Candidate;
use crate::summary::Summary;

/// Score minimal d'une grille favorable.
pub const FAVORABLE_THRESHOLD: i8 = 2;
pub const MEAN_TOLERANCE: f64 = 5.0;
pub const AMPLITUDE_TOLERANCE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Favorable,
    Unfavorable,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Favorable => write!(f, "FAVORABLE"),
            Status::Unfavorable => write!(f, "DÉFAVORABLE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub score: i8,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub classification: Classification,
}

/// Quatre critères indépendants, chacun à +1, 0 ou -1 :
/// moyenne à ±5 de la moyenne historique (+1 / -1),
/// amplitude à ±10 de l'amplitude moyenne (+1 / -1),
/// faixa baixa égale à son mode historique (+1 / 0),
/// séquences consécutives ≤ au maximum observé (+1 / -1).
/// Score dans [-3, 4].
pub fn classify(numbers: &[u8; 5], summary: &Summary) -> Classification {
    let features = DrawFeatures::from_numbers(0, numbers, None);
    let mean = features.sum as f64 / numbers.len() as f64;

    let mut score = 0i8;
    score += if (mean - summary.overall_mean).abs() <= MEAN_TOLERANCE { 1 } else { -1 };
    score += if (features.amplitude as f64 - summary.amplitude_mean).abs() <= AMPLITUDE_TOLERANCE {
        1
    } else {
        -1
    };
    score += if features.band(Band::Low) == summary.low.most_common { 1 } else { 0 };
    score += if features.consecutive <= summary.consecutive_max { 1 } else { -1 };

    let status = if score >= FAVORABLE_THRESHOLD {
        Status::Favorable
    } else {
        Status::Unfavorable
    };
    Classification { score, status }
}

pub fn score_candidates(candidates: Vec<Candidate>, summary: &Summary) -> Vec<ScoredCandidate> {
    candidates
        .into_iter()
        .map(|candidate| {
            let classification = classify(&candidate.numbers, summary);
            ScoredCandidate { candidate, classification }
        })
        .collect()
}

/// Nombre de numéros communs entre une grille et un tirage.
pub fn match_count(card: &[u8; 5], drawn: &[u8; 5]) -> u8 {
    shared_count(card, drawn)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrizeTier {
    Duque,
    Terno,
    Quadra,
    Quina,
}

impl PrizeTier {
    pub fn from_hits(hits: u8) -> Option<PrizeTier> {
        match hits {
            5 => Some(PrizeTier::Quina),
            4 => Some(PrizeTier::Quadra),
            3 => Some(PrizeTier::Terno),
            2 => Some(PrizeTier::Duque),
            _ => None,
        }
    }
}

impl std::fmt::Display for PrizeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrizeTier::Quina => write!(f, "quina"),
            PrizeTier::Quadra => write!(f, "quadra"),
            PrizeTier::Terno => write!(f, "terno"),
            PrizeTier::Duque => write!(f, "duque"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub draw_id: u32,
    pub hits: u8,
    pub tier: Option<PrizeTier>,
}

pub fn check(card: &[u8; 5], draw: &Draw) -> MatchReport {
    let hits = match_count(card, &draw.numbers);
    MatchReport {
        draw_id: draw.id,
        hits,
        tier: PrizeTier::from_hits(hits),
    }
}

/// Tirages de l'historique où la grille aurait été primée, dans l'ordre des tirages.
pub fn check_history(card: &[u8; 5], draws: &[Draw]) -> Vec<MatchReport> {
    draws
        .iter()
        .map(|draw| check(card, draw))
        .filter(|report| report.tier.is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::BandSummary;

    fn summary() -> Summary {
        Summary {
            draws: 100,
            low: BandSummary { mean: 1.6, most_common: 2 },
            mid: BandSummary { mean: 1.7, most_common: 2 },
            high: BandSummary { mean: 1.7, most_common: 1 },
            overall_mean: 40.5,
            amplitude_mean: 52.0,
            consecutive_mean: 0.3,
            consecutive_max: 2,
            top_row: 3,
            top_column: 7,
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // moyenne 39 (+1), amplitude 70 (-1), 2 en baixa (+1), 0 séquence (+1)
        let c = classify(&[10, 20, 40, 45, 80], &summary());
        assert_eq!(c, Classification { score: 2, status: Status::Favorable });
    }

    #[test]
    fn test_classify_maximum() {
        // moyenne 40, amplitude 58, 2 en baixa, 0 séquence : tous les critères
        let c = classify(&[10, 20, 40, 68, 62], &summary());
        assert_eq!(c, Classification { score: 4, status: Status::Favorable });
    }

    #[test]
    fn test_classify_minimum() {
        // moyenne 3, amplitude 4, 5 en baixa, 4 séquences
        let c = classify(&[1, 2, 3, 4, 5], &summary());
        assert_eq!(c, Classification { score: -3, status: Status::Unfavorable });
    }

    #[test]
    fn test_threshold_boundary() {
        // moyenne 40, amplitude 52, 1 en baixa, 0 séquence : 1 + 1 + 0 + 1
        let c = classify(&[10, 30, 40, 62, 58], &summary());
        assert_eq!(c.score, 3);
        // moyenne 16.8 (-1), amplitude 52 (+1), 4 en baixa (0), 0 séquence (+1)
        let c = classify(&[1, 3, 5, 22, 53], &summary());
        assert_eq!(c.score, 1);
        assert_eq!(c.status, Status::Unfavorable);
    }

    #[test]
    fn test_score_range() {
        let s = summary();
        for a in (1..=76u8).step_by(3) {
            let card = [a, a + 1, (a + 20).min(78), 79, 80];
            let mut sorted = card;
            sorted.sort_unstable();
            if sorted.windows(2).any(|w| w[0] == w[1]) {
                continue;
            }
            let c = classify(&card, &s);
            assert!((-3..=4).contains(&c.score));
            assert_eq!(c.status == Status::Favorable, c.score >= FAVORABLE_THRESHOLD);
        }
    }

    #[test]
    fn test_match_count_terno() {
        let hits = match_count(&[1, 2, 3, 4, 5], &[3, 4, 5, 6, 7]);
        assert_eq!(hits, 3);
        assert_eq!(PrizeTier::from_hits(hits), Some(PrizeTier::Terno));
    }

    #[test]
    fn test_match_count_is_set_intersection() {
        assert_eq!(match_count(&[7, 7, 8, 9, 10], &[7, 8, 20, 30, 40]), 2);
        assert_eq!(match_count(&[7, 8, 20, 30, 40], &[7, 7, 8, 9, 10]), 2);
        assert_eq!(match_count(&[1, 2, 3, 4, 5], &[5, 4, 3, 2, 1]), 5);
    }

    #[test]
    fn test_prize_tiers() {
        assert_eq!(PrizeTier::from_hits(5), Some(PrizeTier::Quina));
        assert_eq!(PrizeTier::from_hits(4), Some(PrizeTier::Quadra));
        assert_eq!(PrizeTier::from_hits(2), Some(PrizeTier::Duque));
        assert_eq!(PrizeTier::from_hits(1), None);
        assert_eq!(PrizeTier::from_hits(0), None);
        assert!(PrizeTier::Quina > PrizeTier::Duque);
    }

    #[test]
    fn test_check_history() {
        let draws = vec![
            Draw::new(1, &[1, 2, 3, 4, 5], None).unwrap(),
            Draw::new(2, &[1, 20, 30, 40, 50], None).unwrap(),
            Draw::new(3, &[1, 2, 70, 71, 72], None).unwrap(),
        ];
        let reports = check_history(&[1, 2, 3, 4, 5], &draws);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0], MatchReport { draw_id: 1, hits: 5, tier: Some(PrizeTier::Quina) });
        assert_eq!(reports[1].tier, Some(PrizeTier::Duque));
    }
}
