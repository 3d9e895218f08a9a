pub mod compute;

use serde::{Deserialize, Serialize};

use quina_data::models::{Draw, validate_draw};
use crate::error::AnalysisError;

/// Faixas numériques : baixa 1-26, média 27-53, alta 54-80.
/// Ce découpage n'est pas celui des quadrants (1-20, 21-40, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Low,
    Mid,
    High,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::Low, Band::Mid, Band::High];

    pub fn of(number: u8) -> Band {
        match number {
            0..=26 => Band::Low,
            27..=53 => Band::Mid,
            _ => Band::High,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Band::Low => 0,
            Band::Mid => 1,
            Band::High => 2,
        }
    }

    pub fn range(&self) -> std::ops::RangeInclusive<u8> {
        match self {
            Band::Low => 1..=26,
            Band::Mid => 27..=53,
            Band::High => 54..=80,
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Band::Low => write!(f, "baixa"),
            Band::Mid => write!(f, "média"),
            Band::High => write!(f, "alta"),
        }
    }
}

/// Caractéristiques d'un tirage (ou d'une grille candidate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawFeatures {
    pub draw_id: u32,
    pub sum: u16,
    pub evens: u8,
    pub odds: u8,
    pub quadrants: [u8; 4],
    /// Numéros communs avec le tirage précédent (0 pour le premier de la fenêtre).
    pub repeated: u8,
    pub bands: [u8; 3],
    pub columns: [u8; 10],
    pub rows: [u8; 8],
    pub gaps: [u8; 4],
    pub amplitude: u8,
    pub min: u8,
    pub max: u8,
    /// Moyenne arrondie à 2 décimales.
    pub mean: f64,
    pub consecutive: u8,
}

impl DrawFeatures {
    /// Ne valide rien : les numéros doivent déjà être 5 valeurs distinctes de 1..=80.
    pub fn from_numbers(draw_id: u32, numbers: &[u8; 5], previous: Option<&[u8; 5]>) -> Self {
        let mut sorted = *numbers;
        sorted.sort_unstable();

        let sum = compute::sum(&sorted);
        let evens = compute::even_count(&sorted);
        let gaps = compute::gaps(&sorted);

        Self {
            draw_id,
            sum,
            evens,
            odds: sorted.len() as u8 - evens,
            quadrants: compute::quadrants(&sorted),
            repeated: previous.map_or(0, |prev| compute::shared_count(&sorted, prev)),
            bands: compute::bands(&sorted),
            columns: compute::columns(&sorted),
            rows: compute::rows(&sorted),
            gaps,
            amplitude: sorted[4] - sorted[0],
            min: sorted[0],
            max: sorted[4],
            mean: crate::round2(sum as f64 / sorted.len() as f64),
            consecutive: gaps.iter().filter(|&&g| g == 1).count() as u8,
        }
    }

    pub fn band(&self, band: Band) -> u8 {
        self.bands[band.index()]
    }
}

/// Un enregistrement par tirage, dans le même ordre. Chaque tirage est
/// revalidé ; le premier tirage invalide interrompt le calcul.
pub fn compute_features(draws: &[Draw]) -> Result<Vec<DrawFeatures>, AnalysisError> {
    let mut features = Vec::with_capacity(draws.len());
    let mut previous: Option<&[u8; 5]> = None;

    for draw in draws {
        validate_draw(draw)?;
        features.push(DrawFeatures::from_numbers(draw.id, &draw.numbers, previous));
        previous = Some(&draw.numbers);
    }

    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::make_test_draws;
    use assert_matches::assert_matches;
    use quina_data::models::DrawError;

    #[test]
    fn test_vectors_sum_to_five() {
        let draws = make_test_draws(40);
        let features = compute_features(&draws).unwrap();
        assert_eq!(features.len(), 40);
        for f in &features {
            assert_eq!(f.evens + f.odds, 5);
            assert_eq!(f.quadrants.iter().sum::<u8>(), 5);
            assert_eq!(f.bands.iter().sum::<u8>(), 5);
            assert_eq!(f.columns.iter().sum::<u8>(), 5);
            assert_eq!(f.rows.iter().sum::<u8>(), 5);
        }
    }

    #[test]
    fn test_repeated_sequence() {
        let draws = vec![
            Draw::new(1, &[1, 2, 3, 4, 5], None).unwrap(),
            Draw::new(2, &[4, 5, 6, 7, 8], None).unwrap(),
        ];
        let features = compute_features(&draws).unwrap();
        let repeated: Vec<u8> = features.iter().map(|f| f.repeated).collect();
        assert_eq!(repeated, vec![0, 2]);
    }

    #[test]
    fn test_first_draw_never_repeats() {
        let draws = make_test_draws(10);
        for start in 0..draws.len() {
            let features = compute_features(&draws[start..]).unwrap();
            assert_eq!(features[0].repeated, 0);
        }
    }

    #[test]
    fn test_single_draw_values() {
        let draws = vec![Draw::new(7, &[80, 20, 21, 27, 53], None).unwrap()];
        let f = &compute_features(&draws).unwrap()[0];
        assert_eq!(f.draw_id, 7);
        assert_eq!(f.sum, 201);
        assert_eq!(f.evens, 2);
        assert_eq!(f.odds, 3);
        assert_eq!(f.quadrants, [1, 2, 1, 1]);
        // 20 et 21 en baixa, 27 et 53 en média, 80 en alta
        assert_eq!(f.bands, [2, 2, 1]);
        assert_eq!(f.gaps, [1, 6, 26, 27]);
        assert_eq!(f.amplitude, 60);
        assert_eq!((f.min, f.max), (20, 80));
        assert!((f.mean - 40.2).abs() < 1e-9);
        assert_eq!(f.consecutive, 1);
        assert_eq!(f.rows, [0, 1, 2, 0, 0, 1, 0, 1]);
        assert_eq!(f.columns, [2, 1, 0, 1, 0, 0, 0, 1, 0, 0]);
    }

    #[test]
    fn test_invalid_draw_names_id() {
        let draws = vec![
            Draw::new(1, &[1, 2, 3, 4, 5], None).unwrap(),
            Draw { id: 2, numbers: [1, 2, 3, 4, 81], date: None },
        ];
        assert_matches!(
            compute_features(&draws),
            Err(AnalysisError::Validation(DrawError::OutOfRange { draw_id: 2, number: 81 }))
        );
    }

    #[test]
    fn test_band_of_boundaries() {
        assert_eq!(Band::of(1), Band::Low);
        assert_eq!(Band::of(26), Band::Low);
        assert_eq!(Band::of(27), Band::Mid);
        assert_eq!(Band::of(53), Band::Mid);
        assert_eq!(Band::of(54), Band::High);
        assert_eq!(Band::of(80), Band::High);
        for band in Band::ALL {
            assert!(band.range().all(|n| Band::of(n) == band));
        }
    }
}
