use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Plus grand numéro tirable (la Quina tire dans 1..=80).
pub const POOL_SIZE: u8 = 80;

/// Numéros par tirage.
pub const PICK_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("Tirage {draw_id} : {count} numéros au lieu de 5")]
    Cardinality { draw_id: u32, count: usize },

    #[error("Tirage {draw_id} : numéro {number} hors limites (1-80)")]
    OutOfRange { draw_id: u32, number: u8 },

    #[error("Tirage {draw_id} : numéro en double {number}")]
    Duplicate { draw_id: u32, number: u8 },
}

impl DrawError {
    pub fn draw_id(&self) -> u32 {
        match self {
            DrawError::Cardinality { draw_id, .. }
            | DrawError::OutOfRange { draw_id, .. }
            | DrawError::Duplicate { draw_id, .. } => *draw_id,
        }
    }
}

/// Un concours historique. Les numéros sont rangés en ordre croissant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    pub id: u32,
    pub numbers: [u8; 5],
    pub date: Option<String>,
}

impl Draw {
    pub fn new(id: u32, numbers: &[u8], date: Option<String>) -> Result<Self, DrawError> {
        let numbers = validate_numbers(id, numbers)?;
        Ok(Self { id, numbers, date })
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers.contains(&number)
    }
}

/// Vérifie un jeu de numéros (cardinalité, bornes, doublons) et le renvoie trié.
pub fn validate_numbers(draw_id: u32, numbers: &[u8]) -> Result<[u8; 5], DrawError> {
    let mut sorted: [u8; 5] = numbers.try_into().map_err(|_| DrawError::Cardinality {
        draw_id,
        count: numbers.len(),
    })?;
    sorted.sort_unstable();

    for &n in &sorted {
        if n < 1 || n > POOL_SIZE {
            return Err(DrawError::OutOfRange { draw_id, number: n });
        }
    }
    for pair in sorted.windows(2) {
        if pair[0] == pair[1] {
            return Err(DrawError::Duplicate { draw_id, number: pair[0] });
        }
    }
    Ok(sorted)
}

/// Revalide un tirage déjà construit (champs publics).
pub fn validate_draw(draw: &Draw) -> Result<(), DrawError> {
    validate_numbers(draw.id, &draw.numbers).map(|_| ())
}
