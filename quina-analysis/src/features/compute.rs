// Découpages fixes du volant de la Quina. Toutes les bornes sont inclusives.

pub fn sum(numbers: &[u8]) -> u16 {
    numbers.iter().map(|&n| n as u16).sum()
}

pub fn even_count(numbers: &[u8]) -> u8 {
    numbers.iter().filter(|&&n| n % 2 == 0).count() as u8
}

/// Quadrants 1-20, 21-40, 41-60, 61-80.
pub fn quadrant_of(number: u8) -> usize {
    match number {
        0..=20 => 0,
        21..=40 => 1,
        41..=60 => 2,
        _ => 3,
    }
}

/// Colonne du volant = chiffre des unités (10, 20, ... en colonne 0).
pub fn column_of(number: u8) -> usize {
    (number % 10) as usize
}

/// Ligne du volant : 1-10 → 0, 11-20 → 1, ..., 71-80 → 7.
pub fn row_of(number: u8) -> usize {
    (number.saturating_sub(1) / 10) as usize
}

pub fn quadrants(numbers: &[u8]) -> [u8; 4] {
    let mut q = [0u8; 4];
    for &n in numbers {
        q[quadrant_of(n)] += 1;
    }
    q
}

pub fn bands(numbers: &[u8]) -> [u8; 3] {
    let mut b = [0u8; 3];
    for &n in numbers {
        b[super::Band::of(n).index()] += 1;
    }
    b
}

pub fn columns(numbers: &[u8]) -> [u8; 10] {
    let mut c = [0u8; 10];
    for &n in numbers {
        c[column_of(n)] += 1;
    }
    c
}

pub fn rows(numbers: &[u8]) -> [u8; 8] {
    let mut r = [0u8; 8];
    for &n in numbers {
        r[row_of(n).min(7)] += 1;
    }
    r
}

/// Écarts entre numéros consécutifs ; `sorted` doit être trié.
pub fn gaps(sorted: &[u8; 5]) -> [u8; 4] {
    let mut g = [0u8; 4];
    for (i, pair) in sorted.windows(2).enumerate() {
        g[i] = pair[1] - pair[0];
    }
    g
}

/// Taille de l'intersection des deux ensembles ; un doublon ne compte qu'une fois.
pub fn shared_count(a: &[u8], b: &[u8]) -> u8 {
    (1..=80u8).filter(|n| a.contains(n) && b.contains(n)).count() as u8
}

/// Numéros du volant appartenant à une colonne.
pub fn column_numbers(column: usize) -> Vec<u8> {
    (1..=80u8).filter(|&n| column_of(n) == column).collect()
}

/// Numéros du volant appartenant à une ligne.
pub fn row_numbers(row: usize) -> Vec<u8> {
    (1..=80u8).filter(|&n| row_of(n) == row).collect()
}
