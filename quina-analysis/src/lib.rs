pub mod config;
pub mod error;
pub mod features;
pub mod frequency;
pub mod generator;
pub mod inspect;
pub mod scorer;
pub mod summary;
pub mod window;

pub use error::AnalysisError;

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
pub(crate) fn make_test_draws(n: usize) -> Vec<quina_data::models::Draw> {
    (1..=n)
        .map(|i| {
            let n1 = ((i * 7) % 16 + 1) as u8;
            let n3 = ((i * 11) % 20 + 30) as u8;
            let n5 = ((i * 3) % 10 + 70) as u8;
            let date = Some(format!("2024-01-{:02}", (i % 28) + 1));
            quina_data::models::Draw::new(i as u32, &[n1, n1 + 12, n3, n3 + 13, n5], date)
                .unwrap()
        })
        .collect()
}
