use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use tracing::warn;

use crate::models::Draw;
use crate::repository::MemoryRepository;

/// Accepte `JJ/MM/AAAA` (format de la Caixa) ou ISO ; renvoie toujours ISO.
pub fn parse_date(raw: &str) -> Result<Option<String>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(raw, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .with_context(|| format!("Format de date invalide: '{}'", raw))?;
    Ok(Some(date.format("%Y-%m-%d").to_string()))
}

/// Colonnes : concours ; date ; puis les dezenas, soit une par colonne,
/// soit toutes dans un seul champ séparées par des espaces.
fn parse_record(record: &csv::StringRecord) -> Result<Draw> {
    let id_str = record.get(0).map(str::trim).context("Champ concours manquant")?;
    let id: u32 = id_str
        .parse()
        .with_context(|| format!("Numéro de concours invalide: '{}'", id_str))?;

    let date = parse_date(record.get(1).unwrap_or_default())?;

    let numbers = record
        .iter()
        .skip(2)
        .flat_map(str::split_whitespace)
        .map(|s| {
            s.parse::<u8>()
                .with_context(|| format!("Impossible de parser '{}' (concours {})", s, id))
        })
        .collect::<Result<Vec<u8>>>()?;

    if numbers.is_empty() {
        bail!("Aucune dezena pour le concours {}", id);
    }

    Ok(Draw::new(id, &numbers, date)?)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    pub total_records: u32,
    pub loaded: u32,
    pub duplicates: u32,
    pub errors: u32,
}

pub fn import_reader<R: std::io::Read>(reader: R) -> Result<(MemoryRepository, ImportResult)> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(reader);

    let mut repo = MemoryRepository::default();
    let mut result = ImportResult::default();

    for record_result in reader.records() {
        result.total_records += 1;
        match record_result {
            Ok(record) => match parse_record(&record) {
                Ok(draw) => {
                    if repo.insert(draw) {
                        result.loaded += 1;
                    } else {
                        result.duplicates += 1;
                    }
                }
                Err(e) => {
                    warn!(line = result.total_records, error = %e, "ligne ignorée");
                    result.errors += 1;
                }
            },
            Err(e) => {
                warn!(line = result.total_records, error = %e, "lecture impossible");
                result.errors += 1;
            }
        }
    }

    Ok((repo, result))
}

pub fn import_csv(path: &Path) -> Result<(MemoryRepository, ImportResult)> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;
    import_reader(file)
}
