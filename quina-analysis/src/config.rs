use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Tirage uniforme parmi les top-K numéros les plus fréquents
    #[default]
    Frequency,
    /// Grille amorcée par les numéros, ligne, colonne et faixas dominants
    Structure,
    /// Grilles uniformes, seules les favorables sont gardées
    Random,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Frequency => write!(f, "fréquence"),
            Strategy::Structure => write!(f, "structure"),
            Strategy::Random => write!(f, "aléatoire"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub strategy: Strategy,
    pub count: usize,
    /// Taille du pool pour la stratégie par fréquence.
    pub top_k: usize,
    /// Grilles tirées par la stratégie aléatoire avant filtrage.
    pub attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Frequency,
            count: 5,
            top_k: 30,
            attempts: 1000,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.count == 0 {
            return Err(AnalysisError::InvalidConfig("count doit être > 0".to_string()));
        }
        if !(5..=80).contains(&self.top_k) {
            return Err(AnalysisError::InvalidConfig(format!(
                "top_k doit être entre 5 et 80 (reçu {})",
                self.top_k
            )));
        }
        if self.attempts == 0 {
            return Err(AnalysisError::InvalidConfig("attempts doit être > 0".to_string()));
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> anyhow::Result<GeneratorConfig> {
    let json = std::fs::read_to_string(path)?;
    let config: GeneratorConfig = serde_json::from_str(&json)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.strategy, Strategy::Frequency);
        assert_eq!(config.top_k, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects() {
        let config = GeneratorConfig { count: 0, ..Default::default() };
        assert_matches!(config.validate(), Err(AnalysisError::InvalidConfig(_)));

        let config = GeneratorConfig { top_k: 4, ..Default::default() };
        assert_matches!(config.validate(), Err(AnalysisError::InvalidConfig(_)));

        let config = GeneratorConfig { top_k: 81, ..Default::default() };
        assert_matches!(config.validate(), Err(AnalysisError::InvalidConfig(_)));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"strategy": "structure", "count": 8}"#).unwrap();
        assert_eq!(config.strategy, Strategy::Structure);
        assert_eq!(config.count, 8);
        assert_eq!(config.top_k, 30);
        assert_eq!(config.attempts, 1000);
    }
}
