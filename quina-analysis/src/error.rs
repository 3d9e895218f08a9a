use quina_data::models::DrawError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Tirage invalide : {0}")]
    Validation(#[from] DrawError),

    #[error("Fenêtre vide : au moins un tirage est nécessaire")]
    EmptyWindow,

    #[error("Taille de combinaison invalide : {0} (attendu 1 à 5)")]
    InvalidCombinationSize(usize),

    #[error("Configuration invalide : {0}")]
    InvalidConfig(String),
}
