//! Plan status vocabulary.
//!
//! # Invariants
//! - Token comparison trims and case-folds both sides.
//! - A status matching both vocabularies counts as done.

use serde::{Deserialize, Serialize};

/// Closed set of status tokens the views react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusVocabulary {
    pub done: Vec<String>,
    pub in_progress: Vec<String>,
    /// Label used when a row carries no status.
    pub default_label: String,
}

impl Default for StatusVocabulary {
    fn default() -> Self {
        Self {
            done: vec![
                "Completado".to_string(),
                "Finalizado".to_string(),
                "Listo".to_string(),
            ],
            in_progress: vec!["En Progreso".to_string()],
            default_label: "Pendiente".to_string(),
        }
    }
}

impl StatusVocabulary {
    pub fn is_done(&self, status: Option<&str>) -> bool {
        status.is_some_and(|value| contains_token(&self.done, value))
    }

    pub fn is_in_progress(&self, status: Option<&str>) -> bool {
        status.is_some_and(|value| contains_token(&self.in_progress, value))
    }

    /// Returns the trimmed status, or the default label when blank.
    pub fn label_for(&self, status: Option<&str>) -> String {
        match status.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => value.to_string(),
            None => self.default_label.clone(),
        }
    }
}

fn contains_token(tokens: &[String], value: &str) -> bool {
    let needle = value.trim().to_lowercase();
    tokens
        .iter()
        .any(|token| token.trim().to_lowercase() == needle)
}

#[cfg(test)]
mod tests {
    use super::StatusVocabulary;

    #[test]
    fn matching_ignores_case_and_padding() {
        let vocab = StatusVocabulary::default();
        assert!(vocab.is_done(Some("COMPLETADO")));
        assert!(vocab.is_done(Some(" Finalizado ")));
        assert!(vocab.is_in_progress(Some("en progreso")));
        assert!(!vocab.is_done(Some("Pendiente")));
        assert!(!vocab.is_done(None));
    }

    #[test]
    fn label_falls_back_to_default() {
        let vocab = StatusVocabulary::default();
        assert_eq!(vocab.label_for(None), "Pendiente");
        assert_eq!(vocab.label_for(Some("  ")), "Pendiente");
        assert_eq!(vocab.label_for(Some("Retrasado")), "Retrasado");
    }
}
