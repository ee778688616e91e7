// src/noyau/erreur.rs
//
// Taxonomie des échecs du noyau.
// - Structurels / lexicaux : échec immédiat dans l’étape qui les détecte.
// - Numériques (0!, 1/0, √-1…) : voyagent en NaN jusqu’au contrôle final (InvalidResult).

use thiserror::Error;

/// Résultat du noyau.
pub type Resultat<T> = Result<T, Failure>;

/// Échec d’une évaluation. Aucun résultat partiel n’accompagne un échec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Caractère hors alphabet du tokenizer.
    #[error("caractère invalide: '{0}'")]
    InvalidCharacter(char),

    /// Parenthèse fermante sans ouvrante, ou ouvrante jamais fermée.
    #[error("parenthèses non appariées")]
    MismatchedParentheses,

    /// Opérateur ou fonction sans assez d’opérandes sur la pile.
    #[error("pile vide: opérande manquante")]
    StackUnderflow,

    /// Profondeur de pile finale différente de 1 (ou opérateur pendant en fin d’entrée).
    #[error("expression mal formée")]
    MalformedExpression,

    /// Résultat final NaN ou infini.
    #[error("résultat non fini")]
    InvalidResult,

    /// Identifiant inconnu (fonction) ou nombre illisible (ex: ".").
    #[error("jeton inconnu: {0:?}")]
    UnknownToken(String),
}

impl Failure {
    /// Nom court et stable (traces).
    pub fn kind(&self) -> &'static str {
        match self {
            Failure::InvalidCharacter(_) => "InvalidCharacter",
            Failure::MismatchedParentheses => "MismatchedParentheses",
            Failure::StackUnderflow => "StackUnderflow",
            Failure::MalformedExpression => "MalformedExpression",
            Failure::InvalidResult => "InvalidResult",
            Failure::UnknownToken(_) => "UnknownToken",
        }
    }
}
