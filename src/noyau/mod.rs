//! Noyau d’évaluation (flottants double précision)
//!
//! Organisation interne :
//! - erreur.rs   : taxonomie des échecs (Failure)
//! - jetons.rs   : tokenisation
//! - rpn.rs      : table des opérateurs + shunting-yard
//! - pile.rs     : machine à pile sur la RPN
//! - trig.rs     : mode d’angle, aimantation trig, factorielle
//! - format.rs   : affichage déterministe d’un f64
//! - eval.rs     : pipeline complet
//!
//! Aucun état partagé : chaque appel est autonome et déterministe.

pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod pile;
pub mod rpn;
pub mod trig;


#[cfg(test)]
mod tests_fuzz_safe;

/// Seuls les premiers caractères de l’entrée nettoyée sont lus.
pub const LONGUEUR_MAX: usize = 1000;

/// Tolérance commune (entiers, demi-entiers, aimantation trig, cos ≈ 0).
pub const EPSILON: f64 = 1e-12;

/// Chiffres significatifs à l’affichage.
pub const CHIFFRES_SIGNIFICATIFS: usize = 12;

// API publique
pub use erreur::{Failure, Resultat};
pub use eval::{
    evaluate, evaluate_display, evaluate_numeric, evaluate_with_trace, normalize, Demarche,
};
pub use format::format_value;
pub use jetons::{tokenize, Token};
pub use pile::evaluate_postfix;
pub use rpn::to_postfix;
pub use trig::AngleMode;
