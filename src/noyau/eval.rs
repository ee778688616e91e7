//! Noyau — évaluation (pipeline réel)
//!
//! normalise -> jetons -> RPN -> pile -> format
//!
//! Le premier échec interrompt tout : jamais de résultat partiel.

use tracing::{debug, trace};

use super::erreur::{Failure, Resultat};
use super::format::{format_value, TEXTE_ERREUR};
use super::jetons::{format_tokens, tokenize};
use super::pile::evaluate_postfix;
use super::rpn::to_postfix;
use super::trig::AngleMode;
use super::LONGUEUR_MAX;

/// Étapes intermédiaires (panneau « Démarche » de l’UI).
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub entree: String,
    pub jetons: String,
    pub rpn: String,
}

/// Nettoyage de la saisie brute :
/// - retire tout espace
/// - × -> * ; ÷ -> /
/// - garde les LONGUEUR_MAX premiers caractères
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '×' => '*',
            '÷' => '/',
            _ => c,
        })
        .take(LONGUEUR_MAX)
        .collect()
}

fn pipeline(raw: &str, mode: AngleMode, demarche: &mut Demarche) -> Resultat<f64> {
    // entrée absente : 0 sans passer par les étapes
    if raw.is_empty() {
        return Ok(0.0);
    }
    let s = normalize(raw);
    debug!(entree = %s, ?mode, "évaluation");

    // 1) Jetons
    let jetons = tokenize(&s)?;
    demarche.jetons = format_tokens(&jetons);
    trace!(jetons = %demarche.jetons, n = jetons.len(), "jetons");

    // 2) RPN
    let rpn = to_postfix(&jetons)?;
    demarche.rpn = format_tokens(&rpn);
    trace!(rpn = %demarche.rpn, n = rpn.len(), "rpn");

    demarche.entree = s;

    // 3) Pile
    evaluate_postfix(&rpn, mode)
}

fn trace_echec(raw: &str, e: &Failure) {
    debug!(entree = raw, kind = e.kind(), erreur = %e, "échec");
}

/// Valeur brute (avant formatage). Entrée vide => 0.
pub fn evaluate_numeric(expression: &str, mode: AngleMode) -> Resultat<f64> {
    let mut d = Demarche::default();
    pipeline(expression, mode, &mut d).inspect_err(|e| trace_echec(expression, e))
}

/// API publique : résultat formaté pour l’écran, ou l’échec typé.
pub fn evaluate(expression: &str, mode: AngleMode) -> Resultat<String> {
    evaluate_numeric(expression, mode).map(format_value)
}

/// Comme `evaluate`, avec les étapes intermédiaires.
pub fn evaluate_with_trace(expression: &str, mode: AngleMode) -> Resultat<(String, Demarche)> {
    let mut d = Demarche::default();
    let v = pipeline(expression, mode, &mut d).inspect_err(|e| trace_echec(expression, e))?;
    Ok((format_value(v), d))
}

/// Affichage « calculatrice » : tout échec devient "Error".
pub fn evaluate_display(expression: &str, mode: AngleMode) -> String {
    evaluate(expression, mode).unwrap_or_else(|_| TEXTE_ERREUR.to_string())
}
