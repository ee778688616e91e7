// src/noyau/format.rs
//
// Affichage déterministe d’un f64 (indépendant de la locale et de l’historique).
// - non fini               -> "Error"
// - entier à EPSILON près  -> entier sans point
// - demi-entier à EPSILON  -> une décimale
// - sinon 12 chiffres significatifs ; forme courte si [1e-6, 1e12)

use super::{CHIFFRES_SIGNIFICATIFS, EPSILON};

/// Texte affiché pour NaN / ±∞ (et pour tout échec côté UI).
pub const TEXTE_ERREUR: &str = "Error";

/* ------------------------ Rendus élémentaires ------------------------ */

/// "1.50000000000e12" -> "1.5e+12" ; "1e-7" -> "1e-7"
fn exponentielle(s: &str) -> String {
    let (mantisse, exposant) = s.split_once('e').unwrap_or((s, "0"));

    let mantisse = if mantisse.contains('.') {
        mantisse.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantisse
    };

    if exposant.starts_with('-') {
        format!("{mantisse}e{exposant}")
    } else {
        format!("{mantisse}e+{exposant}")
    }
}

/// Forme la plus courte qui relit exactement `v` :
/// décimale sur [1e-6, 1e21), exponentielle ailleurs.
fn rendu_court(v: f64) -> String {
    // couvre aussi -0
    if v == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&v.abs()) {
        format!("{v}")
    } else {
        exponentielle(&format!("{v:e}"))
    }
}

/* ------------------------ API ------------------------ */

/// Formate une valeur pour l’écran. Fonction pure et totale.
pub fn format_value(x: f64) -> String {
    if !x.is_finite() {
        return TEXTE_ERREUR.to_string();
    }

    let ri = x.round();
    if (x - ri).abs() < EPSILON {
        return rendu_court(ri);
    }

    let rh = (x * 2.0).round() / 2.0;
    if (x - rh).abs() < EPSILON {
        return rendu_court(rh);
    }

    // 12 chiffres significatifs : d.ddddddddddde±x
    let s12 = format!("{:.*e}", CHIFFRES_SIGNIFICATIFS - 1, x);
    let n = s12.parse::<f64>().unwrap_or(x);

    if (1e-6..1e12).contains(&n.abs()) {
        rendu_court(n)
    } else {
        exponentielle(&s12)
    }
}
