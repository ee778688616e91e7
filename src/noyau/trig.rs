// src/noyau/trig.rs
//
// Fonctions unaires du noyau (sin/cos/tan/ln/log/sqrt) + factorielle
// ------------------------------------------------------------------
// - Mode d’angle fourni par l’appelant (jamais stocké ici)
// - sin/cos : « aimantation » vers 0 et ±1 à EPSILON près
// - tan : indéfinie (NaN) quand cos ≈ 0
// - factorielle : produit exact en BigUint, une seule conversion vers f64

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

use super::EPSILON;

/// Au-delà, k! dépasse f64::MAX.
const FACTORIELLE_MAX: u64 = 170;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
}

impl AngleMode {
    pub fn toggle(self) -> Self {
        match self {
            AngleMode::Radians => AngleMode::Degrees,
            AngleMode::Degrees => AngleMode::Radians,
        }
    }

    /// Libellé du bouton (RAD / DEG).
    pub fn label(self) -> &'static str {
        match self {
            AngleMode::Radians => "RAD",
            AngleMode::Degrees => "DEG",
        }
    }

    fn en_radians(self, a: f64) -> f64 {
        match self {
            AngleMode::Radians => a,
            AngleMode::Degrees => a * std::f64::consts::PI / 180.0,
        }
    }
}

/// Remplace une valeur à EPSILON de 0 ou de ±1 par la cible exacte.
pub fn aimante(x: f64) -> f64 {
    if x.abs() < EPSILON {
        return 0.0;
    }
    if (1.0 - x.abs()).abs() < EPSILON {
        return if x >= 0.0 { 1.0 } else { -1.0 };
    }
    x
}

/// Applique une fonction unaire. None si le nom n’est pas une fonction du noyau.
pub fn applique_fonction(name: &str, a: f64, mode: AngleMode) -> Option<f64> {
    let v = match name {
        "sin" => aimante(mode.en_radians(a).sin()),
        "cos" => aimante(mode.en_radians(a).cos()),
        "tan" => {
            let r = mode.en_radians(a);
            if r.cos().abs() < EPSILON {
                f64::NAN
            } else {
                r.tan()
            }
        }
        "ln" => a.ln(),
        "log" => a.log10(),
        "sqrt" => a.sqrt(),
        _ => return None,
    };
    Some(v)
}

/// k! pour a à EPSILON d’un entier k ≥ 0 ; NaN sinon (échec « valeur », pas structurel).
pub fn factorielle(a: f64) -> f64 {
    if !a.is_finite() {
        return f64::NAN;
    }
    let k = a.round();
    if k < 0.0 || (a - k).abs() > EPSILON {
        return f64::NAN;
    }
    if k > FACTORIELLE_MAX as f64 {
        return f64::INFINITY;
    }

    let k = k as u64;
    let produit = (2..=k).fold(BigUint::one(), |acc, i| acc * i);
    produit.to_f64().unwrap_or(f64::INFINITY)
}
