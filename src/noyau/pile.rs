// src/noyau/pile.rs
//
// Machine à pile sur la RPN.
// - Opérande : parse f64, empile
// - Fonction / factorielle : dépile a
// - Binaire : dépile b (membre droit) puis a
// - Les soucis de domaine (1/0, √-1, (-1)!) deviennent NaN ; seul le contrôle final échoue.

use super::erreur::{Failure, Resultat};
use super::jetons::{Operateur, Token};
use super::trig::{applique_fonction, factorielle, AngleMode};

fn depile(st: &mut Vec<f64>) -> Resultat<f64> {
    st.pop().ok_or(Failure::StackUnderflow)
}

fn applique_binaire(op: Operateur, a: f64, b: f64) -> f64 {
    match op {
        Operateur::Plus => a + b,
        Operateur::Moins => a - b,
        Operateur::Fois => a * b,
        Operateur::Divise => {
            if b == 0.0 {
                f64::NAN
            } else {
                a / b
            }
        }
        // « pourcentage de » : 50 % 20 = 10
        Operateur::Pourcent => a * b / 100.0,
        Operateur::Puissance => a.powf(b),
    }
}

/// Évalue une RPN. Exige une pile finale de profondeur 1 et un résultat fini.
pub fn evaluate_postfix(rpn: &[Token], mode: AngleMode) -> Resultat<f64> {
    let mut st: Vec<f64> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        match tok {
            Token::Number(text) => {
                let v = text
                    .parse::<f64>()
                    .map_err(|_| Failure::UnknownToken(text.clone()))?;
                st.push(v);
            }

            Token::Constant(c) => st.push(c.valeur()),

            Token::Function(name) => {
                let a = depile(&mut st)?;
                let v = applique_fonction(name, a, mode)
                    .ok_or_else(|| Failure::UnknownToken(name.clone()))?;
                st.push(v);
            }

            Token::Factorial => {
                let a = depile(&mut st)?;
                st.push(factorielle(a));
            }

            Token::Operator(op) => {
                let b = depile(&mut st)?;
                let a = depile(&mut st)?;
                st.push(applique_binaire(*op, a, b));
            }

            Token::ParenOpen | Token::ParenClose => return Err(Failure::MalformedExpression),
        }
    }

    if st.len() != 1 {
        return Err(Failure::MalformedExpression);
    }
    let v = depile(&mut st)?;

    if !v.is_finite() {
        return Err(Failure::InvalidResult);
    }
    Ok(v)
}
