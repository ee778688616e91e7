// src/noyau/rpn.rs
//
// Shunting-yard -> RPN (postfix)
//
// Règles:
// - Constant(PI|E) : sortie directe sous forme de littéral numérique
// - Function(name) :
//    - si name ∈ {sin, cos, tan, ln, log, sqrt} => empilée, sortie après sa ')'
//    - sinon => UnknownToken
// - Moins unaire:
//    - si '-' arrive en début, après un opérateur ou après '(' on injecte 0 : "-x" => "0 x -"
//    - ce moins-là colle à l’opérande qui suit (précédence au-dessus de toute la table)
// - '!' postfixé : dépile selon l’associativité puis s’empile

use super::erreur::{Failure, Resultat};
use super::jetons::{Operateur, Token};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperatorSpec {
    pub precedence: u8,
    pub associativity: Associativity,
}

const fn spec(precedence: u8, associativity: Associativity) -> OperatorSpec {
    OperatorSpec {
        precedence,
        associativity,
    }
}

/// Table fixe, dans l’ordre des variantes de `Operateur`, puis `!`.
static TABLE_OPERATEURS: [(char, OperatorSpec); 7] = [
    ('+', spec(1, Associativity::Left)),
    ('-', spec(1, Associativity::Left)),
    ('*', spec(2, Associativity::Left)),
    ('/', spec(2, Associativity::Left)),
    ('%', spec(2, Associativity::Left)),
    ('^', spec(3, Associativity::Right)),
    ('!', spec(4, Associativity::Right)),
];

const INDICE_FACTORIELLE: usize = 6;

/// Le moins unaire lie plus fort que tout opérateur de la table.
const PRECEDENCE_MOINS_UNAIRE: u8 = 5;

/// Fonctions unaires reconnues.
pub const FONCTIONS: [&str; 6] = ["sin", "cos", "tan", "ln", "log", "sqrt"];

/// Recherche dans la table par symbole (`+ - * / % ^ !`).
pub fn operator_spec(symbole: char) -> Option<OperatorSpec> {
    TABLE_OPERATEURS
        .iter()
        .find(|(s, _)| *s == symbole)
        .map(|(_, spec)| *spec)
}

impl Operateur {
    pub fn spec(self) -> OperatorSpec {
        TABLE_OPERATEURS[self as usize].1
    }
}

fn spec_factorielle() -> OperatorSpec {
    TABLE_OPERATEURS[INDICE_FACTORIELLE].1
}

pub fn is_fonction(name: &str) -> bool {
    FONCTIONS.contains(&name)
}

/// Classe du jeton précédent (sert à détecter le moins unaire).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Classe {
    Aucune,
    Nombre,
    Operateur,
    Ouvrante,
    Fermante,
    Fonction,
    Factorielle,
}

/// Entrées de la pile d’opérateurs.
#[derive(Clone, Debug)]
enum Entree {
    Ouvrante,
    Fonction(String),
    Binaire(Operateur),
    Factorielle,
    MoinsUnaire,
}

impl Entree {
    /// None : pas un opérateur (parenthèse, fonction) => bloque le dépilement.
    fn spec(&self) -> Option<OperatorSpec> {
        match self {
            Entree::Binaire(op) => Some(op.spec()),
            Entree::Factorielle => Some(spec_factorielle()),
            Entree::MoinsUnaire => Some(spec(PRECEDENCE_MOINS_UNAIRE, Associativity::Right)),
            Entree::Ouvrante | Entree::Fonction(_) => None,
        }
    }

    fn en_jeton(self) -> Option<Token> {
        match self {
            Entree::Binaire(op) => Some(Token::Operator(op)),
            Entree::MoinsUnaire => Some(Token::Operator(Operateur::Moins)),
            Entree::Factorielle => Some(Token::Factorial),
            Entree::Fonction(name) => Some(Token::Function(name)),
            Entree::Ouvrante => None,
        }
    }
}

fn doit_depiler(t: OperatorSpec, top: OperatorSpec) -> bool {
    match t.associativity {
        Associativity::Left => t.precedence <= top.precedence,
        Associativity::Right => t.precedence < top.precedence,
    }
}

/// Dépile vers la sortie tant que le sommet est un opérateur qui doit passer avant `t`.
fn depile_selon(t: OperatorSpec, ops: &mut Vec<Entree>, out: &mut Vec<Token>) {
    while let Some(top) = ops.last() {
        match top.spec() {
            Some(s) if doit_depiler(t, s) => {}
            _ => break,
        }
        if let Some(tok) = ops.pop().and_then(Entree::en_jeton) {
            out.push(tok);
        }
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Function("sin"), ParenOpen, Constant(Pi), Operator(/), Number(2), ParenClose]
///   rpn:    [Number("3.141592653589793"), Number(2), Operator(/), Function("sin")]
pub fn to_postfix(tokens: &[Token]) -> Resultat<Vec<Token>> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Entree> = Vec::new();
    let mut prev = Classe::Aucune;

    for tok in tokens {
        match tok {
            Token::Constant(c) => {
                out.push(Token::Number(c.litteral()));
                prev = Classe::Nombre;
            }

            Token::Function(name) => {
                if !is_fonction(name) {
                    return Err(Failure::UnknownToken(name.clone()));
                }
                ops.push(Entree::Fonction(name.clone()));
                prev = Classe::Fonction;
            }

            Token::Number(text) => {
                if text.parse::<f64>().is_err() {
                    return Err(Failure::UnknownToken(text.clone()));
                }
                out.push(tok.clone());
                prev = Classe::Nombre;
            }

            Token::ParenOpen => {
                ops.push(Entree::Ouvrante);
                prev = Classe::Ouvrante;
            }

            Token::ParenClose => {
                loop {
                    match ops.pop() {
                        None => return Err(Failure::MismatchedParentheses),
                        Some(Entree::Ouvrante) => break,
                        Some(e) => {
                            if let Some(t) = e.en_jeton() {
                                out.push(t);
                            }
                        }
                    }
                }

                // fonction au sommet : elle se lie à son argument
                if matches!(ops.last(), Some(Entree::Fonction(_))) {
                    if let Some(t) = ops.pop().and_then(Entree::en_jeton) {
                        out.push(t);
                    }
                }
                prev = Classe::Fermante;
            }

            Token::Operator(Operateur::Moins)
                if matches!(prev, Classe::Aucune | Classe::Operateur | Classe::Ouvrante) =>
            {
                // moins unaire : 0 implicite, puis moins binaire collé à l’opérande suivante
                out.push(Token::Number("0".to_string()));
                ops.push(Entree::MoinsUnaire);
                prev = Classe::Operateur;
            }

            Token::Factorial => {
                depile_selon(spec_factorielle(), &mut ops, &mut out);
                ops.push(Entree::Factorielle);
                prev = Classe::Factorielle;
            }

            Token::Operator(op) => {
                depile_selon(op.spec(), &mut ops, &mut out);
                ops.push(Entree::Binaire(*op));
                prev = Classe::Operateur;
            }
        }
    }

    // vide la pile ops
    while let Some(e) = ops.pop() {
        match e.en_jeton() {
            Some(t) => out.push(t),
            None => return Err(Failure::MismatchedParentheses),
        }
    }

    // opérateur (ou fonction) pendant : "2+", "sin"
    if matches!(prev, Classe::Operateur | Classe::Fonction) {
        return Err(Failure::MalformedExpression);
    }

    Ok(out)
}
