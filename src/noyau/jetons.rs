// src/noyau/jetons.rs

use super::erreur::{Failure, Resultat};
use super::LONGUEUR_MAX;

/// Opérateurs binaires reconnus (le `!` postfixé a son propre jeton).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Pourcent, // a % b = a*b/100
    Puissance,
}

impl Operateur {
    pub fn depuis_symbole(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operateur::Plus),
            '-' => Some(Operateur::Moins),
            '*' => Some(Operateur::Fois),
            '/' => Some(Operateur::Divise),
            '%' => Some(Operateur::Pourcent),
            '^' => Some(Operateur::Puissance),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '-',
            Operateur::Fois => '*',
            Operateur::Divise => '/',
            Operateur::Pourcent => '%',
            Operateur::Puissance => '^',
        }
    }
}

/// Constantes nommées. Elles ne dépassent jamais le parseur.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn nom(self) -> &'static str {
        match self {
            Constante::Pi => "PI",
            Constante::E => "E",
        }
    }

    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => std::f64::consts::PI,
            Constante::E => std::f64::consts::E,
        }
    }

    /// Texte littéral émis en RPN (aller-retour exact vers f64).
    pub fn litteral(self) -> String {
        self.valeur().to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Number(String),
    Operator(Operateur),

    // Identifiant : le parseur décidera si c’est une fonction connue.
    Function(String),

    Constant(Constante),

    ParenOpen,
    ParenClose,
    Factorial,
}

impl Token {
    /// Texte du jeton tel qu’il apparaît dans l’entrée nettoyée
    /// (`e` minuscule pour la constante E).
    pub fn texte(&self) -> String {
        match self {
            Token::Number(s) | Token::Function(s) => s.clone(),
            Token::Operator(op) => op.symbole().to_string(),
            Token::Constant(Constante::Pi) => "π".to_string(),
            Token::Constant(Constante::E) => "e".to_string(),
            Token::ParenOpen => "(".to_string(),
            Token::ParenClose => ")".to_string(),
            Token::Factorial => "!".to_string(),
        }
    }
}

/// Tokenize une entrée déjà normalisée (sans espaces, glyphes ×/÷ remplacés).
///
/// Règles, de gauche à droite :
/// - `( ) + - * / % ^ !` : un caractère = un jeton
/// - `π` => Constant(Pi) ; `e`/`E` en début de jeton => Constant(E)
/// - suite maximale de lettres ASCII => Function(nom)
/// - suite maximale de chiffres et de `.` : au plus UN point absorbé,
///   le second point termine le nombre juste avant lui
/// - tout autre caractère => InvalidCharacter
///
/// Seuls les LONGUEUR_MAX premiers caractères sont lus.
pub fn tokenize(s: &str) -> Resultat<Vec<Token>> {
    let chars: Vec<char> = s.chars().take(LONGUEUR_MAX).collect();
    let mut out = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        match c {
            '(' => {
                out.push(Token::ParenOpen);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Token::ParenClose);
                i += 1;
                continue;
            }
            '!' => {
                out.push(Token::Factorial);
                i += 1;
                continue;
            }
            'π' => {
                out.push(Token::Constant(Constante::Pi));
                i += 1;
                continue;
            }
            // avant les identifiants : "exp" donne E puis "xp"
            'e' | 'E' => {
                out.push(Token::Constant(Constante::E));
                i += 1;
                continue;
            }
            _ => {}
        }

        if let Some(op) = Operateur::depuis_symbole(c) {
            out.push(Token::Operator(op));
            i += 1;
            continue;
        }

        if c.is_ascii_alphabetic() {
            let start = i;
            i += 1;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            out.push(Token::Function(chars[start..i].iter().collect()));
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let start = i;
            let mut points = 0usize;
            while i < chars.len() {
                let ch = chars[i];
                if ch == '.' {
                    if points == 1 {
                        break;
                    }
                    points += 1;
                } else if !ch.is_ascii_digit() {
                    break;
                }
                i += 1;
            }
            out.push(Token::Number(chars[start..i].iter().collect()));
            continue;
        }

        return Err(Failure::InvalidCharacter(c));
    }

    Ok(out)
}

/// Format utilitaire (démarche / traces) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::texte)
        .collect::<Vec<_>>()
        .join(" ")
}
