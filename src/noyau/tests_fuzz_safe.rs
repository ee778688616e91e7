//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - référence exacte (BigRational) pour + - * / et parenthèses
//! - invariant clé : parenthèses déséquilibrées => MismatchedParentheses

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

use super::{evaluate, evaluate_display, evaluate_numeric, AngleMode, Failure, LONGUEUR_MAX};

const RAD: AngleMode = AngleMode::Radians;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Référence exacte ------------------------ */

// Descente récursive sur le texte généré :
//   somme   := produit (('+'|'-') produit)*
//   produit := facteur (('*'|'/') facteur)*
//   facteur := chiffre | '-' facteur | '(' somme ')'
// None : division par zéro (ou diviseur trop proche de 0 pour que f64 suive).

struct Reference<'a> {
    s: &'a [char],
    i: usize,
}

impl Reference<'_> {
    fn evalue(texte: &str) -> Option<BigRational> {
        let chars: Vec<char> = texte.chars().collect();
        let mut r = Reference { s: &chars, i: 0 };
        let v = r.somme()?;
        assert_eq!(r.i, chars.len(), "référence: texte non consommé {texte:?}");
        Some(v)
    }

    fn courant(&self) -> Option<char> {
        self.s.get(self.i).copied()
    }

    fn somme(&mut self) -> Option<BigRational> {
        let mut acc = self.produit()?;
        while let Some(op @ ('+' | '-')) = self.courant() {
            self.i += 1;
            let b = self.produit()?;
            acc = if op == '+' { acc + b } else { acc - b };
        }
        Some(acc)
    }

    fn produit(&mut self) -> Option<BigRational> {
        let mut acc = self.facteur()?;
        while let Some(op @ ('*' | '/')) = self.courant() {
            self.i += 1;
            let b = self.facteur()?;
            if op == '*' {
                acc = acc * b;
            } else {
                if b.is_zero() || en_f64(&b).abs() < 1e-9 {
                    return None;
                }
                acc = acc / b;
            }
        }
        Some(acc)
    }

    fn facteur(&mut self) -> Option<BigRational> {
        match self.courant() {
            Some('-') => {
                self.i += 1;
                Some(-self.facteur()?)
            }
            Some('(') => {
                self.i += 1;
                let v = self.somme()?;
                assert_eq!(self.courant(), Some(')'));
                self.i += 1;
                Some(v)
            }
            Some(c) => {
                let d = c.to_digit(10).expect("référence: chiffre attendu");
                self.i += 1;
                Some(BigRational::from_integer(BigInt::from(d)))
            }
            None => panic!("référence: fin de texte inattendue"),
        }
    }
}

fn en_f64(r: &BigRational) -> f64 {
    let n = r.numer().to_f64().unwrap_or(f64::NAN);
    let d = r.denom().to_f64().unwrap_or(f64::NAN);
    n / d
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atom(rng: &mut Rng) -> String {
    let d = rng.pick(10);
    if rng.pick(6) == 0 {
        format!("-{d}")
    } else {
        format!("{d}")
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let op = match rng.pick(5) {
        0 => return gen_atom(rng),
        1 => '+',
        2 => '-',
        3 => '*',
        _ => '/',
    };
    let a = gen_expr(rng, depth - 1);
    let b = gen_expr(rng, depth - 1);

    // sans parenthèses : la précédence et l’associativité sont mises à l’épreuve
    if rng.coin() {
        format!("({a}{op}{b})")
    } else {
        format!("{a}{op}{b}")
    }
}

fn gen_parentheses(rng: &mut Rng, n: usize) -> String {
    const ALPHABET: [char; 5] = ['(', ')', '1', '+', '*'];
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

fn equilibre(s: &str) -> bool {
    let mut prof = 0i32;
    for c in s.chars() {
        match c {
            '(' => prof += 1,
            ')' => {
                prof -= 1;
                if prof < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    prof == 0
}

fn gen_bruit(rng: &mut Rng, n: usize) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '7', '9', '.', '+', '-', '*', '/', '%', '^', '!', '(', ')', 's', 'i', 'n', 'c',
        'o', 'q', 'r', 't', 'l', 'g', 'a', 'e', 'E', 'π', ' ', '×', '÷', '$', 'x',
    ];
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_arithmetique_contre_reference_exacte() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut compares = 0usize;
    let mut indefinis = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let obtenu = evaluate_numeric(&expr, RAD);

        match Reference::evalue(&expr) {
            Some(exact) => {
                let r = en_f64(&exact);
                let v = obtenu.unwrap_or_else(|e| panic!("expr={expr:?} err={e} attendu={r}"));
                let tol = 1e-6 * r.abs().max(1.0);
                assert!((v - r).abs() <= tol, "expr={expr:?} obtenu={v} attendu={r}");
                compares += 1;
            }
            None => {
                // diviseur exactement nul : seul un échec de valeur est admis
                if let Err(e) = obtenu {
                    assert_eq!(e, Failure::InvalidResult, "expr={expr:?}");
                }
                indefinis += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(compares > 100, "trop peu de comparaisons: {compares}");
    assert!(indefinis > 0, "aucune division par zéro: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // Même seed => mêmes expressions => mêmes sorties
    let mut a = Rng::new(0xBADC0DE_u64);
    let mut b = a.clone();

    for _ in 0..100 {
        budget(t0, max);

        let ea = gen_expr(&mut a, 3);
        let eb = gen_expr(&mut b, 3);
        assert_eq!(ea, eb);
        assert_eq!(evaluate(&ea, RAD), evaluate(&eb, RAD));
        assert_eq!(
            evaluate_display(&ea, AngleMode::Degrees),
            evaluate_display(&eb, AngleMode::Degrees)
        );
    }
}

#[test]
fn fuzz_safe_parentheses_desequilibrees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut rng = Rng::new(0x5EED_u64);
    let mut vus = 0usize;

    for _ in 0..500 {
        budget(t0, max);

        let n = 1 + rng.pick(24) as usize;
        let expr = gen_parentheses(&mut rng, n);
        let res = evaluate(&expr, RAD);

        if equilibre(&expr) {
            assert_ne!(res, Err(Failure::MismatchedParentheses), "expr={expr:?}");
        } else {
            assert_eq!(res, Err(Failure::MismatchedParentheses), "expr={expr:?}");
            vus += 1;
        }
    }
    assert!(vus > 50, "trop peu de cas déséquilibrés: {vus}");
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xFEED_F00D_u64);

    for _ in 0..600 {
        budget(t0, max);

        let n = rng.pick(40) as usize;
        let expr = gen_bruit(&mut rng, n);

        match evaluate(&expr, RAD) {
            Ok(s) => {
                let relu: Result<f64, _> = s.parse();
                assert!(relu.is_ok(), "expr={expr:?} affichage illisible: {s}");
            }
            Err(Failure::InvalidCharacter(c)) => {
                assert!(expr.contains(c), "expr={expr:?} c={c:?}");
            }
            Err(Failure::UnknownToken(t)) => {
                assert!(!t.is_empty(), "expr={expr:?}");
            }
            Err(_) => {}
        }

        let affiche = evaluate_display(&expr, RAD);
        assert!(!affiche.is_empty());
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1/2", 150);
    assert!(expr.chars().count() <= LONGUEUR_MAX);
    budget(t0, max);

    // 150*(1/2) = 75
    let res = evaluate(&expr, RAD).unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!(res, "75");
}
