//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, aperçu, avertissement, mode d’angle,
//! historique, démarche) et offrir les actions des touches sans logique d’affichage.
//!
//! Contrats :
//! - Le noyau n’est appelé que par `egal` et `rafraichir_apercu`.
//! - Actions déterministes, sans effet de bord caché.
//! - Défense en profondeur : saisie bornée, historique borné.

use calculatrice_rpn::noyau::{evaluate, evaluate_with_trace, AngleMode, Demarche};

/// Au-delà, `ajouter` refuse et avertit.
pub const LONGUEUR_SAISIE_MAX: usize = 256;

/// Résultats conservés (le plus récent en tête).
pub const HISTORIQUE_MAX: usize = 5;

const AVERT_TROP_LONG: &str = "Input too long";
const AVERT_ERREUR: &str = "Error";

/// Refusés sur une entrée vide.
const INTERDITS_EN_TETE: [&str; 7] = ["+", "*", "/", "%", "^", ".", "!"];

fn est_operateur(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '%' | '^')
}

/// Une touche d’un seul caractère opérateur (`^2` ou `sin(` n’en sont pas).
fn touche_operateur(v: &str) -> Option<char> {
    let mut it = v.chars();
    match (it.next(), it.next()) {
        (Some(c), None) if est_operateur(c) => Some(c),
        _ => None,
    }
}

/// Le point devient « 0. » après rien, un opérateur, une parenthèse ou `!`.
fn finit_par_separateur(s: &str) -> bool {
    match s.trim_end().chars().last() {
        None => true,
        Some(c) => est_operateur(c) || matches!(c, '(' | ')' | '!'),
    }
}

/// Dernier nombre en cours de saisie (après le dernier séparateur).
fn nombre_courant(s: &str) -> &str {
    s.rsplit(|c: char| est_operateur(c) || matches!(c, '(' | ')' | '!'))
        .next()
        .unwrap_or("")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntreeHistorique {
    pub id: u64,
    pub expr: String,
    pub resultat: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub apercu: String,        // « Ans: » (vide si l’entrée ne s’évalue pas)
    pub avertissement: String, // "Error" / "Input too long"

    // --- démarche (panneau d’explication, dernier "=" réussi) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub mode_angle: AngleMode,

    // --- panneaux ---
    pub sci_visible: bool,
    pub historique_visible: bool,
    pub aide_visible: bool,

    // --- historique (mémoire seulement) ---
    pub historique: Vec<EntreeHistorique>,
    prochain_id: u64,

    // Dernier opérateur tapé (surligné sur le pavé).
    pub op_active: Option<char>,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            apercu: String::new(),
            avertissement: String::new(),
            demarche: Demarche::default(),
            mode_angle: AngleMode::default(),
            sci_visible: false,
            historique_visible: false,
            aide_visible: false,
            historique: Vec::new(),
            prochain_id: 0,
            op_active: None,
        }
    }
}

impl AppCalc {
    /* ------------------------ Saisie ------------------------ */

    /// Touche du pavé (chiffre, opérateur, parenthèse, `name(`, `^2`…).
    ///
    /// Règles :
    /// - entrée pleine : refus + avertissement
    /// - entrée vide : `+ * / % ^ . !` ignorés
    /// - `.` après rien / opérateur / parenthèse / `!` => `0.`
    /// - opérateur juste après un opérateur : ignoré
    /// - second `.` dans le même nombre : ignoré
    pub fn ajouter(&mut self, touche: &str) {
        if self.entree.chars().count() >= LONGUEUR_SAISIE_MAX {
            self.avertissement = AVERT_TROP_LONG.to_string();
            return;
        }
        if self.entree.is_empty() && INTERDITS_EN_TETE.contains(&touche) {
            return;
        }

        let mut v = touche;
        if v == "." && finit_par_separateur(&self.entree) {
            v = "0.";
        }

        let dernier = self.entree.chars().last();
        let dernier_op = dernier.is_some_and(est_operateur);
        let op = touche_operateur(v);

        if op.is_some() && dernier_op {
            return;
        }
        if v == "." && nombre_courant(&self.entree).contains('.') {
            return;
        }

        self.entree.push_str(v);
        self.avertissement.clear();
        self.op_active = match op {
            Some(c) => Some(c),
            None if dernier_op => self.op_active,
            None => None,
        };
        self.rafraichir_apercu();
    }

    /// DEL : retire le dernier caractère.
    pub fn supprimer(&mut self) {
        if self.entree.pop().is_none() {
            return;
        }
        self.avertissement.clear();
        self.op_active = self.entree.chars().last().filter(|c| est_operateur(*c));
        self.rafraichir_apercu();
    }

    /// CLR : entrée + aperçu + avertissement (l’historique reste).
    pub fn effacer(&mut self) {
        self.entree.clear();
        self.apercu.clear();
        self.avertissement.clear();
        self.op_active = None;
    }

    /// Remplace l’entrée (historique « Use », collage).
    pub fn definir_entree(&mut self, texte: impl Into<String>) {
        self.entree = texte.into();
        self.avertissement.clear();
        self.op_active = None;
        self.rafraichir_apercu();
    }

    /// Collage : remplace puis évalue aussitôt. Texte vide ignoré.
    pub fn coller(&mut self, texte: &str) {
        if texte.is_empty() {
            return;
        }
        self.definir_entree(texte);
        self.egal();
    }

    /* ------------------------ Évaluation ------------------------ */

    /// "=" : le résultat remplace l’entrée et rejoint l’historique ;
    /// en cas d’échec, l’entrée reste et l’avertissement passe à "Error".
    pub fn egal(&mut self) {
        match evaluate_with_trace(&self.entree, self.mode_angle) {
            Ok((resultat, demarche)) => {
                let item = EntreeHistorique {
                    id: self.prochain_id,
                    expr: std::mem::take(&mut self.entree),
                    resultat: resultat.clone(),
                };
                self.prochain_id += 1;

                self.historique.insert(0, item);
                self.historique.truncate(HISTORIQUE_MAX);

                self.entree = resultat;
                self.demarche = demarche;
                self.avertissement.clear();
            }
            Err(_) => {
                self.demarche = Demarche::default();
                self.avertissement = AVERT_ERREUR.to_string();
            }
        }
        self.apercu.clear();
        self.op_active = None;
    }

    /// Aperçu « Ans: » de l’entrée courante ; un échec l’efface sans avertir.
    pub fn rafraichir_apercu(&mut self) {
        self.avertissement.clear();
        if self.entree.is_empty() {
            self.apercu.clear();
            self.op_active = None;
            return;
        }
        self.apercu = evaluate(&self.entree, self.mode_angle).unwrap_or_default();
    }

    /// Texte pour « Copy » : l’aperçu s’il existe, sinon l’entrée.
    pub fn texte_copie(&self) -> &str {
        if self.apercu.is_empty() {
            &self.entree
        } else {
            &self.apercu
        }
    }

    /* ------------------------ Bascules ------------------------ */

    pub fn basculer_angle(&mut self) {
        self.mode_angle = self.mode_angle.toggle();
        self.rafraichir_apercu();
    }

    pub fn basculer_sci(&mut self) {
        self.sci_visible = !self.sci_visible;
    }

    pub fn basculer_historique(&mut self) {
        self.historique_visible = !self.historique_visible;
    }

    pub fn basculer_aide(&mut self) {
        self.aide_visible = !self.aide_visible;
    }

    /* ------------------------ Historique ------------------------ */

    fn resultat_de(&self, id: u64) -> Option<String> {
        self.historique
            .iter()
            .find(|h| h.id == id)
            .map(|h| h.resultat.clone())
    }

    /// « Use » : le résultat devient l’entrée.
    pub fn utiliser(&mut self, id: u64) {
        if let Some(r) = self.resultat_de(id) {
            self.definir_entree(r);
        }
    }

    /// « Append » : le résultat est collé à la fin de l’entrée.
    pub fn ajouter_resultat(&mut self, id: u64) {
        if let Some(r) = self.resultat_de(id) {
            let texte = format!("{}{}", self.entree, r);
            self.definir_entree(texte);
        }
    }

    /// « Remove »
    pub fn retirer(&mut self, id: u64) {
        self.historique.retain(|h| h.id != id);
    }

    /// « Clear »
    pub fn vider_historique(&mut self) {
        self.historique.clear();
    }
}
