// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : chiffres/opérateurs tapés passent par les mêmes règles que le pavé
// - Enter = "=", Backspace = DEL, Ctrl/⌘+V = coller puis évaluer, Ctrl/⌘+C = copier
// - Tactile : gros boutons, pavé 4 colonnes
//
// Note :
// - Pas de champ texte : la saisie passe par `ajouter`, jamais directement dans `entree`
// - Échap est géré dans app.rs (fermer l’aide, sinon CLR)

use eframe::egui;

use super::etat::AppCalc;

/// Caractères acceptés depuis le clavier.
const TOUCHES_CLAVIER: &str = "0123456789+-*/%^.()!";

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        self.ui_clavier(ui);

        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Calculatrice");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        self.bouton_action(ui, "?", "Aide", Action::BasculerAide);
                        self.bouton_action(ui, "Hist", "Historique", Action::BasculerHistorique);
                    });
                });
                ui.add_space(6.0);

                self.ui_affichage(ui);

                ui.add_space(8.0);

                self.ui_commandes(ui);
                self.ui_pave_numerique(ui);

                if self.sci_visible {
                    ui.add_space(6.0);
                    self.ui_scientifique(ui);
                }

                if self.historique_visible {
                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(8.0);
                    self.ui_historique(ui);
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });

        self.ui_aide(ui.ctx());
    }

    /* ------------------------ Clavier ------------------------ */

    fn ui_clavier(&mut self, ui: &mut egui::Ui) {
        let evenements = ui.input(|i| i.events.clone());

        for ev in evenements {
            match ev {
                egui::Event::Text(t) => {
                    for c in t.chars().filter(|c| TOUCHES_CLAVIER.contains(*c)) {
                        self.ajouter(c.encode_utf8(&mut [0; 4]));
                    }
                }
                egui::Event::Paste(t) => self.coller(&t),
                egui::Event::Copy => ui.ctx().copy_text(self.texte_copie().to_string()),
                egui::Event::Key {
                    key: egui::Key::Enter,
                    pressed: true,
                    ..
                } => self.egal(),
                egui::Event::Key {
                    key: egui::Key::Backspace,
                    pressed: true,
                    ..
                } => self.supprimer(),
                _ => {}
            }
        }
    }

    /* ------------------------ Écran ------------------------ */

    fn ui_affichage(&mut self, ui: &mut egui::Ui) {
        let expr = if self.entree.is_empty() {
            "0"
        } else {
            self.entree.as_str()
        };
        Self::champ_monospace(ui, "ecran_expr", expr, 2);

        ui.horizontal(|ui| {
            if self.avertissement.is_empty() {
                let ans = if self.apercu.is_empty() {
                    "0"
                } else {
                    self.apercu.as_str()
                };
                ui.monospace(format!("Ans: {ans}"));
            } else {
                ui.colored_label(ui.visuals().error_fg_color, self.avertissement.as_str());
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let copie = ui
                    .add_sized([64.0, 28.0], egui::Button::new("Copy"))
                    .on_hover_text("Copie l’aperçu (ou l’expression)");
                if copie.clicked() {
                    ui.ctx().copy_text(self.texte_copie().to_string());
                }
            });
        });
    }

    /* ------------------------ Touches ------------------------ */

    fn ui_commandes(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("commandes")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_action(ui, "fx", "Fonctions scientifiques", Action::BasculerSci);
                let angle = self.mode_angle.label();
                self.bouton_action(ui, angle, "Bascule RAD/DEG", Action::BasculerAngle);
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Supprimer);
                self.bouton_action(ui, "CLR", "Efface l’entrée", Action::Effacer);
                ui.end_row();
            });
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.touche(ui, "7", "7");
                self.touche(ui, "8", "8");
                self.touche(ui, "9", "9");
                self.touche(ui, "÷", "/");
                ui.end_row();

                self.touche(ui, "4", "4");
                self.touche(ui, "5", "5");
                self.touche(ui, "6", "6");
                self.touche(ui, "×", "*");
                ui.end_row();

                self.touche(ui, "1", "1");
                self.touche(ui, "2", "2");
                self.touche(ui, "3", "3");
                self.touche(ui, "−", "-");
                ui.end_row();

                self.touche(ui, "0", "0");
                ui.label("");
                self.touche(ui, ".", ".");
                self.touche(ui, "+", "+");
                ui.end_row();

                self.touche(ui, "%", "%");
                self.touche(ui, "(", "(");
                self.touche(ui, ")", ")");
                self.bouton_action(ui, "=", "Évaluer (Enter)", Action::Egal);
                ui.end_row();
            });
    }

    fn ui_scientifique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_scientifique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.touche(ui, "sin", "sin(");
                self.touche(ui, "cos", "cos(");
                self.touche(ui, "tan", "tan(");
                self.touche(ui, "ln", "ln(");
                ui.end_row();

                self.touche(ui, "log", "log(");
                self.touche(ui, "√", "sqrt(");
                self.touche(ui, "x^y", "^");
                self.touche(ui, "x²", "^2");
                ui.end_row();

                self.touche(ui, "!", "!");
                self.touche(ui, "π", "π");
                self.touche(ui, "e", "e");
                ui.end_row();
            });
    }

    /* ------------------------ Historique ------------------------ */

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.strong("Historique");
            if ui.small_button("Clear").clicked() {
                self.vider_historique();
            }
        });

        if self.historique.is_empty() {
            ui.weak("Aucun résultat");
            return;
        }

        // actions appliquées après la boucle (emprunt de self.historique)
        let mut choix: Option<(u64, Geste)> = None;

        for h in &self.historique {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.small(h.expr.as_str());
                ui.monospace(h.resultat.as_str());
                ui.horizontal(|ui| {
                    if ui.small_button("Use").clicked() {
                        choix = Some((h.id, Geste::Utiliser));
                    }
                    if ui.small_button("Append").clicked() {
                        choix = Some((h.id, Geste::Ajouter));
                    }
                    if ui.small_button("Remove").clicked() {
                        choix = Some((h.id, Geste::Retirer));
                    }
                });
            });
        }

        match choix {
            Some((id, Geste::Utiliser)) => self.utiliser(id),
            Some((id, Geste::Ajouter)) => self.ajouter_resultat(id),
            Some((id, Geste::Retirer)) => self.retirer(id),
            None => {}
        }
    }

    /* ------------------------ Démarche + aide ------------------------ */

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Entrée", "demarche_entree", &self.demarche.entree);
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
            });
    }

    fn ui_aide(&mut self, ctx: &egui::Context) {
        let mut ouvert = self.aide_visible;

        egui::Window::new("Aide")
            .open(&mut ouvert)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(
                    "Aperçu en direct pendant la saisie ; les derniers résultats \
                     vont dans l’historique.",
                );
                ui.add_space(4.0);
                ui.label("• Opérations : + − × ÷ % ^, parenthèses, décimales.");
                ui.label("• Scientifique : sin cos tan ln log √, factorielle !, π et e.");
                ui.label(format!(
                    "• Angles : bouton {} (RAD/DEG).",
                    self.mode_angle.label()
                ));
                ui.label("• Pourcentage : a % b vaut a × b / 100.");
                ui.label("• Historique : Hist, puis Use / Append / Remove.");
                ui.label("• Clavier : Enter = égal, Backspace = DEL, Échap = CLR.");
                ui.label("• Ctrl/⌘+V : colle puis évalue ; Ctrl/⌘+C ou Copy : copie.");
            });

        self.aide_visible = ouvert;
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 1);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    /* ------------------------ Boutons ------------------------ */

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([64.0, 36.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::Supprimer => self.supprimer(),
                Action::Effacer => self.effacer(),
                Action::Egal => self.egal(),
                Action::BasculerSci => self.basculer_sci(),
                Action::BasculerAngle => self.basculer_angle(),
                Action::BasculerHistorique => self.basculer_historique(),
                Action::BasculerAide => self.basculer_aide(),
            }
        }
    }

    /// Touche de saisie ; un opérateur actif reste surligné.
    fn touche(&mut self, ui: &mut egui::Ui, label: &str, valeur: &str) {
        let actif = self
            .op_active
            .is_some_and(|c| valeur.len() == 1 && valeur.starts_with(c));

        let resp = ui.add_sized(
            [64.0, 36.0],
            egui::Button::new(label).selected(actif),
        );
        if resp.clicked() {
            self.ajouter(valeur);
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Supprimer,
    Effacer,
    Egal,
    BasculerSci,
    BasculerAngle,
    BasculerHistorique,
    BasculerAide,
}

#[derive(Clone, Copy, Debug)]
enum Geste {
    Utiliser,
    Ajouter,
    Retirer,
}
