//! Calculatrice RPN — bibliothèque
//!
//! Le noyau transforme une saisie texte en résultat affichable :
//! jetons -> RPN (shunting-yard) -> pile de f64 -> format.
//! L’application eframe (src/main.rs) n’en est qu’un client.

pub mod noyau;
