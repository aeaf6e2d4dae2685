use std::path::PathBuf;
use std::time::Duration;

use lotto_db::history::history_path;

/// Réglages de la session, fixés au démarrage par la ligne de commande.
#[derive(Debug, Clone)]
pub struct Settings {
    pub history_path: PathBuf,
    /// Graine du générateur ; `None` pour un tirage non reproductible.
    pub seed: Option<u64>,
    /// Pause entre deux grilles d'une même série, purement cosmétique.
    pub pause: Duration,
    /// Nombre de grilles affichées par l'historique.
    pub recent_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_path: history_path(),
            seed: None,
            pause: Duration::from_millis(300),
            recent_limit: 10,
        }
    }
}
