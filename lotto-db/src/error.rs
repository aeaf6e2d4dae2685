use std::path::PathBuf;

use thiserror::Error;

use crate::models::{MAX_BATCH, MIN_BATCH};

/// Erreurs du moteur : validation des demandes et accès au fichier d'historique.
///
/// Aucune n'est fatale : la lecture retombe sur un historique vide, l'écriture
/// laisse l'historique en mémoire intact.
#[derive(Debug, Error)]
pub enum LottoError {
    #[error("nombre de grilles invalide : {count} (attendu {min}-{max})", min = MIN_BATCH, max = MAX_BATCH)]
    InvalidCount { count: usize },

    #[error("lecture impossible de {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("historique illisible dans {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("écriture impossible de {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("sérialisation de l'historique impossible")]
    Serialize(#[from] serde_json::Error),
}

impl LottoError {
    /// Vrai pour les erreurs de lecture du fichier d'historique.
    pub fn is_storage_read(&self) -> bool {
        matches!(self, LottoError::Read { .. } | LottoError::Parse { .. })
    }

    pub fn is_storage_write(&self) -> bool {
        matches!(self, LottoError::Write { .. } | LottoError::Serialize(_))
    }
}
