use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::LottoError;
use crate::models::DrawRecord;

const HISTORY_FILE: &str = "lotto_history.json";

/// Emplacement par défaut du fichier d'historique : le répertoire courant.
pub fn history_path() -> PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push(HISTORY_FILE);
    path
}

/// Lit l'historique complet. Un fichier absent donne un historique vide.
///
/// Un fichier illisible, mal formé ou contenant une grille invalide est une
/// erreur : on ne tente pas de récupérer une partie des grilles.
pub fn load_history(path: &Path) -> Result<Vec<DrawRecord>, LottoError> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(LottoError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    // Les grilles invalides sont refusées dès la désérialisation.
    let records: Vec<DrawRecord> =
        serde_json::from_str(&json).map_err(|source| LottoError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    log::debug!("{} grilles chargées depuis {}", records.len(), path.display());
    Ok(records)
}

/// Réécrit tout l'historique. Écriture dans un fichier temporaire du même
/// répertoire puis renommage, l'ancien contenu reste en place en cas d'échec.
pub fn save_history(path: &Path, records: &[DrawRecord]) -> Result<(), LottoError> {
    let write_err = |source: std::io::Error| LottoError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;

    let mut temp_file = NamedTempFile::new_in(dir).map_err(write_err)?;
    {
        let mut writer = BufWriter::new(&mut temp_file);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.flush().map_err(write_err)?;
    }
    temp_file.persist(path).map_err(|e| write_err(e.error))?;

    log::debug!("{} grilles écrites dans {}", records.len(), path.display());
    Ok(())
}

/// Historique des grilles, dans l'ordre où elles ont été tirées.
///
/// Chargé une fois au démarrage, complété en mémoire, puis réécrit en entier
/// après chaque ajout.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    records: Vec<DrawRecord>,
}

impl HistoryStore {
    /// Historique vide, sans lecture du disque.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    /// Charge l'historique ; en cas d'erreur on repart d'un historique vide et
    /// l'erreur est rendue à l'appelant pour qu'il la signale.
    pub fn open(path: impl Into<PathBuf>) -> (Self, Option<LottoError>) {
        let mut store = Self::empty(path);
        match load_history(&store.path) {
            Ok(records) => {
                log::info!("Historique chargé : {} grilles", records.len());
                store.records = records;
                (store, None)
            }
            Err(e) => {
                log::warn!("Historique ignoré ({}) : {e}", store.path.display());
                (store, Some(e))
            }
        }
    }

    pub fn append(&mut self, records: impl IntoIterator<Item = DrawRecord>) {
        self.records.extend(records);
    }

    pub fn save(&self) -> Result<(), LottoError> {
        save_history(&self.path, &self.records)
    }

    /// Ajoute puis sauvegarde. Les grilles restent en mémoire même si
    /// l'écriture échoue.
    pub fn record(&mut self, records: impl IntoIterator<Item = DrawRecord>) -> Result<(), LottoError> {
        self.append(records);
        self.save().inspect_err(|e| {
            log::warn!("Sauvegarde de l'historique impossible : {e}");
        })
    }

    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
