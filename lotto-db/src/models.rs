use anyhow::{Result, bail};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::LottoError;

/// Plus grand numéro tirable (les numéros vont de 1 à 45).
pub const POOL_SIZE: u8 = 45;
/// Nombre de numéros par grille.
pub const PICK_COUNT: usize = 6;

pub const MIN_BATCH: usize = 1;
pub const MAX_BATCH: usize = 10;

/// Taille du classement des numéros les plus fréquents.
pub const TOP_LIMIT: usize = 10;

/// Une grille tirée : 6 numéros distincts de 1 à 45, triés, et l'heure du tirage.
///
/// Les noms de champs sérialisés (`Numbers`, `GeneratedAt`) sont ceux des
/// fichiers d'historique existants et ne doivent pas changer.
///
/// La désérialisation passe par `RawDrawRecord` et refuse toute grille qui ne
/// respecte pas ces règles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "RawDrawRecord")]
pub struct DrawRecord {
    numbers: [u8; PICK_COUNT],
    #[serde(with = "timestamp")]
    generated_at: DateTime<Local>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawDrawRecord {
    numbers: [u8; PICK_COUNT],
    #[serde(with = "timestamp")]
    generated_at: DateTime<Local>,
}

impl TryFrom<RawDrawRecord> for DrawRecord {
    type Error = anyhow::Error;

    /// Pas de tri ici : une grille stockée dans le désordre est invalide.
    fn try_from(raw: RawDrawRecord) -> Result<Self> {
        validate_numbers(&raw.numbers)?;
        Ok(Self {
            numbers: raw.numbers,
            generated_at: raw.generated_at,
        })
    }
}

impl DrawRecord {
    /// Construit une grille en triant les numéros, puis la valide.
    pub fn new(mut numbers: [u8; PICK_COUNT], generated_at: DateTime<Local>) -> Result<Self> {
        numbers.sort();
        validate_numbers(&numbers)?;
        Ok(Self {
            numbers,
            generated_at,
        })
    }

    pub fn numbers(&self) -> &[u8; PICK_COUNT] {
        &self.numbers
    }

    pub fn generated_at(&self) -> DateTime<Local> {
        self.generated_at
    }
}

/// Occurrences d'un numéro dans l'historique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFrequency {
    pub number: u8,
    pub count: u32,
}

/// Classement des numéros les plus sortis, calculé à la demande.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyReport {
    /// Nombre de grilles analysées.
    pub draws: usize,
    pub top: Vec<NumberFrequency>,
}

impl FrequencyReport {
    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }
}

/// Vérifie qu'une grille contient 6 numéros distincts de 1 à 45, en ordre croissant.
pub fn validate_numbers(numbers: &[u8; PICK_COUNT]) -> Result<()> {
    for &n in numbers {
        if n < 1 || n > POOL_SIZE {
            bail!("Numéro {} hors limites (1-{})", n, POOL_SIZE);
        }
    }
    for pair in numbers.windows(2) {
        if pair[0] == pair[1] {
            bail!("Numéro en double : {}", pair[0]);
        }
        if pair[0] > pair[1] {
            bail!("Numéros non triés : {} avant {}", pair[0], pair[1]);
        }
    }
    Ok(())
}

/// Borne du nombre de grilles demandées en une fois.
pub fn validate_batch_count(count: usize) -> Result<usize, LottoError> {
    if (MIN_BATCH..=MAX_BATCH).contains(&count) {
        Ok(count)
    } else {
        Err(LottoError::InvalidCount { count })
    }
}

/// Horodatage RFC 3339 en écriture ; en lecture on accepte aussi une date sans
/// décalage, interprétée en heure locale.
mod timestamp {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Local>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(dt.with_timezone(&Local));
        }
        let naive = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map_err(|e| de::Error::custom(format!("date invalide '{raw}': {e}")))?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| de::Error::custom(format!("heure locale inexistante : '{raw}'")))
    }
}
