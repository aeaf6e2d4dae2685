use std::collections::BTreeSet;

use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lotto_db::models::{DrawRecord, PICK_COUNT, POOL_SIZE};

/// Tire des grilles de 6 numéros distincts parmi 1..=45.
///
/// La source aléatoire est injectée : `StdRng` graine fixe pour les tests et
/// `--seed`, générateur du thread sinon.
pub struct NumberSampler<R: Rng = StdRng> {
    rng: R,
}

impl NumberSampler<StdRng> {
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self::new(rng)
    }
}

impl<R: Rng> NumberSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Tirage uniforme numéro par numéro, les doublons sont rejetés et retirés.
    /// Chaque sous-ensemble de 6 numéros est équiprobable.
    pub fn draw_numbers(&mut self) -> [u8; PICK_COUNT] {
        let mut chosen = BTreeSet::new();
        while chosen.len() < PICK_COUNT {
            chosen.insert(self.rng.random_range(1..=POOL_SIZE));
        }

        let mut numbers = [0u8; PICK_COUNT];
        for (slot, n) in numbers.iter_mut().zip(chosen) {
            *slot = n;
        }
        numbers
    }

    pub fn draw(&mut self) -> DrawRecord {
        loop {
            let numbers = self.draw_numbers();
            match DrawRecord::new(numbers, Local::now()) {
                Ok(record) => return record,
                Err(e) => log::error!("Grille tirée invalide {numbers:?}, nouveau tirage : {e}"),
            }
        }
    }

    /// `n` grilles indépendantes, sans dédoublonnage entre elles.
    pub fn draw_many(&mut self, n: usize) -> Vec<DrawRecord> {
        (0..n).map(|_| self.draw()).collect()
    }
}
