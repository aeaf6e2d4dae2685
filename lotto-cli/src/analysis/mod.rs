pub mod sampler;

use lotto_db::models::{DrawRecord, FrequencyReport, NumberFrequency, POOL_SIZE, TOP_LIMIT};

/// Numéros les plus sortis dans l'historique : seuls les numéros apparus au
/// moins une fois, par nombre d'apparitions décroissant puis par numéro
/// croissant, limités aux `TOP_LIMIT` premiers.
pub fn frequencies(records: &[DrawRecord]) -> Vec<NumberFrequency> {
    let mut counts = vec![0u32; POOL_SIZE as usize];

    for record in records {
        for &n in record.numbers() {
            if let Some(count) = usize::from(n).checked_sub(1).and_then(|idx| counts.get_mut(idx)) {
                *count += 1;
            }
        }
    }

    let mut ranked: Vec<NumberFrequency> = (1..=POOL_SIZE)
        .zip(counts)
        .filter(|&(_, count)| count > 0)
        .map(|(number, count)| NumberFrequency { number, count })
        .collect();

    ranked.sort_by(|a, b| b.count.cmp(&a.count).then(a.number.cmp(&b.number)));
    ranked.truncate(TOP_LIMIT);
    ranked
}

pub fn frequency_report(records: &[DrawRecord]) -> FrequencyReport {
    FrequencyReport {
        draws: records.len(),
        top: frequencies(records),
    }
}
