use std::thread;
use std::time::Duration;

use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use rand::seq::IndexedRandom;

use lotto_db::error::LottoError;
use lotto_db::models::{DrawRecord, FrequencyReport};

use crate::config::Settings;
use crate::session::Outcome;

const LUCKY_MESSAGES: &[&str] = &[
    "🍀 Aujourd'hui est votre jour de chance !",
    "⭐ Que ces numéros vous portent bonheur !",
    "🎈 Que la chance soit avec vous !",
    "💎 Que vos rêves se réalisent !",
    "🌈 Un bel avenir vous attend !",
    "🎉 La fortune vous sourit !",
    "✨ C'est peut-être le grand jour !",
    "🎯 J'ai comme un pressentiment pour cette grille !",
];

pub fn format_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_banner() {
    println!("🎰 Générateur de loto v{} 🎰", env!("CARGO_PKG_VERSION"));
    println!("{}", "=".repeat(50));
    println!("📅 {}", chrono::Local::now().format("%Y-%m-%d"));
    println!();
}

pub fn display_menu() {
    println!();
    println!("📋 Menu :");
    println!("  1. tirer       Tirer une grille");
    println!("  2. plusieurs   Tirer plusieurs grilles");
    println!("  3. historique  Grilles déjà tirées");
    println!("  4. stats       Numéros les plus fréquents");
    println!("  5. quitter     Quitter");
    println!();
}

pub fn display_single(record: &DrawRecord) {
    println!("\n🎉 Grille tirée :");
    println!("   {}", format_numbers(record.numbers()));

    let mut rng = rand::rng();
    if let Some(message) = LUCKY_MESSAGES.choose(&mut rng) {
        println!("\n{message}");
    }
}

/// Affiche une série ligne par ligne, avec une courte pause entre deux grilles.
pub fn display_batch(records: &[DrawRecord], pause: Duration) {
    println!("\n🎉 {} grilles tirées :", records.len());
    println!("{}", "-".repeat(40));

    for (i, record) in records.iter().enumerate() {
        println!("Grille {:2} : {}", i + 1, format_numbers(record.numbers()));
        if i + 1 < records.len() && !pause.is_zero() {
            thread::sleep(pause);
        }
    }

    println!("{}", "-".repeat(40));
    println!("✨ {} grilles tirées. Bonne chance ! ✨", records.len());
}

pub fn history_table(records: &[DrawRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Numéros"]);

    for record in records {
        table.add_row(vec![
            record.generated_at().format("%Y-%m-%d %H:%M:%S").to_string(),
            format_numbers(record.numbers()),
        ]);
    }
    table
}

/// Affiche les `limit` grilles les plus récentes et le nombre de grilles restantes.
pub fn display_history(records: &[DrawRecord], limit: usize) {
    if records.is_empty() {
        println!("\n📝 Aucune grille tirée pour l'instant.");
        return;
    }

    println!("\n📝 Historique ({} grilles) :", records.len());
    let start = records.len().saturating_sub(limit);
    println!("{}", history_table(&records[start..]));

    if start > 0 {
        println!("... et {} autres grilles", start);
    }
}

pub fn stats_table(report: &FrequencyReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Numéro", "Sorties"]);

    for (i, freq) in report.top.iter().enumerate() {
        table.add_row(vec![
            Cell::new(format!("{:2}", i + 1)),
            Cell::new(format!("{:2}", freq.number)).fg(Color::Green),
            Cell::new(format!("{:3}", freq.count)),
        ]);
    }
    table
}

pub fn display_stats(report: &FrequencyReport) {
    if report.is_empty() {
        println!("\n📊 Pas assez de données pour les statistiques.");
        return;
    }

    println!("\n📊 Statistiques ({} grilles analysées)", report.draws);
    println!("🔥 Numéros les plus fréquents :");
    println!("{}", stats_table(report));
}

pub fn display_warning(err: &LottoError) {
    println!("⚠️ {err}");
    if let Some(source) = std::error::Error::source(err) {
        println!("   {source}");
    }
}

pub fn display_rejected(err: &LottoError) {
    println!("❌ {err}");
}

/// Affichage d'un résultat de session. `batch` choisit la présentation en
/// série plutôt que la grille unique.
pub fn display_outcome(outcome: &Outcome, batch: bool, settings: &Settings) {
    match outcome {
        Outcome::Drawn { records, warning } => {
            match records.as_slice() {
                [record] if !batch => display_single(record),
                _ => display_batch(records, settings.pause),
            }
            if let Some(e) = warning {
                display_warning(e);
            }
        }
        Outcome::Rejected(e) => display_rejected(e),
        Outcome::History(records) => display_history(records, settings.recent_limit),
        Outcome::Statistics(report) => display_stats(report),
        Outcome::Farewell => println!("👋 Merci et bonne chance !"),
    }
}
