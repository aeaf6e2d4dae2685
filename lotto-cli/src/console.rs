use std::io::{self, Write};

use anyhow::{Context, Result};

use lotto_db::models::{MAX_BATCH, MIN_BATCH};

use crate::config::Settings;
use crate::display::{display_menu, display_outcome};
use crate::session::{Action, Console, Outcome};

#[derive(Debug, PartialEq)]
enum MenuCommand {
    DrawOne,
    DrawMany,
    History,
    Statistics,
    Quit,
}

fn parse_command(input: &str) -> Option<MenuCommand> {
    match input.trim().to_lowercase().as_str() {
        "1" | "tirer" | "tirage" | "draw" => Some(MenuCommand::DrawOne),
        "2" | "plusieurs" | "serie" | "série" | "many" => Some(MenuCommand::DrawMany),
        "3" | "historique" | "history" | "hist" => Some(MenuCommand::History),
        "4" | "statistiques" | "stats" | "stat" => Some(MenuCommand::Statistics),
        "5" | "quitter" | "quit" | "q" | "exit" => Some(MenuCommand::Quit),
        _ => None,
    }
}

/// Nombre de grilles saisi. Les valeurs hors bornes sont laissées à la session,
/// qui les refuse.
fn parse_count(input: &str) -> Option<usize> {
    let n: i64 = input.trim().parse().ok()?;
    Some(usize::try_from(n).unwrap_or(0))
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    if read == 0 {
        anyhow::bail!("Fin de l'entrée");
    }
    Ok(input.trim().to_string())
}

/// Menu interactif sur le terminal.
pub struct TerminalConsole {
    settings: Settings,
    last: Option<Action>,
}

impl TerminalConsole {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            last: None,
        }
    }
}

impl Console for TerminalConsole {
    fn request_action(&mut self) -> Result<Option<Action>> {
        loop {
            display_menu();
            let input = match prompt("Choix : ") {
                Ok(s) => s,
                Err(_) => return Ok(None), // EOF / Ctrl+D
            };

            if input.is_empty() {
                continue;
            }

            let action = match parse_command(&input) {
                Some(MenuCommand::DrawOne) => Action::DrawOne,
                Some(MenuCommand::DrawMany) => {
                    let msg = format!("Combien de grilles ? ({MIN_BATCH}-{MAX_BATCH}) : ");
                    let raw = match prompt(&msg) {
                        Ok(s) => s,
                        Err(_) => return Ok(None),
                    };
                    match parse_count(&raw) {
                        Some(count) => Action::DrawMany(count),
                        None => {
                            println!("❌ Entrez un nombre entre {MIN_BATCH} et {MAX_BATCH}.");
                            continue;
                        }
                    }
                }
                Some(MenuCommand::History) => Action::History,
                Some(MenuCommand::Statistics) => Action::Statistics,
                Some(MenuCommand::Quit) => Action::Quit,
                None => {
                    println!("❌ Commande inconnue : '{}'. Tapez un numéro (1-5) ou un nom de commande.", input);
                    continue;
                }
            };

            self.last = Some(action);
            return Ok(Some(action));
        }
    }

    fn render(&mut self, outcome: &Outcome) -> Result<()> {
        let batch = matches!(self.last, Some(Action::DrawMany(_)));
        display_outcome(outcome, batch, &self.settings);
        io::stdout().flush()?;
        Ok(())
    }
}
