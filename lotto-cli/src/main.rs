use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use lotto_cli::analysis::sampler::NumberSampler;
use lotto_cli::config::Settings;
use lotto_cli::console::TerminalConsole;
use lotto_cli::display::{display_banner, display_outcome, display_warning};
use lotto_cli::session::{Action, Session};
use lotto_db::history::HistoryStore;

#[derive(Parser)]
#[command(name = "lotto", version, about = "Générateur de grilles de loto 6/45")]
struct Cli {
    /// Fichier d'historique (défaut : lotto_history.json dans le répertoire courant)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Seed pour la reproductibilité
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Pas de pause entre les grilles d'une série
    #[arg(long, global = true)]
    no_pause: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Menu interactif (par défaut)
    Interactive,

    /// Tirer des grilles et les ajouter à l'historique
    Draw {
        /// Nombre de grilles (1-10)
        #[arg(short, long, default_value = "1")]
        count: usize,
    },

    /// Afficher les dernières grilles tirées
    History {
        /// Nombre de grilles à afficher (au moins 1)
        #[arg(short, long, default_value = "10")]
        last: NonZeroUsize,
    },

    /// Numéros les plus fréquents
    Stats,

    /// Afficher le chemin du fichier d'historique
    Path,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = Settings::default();
    if let Some(file) = cli.file {
        settings.history_path = file;
    }
    settings.seed = cli.seed;
    if cli.no_pause {
        settings.pause = Duration::ZERO;
    }

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => cmd_interactive(settings),
        Command::Draw { count } => cmd_once(settings, Action::DrawMany(count), count != 1),
        Command::History { last } => {
            settings.recent_limit = last.get();
            cmd_once(settings, Action::History, false)
        }
        Command::Stats => cmd_once(settings, Action::Statistics, false),
        Command::Path => {
            println!("{}", settings.history_path.display());
            Ok(())
        }
    }
}

fn open_session(settings: &Settings) -> Session<rand::rngs::StdRng> {
    let (store, warning) = HistoryStore::open(&settings.history_path);
    if let Some(e) = warning {
        display_warning(&e);
        println!("   Nouvel historique vide.");
    }
    Session::new(NumberSampler::from_seed(settings.seed), store)
}

fn cmd_interactive(settings: Settings) -> Result<()> {
    display_banner();
    let mut session = open_session(&settings);
    let mut console = TerminalConsole::new(settings);
    session.run(&mut console)
}

fn cmd_once(settings: Settings, action: Action, batch: bool) -> Result<()> {
    let mut session = open_session(&settings);
    let outcome = session.handle(action);
    display_outcome(&outcome, batch, &settings);
    Ok(())
}
