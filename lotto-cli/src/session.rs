use anyhow::Result;
use rand::Rng;

use lotto_db::error::LottoError;
use lotto_db::history::HistoryStore;
use lotto_db::models::{DrawRecord, FrequencyReport, validate_batch_count};

use crate::analysis::frequency_report;
use crate::analysis::sampler::NumberSampler;

/// Demande de l'utilisateur, déjà décodée par la console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    DrawOne,
    DrawMany(usize),
    History,
    Statistics,
    Quit,
}

/// Résultat d'une action, à afficher par la console.
#[derive(Debug)]
pub enum Outcome {
    /// Grilles tirées et ajoutées à l'historique. `warning` est renseigné si
    /// la sauvegarde a échoué.
    Drawn {
        records: Vec<DrawRecord>,
        warning: Option<LottoError>,
    },
    /// Demande refusée, rien n'a été tiré.
    Rejected(LottoError),
    History(Vec<DrawRecord>),
    Statistics(FrequencyReport),
    Farewell,
}

/// Entrées/sorties de la session. Le moteur ne lit ni n'écrit jamais le
/// terminal lui-même.
pub trait Console {
    /// Prochaine action, `None` en fin d'entrée.
    fn request_action(&mut self) -> Result<Option<Action>>;

    fn render(&mut self, outcome: &Outcome) -> Result<()>;
}

pub struct Session<R: Rng> {
    sampler: NumberSampler<R>,
    store: HistoryStore,
}

impl<R: Rng> Session<R> {
    pub fn new(sampler: NumberSampler<R>, store: HistoryStore) -> Self {
        Self { sampler, store }
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn handle(&mut self, action: Action) -> Outcome {
        match action {
            Action::DrawOne => self.draw(1),
            Action::DrawMany(count) => match validate_batch_count(count) {
                Ok(count) => self.draw(count),
                Err(e) => {
                    log::debug!("Demande refusée : {e}");
                    Outcome::Rejected(e)
                }
            },
            Action::History => Outcome::History(self.store.records().to_vec()),
            Action::Statistics => Outcome::Statistics(frequency_report(self.store.records())),
            Action::Quit => Outcome::Farewell,
        }
    }

    fn draw(&mut self, count: usize) -> Outcome {
        let records = self.sampler.draw_many(count);
        log::info!("{} grille(s) tirée(s)", records.len());
        let warning = self.store.record(records.iter().cloned()).err();
        Outcome::Drawn { records, warning }
    }

    /// Boucle interactive : une action à la fois jusqu'à `Quit` ou la fin de
    /// l'entrée.
    pub fn run<C: Console>(&mut self, console: &mut C) -> Result<()> {
        while let Some(action) = console.request_action()? {
            let outcome = self.handle(action);
            console.render(&outcome)?;
            if matches!(outcome, Outcome::Farewell) {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use lotto_db::history::load_history;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::tempdir;

    struct ScriptedConsole {
        actions: VecDeque<Action>,
        rendered: Vec<String>,
    }

    impl ScriptedConsole {
        fn new(actions: &[Action]) -> Self {
            Self {
                actions: actions.iter().copied().collect(),
                rendered: Vec::new(),
            }
        }
    }

    impl Console for ScriptedConsole {
        fn request_action(&mut self) -> Result<Option<Action>> {
            Ok(self.actions.pop_front())
        }

        fn render(&mut self, outcome: &Outcome) -> Result<()> {
            let line = match outcome {
                Outcome::Drawn { records, warning } => {
                    format!("drawn {} {}", records.len(), warning.is_some())
                }
                Outcome::Rejected(_) => "rejected".to_string(),
                Outcome::History(records) => format!("history {}", records.len()),
                Outcome::Statistics(report) => format!("stats {}", report.draws),
                Outcome::Farewell => "bye".to_string(),
            };
            self.rendered.push(line);
            Ok(())
        }
    }

    fn session_in(dir: &std::path::Path) -> Session<StdRng> {
        let (store, _) = HistoryStore::open(dir.join("history.json"));
        Session::new(NumberSampler::new(StdRng::seed_from_u64(99)), store)
    }

    #[test]
    fn test_draw_one_persists() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());

        match session.handle(Action::DrawOne) {
            Outcome::Drawn { records, warning } => {
                assert_eq!(records.len(), 1);
                assert!(warning.is_none());
            }
            other => panic!("résultat inattendu : {other:?}"),
        }
        assert_eq!(load_history(&dir.path().join("history.json")).unwrap().len(), 1);
    }

    #[test]
    fn test_draw_many_bounds() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());

        for count in [0, 11] {
            match session.handle(Action::DrawMany(count)) {
                Outcome::Rejected(LottoError::InvalidCount { count: c }) => assert_eq!(c, count),
                other => panic!("résultat inattendu : {other:?}"),
            }
        }
        assert!(session.store().is_empty());

        for count in [1, 10] {
            match session.handle(Action::DrawMany(count)) {
                Outcome::Drawn { records, .. } => assert_eq!(records.len(), count),
                other => panic!("résultat inattendu : {other:?}"),
            }
        }
        assert_eq!(session.store().len(), 11);
    }

    #[test]
    fn test_history_in_order() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());

        let first = match session.handle(Action::DrawOne) {
            Outcome::Drawn { records, .. } => records,
            other => panic!("résultat inattendu : {other:?}"),
        };
        let second = match session.handle(Action::DrawMany(2)) {
            Outcome::Drawn { records, .. } => records,
            other => panic!("résultat inattendu : {other:?}"),
        };

        let expected: Vec<DrawRecord> = first.into_iter().chain(second).collect();
        match session.handle(Action::History) {
            Outcome::History(records) => assert_eq!(records, expected),
            other => panic!("résultat inattendu : {other:?}"),
        }
        assert_eq!(load_history(&dir.path().join("history.json")).unwrap(), expected);
    }

    #[test]
    fn test_statistics_over_history() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());

        match session.handle(Action::Statistics) {
            Outcome::Statistics(report) => assert!(report.is_empty()),
            other => panic!("résultat inattendu : {other:?}"),
        }

        session.handle(Action::DrawMany(5));
        match session.handle(Action::Statistics) {
            Outcome::Statistics(report) => {
                assert_eq!(report.draws, 5);
                assert!(!report.top.is_empty() && report.top.len() <= 10);
                let total: u32 = report.top.iter().map(|f| f.count).sum();
                assert!(total <= 30);
            }
            other => panic!("résultat inattendu : {other:?}"),
        }
    }

    #[test]
    fn test_save_failure_is_warning() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("occupied");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), "x").unwrap();

        let store = HistoryStore::empty(&target);
        let mut session = Session::new(NumberSampler::new(StdRng::seed_from_u64(1)), store);

        match session.handle(Action::DrawMany(3)) {
            Outcome::Drawn { records, warning } => {
                assert_eq!(records.len(), 3);
                assert!(warning.is_some_and(|e| e.is_storage_write()));
            }
            other => panic!("résultat inattendu : {other:?}"),
        }
        assert_eq!(session.store().len(), 3);
    }

    #[test]
    fn test_run_headless() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());
        let mut console = ScriptedConsole::new(&[
            Action::DrawOne,
            Action::DrawMany(11),
            Action::DrawMany(3),
            Action::History,
            Action::Statistics,
            Action::Quit,
            Action::DrawOne,
        ]);

        session.run(&mut console).unwrap();

        assert_eq!(
            console.rendered,
            vec![
                "drawn 1 false",
                "rejected",
                "drawn 3 false",
                "history 4",
                "stats 4",
                "bye",
            ]
        );
        // L'action après Quit n'est pas consommée.
        assert_eq!(console.actions.len(), 1);
    }

    #[test]
    fn test_run_stops_at_end_of_input() {
        let dir = tempdir().unwrap();
        let mut session = session_in(dir.path());
        let mut console = ScriptedConsole::new(&[Action::DrawOne]);

        session.run(&mut console).unwrap();
        assert_eq!(console.rendered, vec!["drawn 1 false"]);
        assert_eq!(session.store().len(), 1);
    }
}
