use std::cell::RefCell;

use otter_step::{
    builder::FormulaSource,
    config::Config,
    reports::Report,
    server::{Broadcast, Command, Driver, Observers, RewindPolicy, ServerConfig, StepGranularity},
    session::StepState,
    types::err,
};

/// Records every broadcast.
#[derive(Default)]
struct Recorder {
    messages: RefCell<Vec<Broadcast>>,
}

impl Observers for Recorder {
    fn broadcast(&self, message: &Broadcast) -> Result<usize, err::BroadcastError> {
        self.messages.borrow_mut().push(message.clone());
        Ok(1)
    }
}

impl Recorder {
    fn take(&self) -> Vec<Broadcast> {
        std::mem::take(&mut *self.messages.borrow_mut())
    }
}

const UNSAT: &str = "
 1  2 0
-1  2 0
 1 -2 0
-1 -2 0
";

const SAT: &str = "1 2 0\n2 3 0\n-1 3 0\n";

fn driver_for(dimacs: &str, server_config: ServerConfig) -> Driver<Recorder> {
    Driver::new(
        Config::default(),
        server_config,
        FormulaSource::Text(dimacs.to_string()),
        Recorder::default(),
    )
    .unwrap()
}

mod driver {
    use super::*;

    #[test]
    fn restart_on_creation() {
        let driver = driver_for(SAT, ServerConfig::default());
        assert_eq!(driver.observers().take(), vec![Broadcast::Restart]);
        assert!(!driver.session().is_playing());
        assert_eq!(driver.session().state, StepState::Idle);
    }

    #[test]
    fn unsatisfiable_formula() {
        let result = Driver::new(
            Config::default(),
            ServerConfig::default(),
            FormulaSource::Text("1 0\n-1 0\n".to_string()),
            Recorder::default(),
        );
        assert!(matches!(result, Err(err::ErrorKind::ImmediateUnsat)));
    }

    #[test]
    fn missing_formula() {
        let result = Driver::new(
            Config::default(),
            ServerConfig::default(),
            FormulaSource::File("a formula which does not exist.cnf".into()),
            Recorder::default(),
        );
        assert!(matches!(result, Err(err::ErrorKind::Read(_))));
    }

    #[test]
    fn play_and_pause() {
        let mut driver = driver_for(SAT, ServerConfig::default());
        driver.observers().take();

        assert!(driver.handle(Command::Play).is_ok());
        assert!(driver.session().is_playing());
        assert!(driver.handle(Command::Pause).is_ok());
        assert!(!driver.session().is_playing());

        assert_eq!(driver.observers().take(), vec![Broadcast::Play, Broadcast::Pause]);
    }

    #[test]
    fn unknown_commands_are_ignored() {
        let mut driver = driver_for(SAT, ServerConfig::default());
        driver.observers().take();

        for text in ["jump", "Step", "play ", ""] {
            assert!(driver.receive(text).is_ok());
        }
        assert!(driver.observers().take().is_empty());
        assert_eq!(driver.session().counters.steps, 0);
        assert!(!driver.session().is_playing());
    }

    #[test]
    fn steps_until_exhausted() {
        let mut driver = driver_for(UNSAT, ServerConfig::default());
        driver.observers().take();

        // ¬1 and a conflict, learning 1 at level zero.
        assert_eq!(driver.step(), Ok(Some(1)));
        assert_eq!(driver.observers().take(), vec![Broadcast::Step(1)]);
        assert_eq!(driver.session().level(), 0);

        assert_eq!(driver.step(), Ok(None));
        assert!(driver.observers().take().is_empty());
        assert_eq!(driver.session().report(), Report::Unsatisfiable);

        // On exhaustion play restarts.
        assert!(driver.handle(Command::Play).is_ok());
        assert!(driver.tick().is_ok());
        assert_eq!(
            driver.observers().take(),
            vec![Broadcast::Play, Broadcast::Restart]
        );
        assert_eq!(driver.session().report(), Report::Unknown);
        assert!(!driver.session().is_playing());
    }

    #[test]
    fn ticks_while_paused_do_nothing() {
        let mut driver = driver_for(UNSAT, ServerConfig::default());
        driver.observers().take();

        for _ in 0..5 {
            assert!(driver.tick().is_ok());
        }
        assert!(driver.observers().take().is_empty());
        assert_eq!(driver.session().counters.steps, 0);
    }

    #[test]
    fn play_steps_each_tick() {
        let mut driver = driver_for(UNSAT, ServerConfig::default());
        assert!(driver.receive("play").is_ok());
        driver.observers().take();

        assert!(driver.tick().is_ok());
        assert_eq!(driver.observers().take(), vec![Broadcast::Step(1)]);
        assert!(driver.session().is_playing());

        assert!(driver.tick().is_ok());
        assert_eq!(driver.observers().take(), vec![Broadcast::Restart]);
    }

    #[test]
    fn rewind_policy() {
        let event_steps = |rewind| ServerConfig {
            rewind,
            granularity: StepGranularity::Event,
            ..ServerConfig::default()
        };

        let mut always = driver_for(SAT, event_steps(RewindPolicy::Always));
        assert_eq!(always.step(), Ok(Some(1)));
        assert_eq!(always.session().level(), 0);
        assert_eq!(always.session().trail_size(), 0);
        assert_eq!(always.session().state, StepState::Idle);

        let mut never = driver_for(SAT, event_steps(RewindPolicy::Never));
        assert_eq!(never.step(), Ok(Some(1)));
        assert_eq!(never.session().level(), 1);
        assert_eq!(never.step(), Ok(Some(3)));
        assert_eq!(never.step(), Ok(None));
        assert_eq!(never.session().report(), Report::Satisfiable);
        assert_eq!(
            never.observers().take(),
            vec![Broadcast::Restart, Broadcast::Step(1), Broadcast::Step(3)]
        );
    }

    #[test]
    fn restart_resets() {
        let mut driver = driver_for(
            "1 3 0\n2 -3 4 0\n2 -3 -4 0\n5 6 0\n",
            ServerConfig {
                rewind: RewindPolicy::Never,
                ..ServerConfig::default()
            },
        );

        assert!(matches!(driver.step(), Ok(Some(_))));
        assert!(driver.session().clause_db.addition_count() > 0);
        assert!(driver.handle(Command::Play).is_ok());

        assert!(driver.handle(Command::Restart).is_ok());
        let session = driver.session();
        assert_eq!(session.clause_db.addition_count(), 0);
        assert_eq!(session.trail_size(), 0);
        assert_eq!(session.counters.steps, 0);
        assert_eq!(session.state, StepState::Idle);
        assert!(!session.is_playing());
        assert_eq!(driver.observers().take().last(), Some(&Broadcast::Restart));
    }
}
