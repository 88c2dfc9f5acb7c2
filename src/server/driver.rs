//! The owner of a session, which acts on commands and broadcasts to observers.

use crate::{
    builder::FormulaSource,
    config::Config,
    misc::log::targets::{self},
    procedures::step::StepOk,
    reports::Report,
    server::{
        protocol::{Broadcast, Command, Observers},
        RewindPolicy, ServerConfig, StepGranularity,
    },
    session::Session,
    types::err::{self},
};

/// A driver, owning a session built from a formula source and the observers of the session.
pub struct Driver<O: Observers> {
    config: Config,
    server_config: ServerConfig,
    source: FormulaSource,
    observers: O,
    session: Session,
}

impl<O: Observers> Driver<O> {
    /// A driver with a session built from `source`.
    ///
    /// A restart is broadcast once the session is built.
    pub fn new(
        config: Config,
        server_config: ServerConfig,
        source: FormulaSource,
        observers: O,
    ) -> Result<Self, err::ErrorKind> {
        if server_config.granularity == StepGranularity::Event
            && server_config.rewind == RewindPolicy::Always
        {
            log::warn!(target: targets::SERVER, "Single event steps with a rewind after each step may repeat a decision without end");
        }

        let session = Session::from_formula(config.clone(), &source)?;

        let driver = Driver {
            config,
            server_config,
            source,
            observers,
            session,
        };
        driver.broadcast(Broadcast::Restart);
        Ok(driver)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn observers(&self) -> &O {
        &self.observers
    }

    pub fn server_config(&self) -> &ServerConfig {
        &self.server_config
    }

    /// Acts on `text`, if `text` is a command.
    pub fn receive(&mut self, text: &str) -> Result<(), err::ErrorKind> {
        match text.parse::<Command>() {
            Ok(command) => self.handle(command),
            Err(e) => {
                log::warn!(target: targets::SERVER, "{e}");
                Ok(())
            }
        }
    }

    pub fn handle(&mut self, command: Command) -> Result<(), err::ErrorKind> {
        log::debug!(target: targets::SERVER, "Command: {command:?}");
        match command {
            Command::Restart => self.restart(),
            Command::Play => {
                self.play();
                Ok(())
            }
            Command::Pause => {
                self.pause();
                Ok(())
            }
            Command::Step => self.step().map(|_| ()),
        }
    }

    /// Discards the session and builds a fresh (paused) session from the formula source.
    pub fn restart(&mut self) -> Result<(), err::ErrorKind> {
        self.session = Session::from_formula(self.config.clone(), &self.source)?;
        log::info!(target: targets::SERVER, "Restarted");
        self.broadcast(Broadcast::Restart);
        Ok(())
    }

    pub fn play(&mut self) {
        self.session.set_playing(true);
        self.broadcast(Broadcast::Play);
    }

    pub fn pause(&mut self) {
        self.session.set_playing(false);
        self.broadcast(Broadcast::Pause);
    }

    /// Takes a step, of the configured granularity.
    ///
    /// If the session is not exhausted by the step, the size of the trail is broadcast and returned, and the session is rewound (if configured).
    /// Otherwise, nothing is broadcast and `None` is returned.
    pub fn step(&mut self) -> Result<Option<usize>, err::ErrorKind> {
        let outcome = match self.server_config.granularity {
            StepGranularity::Conflict => self.session.step_until_conflict()?,
            StepGranularity::Event => self.session.step()?,
        };

        match outcome {
            StepOk::Exhausted(report) => {
                log::info!(target: targets::SERVER, "Session exhausted: {report}");
                if report == Report::Satisfiable {
                    log::debug!(target: targets::SERVER, "Valuation: {}", self.session.valuation_string());
                }
                Ok(None)
            }

            StepOk::Decision { trail, .. } | StepOk::ConflictResolved { trail, .. } => {
                self.broadcast(Broadcast::Step(trail));
                if self.server_config.rewind == RewindPolicy::Always {
                    self.session.rewind();
                }
                Ok(Some(trail))
            }
        }
    }

    /// If the session is playing, a step, or a restart if the session is exhausted.
    pub fn tick(&mut self) -> Result<(), err::ErrorKind> {
        if !self.session.is_playing() {
            return Ok(());
        }

        match self.step()? {
            Some(_) => Ok(()),
            None => self.restart(),
        }
    }

    fn broadcast(&self, message: Broadcast) {
        match self.observers.broadcast(&message) {
            Ok(count) => {
                log::trace!(target: targets::SERVER, "Broadcast {message:?} to {count} observers")
            }
            Err(err::BroadcastError::NoObservers) => {
                log::debug!(target: targets::SERVER, "No observers for {message:?}")
            }
            Err(e) => log::warn!(target: targets::SERVER, "Broadcast of {message:?} failed: {e:?}"),
        }
    }
}
