//! Command-chain resolution.

use std::collections::VecDeque;

use super::EngineError;
use crate::action::{ActionError, Command, CommandContext};
use crate::config::GameConfig;
use crate::env::{GameEnv, MessageSink, RollContext};
use crate::error::GameError;
use crate::state::GameState;

/// An `Impossible` failure that ended a chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainFailure {
    /// Position of the failed command in the chain; 0 is the submitted command.
    pub index: usize,
    pub command: &'static str,
    pub error: ActionError,
}

/// What happened while resolving one chain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainReport {
    /// Commands attempted, including a failed one.
    pub attempted: usize,
    pub failure: Option<ChainFailure>,
}

impl ChainReport {
    /// True when every command in the chain went through.
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

/// Resolves a command and everything it triggers, in FIFO order.
///
/// Each attempt draws its rolls from a fresh [`RollContext`] keyed by the
/// state's nonce, which is bumped once per attempt whether it succeeds or not.
pub struct Dispatcher<'a> {
    env: GameEnv<'a>,
    config: &'a GameConfig,
    queue: VecDeque<Command>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(env: GameEnv<'a>, config: &'a GameConfig) -> Self {
        Self {
            env,
            config,
            queue: VecDeque::with_capacity(config.max_chain_len),
        }
    }

    /// Runs `command` and its follow-ups to completion.
    ///
    /// Messages of successful commands go to `sink`. An `Impossible` failure
    /// stops the chain and is returned in the report without being narrated;
    /// the caller decides whether the player hears about it.
    ///
    /// # Errors
    ///
    /// `ChainTooLong` when the chain outgrows `max_chain_len`, `Internal` when
    /// a command reports a programming error, and `Oracle` when the RNG is
    /// missing.
    pub fn dispatch(
        &mut self,
        state: &mut GameState,
        sink: &mut dyn MessageSink,
        command: Command,
    ) -> Result<ChainReport, EngineError> {
        let rng = self.env.rng()?;
        let limit = self.config.max_chain_len.max(1);

        self.queue.clear();
        self.queue.push_back(command);
        let mut report = ChainReport::default();

        while let Some(command) = self.queue.pop_front() {
            if report.attempted >= limit {
                self.queue.clear();
                return Err(EngineError::ChainTooLong { limit });
            }
            let index = report.attempted;
            report.attempted += 1;

            let nonce = state.turn.nonce;
            state.turn.nonce += 1;
            let rolls = RollContext::new(rng, state.game_seed, nonce, command.actor());
            let mut ctx = CommandContext::new(self.env, self.config, rolls);

            tracing::trace!(command = command.name(), actor = %command.actor(), nonce, "attempt");
            match command.attempt(state, &mut ctx) {
                Ok(outcome) => {
                    for text in &outcome.messages {
                        sink.add_message(text);
                    }
                    if outcome.recompute_fov {
                        state.turn.recompute_fov = true;
                    }
                    self.queue.extend(outcome.follow_ups);
                }
                Err(error) if error.severity().is_recoverable() => {
                    tracing::debug!(
                        command = command.name(),
                        actor = %command.actor(),
                        code = error.error_code(),
                        "command refused"
                    );
                    self.queue.clear();
                    report.failure = Some(ChainFailure {
                        index,
                        command: command.name(),
                        error,
                    });
                    return Ok(report);
                }
                Err(error) => {
                    tracing::error!(
                        command = command.name(),
                        actor = %command.actor(),
                        code = error.error_code(),
                        %error,
                        "command failed internally"
                    );
                    self.queue.clear();
                    return Err(EngineError::Internal {
                        command: command.name(),
                        error,
                    });
                }
            }
        }
        Ok(report)
    }
}
