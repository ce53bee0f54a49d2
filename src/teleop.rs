use crate::{
    command::{CommandEmitter, VelocityCommand},
    console::Console,
    constants::{DEFAULT_TICK_PERIOD, DEFAULT_WHEELBASE_M, USAGE},
    error::Result,
    keymap::{Action, Input, Keymap},
    motion::{MotionState, MotionStateInit},
    sink::CommandSink,
    terminal::{poll_input, EchoOff, KeySource},
};
use std::{
    io::Write,
    thread,
    time::{Duration, Instant},
};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct TeleopInit {
    pub keymap: Keymap,
    pub motion: MotionStateInit,
    pub wheelbase: f64,
    /// Minimum duration of one loop iteration. Zero polls as fast as the
    /// terminal allows.
    pub tick_period: Duration,
}

impl TeleopInit {
    pub fn build(&self) -> Result<Teleop> {
        let Self {
            ref keymap,
            ref motion,
            wheelbase,
            tick_period,
        } = *self;

        Ok(Teleop {
            keymap: keymap.clone(),
            state: motion.build()?,
            emitter: CommandEmitter::new(wheelbase)?,
            tick_period,
        })
    }
}

impl Default for TeleopInit {
    fn default() -> Self {
        Self {
            keymap: Keymap::default(),
            motion: MotionStateInit::default(),
            wheelbase: DEFAULT_WHEELBASE_M,
            tick_period: DEFAULT_TICK_PERIOD,
        }
    }
}

/// Outcome of one loop iteration.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    Emit {
        command: VelocityCommand,
        /// The symbol read this tick, if it changed the motion state.
        accepted: Option<char>,
    },
    Quit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub emitted: u64,
    pub accepted: u64,
}

#[derive(Debug)]
pub struct Teleop {
    keymap: Keymap,
    state: MotionState,
    emitter: CommandEmitter,
    tick_period: Duration,
}

impl Teleop {
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Classifies the input, applies it and computes this tick's command.
    pub fn step(&mut self, input: Input) -> Tick {
        let action = self.keymap.classify(input);
        if matches!(action, Action::Quit) {
            return Tick::Quit;
        }

        let changed = self.state.apply(action);
        let accepted = match input {
            Input::Symbol(symbol) if changed => Some(symbol),
            _ => None,
        };

        Tick::Emit {
            command: self.emitter.emit(&self.state),
            accepted,
        }
    }

    /// Runs until the quit symbol or an interrupt arrives.
    ///
    /// Echo stays off for the whole run and is restored on return, including
    /// when a panic unwinds through here.
    pub fn run<K, S, W>(&mut self, keys: K, mut sink: S, output: W) -> RunSummary
    where
        K: KeySource,
        S: CommandSink,
        W: Write,
    {
        let mut keys = EchoOff::acquire(keys);
        let mut console = Console::new(output);
        let mut summary = RunSummary::default();

        console.banner(USAGE);
        console.status(&self.state, None);
        debug!(tick_period = ?self.tick_period, "teleop loop started");

        loop {
            let started = Instant::now();
            let input = poll_input(&mut *keys);

            let (command, accepted) = match self.step(input) {
                Tick::Quit => {
                    console.exit();
                    break;
                }
                Tick::Emit { command, accepted } => (command, accepted),
            };

            if let Some(symbol) = accepted {
                summary.accepted += 1;
                debug!(%symbol, state = %self.state, "key accepted");
                console.status(&self.state, Some(symbol));
            }

            if let Err(err) = sink.publish(&command) {
                warn!(%err, "failed to publish velocity command");
            }
            summary.emitted += 1;

            let elapsed = started.elapsed();
            if let Some(rest) = self.tick_period.checked_sub(elapsed) {
                if !rest.is_zero() {
                    thread::sleep(rest);
                }
            }
        }

        debug!(
            emitted = summary.emitted,
            accepted = summary.accepted,
            "teleop loop finished"
        );
        summary
    }
}
