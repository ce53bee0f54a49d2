use crate::command::VelocityCommand;
use std::io::{self, Write};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to encode velocity command: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write velocity command: {0}")]
    Io(#[from] io::Error),
}

/// Transport that delivers velocity commands to the vehicle.
///
/// Publishing is fire-and-forget from the control loop's point of view: a
/// failed publish is logged and never retried.
pub trait CommandSink {
    fn publish(&mut self, command: &VelocityCommand) -> Result<(), SinkError>;
}

impl<S: CommandSink + ?Sized> CommandSink for &mut S {
    fn publish(&mut self, command: &VelocityCommand) -> Result<(), SinkError> {
        (**self).publish(command)
    }
}

impl<S: CommandSink + ?Sized> CommandSink for Box<S> {
    fn publish(&mut self, command: &VelocityCommand) -> Result<(), SinkError> {
        (**self).publish(command)
    }
}

/// Writes one JSON object per command, newline separated.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CommandSink for JsonLinesSink<W> {
    fn publish(&mut self, command: &VelocityCommand) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, command)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Logs every command at trace level and delivers nothing.
#[derive(Debug, Default)]
pub struct TracingSink;

impl CommandSink for TracingSink {
    fn publish(&mut self, command: &VelocityCommand) -> Result<(), SinkError> {
        trace!(
            linear_x = command.linear.x,
            angular_z = command.angular.z,
            "velocity command"
        );
        Ok(())
    }
}
