pub mod binding;
pub mod command;
pub mod console;
pub mod constants;
pub mod error;
pub mod keymap;
pub mod motion;
pub mod sink;
pub mod teleop;
pub mod terminal;

pub use command::{CommandEmitter, VelocityCommand};
pub use error::{Error, Result};
pub use keymap::{Action, Input, Keymap};
pub use motion::{MotionState, MotionStateInit};
pub use teleop::{RunSummary, Teleop, TeleopInit, Tick};
