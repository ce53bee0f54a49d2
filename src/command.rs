use crate::{
    constants::DEFAULT_WHEELBASE_M,
    error::{Error, Result},
    motion::MotionState,
};
use noisy_float::types::R64;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Linear velocity in m/s and angular velocity in rad/s.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VelocityCommand {
    pub linear: Vector3,
    pub angular: Vector3,
}

/// Converts speed and steering angle into a velocity command using the
/// bicycle model `yaw_rate = speed * tan(angle) / wheelbase`.
#[derive(Debug, Clone)]
pub struct CommandEmitter {
    wheelbase: f64,
}

impl CommandEmitter {
    pub fn new(wheelbase: f64) -> Result<Self> {
        let wheelbase = R64::try_new(wheelbase)
            .filter(|w| w.raw() > 0.0)
            .ok_or(Error::InvalidWheelbase(wheelbase))?
            .raw();
        Ok(Self { wheelbase })
    }

    pub fn wheelbase(&self) -> f64 {
        self.wheelbase
    }

    /// The angle is not guarded: at ±90° the yaw rate is huge or non-finite
    /// and is passed on as is.
    pub fn emit(&self, state: &MotionState) -> VelocityCommand {
        let speed = state.speed();
        let yaw_rate = speed * state.angle().to_radians().tan() / self.wheelbase;

        VelocityCommand {
            linear: Vector3 {
                x: speed,
                y: 0.0,
                z: 0.0,
            },
            angular: Vector3 {
                x: 0.0,
                y: 0.0,
                z: yaw_rate,
            },
        }
    }
}

impl Default for CommandEmitter {
    fn default() -> Self {
        Self {
            wheelbase: DEFAULT_WHEELBASE_M,
        }
    }
}
