use crate::{
    binding::{Binding, LimitAxis, LimitBinding},
    constants::{DEFAULT_ANGLE_LIMIT_DEGREES, DEFAULT_SPEED_LIMIT_MS},
    error::{Error, Result},
    keymap::Action,
};
use noisy_float::types::R64;
use std::fmt;

#[derive(Debug, Clone)]
pub struct MotionStateInit {
    pub speed_limit: f64,
    pub angle_limit: f64,
}

impl MotionStateInit {
    pub fn build(&self) -> Result<MotionState> {
        let Self {
            speed_limit,
            angle_limit,
        } = *self;

        Ok(MotionState {
            speed: 0.0,
            angle: 0.0,
            speed_limit: positive_limit("speed", speed_limit)?,
            angle_limit: positive_limit("angle", angle_limit)?,
        })
    }
}

impl Default for MotionStateInit {
    fn default() -> Self {
        Self {
            speed_limit: DEFAULT_SPEED_LIMIT_MS,
            angle_limit: DEFAULT_ANGLE_LIMIT_DEGREES,
        }
    }
}

fn positive_limit(name: &'static str, value: f64) -> Result<f64> {
    R64::try_new(value)
        .filter(|limit| limit.raw() > 0.0)
        .map(|limit| limit.raw())
        .ok_or(Error::InvalidLimit { name, value })
}

/// Speed in m/s, steering angle in degrees, and the current bounds on both.
///
/// Every update clamps `speed` into `[-speed_limit, speed_limit]` and
/// `angle` into `[-angle_limit, angle_limit]` before returning, including
/// updates that shrink a limit. Limits themselves are scaled without bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    speed: f64,
    angle: f64,
    speed_limit: f64,
    angle_limit: f64,
}

impl MotionState {
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn speed_limit(&self) -> f64 {
        self.speed_limit
    }

    pub fn angle_limit(&self) -> f64 {
        self.angle_limit
    }

    pub fn apply_speed_update(&mut self, multiplier: f64, increment: f64) {
        let max = self.speed_limit;
        self.speed = (multiplier * self.speed + increment).clamp(-max, max);
    }

    pub fn apply_angle_update(&mut self, multiplier: f64, increment: f64) {
        let max = self.angle_limit;
        self.angle = (multiplier * self.angle + increment).clamp(-max, max);
    }

    /// `factor` must be finite and positive, which binding tables guarantee.
    pub fn apply_limit_update(&mut self, axis: LimitAxis, factor: f64) {
        match axis {
            LimitAxis::Speed => {
                self.speed_limit *= factor;
                self.apply_speed_update(1.0, 0.0);
            }
            LimitAxis::Angle => {
                self.angle_limit *= factor;
                self.apply_angle_update(1.0, 0.0);
            }
        }
    }

    /// Applies the update matching the action kind. Returns `false` for
    /// actions that leave the state alone.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Speed(Binding {
                multiplier,
                increment,
            }) => self.apply_speed_update(multiplier, increment),
            Action::Angle(Binding {
                multiplier,
                increment,
            }) => self.apply_angle_update(multiplier, increment),
            Action::Limit(LimitBinding { axis, factor }) => self.apply_limit_update(axis, factor),
            Action::Quit | Action::NoOp => return false,
        }
        true
    }
}

impl fmt::Display for MotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "speed {:.2}(lim {:.2}) angle {:.2}(lim {:.2})",
            self.speed, self.speed_limit, self.angle, self.angle_limit
        )
    }
}
