use std::time::Duration;

pub const DEFAULT_SPEED_LIMIT_MS: f64 = 1.0;
pub const DEFAULT_ANGLE_LIMIT_DEGREES: f64 = 20.0;

/// Effective wheelbase of the bicycle model in meters.
pub const DEFAULT_WHEELBASE_M: f64 = 0.7;

pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(10);

pub const SPEED_STEP_MS: f64 = 0.2;
pub const ANGLE_STEP_DEGREES: f64 = 10.0;
pub const LIMIT_GROW_FACTOR: f64 = 1.1;
pub const LIMIT_SHRINK_FACTOR: f64 = 0.9;

pub const QUIT_SYMBOL: char = 'q';
pub const RESET_SYMBOL: char = '0';

pub const USAGE: &str = "
Reading from the keyboard and publishing velocity commands!
---------------------------
Turning/accelerating: arrow keys
0 : stop

w/s : increase/decrease max speeds by 10%
e/d : increase/decrease max turning angle by 10%

q to quit
";
