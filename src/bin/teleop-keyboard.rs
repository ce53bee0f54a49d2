use anyhow::{ensure, Context, Result};
use clap::Parser;
use std::{fs::File, io, io::BufWriter, path::PathBuf, time::Duration};
use teleop_keyboard::{
    constants::{DEFAULT_ANGLE_LIMIT_DEGREES, DEFAULT_SPEED_LIMIT_MS, DEFAULT_WHEELBASE_M},
    sink::{CommandSink, JsonLinesSink, TracingSink},
    terminal::TerminalKeys,
    Keymap, MotionStateInit, TeleopInit,
};
use tracing_subscriber::EnvFilter;

/// Drive a vehicle from the keyboard.
#[derive(Parser)]
struct Opts {
    /// Effective wheelbase in meters.
    #[clap(long, default_value_t = DEFAULT_WHEELBASE_M)]
    pub wheelbase: f64,
    /// Initial speed limit in m/s.
    #[clap(long, default_value_t = DEFAULT_SPEED_LIMIT_MS)]
    pub speed_limit: f64,
    /// Initial steering angle limit in degrees.
    #[clap(long, default_value_t = DEFAULT_ANGLE_LIMIT_DEGREES)]
    pub angle_limit: f64,
    /// Loop rate in Hz. Zero runs the loop as fast as possible.
    #[clap(long, default_value_t = 100.0)]
    pub rate: f64,
    /// Append velocity commands as JSON lines to this file.
    #[clap(long)]
    pub output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let Opts {
        wheelbase,
        speed_limit,
        angle_limit,
        rate,
        output,
    } = Opts::parse();

    ensure!(
        rate.is_finite() && rate >= 0.0,
        "rate must be a non-negative number, got {rate}"
    );
    let tick_period = if rate == 0.0 {
        Duration::ZERO
    } else {
        Duration::try_from_secs_f64(1.0 / rate).context("rate is too low")?
    };

    let mut teleop = TeleopInit {
        keymap: Keymap::default(),
        motion: MotionStateInit {
            speed_limit,
            angle_limit,
        },
        wheelbase,
        tick_period,
    }
    .build()?;

    let sink: Box<dyn CommandSink> = match output {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("unable to open {}", path.display()))?;
            Box::new(JsonLinesSink::new(BufWriter::new(file)))
        }
        None => Box::new(TracingSink),
    };

    teleop.run(TerminalKeys::new(), sink, io::stdout());

    Ok(())
}
