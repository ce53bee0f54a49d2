use crate::motion::MotionState;
use std::io::Write;
use tracing::warn;

/// User-facing text output.
///
/// Lines end in `\r\n` because the terminal runs in raw mode while the loop
/// is active. Write errors are logged and dropped.
#[derive(Debug)]
pub struct Console<W> {
    writer: W,
}

impl<W: Write> Console<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn banner(&mut self, usage: &str) {
        for line in usage.lines() {
            self.line(line);
        }
    }

    pub fn status(&mut self, state: &MotionState, last: Option<char>) {
        match last {
            Some(symbol) => self.line(&format!("Current: {state} | Last command: {symbol}")),
            None => self.line(&format!("Current: {state} | Awaiting command...")),
        }
    }

    pub fn exit(&mut self) {
        self.line("Exit");
    }

    fn line(&mut self, text: &str) {
        let result = write!(self.writer, "{text}\r\n").and_then(|()| self.writer.flush());
        if let Err(err) = result {
            warn!(%err, "failed to write to console");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::MotionStateInit;

    #[test]
    fn status_lines() {
        let mut state = MotionStateInit::default().build().unwrap();
        let mut console = Console::new(Vec::new());

        console.status(&state, None);
        state.apply_angle_update(1.0, 10.0);
        console.status(&state, Some('D'));
        console.exit();

        let text = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(
            text,
            "Current: speed 0.00(lim 1.00) angle 0.00(lim 20.00) | Awaiting command...\r\n\
             Current: speed 0.00(lim 1.00) angle 10.00(lim 20.00) | Last command: D\r\n\
             Exit\r\n"
        );
    }

    #[test]
    fn banner_uses_raw_mode_line_endings() {
        let mut console = Console::new(Vec::new());
        console.banner("a\nb\n");
        assert_eq!(console.into_inner(), b"a\r\nb\r\n");
    }
}
