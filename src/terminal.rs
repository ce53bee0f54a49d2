/*!
Terminal input.

[KeySource] is the capability the control loop polls once per tick.
[TerminalKeys] implements it on top of crossterm; tests substitute scripted
sources. Echo is switched off through the scoped [EchoOff] guard, which
switches it back on when dropped, whichever way the loop ends.
*/

use crate::keymap::Input;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal,
};
use std::{
    io,
    ops::{Deref, DerefMut},
    time::Duration,
};
use tracing::{debug, warn};

pub trait KeySource {
    /// Turns echo (and line buffering) on or off.
    fn set_echo(&mut self, enabled: bool) -> io::Result<()>;

    /// Returns immediately, telling whether a key is ready to read.
    fn poll_available(&mut self) -> io::Result<bool>;

    /// Reads a single key. Only called after [KeySource::poll_available]
    /// returned `true`.
    fn read_input(&mut self) -> io::Result<Input>;
}

impl<K: KeySource + ?Sized> KeySource for &mut K {
    fn set_echo(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_echo(enabled)
    }

    fn poll_available(&mut self) -> io::Result<bool> {
        (**self).poll_available()
    }

    fn read_input(&mut self) -> io::Result<Input> {
        (**self).read_input()
    }
}

/// Polls the source once without blocking. Failures are logged and read as
/// "no key".
pub fn poll_input<K: KeySource + ?Sized>(source: &mut K) -> Input {
    match source.poll_available() {
        Ok(true) => source.read_input().unwrap_or_else(|err| {
            warn!(%err, "failed to read key");
            Input::None
        }),
        Ok(false) => Input::None,
        Err(err) => {
            warn!(%err, "failed to poll terminal");
            Input::None
        }
    }
}

/// Keeps terminal echo off while alive.
pub struct EchoOff<K: KeySource> {
    source: K,
}

impl<K: KeySource> EchoOff<K> {
    /// A failure to switch echo off is reported and otherwise ignored; the
    /// loop runs in whatever mode the terminal ended up in.
    pub fn acquire(mut source: K) -> Self {
        if let Err(err) = source.set_echo(false) {
            warn!(%err, "failed to disable terminal echo");
        }
        Self { source }
    }
}

impl<K: KeySource> Deref for EchoOff<K> {
    type Target = K;

    fn deref(&self) -> &Self::Target {
        &self.source
    }
}

impl<K: KeySource> DerefMut for EchoOff<K> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.source
    }
}

impl<K: KeySource> Drop for EchoOff<K> {
    fn drop(&mut self) {
        match self.source.set_echo(true) {
            Ok(()) => debug!("terminal echo restored"),
            Err(err) => warn!(%err, "failed to restore terminal echo"),
        }
    }
}

/// Keyboard of the controlling terminal.
///
/// Switching echo off puts the terminal in raw mode, so Ctrl-C arrives as a
/// key ([Input::Interrupt]) instead of a signal.
#[derive(Debug, Default)]
pub struct TerminalKeys {
    raw_mode: bool,
}

impl TerminalKeys {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeySource for TerminalKeys {
    fn set_echo(&mut self, enabled: bool) -> io::Result<()> {
        match (enabled, self.raw_mode) {
            (false, false) => {
                terminal::enable_raw_mode()?;
                self.raw_mode = true;
            }
            (true, true) => {
                terminal::disable_raw_mode()?;
                self.raw_mode = false;
            }
            _ => {}
        }
        Ok(())
    }

    fn poll_available(&mut self) -> io::Result<bool> {
        event::poll(Duration::ZERO)
    }

    fn read_input(&mut self) -> io::Result<Input> {
        Ok(match event::read()? {
            Event::Key(key) => key_to_input(key),
            _ => Input::None,
        })
    }
}

impl Drop for TerminalKeys {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
        }
    }
}

/// Arrow keys map to the last byte of their escape sequence (`ESC [ A` for
/// up and so on), the same symbol a byte-oriented reader would see.
pub fn key_to_input(key: KeyEvent) -> Input {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return Input::None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Input::Interrupt,
        KeyCode::Char(c) => Input::Symbol(c),
        KeyCode::Up => Input::Symbol('A'),
        KeyCode::Down => Input::Symbol('B'),
        KeyCode::Right => Input::Symbol('C'),
        KeyCode::Left => Input::Symbol('D'),
        _ => Input::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_map_to_escape_sequence_letters() {
        assert_eq!(key_to_input(press(KeyCode::Up)), Input::Symbol('A'));
        assert_eq!(key_to_input(press(KeyCode::Down)), Input::Symbol('B'));
        assert_eq!(key_to_input(press(KeyCode::Right)), Input::Symbol('C'));
        assert_eq!(key_to_input(press(KeyCode::Left)), Input::Symbol('D'));
    }

    #[test]
    fn characters_pass_through() {
        assert_eq!(key_to_input(press(KeyCode::Char('w'))), Input::Symbol('w'));
        assert_eq!(key_to_input(press(KeyCode::Char('0'))), Input::Symbol('0'));
    }

    #[test]
    fn ctrl_c_is_interrupt() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_input(key), Input::Interrupt);
    }

    #[test]
    fn releases_and_unmapped_keys_are_ignored() {
        let mut release = press(KeyCode::Char('w'));
        release.kind = KeyEventKind::Release;
        assert_eq!(key_to_input(release), Input::None);
        assert_eq!(key_to_input(press(KeyCode::F(1))), Input::None);
        assert_eq!(key_to_input(press(KeyCode::Esc)), Input::None);
    }

    #[derive(Default)]
    struct Flaky {
        echo: Vec<bool>,
        polls: VecDeque<io::Result<bool>>,
        reads: VecDeque<io::Result<Input>>,
    }

    impl KeySource for Flaky {
        fn set_echo(&mut self, enabled: bool) -> io::Result<()> {
            self.echo.push(enabled);
            Err(io::Error::new(io::ErrorKind::Unsupported, "not a tty"))
        }

        fn poll_available(&mut self) -> io::Result<bool> {
            self.polls.pop_front().unwrap_or(Ok(false))
        }

        fn read_input(&mut self) -> io::Result<Input> {
            self.reads.pop_front().unwrap_or(Ok(Input::None))
        }
    }

    #[test]
    fn failures_read_as_no_key() {
        let mut source = Flaky {
            polls: VecDeque::from([
                Err(io::Error::new(io::ErrorKind::Other, "poll")),
                Ok(true),
                Ok(true),
            ]),
            reads: VecDeque::from([
                Err(io::Error::new(io::ErrorKind::Other, "read")),
                Ok(Input::Symbol('A')),
            ]),
            ..Default::default()
        };

        assert_eq!(poll_input(&mut source), Input::None);
        assert_eq!(poll_input(&mut source), Input::None);
        assert_eq!(poll_input(&mut source), Input::Symbol('A'));
        assert_eq!(poll_input(&mut source), Input::None);
    }

    #[test]
    fn echo_guard_restores_even_when_toggling_fails() {
        let mut source = Flaky::default();
        drop(EchoOff::acquire(&mut source));
        assert_eq!(source.echo, vec![false, true]);
    }
}
