/*!
Key classification.

Translates polled [Input]s into [Action]s that the motion state applies. Tables
are consulted in the order speed, angle, limit and the first one containing
the symbol claims it, so a symbol shared across tables never fires twice. The
quit symbol is checked before any table.
*/

use crate::{
    binding::{
        default_angle_table, default_limit_table, default_speed_table, Binding, BindingTable,
        LimitBinding,
    },
    constants::QUIT_SYMBOL,
};

/// What the terminal produced during one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    None,
    Symbol(char),
    /// Ctrl-C while the terminal is in raw mode.
    Interrupt,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Speed(Binding),
    Angle(Binding),
    Limit(LimitBinding),
    Quit,
    NoOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Speed,
    Angle,
    Limit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Keymap {
    speed: BindingTable<Binding>,
    angle: BindingTable<Binding>,
    limit: BindingTable<LimitBinding>,
    quit: char,
}

impl Keymap {
    pub fn new(
        speed: BindingTable<Binding>,
        angle: BindingTable<Binding>,
        limit: BindingTable<LimitBinding>,
        quit: char,
    ) -> Self {
        Self {
            speed,
            angle,
            limit,
            quit,
        }
    }

    pub fn classify(&self, input: Input) -> Action {
        let symbol = match input {
            Input::None => return Action::NoOp,
            Input::Interrupt => return Action::Quit,
            Input::Symbol(symbol) => symbol,
        };

        if symbol == self.quit {
            return Action::Quit;
        }

        if let Some(binding) = self.speed.get(symbol) {
            Action::Speed(binding)
        } else if let Some(binding) = self.angle.get(symbol) {
            Action::Angle(binding)
        } else if let Some(binding) = self.limit.get(symbol) {
            Action::Limit(binding)
        } else {
            Action::NoOp
        }
    }

    /// Symbols present in more than one table, together with the table that
    /// wins classification.
    pub fn overlaps(&self) -> Vec<(char, TableKind)> {
        let mut overlaps: Vec<_> = self
            .speed
            .symbols()
            .filter(|&s| self.angle.contains(s) || self.limit.contains(s))
            .map(|s| (s, TableKind::Speed))
            .collect();
        overlaps.extend(
            self.angle
                .symbols()
                .filter(|&s| !self.speed.contains(s) && self.limit.contains(s))
                .map(|s| (s, TableKind::Angle)),
        );
        overlaps.sort_by_key(|&(symbol, _)| symbol);
        overlaps
    }

    pub fn quit_symbol(&self) -> char {
        self.quit
    }

    pub fn speed_table(&self) -> &BindingTable<Binding> {
        &self.speed
    }

    pub fn angle_table(&self) -> &BindingTable<Binding> {
        &self.angle
    }

    pub fn limit_table(&self) -> &BindingTable<LimitBinding> {
        &self.limit
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            speed: default_speed_table(),
            angle: default_angle_table(),
            limit: default_limit_table(),
            quit: QUIT_SYMBOL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{binding::LimitAxis, constants::RESET_SYMBOL};

    #[test]
    fn no_input_is_noop() {
        assert_eq!(Keymap::default().classify(Input::None), Action::NoOp);
    }

    #[test]
    fn unknown_symbol_is_noop() {
        let keymap = Keymap::default();
        for symbol in ['x', ' ', '\x1b', '[', 'Q'] {
            assert_eq!(keymap.classify(Input::Symbol(symbol)), Action::NoOp);
        }
    }

    #[test]
    fn quit_and_interrupt_classify_as_quit() {
        let keymap = Keymap::default();
        assert_eq!(keymap.classify(Input::Symbol('q')), Action::Quit);
        assert_eq!(keymap.classify(Input::Interrupt), Action::Quit);
    }

    #[test]
    fn quit_wins_over_tables() {
        let speed = BindingTable::new([('q', Binding::step(1.0))]).unwrap();
        let keymap = Keymap::new(speed, default_angle_table(), default_limit_table(), 'q');
        assert_eq!(keymap.classify(Input::Symbol('q')), Action::Quit);
    }

    #[test]
    fn arrow_symbols_classify() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.classify(Input::Symbol('A')),
            Action::Speed(Binding::step(0.2))
        );
        assert_eq!(
            keymap.classify(Input::Symbol('B')),
            Action::Speed(Binding::step(-0.2))
        );
        assert_eq!(
            keymap.classify(Input::Symbol('C')),
            Action::Angle(Binding::step(-10.0))
        );
        assert_eq!(
            keymap.classify(Input::Symbol('D')),
            Action::Angle(Binding::step(10.0))
        );
    }

    #[test]
    fn limit_symbols_classify() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.classify(Input::Symbol('w')),
            Action::Limit(LimitBinding::new(LimitAxis::Speed, 1.1))
        );
        assert_eq!(
            keymap.classify(Input::Symbol('d')),
            Action::Limit(LimitBinding::new(LimitAxis::Angle, 0.9))
        );
    }

    #[test]
    fn shared_reset_symbol_resolves_to_speed() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.classify(Input::Symbol(RESET_SYMBOL)),
            Action::Speed(Binding::RESET)
        );
        assert_eq!(keymap.overlaps(), vec![(RESET_SYMBOL, TableKind::Speed)]);
    }

    #[test]
    fn angle_reset_is_reachable_without_speed_entry() {
        let speed = BindingTable::new([('A', Binding::step(0.2))]).unwrap();
        let keymap = Keymap::new(speed, default_angle_table(), default_limit_table(), 'q');
        assert_eq!(
            keymap.classify(Input::Symbol(RESET_SYMBOL)),
            Action::Angle(Binding::RESET)
        );
        assert!(keymap.overlaps().is_empty());
    }
}
