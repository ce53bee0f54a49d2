//! Lookup tables from input symbols to numeric update rules.

use crate::{
    constants::{
        ANGLE_STEP_DEGREES, LIMIT_GROW_FACTOR, LIMIT_SHRINK_FACTOR, RESET_SYMBOL, SPEED_STEP_MS,
    },
    error::{Error, Result},
};
use noisy_float::types::R64;
use std::collections::{btree_map::Entry, BTreeMap};

/// Additive update rule: `new = multiplier * current + increment`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binding {
    pub multiplier: f64,
    pub increment: f64,
}

impl Binding {
    pub const RESET: Self = Self::new(0.0, 0.0);

    pub const fn new(multiplier: f64, increment: f64) -> Self {
        Self {
            multiplier,
            increment,
        }
    }

    pub const fn step(increment: f64) -> Self {
        Self::new(1.0, increment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitAxis {
    Speed,
    Angle,
}

/// Multiplicative rule applied to one of the two limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitBinding {
    pub axis: LimitAxis,
    pub factor: f64,
}

impl LimitBinding {
    pub const fn new(axis: LimitAxis, factor: f64) -> Self {
        Self { axis, factor }
    }
}

/// Values a [BindingTable] can hold.
pub trait TableValue: Copy {
    fn validate(&self, symbol: char) -> Result<()>;
}

impl TableValue for Binding {
    fn validate(&self, symbol: char) -> Result<()> {
        let Self {
            multiplier,
            increment,
        } = *self;
        finite(symbol, "multiplier", multiplier)?;
        finite(symbol, "increment", increment)?;
        Ok(())
    }
}

impl TableValue for LimitBinding {
    fn validate(&self, symbol: char) -> Result<()> {
        let factor = finite(symbol, "factor", self.factor)?;
        if factor.raw() <= 0.0 {
            return Err(Error::InvalidBinding {
                symbol,
                field: "factor",
                value: self.factor,
            });
        }
        Ok(())
    }
}

fn finite(symbol: char, field: &'static str, value: f64) -> Result<R64> {
    R64::try_new(value).ok_or(Error::InvalidBinding {
        symbol,
        field,
        value,
    })
}

/// Immutable mapping from a symbol to a rule. Symbols are unique per table.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingTable<V> {
    entries: BTreeMap<char, V>,
}

impl<V: TableValue> BindingTable<V> {
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, V)>,
    {
        let mut map = BTreeMap::new();

        for (symbol, value) in entries {
            value.validate(symbol)?;

            match map.entry(symbol) {
                Entry::Vacant(entry) => {
                    entry.insert(value);
                }
                Entry::Occupied(_) => return Err(Error::DuplicateSymbol(symbol)),
            }
        }

        Ok(Self { entries: map })
    }
}

impl<V: Copy> BindingTable<V> {
    pub fn get(&self, symbol: char) -> Option<V> {
        self.entries.get(&symbol).copied()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.entries.contains_key(&symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn from_trusted<const N: usize>(entries: [(char, V); N]) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

pub fn default_speed_table() -> BindingTable<Binding> {
    BindingTable::from_trusted([
        ('A', Binding::step(SPEED_STEP_MS)),
        ('B', Binding::step(-SPEED_STEP_MS)),
        (RESET_SYMBOL, Binding::RESET),
    ])
}

pub fn default_angle_table() -> BindingTable<Binding> {
    BindingTable::from_trusted([
        ('C', Binding::step(-ANGLE_STEP_DEGREES)),
        ('D', Binding::step(ANGLE_STEP_DEGREES)),
        (RESET_SYMBOL, Binding::RESET),
    ])
}

pub fn default_limit_table() -> BindingTable<LimitBinding> {
    use LimitAxis::*;

    BindingTable::from_trusted([
        ('e', LimitBinding::new(Angle, LIMIT_GROW_FACTOR)),
        ('d', LimitBinding::new(Angle, LIMIT_SHRINK_FACTOR)),
        ('w', LimitBinding::new(Speed, LIMIT_GROW_FACTOR)),
        ('s', LimitBinding::new(Speed, LIMIT_SHRINK_FACTOR)),
    ])
}
