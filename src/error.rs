use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{name} limit must be finite and positive, got {value}")]
    InvalidLimit { name: &'static str, value: f64 },

    #[error("wheelbase must be finite and positive, got {0}")]
    InvalidWheelbase(f64),

    #[error("binding for {symbol:?} has invalid {field} {value}")]
    InvalidBinding {
        symbol: char,
        field: &'static str,
        value: f64,
    },

    #[error("symbol {0:?} is bound twice in the same table")]
    DuplicateSymbol(char),
}
