use thiserror::Error;

/// Every solver validates its whole input before computing anything, so this is the only failure mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for returning [Error::InvalidInput] with a formatted reason.
macro_rules! invalid_input {
    ($($arg:tt)*) => {
        return Err($crate::error::Error::InvalidInput(format!($($arg)*)))
    };
}
pub(crate) use invalid_input;
