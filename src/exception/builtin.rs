//! Built-in exception kinds
//!
//! ```text
//! Failure
//! ├── RuntimeError
//! └── LogicError
//!     └── InvalidArgumentError
//! ```

use crate::exception::{Exception, Kind};
use thiserror::Error;

/// The root exception kind, for errors with no more specific classification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Failure {
    message: String,
}

/// An error that can only be detected while the program runs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RuntimeError {
    message: String,
}

/// An error in the program's logic
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LogicError {
    message: String,
}

/// An argument was not of the expected value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvalidArgumentError {
    message: String,
}

macro_rules! builtin_exception {
    ($ty:ident, $parent:ty) => {
        builtin_exception!(@impl $ty, Some(<$parent as Exception>::KIND));
    };
    ($ty:ident) => {
        builtin_exception!(@impl $ty, None);
    };
    (@impl $ty:ident, $parent:expr) => {
        impl $ty {
            pub fn new(message: impl Into<String>) -> Self {
                Self {
                    message: message.into(),
                }
            }

            pub fn message(&self) -> &str {
                &self.message
            }
        }

        impl Exception for $ty {
            const KIND: &'static Kind = &Kind::new::<$ty>(stringify!($ty), $parent);
        }
    };
}

builtin_exception!(Failure);
builtin_exception!(RuntimeError, Failure);
builtin_exception!(LogicError, Failure);
builtin_exception!(InvalidArgumentError, LogicError);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_hierarchy() {
        assert!(RuntimeError::KIND.is_a(Failure::KIND));
        assert!(InvalidArgumentError::KIND.is_a(LogicError::KIND));
        assert!(InvalidArgumentError::KIND.is_a(Failure::KIND));
        assert!(!InvalidArgumentError::KIND.is_a(RuntimeError::KIND));
        assert!(!Failure::KIND.is_a(RuntimeError::KIND));
    }

    #[test]
    fn test_names_and_messages() {
        let error = InvalidArgumentError::new("bad id");
        assert_eq!(InvalidArgumentError::KIND.name(), "InvalidArgumentError");
        assert_eq!(error.message(), "bad id");
        assert_eq!(error.to_string(), "bad id");
    }
}
