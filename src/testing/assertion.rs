use crate::exception::Kind;
use thiserror::Error;

/// A failed expectation about reported exceptions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ExpectationFailed {
    message: String,
}

impl ExpectationFailed {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn not_reported(kind: &Kind) -> Self {
        Self::new(format!("The expected [{kind}] exception was not reported."))
    }

    pub fn unexpectedly_reported(kind: &Kind) -> Self {
        Self::new(format!("The unexpected [{kind}] exception was reported."))
    }

    pub fn reported<'a>(kinds: impl IntoIterator<Item = &'a Kind>) -> Self {
        let names: Vec<_> = kinds.into_iter().map(Kind::name).collect();
        Self::new(format!(
            "The following exceptions were reported: {}.",
            names.join(", ")
        ))
    }

    pub fn count_mismatch(expected: usize, actual: usize) -> Self {
        Self::new(format!(
            "The expected number of exceptions reported was {expected}, but the actual number was {actual}."
        ))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Raise the failure the way `assert!` does
    #[track_caller]
    pub fn raise(self) -> ! {
        panic!("{}", self.message)
    }
}
