use crate::exception::{Exception, Kind, ReportedError};

type Test = Box<dyn Fn(&ReportedError) -> bool + Send + Sync>;

/// Selects reported errors in assertions.
///
/// A bare kind converts into a matcher, so assertions accept either
/// `RuntimeError::KIND` or a predicate built here.
pub enum Matcher {
    /// Errors of this kind or any subkind
    Kind(&'static Kind),
    /// Errors of `kind` (or a subkind) that also pass `test`
    Predicate { kind: &'static Kind, test: Test },
}

impl Matcher {
    pub fn kind<E: Exception>() -> Self {
        Self::Kind(E::KIND)
    }

    /// Match errors that are exactly an `E` and satisfy `test`
    ///
    /// ```rust
    /// use meshestra_exceptions::{Matcher, RuntimeError};
    ///
    /// let matcher = Matcher::predicate(|e: &RuntimeError| e.message() == "test 1");
    /// assert!(matcher.matches(&RuntimeError::new("test 1").into()));
    /// ```
    pub fn predicate<E, F>(test: F) -> Self
    where
        E: Exception,
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        Self::Predicate {
            kind: E::KIND,
            test: Box::new(move |error| error.downcast_ref::<E>().is_some_and(&test)),
        }
    }

    /// Match errors of `kind` or a subkind that satisfy `test`
    pub fn when<F>(kind: &'static Kind, test: F) -> Self
    where
        F: Fn(&ReportedError) -> bool + Send + Sync + 'static,
    {
        Self::Predicate {
            kind,
            test: Box::new(test),
        }
    }

    /// The kind named in failure messages
    pub fn expected_kind(&self) -> &'static Kind {
        match self {
            Self::Kind(kind) | Self::Predicate { kind, .. } => *kind,
        }
    }

    pub fn matches(&self, error: &ReportedError) -> bool {
        match self {
            Self::Kind(kind) => error.kind().is_a(kind),
            Self::Predicate { kind, test } => error.kind().is_a(kind) && test(error),
        }
    }
}

impl From<&'static Kind> for Matcher {
    fn from(kind: &'static Kind) -> Self {
        Self::Kind(kind)
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kind(kind) => f.debug_tuple("Kind").field(&kind.name()).finish(),
            Self::Predicate { kind, .. } => f
                .debug_struct("Predicate")
                .field("kind", &kind.name())
                .finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exception::{Failure, InvalidArgumentError, LogicError, RuntimeError};

    #[test]
    fn test_kind_matches_subkinds() {
        let error = ReportedError::new(InvalidArgumentError::new("x"));
        assert!(Matcher::kind::<InvalidArgumentError>().matches(&error));
        assert!(Matcher::from(LogicError::KIND).matches(&error));
        assert!(Matcher::from(Failure::KIND).matches(&error));
        assert!(!Matcher::kind::<RuntimeError>().matches(&error));
    }

    #[test]
    fn test_predicate_requires_its_own_type() {
        let error = ReportedError::new(RuntimeError::new("test 1"));
        assert!(Matcher::predicate(|e: &RuntimeError| e.message() == "test 1").matches(&error));
        assert!(!Matcher::predicate(|e: &RuntimeError| e.message() == "test 2").matches(&error));
        assert!(!Matcher::predicate(|_: &InvalidArgumentError| true).matches(&error));
        // A predicate typed for the parent never sees the child's concrete type.
        assert!(!Matcher::predicate(|_: &Failure| true).matches(&error));
    }

    #[test]
    fn test_when_checks_kind_before_predicate() {
        let matcher = Matcher::when(LogicError::KIND, |e| e.message().starts_with("bad"));
        assert!(matcher.matches(&InvalidArgumentError::new("bad id").into()));
        assert!(!matcher.matches(&RuntimeError::new("bad id").into()));
        assert_eq!(matcher.expected_kind(), LogicError::KIND);
    }
}
