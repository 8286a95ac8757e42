use crate::exception::{Exception, Failure, Kind};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// A type-erased error on its way through the exception handler.
///
/// Cloning is cheap and clones share identity, so the same error can be recorded by a
/// fake, re-raised to the caller and compared with [`ReportedError::ptr_eq`].
#[derive(Clone)]
pub struct ReportedError {
    inner: Arc<dyn StdError + Send + Sync + 'static>,
    kind: &'static Kind,
}

impl ReportedError {
    pub fn new<E: Exception>(error: E) -> Self {
        Self {
            inner: Arc::new(error),
            kind: E::KIND,
        }
    }

    /// Wrap an error whose concrete type is not known, classifying it as `kind`
    pub fn from_boxed(kind: &'static Kind, error: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Self {
            inner: Arc::from(error),
            kind,
        }
    }

    pub fn kind(&self) -> &'static Kind {
        self.kind
    }

    /// Whether the error is of kind `E` or one of its subkinds
    pub fn is<E: Exception>(&self) -> bool {
        self.kind.is_a(E::KIND)
    }

    /// The concrete error, if it is exactly an `E`
    pub fn downcast_ref<E: Exception>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }

    pub fn message(&self) -> String {
        self.inner.to_string()
    }

    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.inner.as_ref()
    }

    /// Whether both values are the same reported error instance
    pub fn ptr_eq(&self, other: &ReportedError) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn downgrade(&self) -> std::sync::Weak<dyn StdError + Send + Sync + 'static> {
        Arc::downgrade(&self.inner)
    }
}

impl fmt::Debug for ReportedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportedError")
            .field("kind", &self.kind.name())
            .field("error", &self.inner)
            .finish()
    }
}

impl fmt::Display for ReportedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl StdError for ReportedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source()
    }
}

impl<E: Exception> From<E> for ReportedError {
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl From<anyhow::Error> for ReportedError {
    fn from(error: anyhow::Error) -> Self {
        Self::from_boxed(Failure::KIND, error.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exception::{InvalidArgumentError, LogicError, RuntimeError};

    #[test]
    fn test_kind_is_captured_from_the_concrete_type() {
        let error = ReportedError::new(InvalidArgumentError::new("bad"));
        assert_eq!(error.kind(), InvalidArgumentError::KIND);
        assert!(error.is::<LogicError>());
        assert!(error.is::<Failure>());
        assert!(!error.is::<RuntimeError>());
    }

    #[test]
    fn test_downcast_is_exact() {
        let error: ReportedError = InvalidArgumentError::new("bad").into();
        assert_eq!(
            error.downcast_ref::<InvalidArgumentError>().map(|e| e.message()),
            Some("bad")
        );
        assert!(error.downcast_ref::<LogicError>().is_none());
    }

    #[test]
    fn test_clones_share_identity() {
        let error = ReportedError::new(RuntimeError::new("x"));
        let clone = error.clone();
        let other = ReportedError::new(RuntimeError::new("x"));
        assert!(error.ptr_eq(&clone));
        assert!(!error.ptr_eq(&other));
    }

    #[test]
    fn test_from_anyhow_is_a_failure() {
        let error = ReportedError::from(anyhow::anyhow!("disk full"));
        assert_eq!(error.kind(), Failure::KIND);
        assert_eq!(error.message(), "disk full");
    }
}
