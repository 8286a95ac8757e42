//! Free-standing reporting helpers
//!
//! These resolve the handler from the container on every call instead of going
//! through the [`Exceptions`](crate::Exceptions) facade, so application code only
//! needs the container it was built with.

use crate::di::Container;
use crate::exception::ReportedError;
use crate::facade::handler_for;

/// Report an error to the bound exception handler
///
/// `Err` means the handler raised an error, either the one reported (a fake set to
/// throw on report) or a replacement from a reportable hook.
pub fn report(container: &Container, error: impl Into<ReportedError>) -> Result<(), ReportedError> {
    handler_for(container).report(error.into())
}

/// Run `f`, reporting its error instead of returning it
///
/// Yields `Ok(None)` when `f` failed and the failure was reported. An error raised while
/// reporting is returned as `Err`.
///
/// ```rust
/// use meshestra_exceptions::{Container, RuntimeError, rescue};
///
/// let container = Container::new();
/// let value = rescue(&container, || Err::<u32, _>(RuntimeError::new("flaky"))).unwrap();
/// assert_eq!(value, None);
/// ```
pub fn rescue<T, E, F>(container: &Container, f: F) -> Result<Option<T>, ReportedError>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<ReportedError>,
{
    match f() {
        Ok(value) => Ok(Some(value)),
        Err(error) => {
            report(container, error)?;
            Ok(None)
        }
    }
}

/// Like [`rescue`], substituting `fallback` when `f` failed
pub fn rescue_or<T, E, F>(container: &Container, f: F, fallback: T) -> Result<T, ReportedError>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<ReportedError>,
{
    Ok(rescue(container, f)?.unwrap_or(fallback))
}
