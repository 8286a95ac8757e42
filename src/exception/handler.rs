use crate::exception::{ReportedError, http::Rendered};
use std::any::Any;
use std::sync::Arc;

/// Which handler implementation is bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::AsRefStr)]
pub enum HandlerVariant {
    /// The production [`Handler`](crate::Handler)
    Production,
    /// The handler bound while a test runs without exception handling
    PassThrough,
    /// The recording test double
    Fake,
}

/// The ExceptionHandler trait
///
/// Receives reported errors and decides what happens to errors that escape a
/// dispatch boundary. `report` returning `Err` propagates an error to the caller,
/// either the reported error itself or a replacement.
pub trait ExceptionHandler: Send + Sync + 'static {
    /// Report an error
    fn report(&self, error: ReportedError) -> Result<(), ReportedError>;

    /// Whether `report` would do anything with this error
    fn should_report(&self, error: &ReportedError) -> bool;

    /// Turn an escaped error into a response, or raise it further
    fn render(&self, error: ReportedError) -> Result<Rendered, ReportedError>;

    fn variant(&self) -> HandlerVariant;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl dyn ExceptionHandler {
    pub fn is<T: ExceptionHandler>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: ExceptionHandler>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_arc<T: ExceptionHandler>(self: Arc<Self>) -> Option<Arc<T>> {
        self.into_any().downcast::<T>().ok()
    }
}
