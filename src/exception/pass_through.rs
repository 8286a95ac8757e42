use crate::exception::{ExceptionHandler, HandlerVariant, Kind, ReportedError, http::Rendered};
use std::any::Any;
use std::sync::Arc;

/// Handler bound while a test runs without exception handling.
///
/// Reports nothing and raises every escaped error to the test instead of rendering it,
/// so failures are not hidden behind an error response. Kinds listed in `except` are
/// still rendered by the original handler.
pub struct PassThroughHandler {
    original: Arc<dyn ExceptionHandler>,
    except: Vec<&'static Kind>,
}

impl PassThroughHandler {
    pub fn new(original: Arc<dyn ExceptionHandler>, except: Vec<&'static Kind>) -> Self {
        Self { original, except }
    }

    /// The handler that was bound before exception handling was disabled
    pub fn original(&self) -> &Arc<dyn ExceptionHandler> {
        &self.original
    }

    fn is_excepted(&self, error: &ReportedError) -> bool {
        self.except.iter().any(|kind| error.kind().is_a(kind))
    }
}

impl ExceptionHandler for PassThroughHandler {
    fn report(&self, _error: ReportedError) -> Result<(), ReportedError> {
        Ok(())
    }

    fn should_report(&self, _error: &ReportedError) -> bool {
        false
    }

    fn render(&self, error: ReportedError) -> Result<Rendered, ReportedError> {
        if self.is_excepted(&error) {
            return self.original.render(error);
        }
        Err(error)
    }

    fn variant(&self) -> HandlerVariant {
        HandlerVariant::PassThrough
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exception::{Exception, Handler, InvalidArgumentError, LogicError, RuntimeError};

    fn pass_through(except: Vec<&'static Kind>) -> PassThroughHandler {
        PassThroughHandler::new(Arc::new(Handler::default()), except)
    }

    #[test]
    fn test_report_is_silent() {
        let handler = pass_through(Vec::new());
        let error = ReportedError::new(RuntimeError::new("x"));
        assert!(!handler.should_report(&error));
        assert!(handler.report(error).is_ok());
    }

    #[test]
    fn test_render_raises() {
        let handler = pass_through(Vec::new());
        let error = ReportedError::new(RuntimeError::new("x"));
        let raised = handler.render(error.clone()).unwrap_err();
        assert!(raised.ptr_eq(&error));
    }

    #[test]
    fn test_excepted_kinds_are_rendered_by_the_original() {
        let handler = pass_through(vec![LogicError::KIND]);
        let rendered = handler
            .render(InvalidArgumentError::new("x").into())
            .unwrap();
        assert_eq!(rendered.status, 500);
        assert!(handler.render(RuntimeError::new("x").into()).is_err());
        assert_eq!(handler.original().variant(), HandlerVariant::Production);
    }
}
