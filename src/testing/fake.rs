use crate::exception::{ExceptionHandler, HandlerVariant, Kind, ReportedError, http::Rendered};
use crate::testing::{ErrorRecord, ExpectationFailed, Matcher};
use std::any::Any;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

#[derive(Default)]
struct FakeState {
    only: Option<Vec<&'static Kind>>,
    records: Vec<ErrorRecord>,
    throw_on_report: bool,
}

/// Recording test double for the exception handler
///
/// Errors it intercepts are recorded instead of being handed to the wrapped handler.
/// With a filter set through [`Exceptions::fake_only`](crate::Exceptions::fake_only),
/// only the listed kinds are intercepted; anything else goes to the wrapped handler
/// untouched, including that handler's reportable hooks.
///
/// # Example
///
/// ```rust
/// use meshestra_exceptions::{Exceptions, Exception, Matcher, RuntimeError};
///
/// let exceptions = Exceptions::default();
/// let fake = exceptions.fake();
///
/// exceptions.report(RuntimeError::new("test 1")).unwrap();
///
/// fake.assert_reported(RuntimeError::KIND);
/// fake.assert_reported(Matcher::predicate(|e: &RuntimeError| e.message() == "test 1"));
/// ```
pub struct FakeHandler {
    handler: RwLock<Arc<dyn ExceptionHandler>>,
    state: Mutex<FakeState>,
}

impl FakeHandler {
    pub fn new(handler: Arc<dyn ExceptionHandler>, only: Option<Vec<&'static Kind>>) -> Self {
        Self {
            handler: RwLock::new(handler),
            state: Mutex::new(FakeState {
                only,
                ..FakeState::default()
            }),
        }
    }

    /// The wrapped handler
    pub fn handler(&self) -> Arc<dyn ExceptionHandler> {
        Arc::clone(&self.handler.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Wrap a different handler, keeping the records and flags
    pub fn set_handler(&self, handler: Arc<dyn ExceptionHandler>) -> &Self {
        tracing::debug!("Fake exception handler now wraps {}", handler.variant());
        *self.handler.write().unwrap_or_else(PoisonError::into_inner) = handler;
        self
    }

    pub(crate) fn set_only(&self, only: Option<Vec<&'static Kind>>) {
        self.state().only = only;
    }

    /// Raise intercepted errors from `report` as soon as they are recorded
    pub fn throw_on_report(&self) -> &Self {
        self.state().throw_on_report = true;
        self
    }

    pub fn is_throwing_on_report(&self) -> bool {
        self.state().throw_on_report
    }

    /// Whether `report` records this error rather than forwarding it
    pub fn intercepts(&self, error: &ReportedError) -> bool {
        match &self.state().only {
            Some(kinds) => kinds.iter().any(|kind| *kind == error.kind()),
            None => true,
        }
    }

    pub fn reported(&self) -> Vec<ErrorRecord> {
        self.state().records.clone()
    }

    pub fn reported_count(&self) -> usize {
        self.state().records.len()
    }

    /// Raise the first recorded error, if there is one
    pub fn throw_reported(&self) -> Result<(), ReportedError> {
        match self.state().records.first() {
            Some(record) => Err(record.error().clone()),
            None => Ok(()),
        }
    }

    pub fn try_assert_reported(&self, matcher: impl Into<Matcher>) -> Result<(), ExpectationFailed> {
        let matcher = matcher.into();
        if self.any_matches(&matcher) {
            Ok(())
        } else {
            Err(ExpectationFailed::not_reported(matcher.expected_kind()))
        }
    }

    pub fn try_assert_not_reported(
        &self,
        matcher: impl Into<Matcher>,
    ) -> Result<(), ExpectationFailed> {
        let matcher = matcher.into();
        if self.any_matches(&matcher) {
            Err(ExpectationFailed::unexpectedly_reported(matcher.expected_kind()))
        } else {
            Ok(())
        }
    }

    pub fn try_assert_nothing_reported(&self) -> Result<(), ExpectationFailed> {
        let state = self.state();
        if state.records.is_empty() {
            Ok(())
        } else {
            Err(ExpectationFailed::reported(
                state.records.iter().map(ErrorRecord::kind),
            ))
        }
    }

    pub fn try_assert_reported_count(&self, expected: usize) -> Result<(), ExpectationFailed> {
        let actual = self.reported_count();
        if actual == expected {
            Ok(())
        } else {
            Err(ExpectationFailed::count_mismatch(expected, actual))
        }
    }

    /// Assert that a matching error was reported
    #[track_caller]
    pub fn assert_reported(&self, matcher: impl Into<Matcher>) {
        if let Err(failure) = self.try_assert_reported(matcher) {
            failure.raise();
        }
    }

    /// Assert that no matching error was reported
    #[track_caller]
    pub fn assert_not_reported(&self, matcher: impl Into<Matcher>) {
        if let Err(failure) = self.try_assert_not_reported(matcher) {
            failure.raise();
        }
    }

    #[track_caller]
    pub fn assert_nothing_reported(&self) {
        if let Err(failure) = self.try_assert_nothing_reported() {
            failure.raise();
        }
    }

    #[track_caller]
    pub fn assert_reported_count(&self, expected: usize) {
        if let Err(failure) = self.try_assert_reported_count(expected) {
            failure.raise();
        }
    }

    fn any_matches(&self, matcher: &Matcher) -> bool {
        // Predicates are user code, so they run on a snapshot.
        let records = self.reported();
        records.iter().any(|record| matcher.matches(record.error()))
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ExceptionHandler for FakeHandler {
    fn report(&self, error: ReportedError) -> Result<(), ReportedError> {
        if !self.intercepts(&error) {
            return self.handler().report(error);
        }

        let throw_on_report = {
            let mut state = self.state();
            state.records.push(ErrorRecord::capture(error.clone()));
            state.throw_on_report
        };
        tracing::debug!(kind = %error.kind(), "Recorded reported exception: {}", error);

        if throw_on_report {
            return Err(error);
        }
        Ok(())
    }

    fn should_report(&self, error: &ReportedError) -> bool {
        self.handler().should_report(error)
    }

    fn render(&self, error: ReportedError) -> Result<Rendered, ReportedError> {
        self.handler().render(error)
    }

    fn variant(&self) -> HandlerVariant {
        HandlerVariant::Fake
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
