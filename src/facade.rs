//! The `Exceptions` facade
//!
//! Resolves the exception handler bound in a [`Container`] and swaps it for a
//! [`FakeHandler`] in tests. The container is the single source of truth: the facade
//! holds no handler of its own, so the [`report`](crate::report) helper and the facade
//! always agree on which handler is active.

use crate::config::ExceptionsConfig;
use crate::di::Container;
use crate::exception::{ExceptionHandler, Handler, Kind, ReportedError};
use crate::testing::{FakeHandler, Matcher};
use std::sync::Arc;

/// The handler bound in `container`, binding a production handler if none is bound yet
pub fn handler_for(container: &Container) -> Arc<dyn ExceptionHandler> {
    container.resolve_or_insert_with::<dyn ExceptionHandler, _>(|| {
        Arc::new(Handler::new(ExceptionsConfig::from_env()))
    })
}

/// Facade over the bound exception handler
///
/// # Example
///
/// ```rust
/// use meshestra_exceptions::{Exceptions, Exception, InvalidArgumentError, RuntimeError};
///
/// let exceptions = Exceptions::default();
/// exceptions.fake_only([RuntimeError::KIND]);
///
/// exceptions.report(RuntimeError::new("kept")).unwrap();
/// exceptions.report(InvalidArgumentError::new("forwarded")).unwrap();
///
/// exceptions.assert_reported(RuntimeError::KIND);
/// exceptions.assert_not_reported(InvalidArgumentError::KIND);
/// ```
#[derive(Clone)]
pub struct Exceptions {
    container: Arc<Container>,
}

impl Exceptions {
    pub fn new(container: Arc<Container>) -> Self {
        Self { container }
    }

    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    /// The currently bound handler
    pub fn root(&self) -> Arc<dyn ExceptionHandler> {
        handler_for(&self.container)
    }

    /// Bind a different handler
    pub fn swap(&self, handler: Arc<dyn ExceptionHandler>) {
        tracing::info!("Binding {} exception handler", handler.variant());
        self.container.instance::<dyn ExceptionHandler>(handler);
    }

    pub fn is_fake(&self) -> bool {
        self.root().is::<FakeHandler>()
    }

    /// The bound fake, if faking is active
    pub fn faked(&self) -> Option<Arc<FakeHandler>> {
        self.root().downcast_arc::<FakeHandler>()
    }

    /// Record every reported error
    ///
    /// Returns the bound fake if there is one, so records made earlier in the same
    /// test are kept; otherwise wraps the bound handler in a new fake.
    pub fn fake(&self) -> Arc<FakeHandler> {
        self.install_fake(None)
    }

    /// Record only errors of exactly these kinds, forwarding the rest
    pub fn fake_only(&self, kinds: impl IntoIterator<Item = &'static Kind>) -> Arc<FakeHandler> {
        self.install_fake(Some(kinds.into_iter().collect()))
    }

    fn install_fake(&self, only: Option<Vec<&'static Kind>>) -> Arc<FakeHandler> {
        let root = self.root();
        if let Some(fake) = Arc::clone(&root).downcast_arc::<FakeHandler>() {
            fake.set_only(only);
            return fake;
        }

        let fake = Arc::new(FakeHandler::new(root, only));
        self.swap(fake.clone());
        fake
    }

    pub fn report(&self, error: impl Into<ReportedError>) -> Result<(), ReportedError> {
        self.root().report(error.into())
    }

    pub fn should_report(&self, error: &ReportedError) -> bool {
        self.root().should_report(error)
    }

    #[track_caller]
    pub fn assert_reported(&self, matcher: impl Into<Matcher>) {
        self.expect_fake().assert_reported(matcher);
    }

    #[track_caller]
    pub fn assert_not_reported(&self, matcher: impl Into<Matcher>) {
        self.expect_fake().assert_not_reported(matcher);
    }

    #[track_caller]
    pub fn assert_nothing_reported(&self) {
        self.expect_fake().assert_nothing_reported();
    }

    #[track_caller]
    pub fn assert_reported_count(&self, expected: usize) {
        self.expect_fake().assert_reported_count(expected);
    }

    #[track_caller]
    pub fn throw_reported(&self) -> Result<(), ReportedError> {
        self.expect_fake().throw_reported()
    }

    #[track_caller]
    fn expect_fake(&self) -> Arc<FakeHandler> {
        match self.faked() {
            Some(fake) => fake,
            None => panic!("exception handler is not faked; call Exceptions::fake() first"),
        }
    }
}

impl Default for Exceptions {
    fn default() -> Self {
        Self::new(Arc::new(Container::new()))
    }
}
