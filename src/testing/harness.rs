use crate::config::ExceptionsConfig;
use crate::di::{Container, ContainerBuilder};
use crate::exception::{
    ExceptionHandler, Handler, Kind, PassThroughHandler, ReportedError, http::Rendered,
};
use crate::facade::Exceptions;
use crate::testing::FakeHandler;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const OK: u16 = 200;

/// What came out of a [`TestHarness::call`]
#[derive(Debug)]
pub enum Outcome<T> {
    /// The call returned normally
    Completed(T),
    /// The call failed and the bound handler rendered the error
    Rendered(Rendered),
}

impl<T> Outcome<T> {
    pub fn status(&self) -> u16 {
        match self {
            Self::Completed(_) => OK,
            Self::Rendered(rendered) => rendered.status,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Per-test environment for code that reports exceptions
///
/// Every harness owns a fresh container with a production [`Handler`] bound, so
/// nothing recorded in one test is visible in another.
///
/// # Example
///
/// ```rust
/// use meshestra_exceptions::{Failure, RuntimeError, TestHarness};
///
/// let harness = TestHarness::set_up();
/// harness.exceptions().fake().throw_on_report();
/// harness.without_exception_handling();
///
/// let raised = harness
///     .call(|exceptions| exceptions.report(Failure::new("Test exception")))
///     .unwrap_err();
/// assert_eq!(raised.message(), "Test exception");
///
/// harness.tear_down();
/// ```
pub struct TestHarness {
    exceptions: Exceptions,
    config: ExceptionsConfig,
    original: Mutex<Option<Arc<dyn ExceptionHandler>>>,
}

impl TestHarness {
    pub fn set_up() -> Self {
        Self::set_up_with(ExceptionsConfig::default())
    }

    pub fn set_up_with(config: ExceptionsConfig) -> Self {
        let container = ContainerBuilder::new()
            .instance::<dyn ExceptionHandler>(Arc::new(Handler::new(config)))
            .build();

        Self {
            exceptions: Exceptions::new(Arc::new(container)),
            config,
            original: Mutex::new(None),
        }
    }

    pub fn exceptions(&self) -> &Exceptions {
        &self.exceptions
    }

    pub fn container(&self) -> &Container {
        self.exceptions.container()
    }

    /// Raise escaped errors to the test instead of rendering them
    pub fn without_exception_handling(&self) -> &Self {
        self.without_exception_handling_except(std::iter::empty())
    }

    /// Like [`without_exception_handling`](Self::without_exception_handling), but errors
    /// of the `except` kinds are still rendered by the original handler
    pub fn without_exception_handling_except(
        &self,
        except: impl IntoIterator<Item = &'static Kind>,
    ) -> &Self {
        let root = self.exceptions.root();
        let fake = self.exceptions.faked();

        let original = Arc::clone(self.original().get_or_insert_with(|| match &fake {
            Some(fake) => fake.handler(),
            None => root,
        }));

        let pass_through: Arc<dyn ExceptionHandler> = Arc::new(PassThroughHandler::new(
            original,
            except.into_iter().collect(),
        ));
        self.bind_beneath_fake(fake, pass_through);
        self
    }

    /// Undo [`without_exception_handling`](Self::without_exception_handling)
    pub fn with_exception_handling(&self) -> &Self {
        let original = self.original().clone();
        if let Some(original) = original {
            self.bind_beneath_fake(self.exceptions.faked(), original);
        }
        self
    }

    /// Run `f` behind the exception handling boundary
    ///
    /// An error returned by `f` is reported, then rendered by the bound handler. Errors
    /// raised while reporting or rendering come back as `Err`.
    pub fn call<T, F>(&self, f: F) -> Result<Outcome<T>, ReportedError>
    where
        F: FnOnce(&Exceptions) -> Result<T, ReportedError>,
    {
        match f(&self.exceptions) {
            Ok(value) => Ok(Outcome::Completed(value)),
            Err(error) => {
                let handler = self.exceptions.root();
                handler.report(error.clone())?;
                handler.render(error).map(Outcome::Rendered)
            }
        }
    }

    /// Bind a fresh production handler and forget any toggles
    pub fn reset(&self) {
        *self.original() = None;
        self.exceptions.swap(Arc::new(Handler::new(self.config)));
    }

    pub fn tear_down(self) {
        self.container().flush();
    }

    // A bound fake keeps its identity; only the handler it wraps changes.
    fn bind_beneath_fake(&self, fake: Option<Arc<FakeHandler>>, handler: Arc<dyn ExceptionHandler>) {
        match fake {
            Some(fake) => {
                fake.set_handler(handler);
            }
            None => self.exceptions.swap(handler),
        }
    }

    fn original(&self) -> MutexGuard<'_, Option<Arc<dyn ExceptionHandler>>> {
        self.original.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
