use crate::config::ExceptionsConfig;
use crate::exception::{
    Exception, ExceptionHandler, HandlerVariant, Kind, ReportedError, http::Rendered,
};
use std::any::Any;
use std::error::Error as StdError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

/// What a reportable hook wants to happen next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Run the remaining hooks and log the error
    Continue,
    /// Treat the error as handled
    Stop,
}

/// Result of a reportable hook. `Err` replaces the reported error and raises it.
pub type HookResult = Result<Propagation, ReportedError>;

type Hook = Arc<dyn Fn(&ReportedError) -> HookResult + Send + Sync>;

/// The production exception handler
///
/// Runs the registered reportable hooks in registration order, then logs the error.
///
/// # Example
///
/// ```rust
/// use meshestra_exceptions::{Handler, Propagation, RuntimeError, ExceptionHandler};
///
/// let handler = Handler::default();
/// handler.reportable(|e: &RuntimeError| {
///     println!("runtime error: {}", e.message());
///     Ok(Propagation::Stop)
/// });
///
/// assert!(handler.report(RuntimeError::new("boom").into()).is_ok());
/// ```
#[derive(Default)]
pub struct Handler {
    config: ExceptionsConfig,
    dedupe: AtomicBool,
    hooks: RwLock<Vec<Hook>>,
    ignored: RwLock<Vec<&'static Kind>>,
    reported: Mutex<Vec<Weak<dyn StdError + Send + Sync>>>,
}

impl Handler {
    pub fn new(config: ExceptionsConfig) -> Self {
        Self {
            config,
            dedupe: AtomicBool::new(config.dont_report_duplicates),
            ..Self::default()
        }
    }

    pub fn config(&self) -> ExceptionsConfig {
        self.config
    }

    /// Register a hook for errors that are exactly an `E`
    pub fn reportable<E, F>(&self, hook: F) -> &Self
    where
        E: Exception,
        F: Fn(&E) -> HookResult + Send + Sync + 'static,
    {
        self.reportable_any(move |error| match error.downcast_ref::<E>() {
            Some(error) => hook(error),
            None => Ok(Propagation::Continue),
        })
    }

    /// Register a hook for every reported error
    pub fn reportable_any<F>(&self, hook: F) -> &Self
    where
        F: Fn(&ReportedError) -> HookResult + Send + Sync + 'static,
    {
        self.hooks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(hook));
        self
    }

    /// Stop reporting errors of `kind` and its subkinds
    pub fn ignore(&self, kind: &'static Kind) -> &Self {
        self.ignored
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(kind);
        self
    }

    /// Report `kind` again after [`ignore`](Self::ignore)
    pub fn stop_ignoring(&self, kind: &'static Kind) -> &Self {
        self.ignored
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|ignored| *ignored != kind);
        self
    }

    /// Report each error instance at most once
    pub fn dont_report_duplicates(&self) -> &Self {
        self.dedupe.store(true, Ordering::SeqCst);
        self
    }

    pub fn hook_count(&self) -> usize {
        self.hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn is_ignored(&self, error: &ReportedError) -> bool {
        self.ignored
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|kind| error.kind().is_a(kind))
    }

    fn was_reported(&self, error: &ReportedError) -> bool {
        let target = error.downgrade();
        self.reported
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|seen| seen.ptr_eq(&target))
    }

    fn remember(&self, error: &ReportedError) {
        let mut reported = self.reported.lock().unwrap_or_else(PoisonError::into_inner);
        reported.retain(|seen| seen.strong_count() > 0);
        reported.push(error.downgrade());
    }
}

impl ExceptionHandler for Handler {
    fn report(&self, error: ReportedError) -> Result<(), ReportedError> {
        if !self.should_report(&error) {
            tracing::debug!(kind = %error.kind(), "Skipping report: {}", error);
            return Ok(());
        }

        if self.dedupe.load(Ordering::SeqCst) {
            self.remember(&error);
        }

        // Hooks may register further hooks, so they run on a snapshot.
        let hooks = self
            .hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        for hook in &hooks {
            if hook(&error)? == Propagation::Stop {
                tracing::debug!(kind = %error.kind(), "Report handled by hook: {}", error);
                return Ok(());
            }
        }

        tracing::error!(kind = %error.kind(), "{}", error);
        Ok(())
    }

    fn should_report(&self, error: &ReportedError) -> bool {
        if self.is_ignored(error) {
            return false;
        }
        !(self.dedupe.load(Ordering::SeqCst) && self.was_reported(error))
    }

    fn render(&self, error: ReportedError) -> Result<Rendered, ReportedError> {
        Ok(Rendered::internal_error(&error, self.config.debug))
    }

    fn variant(&self) -> HandlerVariant {
        HandlerVariant::Production
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
