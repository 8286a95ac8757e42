//! # meshestra-exceptions
//!
//! The exception handler facade of the Meshestra framework, and the fake that replaces
//! it in tests.
//!
//! Application code reports errors through one entry point. The entry point resolves the
//! [`ExceptionHandler`] bound in the service [`Container`]: in production that is the
//! [`Handler`], which runs reportable hooks and logs; in tests it can be a
//! [`FakeHandler`], which records what was reported so the test can assert on it.
//!
//! ## Features
//!
//! - **Kind taxonomy**: `#[derive(Exception)]` gives error types a kind with an optional
//!   parent, so assertions match subkinds polymorphically
//! - **Recording fake**: `Exceptions::fake()` swaps the bound handler for a fake,
//!   optionally intercepting only some kinds
//! - **Throw on report**: surface errors the application would otherwise only log
//! - **Test harness**: per-test container with `without_exception_handling` toggles
//!
//! ## Quick Start
//!
//! ```rust
//! use meshestra_exceptions::prelude::*;
//!
//! #[derive(Debug, thiserror::Error, Exception)]
//! #[error("payment declined: {0}")]
//! #[exception(parent = RuntimeError)]
//! pub struct PaymentDeclined(String);
//!
//! fn charge(container: &Container) -> Option<u32> {
//!     rescue(container, || Err::<u32, _>(PaymentDeclined("card expired".into()))).ok()?
//! }
//!
//! let harness = TestHarness::set_up();
//! let fake = harness.exceptions().fake();
//!
//! assert_eq!(charge(harness.container()), None);
//!
//! fake.assert_reported(RuntimeError::KIND);
//! fake.assert_reported(Matcher::predicate(|e: &PaymentDeclined| e.0 == "card expired"));
//! ```

extern crate self as meshestra_exceptions;

pub mod config;
pub mod di;
pub mod error;
pub mod exception;
pub mod facade;
pub mod helpers;
pub mod testing;

// Re-export core types
pub use config::{ConfigService, ExceptionsConfig};
pub use di::{Container, ContainerBuilder};
pub use error::{FrameworkError, Result};
pub use exception::{
    Exception, ExceptionHandler, Failure, Handler, HandlerVariant, HookResult,
    InvalidArgumentError, Kind, LogicError, PassThroughHandler, Propagation, ReportedError,
    RuntimeError, kind_of,
};
pub use facade::Exceptions;
pub use helpers::{report, rescue, rescue_or};
pub use testing::{ErrorRecord, ExpectationFailed, FakeHandler, Matcher, Outcome, TestHarness};

// Re-export macros
pub use meshestra_exceptions_macro::Exception;

/// Prelude module for convenient imports
///
/// ```
/// use meshestra_exceptions::prelude::*;
/// ```
pub mod prelude {
    pub use crate::di::{Container, ContainerBuilder};
    pub use crate::exception::{
        Exception, ExceptionHandler, Failure, Handler, HookResult, InvalidArgumentError, Kind,
        LogicError, Propagation, ReportedError, RuntimeError,
    };
    pub use crate::facade::Exceptions;
    pub use crate::helpers::{report, rescue, rescue_or};
    pub use crate::testing::{FakeHandler, Matcher, TestHarness};
    pub use meshestra_exceptions_macro::Exception;
    pub use std::sync::Arc;
}
