//! Exception kinds, the handler capability and its production implementations.

mod builtin;
mod handler;
pub mod http;
mod kind;
mod pass_through;
mod production;
mod reported;

pub use builtin::{Failure, InvalidArgumentError, LogicError, RuntimeError};
pub use handler::{ExceptionHandler, HandlerVariant};
pub use kind::{Exception, Kind, kind_of};
pub use pass_through::PassThroughHandler;
pub use production::{Handler, HookResult, Propagation};
pub use reported::ReportedError;
