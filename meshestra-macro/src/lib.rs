use proc_macro::TokenStream;

mod exception;

/// Derive macro for making an error type reportable through the exception handler
///
/// The type must already implement `std::error::Error` (for example via `thiserror`).
/// The derived kind is named after the type unless `name` is given, and `parent`
/// places it below another exception kind so kind assertions match it polymorphically.
///
/// # Example
/// ```rust,ignore
/// use meshestra_exceptions::{Exception, RuntimeError};
///
/// #[derive(Debug, thiserror::Error, Exception)]
/// #[error("payment declined: {0}")]
/// #[exception(parent = RuntimeError)]
/// pub struct PaymentDeclined(String);
/// ```
#[proc_macro_derive(Exception, attributes(exception))]
pub fn derive_exception(input: TokenStream) -> TokenStream {
    exception::derive_exception(input)
}
