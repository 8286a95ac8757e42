//! Test doubles and assertions for reported exceptions.

mod assertion;
mod fake;
mod harness;
mod matcher;
mod record;

pub use assertion::ExpectationFailed;
pub use fake::FakeHandler;
pub use harness::{OK, Outcome, TestHarness};
pub use matcher::Matcher;
pub use record::ErrorRecord;
