use crate::exception::{Kind, ReportedError};
use chrono::{DateTime, Utc};

/// One error occurrence captured by the fake handler
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    error: ReportedError,
    message: String,
    recorded_at: DateTime<Utc>,
}

impl ErrorRecord {
    pub(crate) fn capture(error: ReportedError) -> Self {
        Self {
            message: error.message(),
            recorded_at: Utc::now(),
            error,
        }
    }

    pub fn error(&self) -> &ReportedError {
        &self.error
    }

    pub fn kind(&self) -> &'static Kind {
        self.error.kind()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
