use crate::exception::ReportedError;
use serde::Serialize;

pub const INTERNAL_SERVER_ERROR: u16 = 500;

/// Body of a rendered error
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub kind: String,
    pub message: String,
    pub timestamp: String,
}

/// An error turned into a response
#[derive(Debug, Clone)]
pub struct Rendered {
    pub status: u16,
    pub body: ErrorBody,
}

impl Rendered {
    /// Render an error as an internal server error
    ///
    /// The error text is only exposed when `debug` is set.
    pub fn internal_error(error: &ReportedError, debug: bool) -> Self {
        let message = if debug {
            error.message()
        } else {
            "Internal Server Error".to_string()
        };

        Self {
            status: INTERNAL_SERVER_ERROR,
            body: ErrorBody {
                status_code: INTERNAL_SERVER_ERROR,
                kind: error.kind().name().to_string(),
                message,
                timestamp: chrono::Utc::now().to_rfc3339(),
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self.body)
    }
}
