use dashmap::DashMap;
use std::env;
use std::sync::Arc;

/// Configuration service
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Load every environment variable into a new service
    pub fn new() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    /// Read a flag; `true`, `1`, `yes` and `on` are truthy, ignoring case
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).map(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "on"
            )
        })
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }
}

/// Settings for the production exception handler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExceptionsConfig {
    /// Expose error messages in rendered bodies
    pub debug: bool,
    /// Report each error instance at most once
    pub dont_report_duplicates: bool,
}

impl ExceptionsConfig {
    pub const DEBUG_KEY: &'static str = "APP_DEBUG";
    pub const DONT_REPORT_DUPLICATES_KEY: &'static str = "EXCEPTIONS_DONT_REPORT_DUPLICATES";

    pub fn from_config(config: &ConfigService) -> Self {
        Self {
            debug: config.get_bool(Self::DEBUG_KEY).unwrap_or(false),
            dont_report_duplicates: config
                .get_bool(Self::DONT_REPORT_DUPLICATES_KEY)
                .unwrap_or(false),
        }
    }

    pub fn from_env() -> Self {
        Self::from_config(&ConfigService::new())
    }
}
