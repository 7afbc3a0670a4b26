//! command error types

use serde::Serialize;

use super::exit_codes;

/// error returned by command execution
#[derive(Debug, Clone)]
pub struct CommandError {
    /// exit code (maps to JSON-RPC error code via -32000 - code)
    pub code: i32,
    /// error message
    pub message: String,
    /// extra payload for the JSON-RPC `error.data` field
    pub data: Option<serde_json::Value>,
}

impl CommandError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// attach a serializable payload reported alongside the error
    pub fn with_data<T: Serialize>(mut self, data: &T) -> Self {
        self.data = serde_json::to_value(data).ok();
        self
    }

    pub fn check_failed(message: impl Into<String>) -> Self {
        Self::new(exit_codes::CHECK_FAILED, message)
    }

    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::new(exit_codes::INVALID_ARGS, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(exit_codes::CONFIG_ERROR, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(exit_codes::IO_ERROR, message)
    }

    pub fn general(message: impl Into<String>) -> Self {
        Self::new(exit_codes::ERROR, message)
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommandError {}

impl From<anyhow::Error> for CommandError {
    fn from(e: anyhow::Error) -> Self {
        // {:#} keeps the context chain on one line
        CommandError::general(format!("{:#}", e))
    }
}
