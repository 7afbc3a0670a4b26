//! output formatting for scriptable CLI output
//!
//! uses JSON-RPC 2.0 format for machine-readable output:
//! - success: {"jsonrpc": "2.0", "result": {...}, "id": null}
//! - error: {"jsonrpc": "2.0", "error": {"code": N, "message": "..."}, "id": null}

use serde::Serialize;

use crate::media::Rewrite;
use crate::stylesheet::RuleChange;

/// JSON-RPC version constant
const JSONRPC_VERSION: &str = "2.0";

/// output mode determines how results are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// human-readable text output
    Text,
    /// machine-readable JSON-RPC 2.0 output
    Json,
    /// no status output on success (errors still go to stderr)
    Quiet,
}

impl OutputMode {
    /// priority: quiet > json > text
    ///
    /// JSON is never auto-enabled: stylesheet text is usually piped
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        if json {
            return Self::Json;
        }
        Self::Text
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_quiet(&self) -> bool {
        matches!(self, Self::Quiet)
    }
}

/// JSON-RPC 2.0 success response
#[derive(Serialize)]
pub struct JsonRpcResponse<T: Serialize> {
    pub jsonrpc: &'static str,
    pub result: T,
    /// null for CLI responses (no request id)
    pub id: Option<String>,
}

impl<T: Serialize> JsonRpcResponse<T> {
    pub fn new(result: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            result,
            id: None,
        }
    }
}

/// JSON-RPC 2.0 error response
#[derive(Serialize)]
pub struct JsonRpcError {
    pub jsonrpc: &'static str,
    pub error: RpcError,
    pub id: Option<String>,
}

/// JSON-RPC 2.0 error object
#[derive(Serialize)]
pub struct RpcError {
    /// exit code offset by -32000 for application errors
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            error: RpcError {
                code: to_jsonrpc_code(code),
                message: message.into(),
                data: None,
            },
            id: None,
        }
    }

    pub fn with_data(mut self, data: Option<serde_json::Value>) -> Self {
        self.error.data = data;
        self
    }
}

/// convert exit code to JSON-RPC error code
/// JSON-RPC reserves -32000 to -32099 for server/application errors
fn to_jsonrpc_code(exit_code: i32) -> i32 {
    -32000 - exit_code
}

// ============================================================================
// Result data structures
// ============================================================================

/// one replaced range expression
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RewriteData {
    pub original: String,
    pub replacement: String,
}

impl From<&Rewrite> for RewriteData {
    fn from(rewrite: &Rewrite) -> Self {
        Self {
            original: rewrite.original.clone(),
            replacement: rewrite.replacement.clone(),
        }
    }
}

/// one rewritten at-rule
#[derive(Serialize, Clone, Debug)]
pub struct ChangeData {
    pub line: usize,
    pub rule: String,
    pub before: String,
    pub after: String,
    pub rewrites: Vec<RewriteData>,
}

impl From<&RuleChange> for ChangeData {
    fn from(change: &RuleChange) -> Self {
        Self {
            line: change.line,
            rule: change.name.clone(),
            before: change.before.clone(),
            after: change.after.clone(),
            rewrites: change.rewrites.iter().map(RewriteData::from).collect(),
        }
    }
}

/// per-input result for the transform command
#[derive(Serialize, Clone, Debug)]
pub struct FileData {
    /// "-" for stdin
    pub path: String,
    pub changed: bool,
    pub changes: Vec<ChangeData>,
    /// where the result went, when it was written to a file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written_to: Option<String>,
    /// rewritten stylesheet, when it was not written to a file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
}

/// result data for the transform command
#[derive(Serialize)]
pub struct TransformData {
    pub action: &'static str,
    pub check: bool,
    pub changed: bool,
    pub files: Vec<FileData>,
}

/// result data for the query command
#[derive(Serialize)]
pub struct QueryData {
    pub action: &'static str,
    pub params: String,
    pub result: String,
    /// true when no comparison operator was present
    pub skipped: bool,
    pub rewrites: Vec<RewriteData>,
}

/// result data for config verify
#[derive(Serialize)]
pub struct VerifyData {
    pub action: &'static str,
    pub path: String,
    pub valid: bool,
    pub errors: Vec<String>,
}

// ============================================================================
// Output functions
// ============================================================================

/// print JSON-RPC success response to stdout
pub fn print_json<T: Serialize>(data: &T) {
    let response = JsonRpcResponse::new(data);
    if let Ok(json) = serde_json::to_string(&response) {
        println!("{}", json);
    }
}

/// print JSON-RPC error to stdout
pub fn print_json_error(code: i32, message: &str, data: Option<&serde_json::Value>) {
    let error = JsonRpcError::new(code, message).with_data(data.cloned());
    if let Ok(json) = serde_json::to_string(&error) {
        println!("{}", json);
    }
}
