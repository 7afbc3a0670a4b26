//! library error types

use thiserror::Error;

/// errors raised while building a rewriter
///
/// rewriting itself never fails; only the configuration can be rejected
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid custom value pattern '{pattern}': {source}")]
    CustomValuePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unsupported flag '{flag}' in custom value pattern '{pattern}'")]
    CustomValueFlag { pattern: String, flag: char },

    #[error("custom value pattern is empty")]
    EmptyCustomValue,

    #[error("failed to compile media range grammar: {0}")]
    Grammar(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
