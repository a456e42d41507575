//! Error types for Lua table encoding and decoding operations.

use thiserror::Error;

/// Errors that can occur while serializing or reading a Lua table literal.
#[derive(Error, Debug)]
pub enum LuaError {
    /// The input string was not valid JSON (`encode` path).
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Every delimiter up to the maximum long bracket level occurs in the string.
    #[error("could not find delimiter for string starting with {preview:?}")]
    DelimiterExhausted { preview: String },

    /// The input was not a readable Lua literal (decoding path).
    /// Includes the 1-based line number where the error was detected.
    #[error("Lua parse error at line {line}: {message}")]
    LuaParse { line: usize, message: String },
}

/// Convenience alias used throughout lua-table.
pub type Result<T> = std::result::Result<T, LuaError>;
