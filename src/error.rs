//! Error types for the MCP server.
//!
//! Two layers: [`LookupError`] describes why a gene lookup produced no record,
//! and [`McpError`] describes why a JSON-RPC request could not be served.
//! Lookup errors are data (they travel inside a successful tool response);
//! MCP errors become JSON-RPC error envelopes.

use crate::upstream::UpstreamError;

/// MCP server errors.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    /// Method outside the fixed method table.
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// Unknown tool requested.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Missing or empty required argument.
    #[error("{0} is required")]
    MissingArg(String),

    /// Invalid argument value.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArg {
        /// Argument name
        name: String,
        /// Reason why it's invalid
        reason: String,
    },

    /// Request is JSON but not a usable JSON-RPC request.
    #[error("Invalid request: {0}")]
    Protocol(String),

    /// I/O error on the transport.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for McpError {
    fn from(err: std::io::Error) -> Self {
        McpError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for McpError {
    fn from(err: serde_json::Error) -> Self {
        McpError::Protocol(err.to_string())
    }
}

/// JSON-RPC error codes.
pub mod rpc_codes {
    /// Generic server error. Every failed request carries this code.
    pub const SERVER_ERROR: i32 = -1;
}

impl McpError {
    /// Convert to JSON-RPC error code.
    pub fn rpc_code(&self) -> i32 {
        rpc_codes::SERVER_ERROR
    }
}

/// Why a gene lookup produced no annotation record.
///
/// Both variants render to a plain message on the wire; they stay separate
/// here so a transport outage is never mistaken for an unknown gene.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The upstream search returned zero results.
    #[error("No data found for gene symbol '{symbol}'")]
    NoMatch {
        /// The symbol exactly as queried
        symbol: String,
    },

    /// The upstream request itself failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl LookupError {
    /// Whether the upstream answered but had nothing for the symbol.
    pub fn is_no_match(&self) -> bool {
        matches!(self, LookupError::NoMatch { .. })
    }
}

/// Result type for MCP operations.
pub type Result<T> = std::result::Result<T, McpError>;
