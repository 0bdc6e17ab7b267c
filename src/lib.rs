//! # uniproscope-mcp
//!
//! MCP (Model Context Protocol) server for UniProt gene and protein annotations.
//!
//! This crate exposes gene lookups against the UniProt REST API as tools for
//! AI agents. It implements the MCP protocol over stdin/stdout using JSON-RPC 2.0.
//!
//! ## Tools
//!
//! - **get_gene_info**: full annotation record (identifiers, names, synonyms,
//!   sequence stats, function, GO terms, localization, interaction partners)
//! - **get_protein_expression**: function summary only
//! - **get_subcellular_location**: subcellular locations only
//!
//! Every record has the same twelve fields. Missing values become
//! `"No data available"`; list fields are deduplicated and capped at ten entries.
//!
//! ## Usage
//!
//! The server is typically run as an executable and configured in AI tools like Claude Desktop:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "uniproscope": {
//!       "command": "/path/to/uniproscope-mcp",
//!       "args": ["--timeout", "20"]
//!     }
//!   }
//! }
//! ```
//!
//! ## Library Usage
//!
//! For testing or embedding, you can use the library API:
//!
//! ```no_run
//! use uniproscope_mcp::{GeneLookup, McpServer, UniprotClient, UpstreamConfig};
//!
//! let client = UniprotClient::new(UpstreamConfig::default()).expect("Failed to build client");
//! let mut server = McpServer::new(GeneLookup::new(client));
//!
//! // Run the server (reads from stdin, writes to stdout)
//! // server.run().await.expect("Server error");
//! ```

#![warn(missing_docs)]

pub mod annotation;
mod config;
mod convert;
mod error;
mod lookup;
mod server;
mod tools;
pub mod upstream;

pub use annotation::{extract, AnnotationRecord, MAX_LIST_ENTRIES, SENTINEL};
pub use config::UpstreamConfig;
pub use convert::NO_LOCATION_TEXT;
pub use error::{LookupError, McpError, Result};
pub use lookup::GeneLookup;
pub use server::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpServer, RequestContext};
pub use tools::{ToolDef, ToolRegistry};
pub use upstream::{GeneSource, UniprotClient, UpstreamError};
