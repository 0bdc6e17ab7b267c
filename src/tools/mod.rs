//! Tool registry and definitions.
//!
//! Provides the infrastructure for listing and dispatching MCP tools.

pub mod gene;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::{McpError, Result};
use crate::lookup::GeneLookup;

/// A tool definition for the MCP tools/list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    /// Tool name (e.g., "get_gene_info")
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonValue,
}

impl ToolDef {
    /// Create a new tool definition.
    pub fn new(name: &str, description: &str, input_schema: JsonValue) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Registry of all available tools.
pub struct ToolRegistry {
    tools: Vec<ToolDef>,
}

impl ToolRegistry {
    /// Create a new registry with all tools registered.
    pub fn new() -> Self {
        Self {
            tools: gene::tools(),
        }
    }

    /// Get all tool definitions.
    pub fn tools(&self) -> &[ToolDef] {
        &self.tools
    }

    /// Dispatch a tool call to the appropriate handler.
    pub async fn dispatch(
        &self,
        lookup: &GeneLookup,
        name: &str,
        args: Map<String, JsonValue>,
    ) -> Result<String> {
        if gene::handles(name) {
            gene::dispatch(lookup, name, args).await
        } else {
            Err(McpError::UnknownTool(name.to_string()))
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper macro for creating JSON Schema for tool input parameters.
///
/// Each property is `"name": ("type", "description")`.
#[macro_export]
macro_rules! schema {
    (object {
        required: { $($req_name:literal : ($req_type:literal, $req_desc:literal)),* $(,)? }
    }) => {{
        let mut required: Vec<&str> = Vec::new();
        $(required.push($req_name);)*

        let mut props = serde_json::Map::new();
        $(props.insert(
            $req_name.to_string(),
            serde_json::json!({ "type": $req_type, "description": $req_desc }),
        );)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": required
        })
    }};
}
