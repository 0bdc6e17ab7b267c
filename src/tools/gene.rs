//! Gene annotation tools.
//!
//! Tools: get_gene_info, get_protein_expression, get_subcellular_location

use serde_json::{Map, Value as JsonValue};

use crate::convert::{get_string_arg, locations_to_text, outcome_to_text};
use crate::error::{McpError, Result};
use crate::lookup::GeneLookup;
use crate::schema;
use crate::tools::ToolDef;

/// Full record tool.
pub const GET_GENE_INFO: &str = "get_gene_info";
/// Function summary tool.
pub const GET_PROTEIN_EXPRESSION: &str = "get_protein_expression";
/// Subcellular location tool.
pub const GET_SUBCELLULAR_LOCATION: &str = "get_subcellular_location";

/// Get all gene tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            GET_GENE_INFO,
            "Fetch full UniProt gene information for a human gene: identifiers, protein name, \
             synonyms, sequence length and mass, function, GO terms, subcellular location \
             and interaction partners.",
            schema!(object {
                required: { "gene_symbol": ("string", "Gene symbol (e.g., TP53)") }
            }),
        ),
        ToolDef::new(
            GET_PROTEIN_EXPRESSION,
            "Fetch the protein function summary for a human gene.",
            schema!(object {
                required: { "gene_symbol": ("string", "Gene symbol (e.g., BRCA1)") }
            }),
        ),
        ToolDef::new(
            GET_SUBCELLULAR_LOCATION,
            "Fetch subcellular location info for a human gene, one location per line.",
            schema!(object {
                required: { "gene_symbol": ("string", "Gene symbol (e.g., EGFR)") }
            }),
        ),
    ]
}

/// Whether `name` is one of the gene tools.
pub fn handles(name: &str) -> bool {
    matches!(
        name,
        GET_GENE_INFO | GET_PROTEIN_EXPRESSION | GET_SUBCELLULAR_LOCATION
    )
}

/// Dispatch a gene tool call, returning the text payload.
pub async fn dispatch(
    lookup: &GeneLookup,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<String> {
    let gene_symbol = get_string_arg(&args, "gene_symbol")?;
    tracing::debug!(tool = name, %gene_symbol, "calling tool");

    match name {
        GET_GENE_INFO => {
            let outcome = lookup.gene_info(&gene_symbol).await;
            Ok(outcome_to_text(&outcome))
        }

        GET_PROTEIN_EXPRESSION => Ok(lookup.protein_expression(&gene_symbol).await),

        GET_SUBCELLULAR_LOCATION => {
            let locations = lookup.subcellular_location(&gene_symbol).await;
            Ok(locations_to_text(&locations))
        }

        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}
