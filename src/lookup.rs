//! Gene lookup facade.
//!
//! Three views over one extraction: the full record, the function summary,
//! and the subcellular locations. Each view fetches the record afresh; nothing
//! is cached between calls.

use crate::annotation::{self, AnnotationRecord, SENTINEL};
use crate::error::LookupError;
use crate::upstream::GeneSource;

/// Lookup facade over a [`GeneSource`].
pub struct GeneLookup {
    source: Box<dyn GeneSource>,
}

impl GeneLookup {
    /// Create a facade over the given source.
    pub fn new(source: impl GeneSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Full annotation record for a gene symbol.
    pub async fn gene_info(&self, gene_symbol: &str) -> Result<AnnotationRecord, LookupError> {
        let result = match self.source.search(gene_symbol).await {
            Ok(document) => annotation::extract(gene_symbol, &document),
            Err(err) => Err(LookupError::from(err)),
        };

        if let Err(err) = &result {
            if err.is_no_match() {
                tracing::info!(gene_symbol, "no upstream match");
            } else {
                tracing::warn!(gene_symbol, error = %err, "upstream lookup failed");
            }
        }
        result
    }

    /// Function summary, or the failure message when the lookup failed.
    pub async fn protein_expression(&self, gene_symbol: &str) -> String {
        match self.gene_info(gene_symbol).await {
            Ok(record) => record.function_summary().to_string(),
            Err(err) => err.to_string(),
        }
    }

    /// Subcellular locations. Empty when the record has none; a single
    /// sentinel entry when the lookup failed.
    pub async fn subcellular_location(&self, gene_symbol: &str) -> Vec<String> {
        match self.gene_info(gene_symbol).await {
            Ok(record) => record.subcellular_location,
            Err(_) => vec![SENTINEL.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::UpstreamError;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::{json, Value as JsonValue};

    struct StaticSource(JsonValue);

    #[async_trait]
    impl GeneSource for StaticSource {
        async fn search(&self, _gene_symbol: &str) -> Result<JsonValue, UpstreamError> {
            Ok(self.0.clone())
        }
    }

    struct DownSource;

    #[async_trait]
    impl GeneSource for DownSource {
        async fn search(&self, _gene_symbol: &str) -> Result<JsonValue, UpstreamError> {
            Err(UpstreamError::Status(StatusCode::BAD_GATEWAY))
        }
    }

    fn egfr() -> GeneLookup {
        GeneLookup::new(StaticSource(json!({ "results": [{
            "primaryAccession": "P00533",
            "comments": [
                { "commentType": "FUNCTION", "texts": [{ "value": "Receptor tyrosine kinase." }] },
                { "commentType": "SUBCELLULAR LOCATION", "subcellularLocations": [
                    { "location": { "value": "Cell membrane" } }
                ]}
            ]
        }]})))
    }

    #[tokio::test]
    async fn test_gene_info_returns_record() {
        let record = egfr().gene_info("egfr").await.unwrap();
        assert_eq!(record.gene, "EGFR");
        assert_eq!(record.uniprot_id.as_deref(), Some("P00533"));
    }

    #[tokio::test]
    async fn test_protein_expression_views() {
        assert_eq!(egfr().protein_expression("egfr").await, "Receptor tyrosine kinase.");

        let empty = GeneLookup::new(StaticSource(json!({ "results": [] })));
        assert_eq!(
            empty.protein_expression("NOPE").await,
            "No data found for gene symbol 'NOPE'"
        );

        let down = GeneLookup::new(DownSource);
        assert!(down.protein_expression("EGFR").await.contains("502"));
    }

    #[tokio::test]
    async fn test_subcellular_location_views() {
        assert_eq!(egfr().subcellular_location("egfr").await, vec!["Cell membrane"]);

        let bare = GeneLookup::new(StaticSource(json!({ "results": [{}] })));
        assert!(bare.subcellular_location("x").await.is_empty());

        let down = GeneLookup::new(DownSource);
        assert_eq!(down.subcellular_location("x").await, vec![SENTINEL]);
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_no_match() {
        let err = GeneLookup::new(DownSource).gene_info("TP53").await.unwrap_err();
        assert!(!err.is_no_match());
    }
}
