//! Annotation extraction.
//!
//! Turns one UniProt search document into a fixed-shape [`AnnotationRecord`].
//! Only the first search result is read. Every field has its own rule and any
//! missing path degrades to "not found" instead of failing, so the serialized
//! record always carries the same twelve keys.

use std::collections::HashSet;

use serde::{Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};

use crate::error::LookupError;

/// Placeholder written for any field the upstream document did not provide.
pub const SENTINEL: &str = "No data available";

/// Maximum number of entries kept in any list field.
pub const MAX_LIST_ENTRIES: usize = 10;

const FUNCTION_COMMENT: &str = "FUNCTION";
const LOCATION_COMMENT: &str = "SUBCELLULAR LOCATION";
const INTERACTION_COMMENT: &str = "INTERACTION";
const GO_DATABASE: &str = "GO";
const GO_TERM_KEY: &str = "GoTerm";

/// Normalized annotation for one gene.
///
/// `None` scalars and empty lists mean the upstream document had no value;
/// they serialize as [`SENTINEL`] and `[SENTINEL]` respectively.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationRecord {
    /// Queried symbol, uppercased.
    pub gene: String,
    /// Primary accession, e.g. `P04637`.
    #[serde(serialize_with = "or_sentinel")]
    pub uniprot_id: Option<String>,
    /// Entry name, e.g. `P53_HUMAN`.
    #[serde(serialize_with = "or_sentinel")]
    pub entry_name: Option<String>,
    /// Recommended full protein name.
    #[serde(serialize_with = "or_sentinel")]
    pub protein_name: Option<String>,
    /// Gene synonyms across all gene entries.
    #[serde(serialize_with = "list_or_sentinel")]
    pub gene_synonyms: Vec<String>,
    /// Scientific organism name.
    #[serde(serialize_with = "or_sentinel")]
    pub organism: Option<String>,
    /// Sequence length in residues.
    #[serde(serialize_with = "or_sentinel")]
    pub sequence_length: Option<Number>,
    /// Sequence mass in daltons.
    #[serde(serialize_with = "or_sentinel")]
    pub mass: Option<Number>,
    /// Free-text function summary.
    #[serde(serialize_with = "or_sentinel")]
    pub function: Option<String>,
    /// Gene Ontology terms formatted as `<id>: <term>`.
    #[serde(serialize_with = "list_or_sentinel")]
    pub go_terms: Vec<String>,
    /// Subcellular locations.
    #[serde(serialize_with = "list_or_sentinel")]
    pub subcellular_location: Vec<String>,
    /// Accessions of interaction partners.
    #[serde(serialize_with = "list_or_sentinel")]
    pub interactions: Vec<String>,
}

impl AnnotationRecord {
    /// Function summary, or the sentinel when none was found.
    pub fn function_summary(&self) -> &str {
        self.function.as_deref().unwrap_or(SENTINEL)
    }
}

fn or_sentinel<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(v) => v.serialize(serializer),
        None => serializer.serialize_str(SENTINEL),
    }
}

fn list_or_sentinel<S: Serializer>(items: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    if items.is_empty() {
        [SENTINEL].serialize(serializer)
    } else {
        items.serialize(serializer)
    }
}

/// Extract an annotation record for `gene_symbol` from a search document.
///
/// Fails only when the document holds no results.
pub fn extract(gene_symbol: &str, document: &JsonValue) -> Result<AnnotationRecord, LookupError> {
    let entry = document
        .get("results")
        .and_then(JsonValue::as_array)
        .and_then(|results| results.first())
        .ok_or_else(|| LookupError::NoMatch {
            symbol: gene_symbol.to_string(),
        })?;

    Ok(AnnotationRecord {
        gene: gene_symbol.to_uppercase(),
        uniprot_id: string_at(entry, "/primaryAccession"),
        entry_name: string_at(entry, "/uniProtkbId"),
        protein_name: string_at(entry, "/proteinDescription/recommendedName/fullName/value"),
        gene_synonyms: gene_synonyms(entry),
        organism: string_at(entry, "/organism/scientificName"),
        sequence_length: number_at(entry, "/sequence/length"),
        mass: number_at(entry, "/sequence/mass"),
        function: function_summary(entry),
        go_terms: go_terms(entry),
        subcellular_location: subcellular_locations(entry),
        interactions: interaction_partners(entry),
    })
}

fn string_at(value: &JsonValue, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(JsonValue::as_str)
        .map(str::to_string)
}

/// Any JSON number, integer or not, passed through unchanged.
fn number_at(value: &JsonValue, pointer: &str) -> Option<Number> {
    match value.pointer(pointer) {
        Some(JsonValue::Number(n)) => Some(n.clone()),
        _ => None,
    }
}

fn array<'a>(value: &'a JsonValue, key: &str) -> impl Iterator<Item = &'a JsonValue> {
    value
        .get(key)
        .and_then(JsonValue::as_array)
        .into_iter()
        .flatten()
}

fn comments<'a>(entry: &'a JsonValue, kind: &'a str) -> impl Iterator<Item = &'a JsonValue> {
    array(entry, "comments")
        .filter(move |c| c.get("commentType").and_then(JsonValue::as_str) == Some(kind))
}

/// Dedup preserving first occurrence, drop empties, keep at most
/// [`MAX_LIST_ENTRIES`].
fn normalize<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.clone()))
        .take(MAX_LIST_ENTRIES)
        .collect()
}

fn gene_synonyms(entry: &JsonValue) -> Vec<String> {
    normalize(
        array(entry, "genes")
            .flat_map(|gene| array(gene, "synonyms"))
            .filter_map(|syn| string_at(syn, "/value")),
    )
}

fn go_terms(entry: &JsonValue) -> Vec<String> {
    normalize(
        array(entry, "uniProtKBCrossReferences")
            .filter(|xref| xref.get("database").and_then(JsonValue::as_str) == Some(GO_DATABASE))
            .flat_map(|xref| {
                let id = xref.get("id").and_then(JsonValue::as_str).unwrap_or_default();
                array(xref, "properties")
                    .filter(|p| p.get("key").and_then(JsonValue::as_str) == Some(GO_TERM_KEY))
                    .filter_map(|p| p.get("value").and_then(JsonValue::as_str))
                    .map(move |term| format!("{}: {}", id, term))
            }),
    )
}

fn subcellular_locations(entry: &JsonValue) -> Vec<String> {
    normalize(
        comments(entry, LOCATION_COMMENT)
            .flat_map(|c| array(c, "subcellularLocations"))
            .filter_map(|loc| string_at(loc, "/location/value")),
    )
}

fn interaction_partners(entry: &JsonValue) -> Vec<String> {
    normalize(
        comments(entry, INTERACTION_COMMENT)
            .flat_map(|c| array(c, "interactions"))
            .filter_map(|i| string_at(i, "/interactantTwo/uniProtKBAccession")),
    )
}

/// Text of the first FUNCTION comment. Later FUNCTION comments are never
/// consulted, even when the first one has no text.
fn function_summary(entry: &JsonValue) -> Option<String> {
    comments(entry, FUNCTION_COMMENT)
        .next()
        .and_then(|c| string_at(c, "/texts/0/value"))
}
