//! Sources document parsing
//!
//! The document is either a bare array of sources or an object of the form
//! `{ "productId": "...", "sources": [...] }`.

use crate::domain::ContextSourceInput;
use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourcesDocument {
    pub product_id: Option<String>,
    pub sources: Vec<ContextSourceInput>,
}

pub fn parse_sources_document(text: &str) -> Result<SourcesDocument> {
    let value: Value = serde_json::from_str(text)?;

    let (product_id, sources) = match value {
        Value::Array(_) => (None, value),
        Value::Object(mut obj) => {
            let sources = obj.remove("sources").ok_or(Error::UnexpectedSourcesShape)?;
            let product_id = obj
                .get("productId")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string);
            (product_id, sources)
        }
        _ => return Err(Error::UnexpectedSourcesShape),
    };

    if !sources.is_array() {
        return Err(Error::UnexpectedSourcesShape);
    }
    let sources: Vec<ContextSourceInput> = serde_json::from_value(sources)?;

    if let Some(index) = sources.iter().position(|s| s.source_id.trim().is_empty()) {
        return Err(Error::MissingSourceId { index });
    }

    Ok(SourcesDocument { product_id, sources })
}

pub fn load_sources_document(path: &Path) -> Result<SourcesDocument> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| Error::Read { path: path.to_path_buf(), source })?;
    parse_sources_document(&text)
}
