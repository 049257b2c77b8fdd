//! Validation of artifacts that arrive as raw JSON (e.g. read back from
//! storage), where payload fields may be missing or of the wrong type.

use super::failure_warning;
use crate::domain::{
    BUSINESS_DATA_MODEL_SCHEMA, REPO_FOLDER_TOPOLOGY_SCHEMA, UI_SITEMAP_SCHEMA, USER_FLOWS_SCHEMA,
};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    UiSitemap,
    UserFlows,
    BusinessDataModel,
    RepoFolderTopology,
}

impl ArtifactKind {
    pub fn schema(self) -> &'static str {
        match self {
            Self::UiSitemap => UI_SITEMAP_SCHEMA,
            Self::UserFlows => USER_FLOWS_SCHEMA,
            Self::BusinessDataModel => BUSINESS_DATA_MODEL_SCHEMA,
            Self::RepoFolderTopology => REPO_FOLDER_TOPOLOGY_SCHEMA,
        }
    }

    pub fn payload_fields(self) -> &'static [&'static str] {
        match self {
            Self::UiSitemap => &["items"],
            Self::UserFlows => &["flows"],
            Self::BusinessDataModel => &["entities", "relationships"],
            Self::RepoFolderTopology => &["surfaces"],
        }
    }

    pub fn from_schema(schema: &str) -> Option<Self> {
        [Self::UiSitemap, Self::UserFlows, Self::BusinessDataModel, Self::RepoFolderTopology]
            .into_iter()
            .find(|kind| kind.schema() == schema)
    }
}

/// Return `value` unchanged when it is a well-formed `kind` artifact,
/// otherwise an empty artifact of that kind carrying a failure warning.
pub fn validate_artifact_value(kind: ArtifactKind, value: &Value) -> Value {
    match check(kind, value) {
        Ok(()) => value.clone(),
        Err(problem) => empty_with_warning(kind, value, &problem),
    }
}

fn check(kind: ArtifactKind, value: &Value) -> Result<(), String> {
    let obj = value.as_object().ok_or("artifact is not a JSON object")?;

    match obj.get("schema").and_then(Value::as_str) {
        Some(schema) if schema == kind.schema() => {}
        Some(other) => {
            return Err(format!("schema tag `{other}` does not match `{}`", kind.schema()));
        }
        None => return Err("schema tag is missing".to_string()),
    }

    match obj.get("productId").and_then(Value::as_str) {
        Some(id) if !id.trim().is_empty() => {}
        _ => return Err("productId is missing or empty".to_string()),
    }

    for field in kind.payload_fields().iter().chain(std::iter::once(&"warnings")) {
        if !obj.get(*field).is_some_and(Value::is_array) {
            return Err(format!("`{field}` is not an array"));
        }
    }
    Ok(())
}

fn empty_with_warning(kind: ArtifactKind, original: &Value, problem: &str) -> Value {
    let keep_str = |key: &str| {
        original.get(key).and_then(Value::as_str).map(|s| Value::String(s.to_string()))
    };

    let mut out = Map::new();
    out.insert("schema".to_string(), Value::String(kind.schema().to_string()));
    let product_id = keep_str("productId").unwrap_or_else(|| Value::String(String::new()));
    out.insert("productId".to_string(), product_id);
    if let Some(generated_at) = keep_str("generatedAt") {
        out.insert("generatedAt".to_string(), generated_at);
    }
    for field in kind.payload_fields() {
        out.insert(field.to_string(), Value::Array(Vec::new()));
    }

    let mut warnings = original
        .get("warnings")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let warning = failure_warning(kind.schema(), problem);
    if let Ok(encoded) = serde_json::to_value(&warning) {
        warnings.push(encoded);
    }
    out.insert("warnings".to_string(), Value::Array(warnings));

    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn well_formed_artifact_passes_through() {
        let value = json!({
            "schema": "user_flows_v1",
            "productId": "prod",
            "generatedAt": "ts",
            "flows": [],
            "warnings": []
        });
        assert_eq!(validate_artifact_value(ArtifactKind::UserFlows, &value), value);
    }

    #[test]
    fn null_payload_is_replaced_with_empty_arrays() {
        let value = json!({
            "schema": "business_data_model_v1",
            "productId": "prod",
            "generatedAt": "ts",
            "entities": null,
            "relationships": [{"from": "A", "to": "B"}],
            "warnings": [{"code": "business_model_empty", "message": "x"}]
        });
        let out = validate_artifact_value(ArtifactKind::BusinessDataModel, &value);
        assert_eq!(out["entities"], json!([]));
        assert_eq!(out["relationships"], json!([]));
        assert_eq!(out["productId"], json!("prod"));
        assert_eq!(out["generatedAt"], json!("ts"));
        let warnings = out["warnings"].as_array().expect("warnings");
        let codes: Vec<&str> = warnings.iter().filter_map(|w| w["code"].as_str()).collect();
        assert_eq!(codes, vec!["business_model_empty", "schema_validation_failed"]);
    }

    #[test]
    fn non_object_input_yields_empty_artifact() {
        let out = validate_artifact_value(ArtifactKind::UiSitemap, &json!([1, 2]));
        assert_eq!(out["schema"], json!("ui_sitemap_v1"));
        assert_eq!(out["items"], json!([]));
        assert_eq!(out["productId"], json!(""));
    }

    #[test]
    fn kind_lookup_by_schema() {
        assert_eq!(
            ArtifactKind::from_schema("repo_folder_topology_v1"),
            Some(ArtifactKind::RepoFolderTopology)
        );
        assert_eq!(ArtifactKind::from_schema("nope"), None);
    }
}
