//! Firestore composite indexes (`google_firestore_index`).

use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::{ResourceRenderer, capture_segments, list_command, parse_record};
use crate::error::ImportError;
use crate::hcl::{Body, RenderOutput, ResourceBlock};
use crate::naming::to_snake_case;

pub const RESOURCE_TYPE: &str = "google_firestore_index";

/// Database used when none is given
pub const DEFAULT_DATABASE: &str = "(default)";

lazy_static! {
    static ref INDEX_NAME: Regex = Regex::new(r"collectionGroups/([^/]+)/indexes/(.+)$").unwrap();
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndexRecord {
    name: String,
    api_scope: String,
    query_scope: String,
    #[serde(default)]
    fields: Vec<IndexField>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndexField {
    field_path: String,
    order: Option<String>,
    array_config: Option<String>,
}

/// Renders the composite indexes of one Firestore database.
pub struct FirestoreIndexRenderer {
    project: String,
    database: String,
}

impl FirestoreIndexRenderer {
    pub fn new(project: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            database: database.into(),
        }
    }
}

impl ResourceRenderer for FirestoreIndexRenderer {
    fn resource_type(&self) -> &'static str {
        RESOURCE_TYPE
    }

    fn label(&self) -> &'static str {
        "indexes"
    }

    fn hint(&self) -> &'static str {
        "authentication, project name & database name"
    }

    fn list_args(&self) -> Vec<String> {
        list_command(
            &["firestore", "indexes", "composite", "list"],
            &[("--database", self.database.as_str())],
            &self.project,
        )
    }

    fn default_filename(&self, _record: &Value) -> Result<String> {
        Ok(format!(
            "firestore_index_{}_{}.tf",
            to_snake_case(&self.database),
            self.project
        ))
    }

    fn render(&self, record: &Value, _related: &[Value]) -> Result<RenderOutput> {
        let index: IndexRecord = parse_record(RESOURCE_TYPE, record)?;
        let [collection, index_id] = capture_segments::<2>(
            RESOURCE_TYPE,
            &INDEX_NAME,
            &index.name,
            "'.../collectionGroups/{collection}/indexes/{index}'",
        )?;

        let mut body = Body::new()
            .string("project", &self.project)
            .string("database", &self.database)
            .string("api_scope", &index.api_scope)
            .string("query_scope", &index.query_scope)
            .string("collection", collection);

        for field in &index.fields {
            let field_body = Body::new().string("field_path", &field.field_path);
            let field_body = match (&field.order, &field.array_config) {
                (Some(order), _) => field_body.string("order", order),
                (None, Some(array_config)) => field_body.string("array_config", array_config),
                (None, None) => {
                    return Err(ImportError::malformed(
                        RESOURCE_TYPE,
                        "fields",
                        &field.field_path,
                        "'order' or 'arrayConfig'",
                    )
                    .into());
                }
            };
            body = body.block("fields", field_body);
        }

        Ok(RenderOutput::single(
            ResourceBlock::new(RESOURCE_TYPE, index_id, body),
            &index.name,
        ))
    }
}
