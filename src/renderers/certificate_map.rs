//! Certificate Manager certificate maps together with their entries.
//!
//! Every map gets its own file holding the map followed by its entries. The
//! entries come from a second listing issued per map.

use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;

use super::{ResourceRenderer, list_command, parse_record, short_name};
use crate::error::ImportError;
use crate::hcl::{self, Body, RenderOutput, ResourceBlock};
use crate::naming::tf_name;

pub const RESOURCE_TYPE: &str = "google_certificate_manager_certificate_map";
pub const ENTRY_RESOURCE_TYPE: &str = "google_certificate_manager_certificate_map_entry";

#[derive(Debug, Deserialize)]
struct CertificateMapRecord {
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct CertificateMapEntryRecord {
    name: String,
    hostname: Option<String>,
    matcher: Option<String>,
    #[serde(default)]
    certificates: Vec<String>,
}

pub struct CertificateMapRenderer {
    project: String,
}

impl CertificateMapRenderer {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
        }
    }

    fn map_name(record: &Value) -> Result<String> {
        let map: CertificateMapRecord = parse_record(RESOURCE_TYPE, record)?;
        Ok(short_name(RESOURCE_TYPE, &map.name)?.to_string())
    }

    /// Render one entry of the map called `map_name`
    pub fn render_entry(&self, map_name: &str, record: &Value) -> Result<RenderOutput> {
        let entry: CertificateMapEntryRecord = parse_record(ENTRY_RESOURCE_TYPE, record)?;
        let entry_name = short_name(ENTRY_RESOURCE_TYPE, &entry.name)?;

        let mut body = Body::new()
            .string("project", &self.project)
            .string("name", entry_name)
            .string("map", map_name);

        // An entry either serves a hostname or is the map's PRIMARY fallback
        body = match (&entry.hostname, &entry.matcher) {
            (Some(hostname), _) => body.string("hostname", hostname),
            (None, Some(matcher)) => body.string("matcher", matcher),
            (None, None) => {
                return Err(ImportError::malformed(
                    ENTRY_RESOURCE_TYPE,
                    "hostname",
                    "<missing>",
                    "either 'hostname' or 'matcher'",
                )
                .into());
            }
        };

        let body = body.attribute("certificates", hcl::Value::InlineList(entry.certificates));

        Ok(RenderOutput::single(
            ResourceBlock::new(ENTRY_RESOURCE_TYPE, tf_name(entry_name), body),
            &entry.name,
        ))
    }
}

impl ResourceRenderer for CertificateMapRenderer {
    fn resource_type(&self) -> &'static str {
        RESOURCE_TYPE
    }

    fn label(&self) -> &'static str {
        "certificate maps"
    }

    fn hint(&self) -> &'static str {
        "authentication & project name"
    }

    fn list_args(&self) -> Vec<String> {
        list_command(&["certificate-manager", "maps", "list"], &[], &self.project)
    }

    fn related_args(&self, record: &Value) -> Result<Option<Vec<String>>> {
        let map_name = Self::map_name(record)?;
        Ok(Some(list_command(
            &["certificate-manager", "maps", "entries", "list"],
            &[("--map", map_name.as_str())],
            &self.project,
        )))
    }

    fn default_filename(&self, record: &Value) -> Result<String> {
        let map_name = Self::map_name(record)?;
        Ok(format!(
            "certificate_map_{}_{}.tf",
            tf_name(&map_name),
            tf_name(&self.project)
        ))
    }

    fn render(&self, record: &Value, related: &[Value]) -> Result<RenderOutput> {
        let map: CertificateMapRecord = parse_record(RESOURCE_TYPE, record)?;
        let map_name = short_name(RESOURCE_TYPE, &map.name)?;

        let body = Body::new()
            .string("project", &self.project)
            .string("name", map_name)
            .string("description", &map.description);

        let mut output = RenderOutput::single(
            ResourceBlock::new(RESOURCE_TYPE, tf_name(map_name), body),
            &map.name,
        );

        for entry in related {
            output.extend(self.render_entry(map_name, entry)?);
        }

        Ok(output)
    }
}
