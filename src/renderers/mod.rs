//! Per-kind conversion of inventory records into Terraform.
//!
//! Each importable kind implements [`ResourceRenderer`]: it knows how to list
//! its records, where the generated file goes, and how a single record (plus
//! any related records fetched for it) becomes resource blocks and import
//! directives. Rendering is pure; fetching and writing belong to the pipeline.

pub mod certificate;
pub mod certificate_map;
pub mod dns_authorization;
pub mod firestore_index;

pub use certificate::CertificateRenderer;
pub use certificate_map::CertificateMapRenderer;
pub use dns_authorization::DnsAuthorizationRenderer;
pub use firestore_index::FirestoreIndexRenderer;

use anyhow::Result;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ImportError;
use crate::hcl::RenderOutput;

/// Trait for rendering one kind of cloud resource as Terraform.
pub trait ResourceRenderer {
    /// Terraform type of the primary resource (e.g. "google_firestore_index")
    fn resource_type(&self) -> &'static str;

    /// Plural, human-readable name used in messages (e.g. "indexes")
    fn label(&self) -> &'static str;

    /// What to double-check when the listing returns nothing
    fn hint(&self) -> &'static str;

    /// Arguments for the inventory CLI that list every record of this kind
    fn list_args(&self) -> Vec<String>;

    /// Arguments for a second listing issued once per record, if this kind
    /// has dependent records (e.g. the entries of a certificate map).
    fn related_args(&self, _record: &Value) -> Result<Option<Vec<String>>> {
        Ok(None)
    }

    /// File the record is written to when no filename is given
    fn default_filename(&self, record: &Value) -> Result<String>;

    /// Render a record and its related records into blocks and directives.
    ///
    /// Fails with [`ImportError::MalformedRecord`] when the record does not
    /// have the expected shape.
    fn render(&self, record: &Value, related: &[Value]) -> Result<RenderOutput>;
}

/// Build `gcloud` arguments for a project-scoped JSON listing
pub(crate) fn list_command(subcommand: &[&str], extra: &[(&str, &str)], project: &str) -> Vec<String> {
    let mut args: Vec<String> = subcommand.iter().map(|s| s.to_string()).collect();
    for (flag, value) in extra {
        args.push(flag.to_string());
        args.push(value.to_string());
    }
    args.push("--project".to_string());
    args.push(project.to_string());
    args.push("--format=json".to_string());
    args
}

/// Deserialize a record into the typed shape a renderer expects
pub(crate) fn parse_record<T: DeserializeOwned>(resource_type: &str, record: &Value) -> Result<T> {
    serde_json::from_value(record.clone()).map_err(|err| {
        ImportError::malformed(
            resource_type,
            "record",
            err.to_string(),
            "an inventory record with the documented fields",
        )
        .into()
    })
}

/// Capture the groups of `pattern` in a resource name
pub(crate) fn capture_segments<'a, const N: usize>(
    resource_type: &str,
    pattern: &Regex,
    name: &'a str,
    expected: &str,
) -> Result<[&'a str; N]> {
    let malformed = || ImportError::malformed(resource_type, "name", name, expected);
    let captures = pattern.captures(name).ok_or_else(malformed)?;

    let mut segments = [""; N];
    for (index, slot) in segments.iter_mut().enumerate() {
        *slot = captures.get(index + 1).ok_or_else(malformed)?.as_str();
    }
    Ok(segments)
}

/// Last `/`-separated segment of a fully-qualified resource name
pub(crate) fn short_name<'a>(resource_type: &str, name: &'a str) -> Result<&'a str> {
    match name.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => Ok(segment),
        _ => Err(ImportError::malformed(
            resource_type,
            "name",
            name,
            "a resource name ending in a non-empty segment",
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref PAIR: Regex = Regex::new(r"things/([^/]+)/items/(.+)$").unwrap();
    }

    #[test]
    fn test_list_command() {
        assert_eq!(
            list_command(&["maps", "list"], &[("--map", "m")], "p"),
            vec!["maps", "list", "--map", "m", "--project", "p", "--format=json"]
        );
    }

    #[test]
    fn test_capture_segments() {
        let [thing, item] =
            capture_segments::<2>("t", &PAIR, "projects/p/things/a/items/b", "pair").unwrap();
        assert_eq!(thing, "a");
        assert_eq!(item, "b");
    }

    #[test]
    fn test_capture_segments_malformed() {
        let err = capture_segments::<2>("t", &PAIR, "projects/p/things/a", "pair").unwrap_err();
        let err = err.downcast::<ImportError>().unwrap();
        assert!(matches!(err, ImportError::MalformedRecord { .. }));
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("t", "projects/p/certificates/web").unwrap(), "web");
        assert_eq!(short_name("t", "web").unwrap(), "web");
        assert!(short_name("t", "projects/p/").is_err());
        assert!(short_name("t", "").is_err());
    }
}
