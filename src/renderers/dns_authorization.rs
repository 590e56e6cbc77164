//! Certificate Manager DNS authorizations.
//!
//! Besides the resource itself, two outputs expose the DNS record the
//! authorization asks for, so it can be wired into a DNS zone.

use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::{ResourceRenderer, capture_segments, list_command, parse_record};
use crate::hcl::{self, Body, RenderOutput, ResourceBlock};
use crate::naming::{tf_name, to_snake_case};

pub const RESOURCE_TYPE: &str = "google_certificate_manager_dns_authorization";

lazy_static! {
    static ref DNS_AUTHORIZATION_NAME: Regex =
        Regex::new(r"locations/([^/]+)/dnsAuthorizations/(.+)$").unwrap();
}

#[derive(Debug, Deserialize)]
struct DnsAuthorizationRecord {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    domain: String,
}

pub struct DnsAuthorizationRenderer {
    project: String,
}

impl DnsAuthorizationRenderer {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
        }
    }
}

impl ResourceRenderer for DnsAuthorizationRenderer {
    fn resource_type(&self) -> &'static str {
        RESOURCE_TYPE
    }

    fn label(&self) -> &'static str {
        "DNS authorizations"
    }

    fn hint(&self) -> &'static str {
        "authentication & project name"
    }

    fn list_args(&self) -> Vec<String> {
        list_command(
            &["certificate-manager", "dns-authorizations", "list"],
            &[],
            &self.project,
        )
    }

    fn default_filename(&self, _record: &Value) -> Result<String> {
        Ok(format!("dns_authorizations_{}.tf", to_snake_case(&self.project)))
    }

    fn render(&self, record: &Value, _related: &[Value]) -> Result<RenderOutput> {
        let authorization: DnsAuthorizationRecord = parse_record(RESOURCE_TYPE, record)?;
        let [location, authorization_id] = capture_segments::<2>(
            RESOURCE_TYPE,
            &DNS_AUTHORIZATION_NAME,
            &authorization.name,
            "'.../locations/{location}/dnsAuthorizations/{id}'",
        )?;

        let body = Body::new()
            .string("project", &self.project)
            .string("name", authorization_id)
            .string("type", &authorization.kind)
            .string("location", location)
            .string("domain", &authorization.domain);

        let block = ResourceBlock::new(RESOURCE_TYPE, tf_name(authorization_id), body);
        let record_attribute = format!("{}.dns_resource_record.0", block.address());
        let output_prefix = tf_name(&authorization.domain);
        let block = block
            .with_output(
                format!("{}_record_name", output_prefix),
                hcl::Value::expression(format!("{}.name", record_attribute)),
            )
            .with_output(
                format!("{}_record_value", output_prefix),
                hcl::Value::expression(format!("{}.data", record_attribute)),
            );

        Ok(RenderOutput::single(block, &authorization.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImportError;
    use serde_json::json;

    fn foo_authorization() -> Value {
        json!({
            "name": "projects/p/locations/global/dnsAuthorizations/foo-example-com-dns-authorization",
            "type": "FIXED_RECORD",
            "domain": "foo.example.com",
            "dnsResourceRecord": {
                "name": "_acme-challenge.foo.example.com.",
                "type": "CNAME",
                "data": "abc.authorize.certificatemanager.goog."
            }
        })
    }

    #[test]
    fn test_render_dns_authorization() {
        let renderer = DnsAuthorizationRenderer::new("p");
        let output = renderer.render(&foo_authorization(), &[]).unwrap();

        let block = &output.blocks()[0];
        assert_eq!(block.name, "foo_example_com_dns_authorization");
        assert_eq!(
            block.body.get("name"),
            Some(&hcl::Value::string("foo-example-com-dns-authorization"))
        );
        assert_eq!(block.body.get("location"), Some(&hcl::Value::string("global")));
        assert_eq!(block.body.get("type"), Some(&hcl::Value::string("FIXED_RECORD")));
        assert_eq!(
            block.body.get("domain"),
            Some(&hcl::Value::string("foo.example.com"))
        );

        assert_eq!(
            output.imports()[0].id,
            "projects/p/locations/global/dnsAuthorizations/foo-example-com-dns-authorization"
        );
    }

    #[test]
    fn test_render_record_outputs() {
        let renderer = DnsAuthorizationRenderer::new("p");
        let output = renderer.render(&foo_authorization(), &[]).unwrap();
        let outputs = &output.blocks()[0].outputs;

        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].name, "foo_example_com_record_name");
        assert_eq!(
            outputs[0].value,
            hcl::Value::expression(
                "google_certificate_manager_dns_authorization.foo_example_com_dns_authorization.dns_resource_record.0.name"
            )
        );
        assert_eq!(outputs[1].name, "foo_example_com_record_value");
        assert_eq!(
            outputs[1].value,
            hcl::Value::expression(
                "google_certificate_manager_dns_authorization.foo_example_com_dns_authorization.dns_resource_record.0.data"
            )
        );
    }

    #[test]
    fn test_render_regional_location() {
        let renderer = DnsAuthorizationRenderer::new("p");
        let record = json!({
            "name": "projects/p/locations/europe-west1/dnsAuthorizations/shop",
            "type": "PER_PROJECT_RECORD",
            "domain": "shop.example.com"
        });

        let output = renderer.render(&record, &[]).unwrap();
        assert_eq!(
            output.blocks()[0].body.get("location"),
            Some(&hcl::Value::string("europe-west1"))
        );
    }

    #[test]
    fn test_render_malformed_name() {
        let renderer = DnsAuthorizationRenderer::new("p");
        let record = json!({
            "name": "projects/p/dnsAuthorizations/foo",
            "type": "FIXED_RECORD",
            "domain": "foo.example.com"
        });

        let err = renderer.render(&record, &[]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ImportError>(),
            Some(ImportError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_default_filename() {
        let renderer = DnsAuthorizationRenderer::new("storytel 148812");
        assert_eq!(
            renderer.default_filename(&Value::Null).unwrap(),
            "dns_authorizations_storytel_148812.tf"
        );
    }
}
