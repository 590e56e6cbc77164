//! Certificate Manager certificates.

use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;

use super::{ResourceRenderer, list_command, parse_record, short_name};
use crate::hcl::{self, Body, RenderOutput, ResourceBlock};
use crate::naming::tf_name;

pub const RESOURCE_TYPE: &str = "google_certificate_manager_certificate";

#[derive(Debug, Deserialize)]
struct CertificateRecord {
    name: String,
    #[serde(default)]
    description: String,
    managed: Option<ManagedCertificate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManagedCertificate {
    #[serde(default)]
    domains: Vec<String>,
    #[serde(default)]
    dns_authorizations: Vec<String>,
}

pub struct CertificateRenderer {
    project: String,
}

impl CertificateRenderer {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
        }
    }
}

impl ResourceRenderer for CertificateRenderer {
    fn resource_type(&self) -> &'static str {
        RESOURCE_TYPE
    }

    fn label(&self) -> &'static str {
        "certificates"
    }

    fn hint(&self) -> &'static str {
        "authentication & project name"
    }

    fn list_args(&self) -> Vec<String> {
        list_command(
            &["certificate-manager", "certificates", "list"],
            &[],
            &self.project,
        )
    }

    fn default_filename(&self, _record: &Value) -> Result<String> {
        Ok(format!(
            "certificate_manager_certificate_{}.tf",
            tf_name(&self.project)
        ))
    }

    fn render(&self, record: &Value, _related: &[Value]) -> Result<RenderOutput> {
        let certificate: CertificateRecord = parse_record(RESOURCE_TYPE, record)?;
        let certificate_name = short_name(RESOURCE_TYPE, &certificate.name)?;

        let mut body = Body::new()
            .string("project", &self.project)
            .string("name", certificate_name)
            .string("description", &certificate.description);

        // Self-managed certificates carry no `managed` section
        if let Some(managed) = certificate.managed {
            body = body.block(
                "managed",
                Body::new()
                    .attribute("domains", hcl::Value::List(managed.domains))
                    .attribute(
                        "dns_authorizations",
                        hcl::Value::List(managed.dns_authorizations),
                    ),
            );
        }

        Ok(RenderOutput::single(
            ResourceBlock::new(RESOURCE_TYPE, tf_name(certificate_name), body),
            &certificate.name,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_managed_certificate() {
        let renderer = CertificateRenderer::new("p");
        let record = json!({
            "name": "projects/p/locations/global/certificates/Shop.Example",
            "description": "storefront",
            "managed": {
                "domains": ["shop.example.com", "www.shop.example.com"],
                "dnsAuthorizations": [
                    "projects/p/locations/global/dnsAuthorizations/shop-example-com"
                ],
                "state": "ACTIVE"
            }
        });

        let output = renderer.render(&record, &[]).unwrap();
        let block = &output.blocks()[0];
        assert_eq!(block.name, "shop_example");
        assert_eq!(block.body.get("name"), Some(&hcl::Value::string("Shop.Example")));
        assert_eq!(
            block.body.get("description"),
            Some(&hcl::Value::string("storefront"))
        );

        let managed = block.body.blocks_named("managed").next().unwrap();
        assert_eq!(
            managed.body.get("domains"),
            Some(&hcl::Value::List(vec![
                "shop.example.com".to_string(),
                "www.shop.example.com".to_string()
            ]))
        );
        assert_eq!(
            managed.body.get("dns_authorizations"),
            Some(&hcl::Value::List(vec![
                "projects/p/locations/global/dnsAuthorizations/shop-example-com".to_string()
            ]))
        );

        assert_eq!(
            output.imports()[0].to,
            "google_certificate_manager_certificate.shop_example"
        );
        assert_eq!(
            output.imports()[0].id,
            "projects/p/locations/global/certificates/Shop.Example"
        );
    }

    #[test]
    fn test_missing_description_renders_empty_string() {
        let renderer = CertificateRenderer::new("p");
        let record = json!({
            "name": "projects/p/locations/global/certificates/web",
            "managed": {"domains": ["web.example.com"]}
        });

        let output = renderer.render(&record, &[]).unwrap();
        let block = &output.blocks()[0];
        assert_eq!(block.body.get("description"), Some(&hcl::Value::string("")));

        let managed = block.body.blocks_named("managed").next().unwrap();
        assert_eq!(
            managed.body.get("dns_authorizations"),
            Some(&hcl::Value::List(vec![]))
        );
    }

    #[test]
    fn test_self_managed_certificate_has_no_managed_block() {
        let renderer = CertificateRenderer::new("p");
        let record = json!({
            "name": "projects/p/locations/global/certificates/legacy",
            "selfManaged": {}
        });

        let output = renderer.render(&record, &[]).unwrap();
        assert_eq!(output.blocks()[0].body.blocks_named("managed").count(), 0);
    }

    #[test]
    fn test_default_filename() {
        let renderer = CertificateRenderer::new("my-project");
        assert_eq!(
            renderer.default_filename(&Value::Null).unwrap(),
            "certificate_manager_certificate_my_project.tf"
        );
    }
}
