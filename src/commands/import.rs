use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::context::Context;
use crate::inventory::DEFAULT_GCLOUD;
use crate::pipeline::{ImportOptions, ImportOutcome, ImportPipeline};
use crate::renderers::firestore_index::DEFAULT_DATABASE;
use crate::renderers::{
    CertificateMapRenderer, CertificateRenderer, DnsAuthorizationRenderer, FirestoreIndexRenderer,
    ResourceRenderer,
};

/// Options accepted by every subcommand
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Path to the gcloud CLI used to list resources
    #[arg(long, global = true, default_value = DEFAULT_GCLOUD)]
    gcloud: String,

    /// Directory generated files are written to
    #[arg(long, global = true, default_value = ".")]
    output_dir: PathBuf,

    /// Print the generated Terraform instead of writing files
    #[arg(long, global = true)]
    dry_run: bool,
}

/// Import existing Google Cloud resources as Terraform
#[derive(Debug, Subcommand)]
pub enum ImportCommand {
    /// Import Firestore composite indexes
    FirestoreIndex(FirestoreIndexArgs),

    /// Import Certificate Manager DNS authorizations
    DnsAuthz(DnsAuthzArgs),

    /// Import Certificate Manager certificate maps and their entries
    CertificateMap(ProjectArgs),

    /// Import Certificate Manager certificates
    Certificate(ProjectArgs),
}

#[derive(Debug, Args)]
pub struct FirestoreIndexArgs {
    /// The ID of the Google Cloud project
    project: String,

    /// The database to import indexes from
    #[arg(long, default_value = DEFAULT_DATABASE)]
    database: String,

    /// The Terraform filename (default: firestore_index_<database>_<project>.tf)
    #[arg(long)]
    filename: Option<String>,
}

#[derive(Debug, Args)]
pub struct DnsAuthzArgs {
    /// The ID of the Google Cloud project
    project: String,

    /// The Terraform filename (default: dns_authorizations_<project>.tf)
    #[arg(long)]
    filename: Option<String>,
}

#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// The ID of the Google Cloud project
    project: String,
}

impl ImportCommand {
    pub fn execute(self, ctx: &Context, global: GlobalArgs) -> Result<ImportOutcome> {
        let (renderer, filename) = self.into_renderer();
        let options = ImportOptions {
            gcloud: global.gcloud,
            output_dir: global.output_dir,
            filename,
            dry_run: global.dry_run,
        };

        ImportPipeline::new(ctx, options).run(renderer.as_ref())
    }

    /// The renderer for this subcommand and its filename override, if any
    fn into_renderer(self) -> (Box<dyn ResourceRenderer>, Option<String>) {
        match self {
            ImportCommand::FirestoreIndex(args) => (
                Box::new(FirestoreIndexRenderer::new(args.project, args.database)),
                args.filename,
            ),
            ImportCommand::DnsAuthz(args) => (
                Box::new(DnsAuthorizationRenderer::new(args.project)),
                args.filename,
            ),
            ImportCommand::CertificateMap(args) => {
                (Box::new(CertificateMapRenderer::new(args.project)), None)
            }
            ImportCommand::Certificate(args) => {
                (Box::new(CertificateRenderer::new(args.project)), None)
            }
        }
    }
}
