//! Fetch, render and write: the import flow shared by every resource kind.

use anyhow::Result;
use serde_json::Value;
use std::path::PathBuf;

use crate::context::Context;
use crate::error::ImportError;
use crate::hcl::{RenderOutput, render_document};
use crate::inventory::{DEFAULT_GCLOUD, InventoryClient};
use crate::renderers::ResourceRenderer;

/// Options shared by every import
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Inventory CLI binary
    pub gcloud: String,
    /// Directory generated files are written to
    pub output_dir: PathBuf,
    /// Write everything to this file instead of the kind's default name
    pub filename: Option<String>,
    /// Print generated files instead of writing them
    pub dry_run: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            gcloud: DEFAULT_GCLOUD.to_string(),
            output_dir: PathBuf::from("."),
            filename: None,
            dry_run: false,
        }
    }
}

/// A generated Terraform file
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub output: RenderOutput,
}

/// How an import run ended
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// Files were generated (written, or printed on a dry run)
    Generated(Vec<GeneratedFile>),
    /// The listing returned nothing usable; nothing was written
    NoData,
}

/// Runs one import: list records, render them, write the result.
pub struct ImportPipeline<'a> {
    ctx: &'a Context,
    options: ImportOptions,
}

impl<'a> ImportPipeline<'a> {
    pub fn new(ctx: &'a Context, options: ImportOptions) -> Self {
        Self { ctx, options }
    }

    /// Import every record of the renderer's kind.
    ///
    /// An empty listing is reported the same way as a failed one. A malformed
    /// record aborts the run before any file is touched.
    pub fn run(&self, renderer: &dyn ResourceRenderer) -> Result<ImportOutcome> {
        self.ctx.output.section(&format!("Importing {}", renderer.label()));
        self.ctx
            .output
            .key_value("Resource type", renderer.resource_type());

        let client = InventoryClient::new(self.ctx, &self.options.gcloud);
        let records = match client.fetch(&renderer.list_args())? {
            Some(records) if !records.is_empty() => records,
            _ => {
                let err = ImportError::NoData {
                    label: renderer.label().to_string(),
                    hint: renderer.hint().to_string(),
                };
                self.ctx.output.error(&err.to_string());
                return Ok(ImportOutcome::NoData);
            }
        };

        let files = self.render_files(renderer, &client, &records)?;

        for file in &files {
            self.emit(file)?;
        }

        Ok(ImportOutcome::Generated(files))
    }

    /// Render every record, grouping fragments by destination file in the
    /// order files are first encountered.
    fn render_files(
        &self,
        renderer: &dyn ResourceRenderer,
        client: &InventoryClient,
        records: &[Value],
    ) -> Result<Vec<GeneratedFile>> {
        let mut files: Vec<GeneratedFile> = Vec::new();

        for record in records {
            let related = self.fetch_related(renderer, client, record)?;
            let fragment = renderer.render(record, &related)?;

            for block in fragment.blocks() {
                self.ctx
                    .output
                    .info(&format!("Importing {}", block.address()));
            }

            let filename = match &self.options.filename {
                Some(filename) => filename.clone(),
                None => renderer.default_filename(record)?,
            };
            let path = self.options.output_dir.join(filename);

            match files.iter_mut().find(|file| file.path == path) {
                Some(file) => file.output.extend(fragment),
                None => files.push(GeneratedFile {
                    path,
                    output: fragment,
                }),
            }
        }

        Ok(files)
    }

    fn fetch_related(
        &self,
        renderer: &dyn ResourceRenderer,
        client: &InventoryClient,
        record: &Value,
    ) -> Result<Vec<Value>> {
        let Some(args) = renderer.related_args(record)? else {
            return Ok(Vec::new());
        };

        match client.fetch(&args)? {
            Some(related) => Ok(related),
            None => {
                self.ctx.output.warning(&format!(
                    "Could not list related resources ({}), continuing without them",
                    args.join(" ")
                ));
                Ok(Vec::new())
            }
        }
    }

    fn emit(&self, file: &GeneratedFile) -> Result<()> {
        let document = render_document(&file.output);

        if self.options.dry_run {
            self.ctx
                .output
                .key_value("Would write", &file.path.display().to_string());
            self.ctx.output.plain(&document);
            return Ok(());
        }

        self.ctx.fs.write(&file.path, &document)?;
        self.ctx.output.success(&format!(
            "Wrote {} resource(s) to {}",
            file.output.blocks().len(),
            file.path.display()
        ));
        Ok(())
    }
}
