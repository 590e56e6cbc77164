//! Terraform (HCL) document model and writer.
//!
//! Renderers build [`RenderOutput`] values; [`render_document`] turns one into
//! the text of a `.tf` file. Only the subset of HCL the importers emit is
//! modelled: resource blocks with string, list and expression attributes,
//! nested blocks, `output` values and `import` blocks.

pub mod model;
pub mod writer;

pub use model::{Body, RenderOutput, ResourceBlock, Value};
pub use writer::render_document;
