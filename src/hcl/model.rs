//! Structured form of generated Terraform, kept separate from its text so
//! renderers can be asserted on without parsing their output.

/// Right-hand side of an attribute
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Quoted string literal
    String(String),
    /// List of string literals, one element per line
    List(Vec<String>),
    /// List of string literals on a single line
    InlineList(Vec<String>),
    /// Unquoted expression, e.g. a reference to another resource
    Expression(String),
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    pub fn expression(value: impl Into<String>) -> Self {
        Value::Expression(value.into())
    }

    /// Whether the value is written across several lines
    pub fn is_multiline(&self) -> bool {
        matches!(self, Value::List(items) if !items.is_empty())
    }
}

/// A single `name = value` pair
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: Value,
}

/// Attributes followed by nested blocks, both in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Body {
    pub attributes: Vec<Attribute>,
    pub blocks: Vec<NestedBlock>,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute
    pub fn attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value,
        });
        self
    }

    /// Append a quoted string attribute
    pub fn string(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attribute(name, Value::string(value))
    }

    /// Append a nested block
    pub fn block(mut self, name: impl Into<String>, body: Body) -> Self {
        self.blocks.push(NestedBlock {
            name: name.into(),
            body,
        });
        self
    }

    /// Look up an attribute value by name
    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| &attr.value)
    }

    /// Nested blocks with the given name, in order
    #[cfg(test)]
    pub fn blocks_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a NestedBlock> {
        self.blocks.iter().filter(move |block| block.name == name)
    }
}

/// A nested block such as `fields { ... }` or `managed { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct NestedBlock {
    pub name: String,
    pub body: Body,
}

/// A named `output` value emitted right after the resource it refers to
#[derive(Debug, Clone, PartialEq)]
pub struct OutputValue {
    pub name: String,
    pub value: Value,
}

/// One `resource "type" "name" { ... }` block
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceBlock {
    pub resource_type: String,
    pub name: String,
    pub body: Body,
    pub outputs: Vec<OutputValue>,
}

impl ResourceBlock {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>, body: Body) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
            body,
            outputs: Vec::new(),
        }
    }

    /// Attach a named output value
    pub fn with_output(mut self, name: impl Into<String>, value: Value) -> Self {
        self.outputs.push(OutputValue {
            name: name.into(),
            value,
        });
        self
    }

    /// Terraform address, e.g. `google_firestore_index.abc123`
    pub fn address(&self) -> String {
        format!("{}.{}", self.resource_type, self.name)
    }
}

/// An `import { to = ..., id = "..." }` block
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDirective {
    /// Address of the declared resource
    pub to: String,
    /// Fully-qualified id of the existing cloud resource, verbatim
    pub id: String,
}

/// Resource blocks and their import directives for one output file.
///
/// Blocks and directives are only added in pairs, so both sequences always
/// have the same length and the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOutput {
    blocks: Vec<ResourceBlock>,
    imports: Vec<ImportDirective>,
}

impl RenderOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fragment holding a single resource and its import directive
    pub fn single(block: ResourceBlock, id: impl Into<String>) -> Self {
        let mut output = Self::new();
        output.push(block, id);
        output
    }

    /// Add a resource block imported from the cloud resource `id`
    pub fn push(&mut self, block: ResourceBlock, id: impl Into<String>) {
        self.imports.push(ImportDirective {
            to: block.address(),
            id: id.into(),
        });
        self.blocks.push(block);
    }

    /// Append another fragment, preserving order
    pub fn extend(&mut self, other: RenderOutput) {
        self.blocks.extend(other.blocks);
        self.imports.extend(other.imports);
    }

    pub fn blocks(&self) -> &[ResourceBlock] {
        &self.blocks
    }

    pub fn imports(&self) -> &[ImportDirective] {
        &self.imports
    }
}
