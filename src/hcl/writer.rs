use super::model::{Body, ImportDirective, OutputValue, RenderOutput, ResourceBlock, Value};

/// Comment separating resource blocks from the import blocks
pub const IMPORT_SEPARATOR: &str = "#--Delete statements below after import--";

const INDENT: &str = "  ";

/// Serialize a render output into a complete Terraform file.
///
/// Resource blocks (each followed by its outputs) come first, blank-line
/// separated, then the separator comment and every import block.
pub fn render_document(output: &RenderOutput) -> String {
    let mut hcl = String::new();

    for block in output.blocks() {
        write_resource(&mut hcl, block);
    }

    hcl.push_str(IMPORT_SEPARATOR);
    hcl.push('\n');

    for import in output.imports() {
        write_import(&mut hcl, import);
    }

    hcl
}

fn write_resource(hcl: &mut String, block: &ResourceBlock) {
    hcl.push_str(&format!(
        "resource \"{}\" \"{}\" {{\n",
        block.resource_type, block.name
    ));
    write_body(hcl, &block.body, 1);
    hcl.push_str("}\n\n");

    for output in &block.outputs {
        write_output(hcl, output);
    }
}

fn write_output(hcl: &mut String, output: &OutputValue) {
    hcl.push_str(&format!("output \"{}\" {{\n", output.name));
    hcl.push_str(&format!("{}value = {}\n", INDENT, format_value(&output.value, 1)));
    hcl.push_str("}\n\n");
}

fn write_import(hcl: &mut String, import: &ImportDirective) {
    hcl.push_str("import {\n");
    hcl.push_str(&format!("{}to = {}\n", INDENT, import.to));
    hcl.push_str(&format!("{}id = {}\n", INDENT, quote(&import.id)));
    hcl.push_str("}\n\n");
}

/// Write attributes then nested blocks at the given depth.
///
/// Runs of consecutive single-line attributes have their `=` aligned the way
/// `terraform fmt` does; a multi-line value ends the run.
fn write_body(hcl: &mut String, body: &Body, depth: usize) {
    let indent = INDENT.repeat(depth);
    let widths = alignment_widths(body);

    for (attr, width) in body.attributes.iter().zip(widths) {
        hcl.push_str(&format!(
            "{}{:<width$} = {}\n",
            indent,
            attr.name,
            format_value(&attr.value, depth),
            width = width
        ));
    }

    for nested in &body.blocks {
        hcl.push_str(&format!("{}{} {{\n", indent, nested.name));
        write_body(hcl, &nested.body, depth + 1);
        hcl.push_str(&format!("{}}}\n", indent));
    }
}

fn alignment_widths(body: &Body) -> Vec<usize> {
    let mut widths = vec![0; body.attributes.len()];
    let mut run_start = 0;

    for index in 0..=body.attributes.len() {
        let ends_run = match body.attributes.get(index) {
            Some(attr) => attr.value.is_multiline(),
            None => true,
        };

        if ends_run {
            let run = &body.attributes[run_start..index];
            let width = run.iter().map(|attr| attr.name.len()).max().unwrap_or(0);
            for slot in &mut widths[run_start..index] {
                *slot = width;
            }
            // Multi-line attributes are written unpadded
            run_start = index + 1;
        }
    }

    widths
}

fn format_value(value: &Value, depth: usize) -> String {
    match value {
        Value::String(s) => quote(s),
        Value::Expression(expr) => expr.clone(),
        Value::InlineList(items) => format!(
            "[{}]",
            items.iter().map(|item| quote(item)).collect::<Vec<_>>().join(", ")
        ),
        Value::List(items) if items.is_empty() => "[]".to_string(),
        Value::List(items) => {
            let item_indent = INDENT.repeat(depth + 1);
            let mut list = String::from("[\n");
            for item in items {
                list.push_str(&format!("{}{},\n", item_indent, quote(item)));
            }
            list.push_str(&INDENT.repeat(depth));
            list.push(']');
            list
        }
    }
}

/// Quote a string literal, escaping what HCL would otherwise interpret
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');

    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            // Template sequences are escaped by doubling the introducer
            '$' | '%' if chars.peek() == Some(&'{') => {
                quoted.push(c);
                quoted.push(c);
            }
            _ => quoted.push(c),
        }
    }

    quoted.push('"');
    quoted
}
