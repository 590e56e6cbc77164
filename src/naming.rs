//! Identifier helpers for generated Terraform.

/// Convert text into a Terraform resource or output name.
///
/// Every character outside `[a-zA-Z0-9]` becomes `_` and the result is
/// lower-cased. Unlike label sanitizers that trim or prefix, this keeps a
/// one-to-one character mapping so ids stay recognisable.
pub fn tf_name(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Convert human-readable text into snake_case for filenames.
///
/// Whitespace runs collapse to a single `_`, an `_` is inserted before every
/// upper-case letter that is not the first character, and anything else
/// outside `[A-Za-z0-9_]` becomes `_`.
pub fn to_snake_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for (index, c) in text.chars().enumerate() {
        if c.is_whitespace() {
            if !in_whitespace {
                result.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        if c.is_ascii_uppercase() {
            if index > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else if c.is_ascii_alphanumeric() || c == '_' {
            result.push(c);
        } else {
            result.push('_');
        }
    }

    result
}
