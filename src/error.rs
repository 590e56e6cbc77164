use std::fmt;

/// Error types for inventory import operations
#[derive(Debug, Clone, PartialEq)]
pub enum ImportError {
    /// The inventory listing produced nothing usable: a non-zero exit,
    /// unparseable output, or an empty list
    NoData {
        /// Plural label of the resources that were listed (e.g. "indexes")
        label: String,
        /// What the user should double-check
        hint: String,
    },

    /// A record does not have the shape its renderer relies on
    MalformedRecord {
        /// Terraform resource type being rendered
        resource_type: String,
        /// Record field that failed to match
        field: String,
        /// Offending value (or a description of what was missing)
        value: String,
        /// Expected shape
        expected: String,
    },
}

impl ImportError {
    pub fn malformed(
        resource_type: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        ImportError::MalformedRecord {
            resource_type: resource_type.into(),
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::NoData { label, hint } => {
                write!(f, "No {} found, check {}", label, hint)
            }
            ImportError::MalformedRecord {
                resource_type,
                field,
                value,
                expected,
            } => {
                write!(
                    f,
                    "Malformed {} record: field '{}' is '{}', expected {}",
                    resource_type, field, value, expected
                )
            }
        }
    }
}

impl std::error::Error for ImportError {}
