use thiserror::Error;

/// Raised when a server DTO has a shape the domain types cannot represent.
///
/// These are invariant violations on the server side, not user errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("unsupported template type '{template_type}' for parameter '{name}'")]
    UnsupportedTemplateType { name: String, template_type: String },

    #[error("unsupported data type '{data_type}' for {template_type} parameter '{name}'")]
    UnsupportedDataType {
        name: String,
        data_type: String,
        template_type: String,
    },

    #[error("parameter type '{parameter_type}' of '{key}' is not supported")]
    UnsupportedParameterType { key: String, parameter_type: String },

    #[error("parameter '{name}' field '{field}' expected {expected}, got {found}")]
    ValueTypeMismatch {
        name: String,
        field: &'static str,
        expected: &'static str,
        found: String,
    },
}

/// Raised when a `::`-joined composite id cannot be parsed into a path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("composite id '{0}' must have 3 or 4 segments")]
    SegmentCount(String),

    #[error("composite id '{0}' contains an empty segment")]
    EmptySegment(String),
}
