use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("domain entity `{entity}` not found: `{identifier}`")]
    NotFound {
        entity: &'static str,
        identifier: String,
    },
    #[error("unknown openIn value '{value}'")]
    UnknownOpenMode { value: String },
}

impl DomainError {
    pub fn not_found(entity: &'static str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            identifier: identifier.into(),
        }
    }

    pub fn unknown_open_mode(value: impl Into<String>) -> Self {
        Self::UnknownOpenMode {
            value: value.into(),
        }
    }
}
