use thiserror::Error;

/// Input-contract violations reported by the contour engine.
#[derive(Debug, Error, PartialEq)]
pub enum ContourError {
    #[error("segment list is empty")]
    EmptySegments,
    #[error("segment {index} is a {kind}, expected a phone")]
    NotAPhone { index: usize, kind: &'static str },
    #[error("phone {index} has no '{attribute}' attribute")]
    MissingAttribute {
        attribute: &'static str,
        index: usize,
    },
    #[error("contour length must be greater than zero, got {0}")]
    InvalidLength(usize),
    #[error("unknown sentence position '{0}', expected First, Middle or Last")]
    UnknownPosition(String),
    #[error("invalid '{attribute}' attribute: {value:?}")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ContourError {
    pub(crate) fn missing(attribute: &'static str, index: usize) -> Self {
        Self::MissingAttribute { attribute, index }
    }

    pub(crate) fn invalid_attribute(attribute: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            attribute,
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ContourError>;
