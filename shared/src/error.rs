//! Payload errors

use thiserror::Error;

/// Errors raised while building or parsing a [`crate::DataLayerObject`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// A reserved key was written into the free-form field bag
    #[error("reserved key `{0}` cannot be set as an additional field")]
    ReservedKey(String),

    /// A reserved key carried a value of the wrong JSON type
    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// A typed sub-object could not be converted into JSON
    #[error("failed to serialize payload section: {0}")]
    Serialization(String),

    /// The payload was not a JSON object
    #[error("data layer payload must be a JSON object")]
    NotAnObject,
}

pub type PayloadResult<T> = Result<T, PayloadError>;
