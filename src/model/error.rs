use thiserror::Error;

/// Raised when a codec cannot convert a value in either direction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionFailure {
    #[error("could not convert value \"{value}\" of type {actual} to type {type_name}, expected one of: {}", .expected.join(", "))]
    InvalidType {
        value: String,
        actual: &'static str,
        type_name: &'static str,
        expected: &'static [&'static str],
    },

    #[error("could not convert storage value \"{value}\" to type {type_name}, expected format: {expected_format}")]
    InvalidFormat {
        value: String,
        type_name: &'static str,
        expected_format: String,
    },
}

/// Raised while wiring codecs into a type registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WiringError {
    #[error("type \"{name}\" is already bound to another codec, check the registered types for \"{name}\"")]
    AlreadyBound { name: String },
}
