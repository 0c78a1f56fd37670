use std::num::ParseIntError;
use thiserror::Error;

/// Errors produced while parsing SDP text or decoding attribute values.
#[derive(Error, Debug)]
pub enum SdpError {
    /// The left-hand side of a `<type>=<value>` line was not exactly one
    /// character. SDP only allows single-character type tags.
    #[error("sdp type tag must be a single character, got {0:?}")]
    InvalidTypeTag(String),

    /// A field that must be numeric failed to parse: the protocol version,
    /// the origin session id/version, or the media port/port count.
    #[error("invalid integer in {0}: {1}")]
    InvalidInteger(&'static str, #[source] ParseIntError),

    /// An `o=` value did not split into the six mandatory fields.
    #[error("invalid origin: expected 6 fields, got {0}")]
    InvalidOriginShape(usize),

    /// An `m=` value did not split into the four mandatory fields.
    #[error("invalid media description: expected 4 fields, got {0}")]
    InvalidMediaShape(usize),

    /// A recognized attribute is present but its value does not match the
    /// shape defined for it. Never raised during parsing, only when a
    /// caller asks for the typed decode of a specific attribute.
    #[error("malformed {0} attribute: {1:?}")]
    AttributeDecode(&'static str, String),
}

/// Specialized Result type for SDP operations.
pub type Result<T> = std::result::Result<T, SdpError>;
