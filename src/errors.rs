//! Decode errors
//!
//! Every failure carries a [`Location`]: a byte offset into binary input, a
//! 1-based line number into ASCII input. Callers can point at the offending
//! spot without the codec printing or logging anything itself.

use std::fmt::Display;

/// Position of a decode failure within the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Absolute byte offset into a binary payload.
    Byte(usize),
    /// One-based line number in an ASCII payload.
    Line(usize),
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Byte(offset) => write!(f, "byte {}", offset),
            Location::Line(line) => write!(f, "line {}", line),
        }
    }
}

/// All the possible ways a decode can fail.
///
/// A decode either yields a whole mesh or one of these; no partial mesh is
/// ever handed back next to an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The buffer ends before the declared binary triangle records do.
    TruncatedBinary { at: Location, expected: u64, actual: u64 },
    /// The binary record area holds more bytes than the declared count uses.
    CountMismatch { at: Location, declared: u32, trailing: usize },
    /// A coordinate or normal component is NaN, infinite, or not a number at all.
    InvalidFloat { at: Location, value: String },
    /// A facet block violates the `facet … outer loop … endloop … endfacet` shape.
    MalformedFacet { at: Location, reason: String },
    /// A token no production accepts in the current parse state.
    UnexpectedToken { at: Location, expected: &'static str, found: String },
    /// The caller's cancellation flag was raised or its triangle budget ran
    /// out between records.
    Cancelled { at: Location, decoded: usize },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::TruncatedBinary { at, expected, actual } => write!(
                f,
                "binary payload truncated at {}: need {} bytes, have {}",
                at, expected, actual
            ),
            ParseError::CountMismatch { at, declared, trailing } => write!(
                f,
                "triangle count mismatch at {}: {} declared, {} trailing bytes",
                at, declared, trailing
            ),
            ParseError::InvalidFloat { at, value } => {
                write!(f, "invalid float '{}' at {}", value, at)
            },
            ParseError::MalformedFacet { at, reason } => {
                write!(f, "malformed facet starting at {}: {}", at, reason)
            },
            ParseError::UnexpectedToken { at, expected, found } => {
                write!(f, "unexpected token at {}: expected {}, found '{}'", at, expected, found)
            },
            ParseError::Cancelled { at, decoded } => {
                write!(f, "decode cancelled at {} after {} triangles", at, decoded)
            },
        }
    }
}

impl ParseError {
    /// Where in the input the failure was detected.
    pub const fn location(&self) -> Location {
        match self {
            ParseError::TruncatedBinary { at, .. }
            | ParseError::CountMismatch { at, .. }
            | ParseError::InvalidFloat { at, .. }
            | ParseError::MalformedFacet { at, .. }
            | ParseError::UnexpectedToken { at, .. }
            | ParseError::Cancelled { at, .. } => *at,
        }
    }
}
