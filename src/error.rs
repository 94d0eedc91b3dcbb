//! Defines [`WktError`], representing all errors returned by this crate.

use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum WktError {
    /// The input ended where a byte or numeric token was still required.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// An unexpected byte was found where specific punctuation or a letter
    /// was required.
    #[error("expected {expected}, got {found:?}")]
    UnexpectedByte {
        /// What the grammar required at this position.
        expected: &'static str,
        /// The byte actually found.
        found: char,
    },

    /// The leading identifier is not one of the five recognized geometry
    /// keywords.
    #[error("unknown geometry type {0:?}")]
    UnknownGeometryType(String),

    /// A coordinate component could not be parsed as a floating-point
    /// number.
    #[error("malformed number {0:?}")]
    MalformedNumber(String),

    /// A polygon ring had fewer than 4 coordinates.
    #[error("a polygon ring must have at least 4 coordinates, got {0}")]
    RingTooShort(usize),

    /// A polygon ring's first and last coordinates differ.
    #[error("a polygon ring must be closed")]
    RingNotClosed,

    /// A POINT body contained a number of coordinates other than one.
    #[error("expected exactly 1 coordinate in a point, got {0}")]
    InvalidPointCount(usize),

    /// A dimension that cannot be represented.
    #[error("unsupported dimension: {0}")]
    InvalidDimension(String),
}

/// Crate-specific result type.
pub type WktResult<T> = std::result::Result<T, WktError>;
