//! Error type for the tuple codec.
//!
//! Mirrors the kind list in the codec's error-handling design: truncated
//! input, unknown kind tags, unsupported element types, invalid UTF-8, and
//! out-of-range timestamp offsets each carry the diagnostic fields needed to
//! explain *why* without re-parsing the input. `NoMatch` (the batch-prefix
//! mismatch sentinel) is deliberately not a variant here — callers observe it
//! as `None`, never as an `Err`.

use thiserror::Error;

/// Errors produced while encoding or decoding a tuple, element, or offset
/// table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The reader needed more bytes than remained in the input.
    #[error("truncated input: expected {expected} bytes at position {position}, {remaining} remain")]
    Truncated {
        expected: usize,
        position: usize,
        remaining: usize,
    },

    /// A byte that does not correspond to any known kind tag was encountered
    /// where one was expected.
    #[error("unknown kind tag {byte:#04x} at position {position}")]
    UnknownKind { byte: u8, position: usize },

    /// The encoder was asked to encode a value outside the supported kinds.
    ///
    /// `Element` is a closed enum covering exactly the supported kinds, so
    /// this is structurally unreachable from this crate's own encoder today
    /// — Rust's type system rules it out at compile time. Kept as a distinct
    /// error kind so a future non-exhaustive `Element` (or an alternate
    /// encoder built on a dynamically typed input) has somewhere to report
    /// this rather than overloading an unrelated variant.
    #[error("unsupported element type {type_name}")]
    UnsupportedElement { type_name: &'static str },

    /// Text payload bytes were not valid UTF-8.
    #[error("invalid utf-8 in text element: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// A decoded or supplied UTC offset fell outside -12:00..=+15:45 in
    /// quarter-hour units.
    #[error("utc offset {quarters} quarter-hours out of range")]
    OffsetOutOfRange { quarters: i32 },

    /// The writer's backing buffer could not grow any further.
    #[error("writer buffer overflow")]
    BufferOverflow,

    /// A tuple separator (`SEP`) was encountered while decoding a standalone
    /// tuple, where only batch decoding treats it as meaningful.
    #[error("unexpected tuple separator at position {position}")]
    UnexpectedSeparator { position: usize },

    /// A UUID's self-delimited payload decoded to a byte count other than
    /// 16. The kind tag itself was recognized; the payload it introduced
    /// was not shaped like a UUID.
    #[error("uuid payload decoded to {len} bytes, expected 16")]
    InvalidUuidLength { len: usize },

    /// Accumulating an offset table's deltas overflowed `u64`. Distinct from
    /// [`CodecError::BufferOverflow`], which is about the writer running out
    /// of room while encoding, not arithmetic overflow while decoding.
    #[error("offset table delta accumulation overflowed")]
    OffsetOverflow,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CodecError>;
