//! Error types emitted by the fragment-sequence codec.
//!
//! Every failure is reported synchronously to the caller. The variants carry
//! the offsets and lengths involved so that the calling layer can log or
//! match on precise diagnostics without the codec logging on its behalf.

use thiserror::Error;

use super::UnitKind;

/// Names the buffer argument that was missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, derive_more::Display)]
pub enum BufferRole {
    /// Buffer holding the payload to fragment.
    #[display("payload buffer")]
    Payload,
    /// Buffer receiving a fragment sequence or defragmented payload.
    #[display("destination buffer")]
    Destination,
    /// Buffer holding a fragment sequence to scan or defragment.
    #[display("fragment buffer")]
    Fragments,
}

/// Capacity problems detected before any byte is written.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SizeError {
    /// The named buffer has no room at all.
    #[error("{buffer} is empty")]
    Empty { buffer: BufferRole },
    /// The payload buffer cannot hold the reserved lead bytes plus payload.
    #[error("payload buffer holds {capacity} bytes but {required} are needed for the payload")]
    PayloadExceedsCapacity { capacity: usize, required: usize },
    /// The buffer that receives the fragment sequence is too small.
    #[error("{buffer} holds {capacity} bytes but the fragment sequence needs {required}")]
    SequenceExceedsCapacity {
        buffer: BufferRole,
        capacity: usize,
        required: usize,
    },
    /// The destination cannot hold the reassembled payload.
    #[error("destination buffer holds {capacity} bytes but the reassembled payload needs {required}")]
    DefragmentedExceedsCapacity { capacity: usize, required: usize },
}

/// Framing problems discovered while walking units.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ProtocolViolation {
    /// Fewer bytes remain than a unit header needs.
    #[error("truncated header at offset {offset}: {remaining} bytes remain")]
    TruncatedHeader { offset: usize, remaining: usize },
    /// The length octet promises more payload than the buffer holds.
    #[error("unit at offset {offset} declares {declared} payload bytes but {remaining} remain")]
    TruncatedPayload {
        offset: usize,
        declared: usize,
        remaining: usize,
    },
    /// A continuation unit follows a unit shorter than the maximum.
    #[error("continuation at offset {offset} follows a unit of length {previous_len}")]
    ContinuationAfterShortUnit { offset: usize, previous_len: usize },
    /// A continuation unit carries no payload.
    #[error("continuation at offset {offset} has zero length")]
    EmptyContinuation { offset: usize },
    /// Defragmentation was requested on a buffer that holds a single unit.
    #[error("buffer does not start with a fragment sequence")]
    NotAFragmentSequence,
    /// An extended element is too short to hold its extension octet.
    #[error("extended element at offset {offset} has no identifier extension")]
    MissingExtension { offset: usize },
}

/// Errors produced by the fragment-sequence codec.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// A required buffer was not supplied.
    #[error("{buffer} is missing")]
    NullBuffer { buffer: BufferRole },
    /// A buffer is empty or too small for the requested operation.
    #[error("invalid size: {0}")]
    InvalidSize(#[from] SizeError),
    /// The bytes do not form valid element framing.
    #[error("protocol violation: {0}")]
    ProtocolViolation(#[from] ProtocolViolation),
    /// The payload fits in a single unit, so no sequence can be built.
    #[error(
        "fragmentation not required for {kind} {identifier} with payload length {payload_len}"
    )]
    FragmentationNotRequired {
        kind: UnitKind,
        identifier: u8,
        payload_len: usize,
    },
}

impl CodecError {
    /// Returns true when the error stems from malformed framing.
    #[must_use]
    pub fn is_protocol_violation(&self) -> bool { matches!(self, Self::ProtocolViolation(_)) }
}

/// Result alias for codec operations.
pub type Result<T, E = CodecError> = std::result::Result<T, E>;
