//! Payload and buffer fixtures.

use elemfrag::fragment::{UnitKind, plan};

/// Deterministic payload whose bytes differ between neighbouring fragments.
///
/// Byte `i` is `i mod 251`; the prime period keeps any misplaced 255-byte
/// chunk visible in assertions.
#[must_use]
pub fn patterned_payload(len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| u8::try_from(i % 251).unwrap_or_default())
        .collect()
}

/// A payload buffer laid out for a build: reserved lead bytes, the payload,
/// optional trailing caller bytes, then zeroed slack up to the planned
/// sequence length plus the trailing bytes.
#[derive(Clone, Debug)]
pub struct PayloadBuffer {
    /// Buffer handed to the builder.
    pub bytes: Vec<u8>,
    /// Number of payload bytes after the lead bytes.
    pub payload_len: usize,
}

impl PayloadBuffer {
    /// Lay out `payload` for a lead unit with `identifier`, followed by
    /// `trailing` caller bytes.
    #[must_use]
    pub fn new(kind: UnitKind, identifier: u8, payload: &[u8], trailing: &[u8]) -> Self {
        let requirement = plan(kind, identifier, payload.len());
        let lead_bytes = requirement.lead_bytes();
        let capacity = requirement.total_len() + trailing.len();
        let mut bytes = vec![0_u8; capacity];
        bytes[lead_bytes..lead_bytes + payload.len()].copy_from_slice(payload);
        let tail_at = lead_bytes + payload.len();
        bytes[tail_at..tail_at + trailing.len()].copy_from_slice(trailing);
        Self {
            bytes,
            payload_len: payload.len(),
        }
    }
}
