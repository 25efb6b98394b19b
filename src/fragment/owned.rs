//! Allocating conveniences over the buffer-level codec.
//!
//! These helpers suit callers that hold a payload as a plain slice and want
//! an owned result, at the cost of one allocation per call.

use bytes::{Bytes, BytesMut};

use super::{CodecError, Result, UnitKind, build_in_place, defragment_into, plan, scan};

/// Build the fragment sequence for `payload` in a freshly allocated buffer.
///
/// # Errors
///
/// Returns [`CodecError::FragmentationNotRequired`] when `payload` fits a
/// single unit.
///
/// # Examples
///
/// ```
/// use elemfrag::fragment::{UnitKind, encode_sequence};
///
/// let seq = encode_sequence(UnitKind::subelement(254), 0, 0, &[9_u8; 256]).unwrap();
/// assert_eq!(seq.len(), 2 + 255 + 2 + 1);
/// assert_eq!(&seq[257..], &[254, 1, 9]);
/// ```
pub fn encode_sequence(
    kind: UnitKind,
    identifier: u8,
    extension: u8,
    payload: &[u8],
) -> Result<BytesMut> {
    let requirement = plan(kind, identifier, payload.len());
    if !requirement.is_required() {
        return Err(CodecError::FragmentationNotRequired {
            kind,
            identifier,
            payload_len: payload.len(),
        });
    }
    let mut buf = BytesMut::zeroed(requirement.total_len());
    let lead_bytes = requirement.lead_bytes();
    buf[lead_bytes..lead_bytes + payload.len()].copy_from_slice(payload);
    let len = build_in_place(kind, identifier, extension, &mut buf, payload.len())?;
    buf.truncate(len);
    Ok(buf)
}

/// Reassemble the fragment sequence at the start of `buf` into a new buffer.
///
/// # Errors
///
/// Returns the errors of [`scan`], or
/// [`ProtocolViolation::NotAFragmentSequence`](super::ProtocolViolation::NotAFragmentSequence)
/// when `buf` starts with a single unit.
pub fn decode_sequence(kind: UnitKind, buf: &[u8]) -> Result<Bytes> {
    let scanned = scan(kind, buf)?;
    if !scanned.is_fragment_sequence() {
        return Err(super::ProtocolViolation::NotAFragmentSequence.into());
    }
    let mut out = BytesMut::zeroed(scanned.payload_len());
    let len = defragment_into(kind, buf, &mut out)?;
    out.truncate(len);
    Ok(out.freeze())
}
