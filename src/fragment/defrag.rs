//! Inbound helper that stitches a fragment sequence back into one payload.
//!
//! In-place defragmentation keeps the lead unit's header (and extension
//! octet) where it is and packs every continuation payload directly after
//! the lead payload. Whatever followed the sequence in the buffer is moved
//! down to stay contiguous, leaving stale bytes at the end of the buffer
//! equal in number to the continuation headers removed. The lead header's
//! length octet is not rewritten.

use tracing::{debug, trace};

use super::{
    BufferRole,
    CodecError,
    ProtocolViolation,
    Result,
    ScanResult,
    SizeError,
    UnitKind,
    scanner::{UnitSpan, read_unit},
    scan,
};

/// Reassemble the sequence at the start of `buf` within `buf` itself.
///
/// The reassembled payload starts after the lead unit's header and
/// extension octet. Returns the payload length.
///
/// # Errors
///
/// Returns [`CodecError::InvalidSize`] for an empty buffer, the scan errors
/// of [`scan`](super::scan), or
/// [`ProtocolViolation::NotAFragmentSequence`] when `buf` holds a single unit.
///
/// # Examples
///
/// ```
/// use elemfrag::fragment::{UnitKind, defragment_in_place};
///
/// let mut buf = vec![0xdd, 255];
/// buf.extend(std::iter::repeat_n(1_u8, 255));
/// buf.extend([242, 2, 7, 8, 0x30, 0]);
/// let len = defragment_in_place(UnitKind::Element, &mut buf).unwrap();
/// assert_eq!(len, 257);
/// assert_eq!(&buf[257..261], &[7, 8, 0x30, 0]);
/// ```
pub fn defragment_in_place(kind: UnitKind, buf: &mut [u8]) -> Result<usize> {
    let scanned = scan_sequence(kind, buf)?;
    let layout = kind.layout();
    let lead = read_unit(&layout, buf, 0)?;
    let lead_bytes = kind.lead_bytes(lead.id);

    let mut dst = lead.end(&layout);
    for unit in continuations(kind, buf, &scanned)? {
        let src = unit.offset + layout.header_len();
        buf.copy_within(src..src + unit.len, dst);
        trace!(offset = unit.offset, len = unit.len, "continuation payload merged");
        dst += unit.len;
    }
    let trailing = scanned.total_len()..buf.len();
    if !trailing.is_empty() {
        buf.copy_within(trailing, dst);
    }
    debug_assert_eq!(dst, lead_bytes + scanned.payload_len());

    debug!(
        %kind,
        identifier = lead.id,
        payload_len = scanned.payload_len(),
        removed = scanned.continuation_overhead(lead_bytes),
        inline = true,
        "fragment sequence defragmented"
    );
    Ok(scanned.payload_len())
}

/// Reassemble the sequence at the start of `source` into the start of `dest`.
///
/// The lead header and extension octet are not copied. Returns the payload
/// length.
///
/// # Errors
///
/// Returns [`CodecError::InvalidSize`] when either buffer is empty or `dest`
/// cannot hold the payload, the scan errors of [`scan`](super::scan), or
/// [`ProtocolViolation::NotAFragmentSequence`] when `source` holds a single
/// unit.
pub fn defragment_into(kind: UnitKind, source: &[u8], dest: &mut [u8]) -> Result<usize> {
    if dest.is_empty() {
        return Err(SizeError::Empty {
            buffer: BufferRole::Destination,
        }
        .into());
    }
    let scanned = scan_sequence(kind, source)?;
    if dest.len() < scanned.payload_len() {
        return Err(SizeError::DefragmentedExceedsCapacity {
            capacity: dest.len(),
            required: scanned.payload_len(),
        }
        .into());
    }
    let layout = kind.layout();
    let lead = read_unit(&layout, source, 0)?;
    let lead_bytes = kind.lead_bytes(lead.id);
    let lead_end = lead.end(&layout);

    let mut dst = lead_end - lead_bytes;
    dest[..dst].copy_from_slice(&source[lead_bytes..lead_end]);
    for unit in continuations(kind, source, &scanned)? {
        let src = unit.offset + layout.header_len();
        dest[dst..dst + unit.len].copy_from_slice(&source[src..src + unit.len]);
        dst += unit.len;
    }

    debug!(
        %kind,
        identifier = lead.id,
        payload_len = scanned.payload_len(),
        inline = false,
        "fragment sequence defragmented"
    );
    Ok(scanned.payload_len())
}

/// Reassemble a sequence, choosing the mode at run time.
///
/// `dest` is consulted only when `inline` is false.
///
/// # Errors
///
/// Returns [`CodecError::NullBuffer`] when a required buffer is `None`, and
/// otherwise the errors of [`defragment_in_place`] or [`defragment_into`].
pub fn defragment(
    inline: bool,
    kind: UnitKind,
    fragments: Option<&mut [u8]>,
    dest: Option<&mut [u8]>,
) -> Result<usize> {
    let fragments = fragments.ok_or(CodecError::NullBuffer {
        buffer: BufferRole::Fragments,
    })?;
    if inline {
        return defragment_in_place(kind, fragments);
    }
    let dest = dest.ok_or(CodecError::NullBuffer {
        buffer: BufferRole::Destination,
    })?;
    defragment_into(kind, fragments, dest)
}

fn scan_sequence(kind: UnitKind, buf: &[u8]) -> Result<ScanResult> {
    let scanned = scan(kind, buf)?;
    if scanned.is_fragment_sequence() {
        Ok(scanned)
    } else {
        Err(ProtocolViolation::NotAFragmentSequence.into())
    }
}

/// Collect the continuation units of an already scanned sequence.
///
/// Spans are gathered before any byte moves so the merge loop only works
/// from offsets the scan has validated.
fn continuations(kind: UnitKind, buf: &[u8], scanned: &ScanResult) -> Result<Vec<UnitSpan>> {
    let layout = kind.layout();
    let mut spans = Vec::new();
    let mut offset = read_unit(&layout, buf, 0)?.end(&layout);
    while offset < scanned.total_len() {
        let unit = read_unit(&layout, buf, offset)?;
        offset = unit.end(&layout);
        spans.push(unit);
    }
    Ok(spans)
}
