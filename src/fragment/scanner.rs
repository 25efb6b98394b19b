//! Detection and measurement of fragment sequences.
//!
//! The standard offers no field announcing the overall length of a fragment
//! sequence. A buffer that ends exactly after a unit of length 255 is
//! therefore indistinguishable from a sequence that ends there, and the scan
//! reports it as complete. Callers must hand over the whole buffer.

use tracing::{debug, trace};

use super::{BufferRole, CodecError, ProtocolViolation, Result, SizeError, UnitKind, UnitLayout};

/// What a scan found at the start of a buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanResult {
    is_fragment_sequence: bool,
    total_len: usize,
    payload_len: usize,
}

impl ScanResult {
    /// Whether the lead unit is followed by at least one continuation.
    #[must_use]
    pub const fn is_fragment_sequence(&self) -> bool { self.is_fragment_sequence }

    /// Length of the sequence including all headers; zero if not a sequence.
    #[must_use]
    pub const fn total_len(&self) -> usize { self.total_len }

    /// Payload bytes across all units, excluding headers and any extension
    /// octet; zero if not a sequence.
    #[must_use]
    pub const fn payload_len(&self) -> usize { self.payload_len }

    /// Header bytes a defragmentation removes, excluding the lead's.
    pub(crate) const fn continuation_overhead(&self, lead_bytes: usize) -> usize {
        self.total_len - self.payload_len - lead_bytes
    }
}

/// A validated unit located within a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct UnitSpan {
    pub(crate) offset: usize,
    pub(crate) id: u8,
    pub(crate) len: usize,
}

impl UnitSpan {
    pub(crate) const fn end(&self, layout: &UnitLayout) -> usize {
        self.offset + layout.header_len() + self.len
    }
}

/// Read the unit at `offset`, checking that its header and payload fit.
pub(crate) fn read_unit(layout: &UnitLayout, buf: &[u8], offset: usize) -> Result<UnitSpan> {
    let remaining = buf.len().saturating_sub(offset);
    let header = buf
        .get(offset..offset + layout.header_len())
        .ok_or(ProtocolViolation::TruncatedHeader { offset, remaining })?;
    let id = header[layout.id_offset()];
    let len = usize::from(header[layout.len_offset()]);
    let available = remaining - layout.header_len();
    if len > available {
        return Err(ProtocolViolation::TruncatedPayload {
            offset,
            declared: len,
            remaining: available,
        }
        .into());
    }
    Ok(UnitSpan { offset, id, len })
}

/// Find the continuation that directly follows `current`, if any.
fn successor(layout: &UnitLayout, buf: &[u8], current: &UnitSpan) -> Result<Option<UnitSpan>> {
    let next_offset = current.end(layout);
    if next_offset == buf.len() {
        return Ok(None);
    }
    let next = read_unit(layout, buf, next_offset)?;
    if next.id != layout.fragment_id() {
        return Ok(None);
    }
    if current.len != layout.max_payload_len() {
        return Err(ProtocolViolation::ContinuationAfterShortUnit {
            offset: next_offset,
            previous_len: current.len,
        }
        .into());
    }
    if next.len == 0 {
        return Err(ProtocolViolation::EmptyContinuation {
            offset: next_offset,
        }
        .into());
    }
    Ok(Some(next))
}

/// Scan `buf`, which must begin with the identifier of a candidate lead unit.
///
/// # Errors
///
/// Returns [`CodecError::InvalidSize`] for an empty buffer and
/// [`CodecError::ProtocolViolation`] when a header or declared payload
/// overruns the buffer, a continuation follows a short unit, or a
/// continuation is empty.
///
/// # Examples
///
/// ```
/// use elemfrag::fragment::{UnitKind, scan};
///
/// let single = [0xdd, 3, 1, 2, 3];
/// assert!(!scan(UnitKind::Element, &single).unwrap().is_fragment_sequence());
/// ```
pub fn scan(kind: UnitKind, buf: &[u8]) -> Result<ScanResult> {
    if buf.is_empty() {
        return Err(SizeError::Empty {
            buffer: BufferRole::Fragments,
        }
        .into());
    }
    let layout = kind.layout();
    let lead = read_unit(&layout, buf, 0)?;
    let Some(mut next) = successor(&layout, buf, &lead)? else {
        return Ok(ScanResult::default());
    };

    let mut total_len = lead.end(&layout);
    // A lead carrying a continuation has length 255, so the extension octet
    // is always present here.
    let mut payload_len = if kind.has_extension(lead.id) {
        lead.len - 1
    } else {
        lead.len
    };

    loop {
        trace!(offset = next.offset, len = next.len, "continuation unit scanned");
        total_len += layout.header_len() + next.len;
        payload_len += next.len;
        match successor(&layout, buf, &next)? {
            Some(following) => next = following,
            None => break,
        }
    }

    debug!(%kind, identifier = lead.id, total_len, payload_len, "fragment sequence found");
    Ok(ScanResult {
        is_fragment_sequence: true,
        total_len,
        payload_len,
    })
}

/// Scan a buffer that the caller may not have supplied.
///
/// # Errors
///
/// Returns [`CodecError::NullBuffer`] when `buf` is `None`, and otherwise the
/// errors of [`scan`].
pub fn scan_buffer(kind: UnitKind, buf: Option<&[u8]>) -> Result<ScanResult> {
    let buf = buf.ok_or(CodecError::NullBuffer {
        buffer: BufferRole::Fragments,
    })?;
    scan(kind, buf)
}
