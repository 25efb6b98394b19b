//! Iteration over a buffer of units with transparent reassembly.
//!
//! Parsers of nested structures such as the Multi-Link element's Link Info
//! field see a run of sub-elements, some of which may be fragmented.
//! [`UnitWalker`] presents each logical unit once, with its payload already
//! reassembled.

use bytes::Bytes;

use super::{
    CodecError,
    ProtocolViolation,
    Result,
    UnitKind,
    decode_sequence,
    scan,
    scanner::read_unit,
};

/// One logical element or sub-element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unit {
    identifier: u8,
    extension: Option<u8>,
    payload: Bytes,
    wire_len: usize,
    fragmented: bool,
}

impl Unit {
    /// Identifier of the lead unit.
    #[must_use]
    pub const fn identifier(&self) -> u8 { self.identifier }

    /// Element ID Extension of an extended element.
    #[must_use]
    pub const fn extension(&self) -> Option<u8> { self.extension }

    /// Payload bytes, excluding headers and any extension octet.
    #[must_use]
    pub fn payload(&self) -> &[u8] { &self.payload }

    /// Bytes the unit occupied in the walked buffer, including every header.
    #[must_use]
    pub const fn wire_len(&self) -> usize { self.wire_len }

    /// Whether the unit arrived as a fragment sequence.
    #[must_use]
    pub const fn is_fragmented(&self) -> bool { self.fragmented }

    /// Consume the unit, returning its payload.
    #[must_use]
    pub fn into_payload(self) -> Bytes { self.payload }
}

/// Walks a buffer that holds nothing but units of one kind.
///
/// Iteration stops after the first error.
///
/// # Examples
///
/// ```
/// use elemfrag::fragment::{UnitKind, UnitWalker};
///
/// let buf = [1_u8, 2, 0xaa, 0xbb, 5, 0];
/// let ids: Vec<u8> = UnitWalker::new(UnitKind::Element, &buf)
///     .map(|unit| unit.map(|u| u.identifier()))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(ids, [1, 5]);
/// ```
#[derive(Clone, Debug)]
pub struct UnitWalker<'a> {
    kind: UnitKind,
    buf: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> UnitWalker<'a> {
    #[must_use]
    pub const fn new(kind: UnitKind, buf: &'a [u8]) -> Self {
        Self {
            kind,
            buf,
            offset: 0,
            failed: false,
        }
    }

    /// Offset of the next unit to be read.
    #[must_use]
    pub const fn offset(&self) -> usize { self.offset }

    fn next_unit(&self) -> Result<Unit> {
        let rest = &self.buf[self.offset..];
        let layout = self.kind.layout();
        let lead = read_unit(&layout, rest, 0).map_err(|err| rebase(err, self.offset))?;
        let extension = if self.kind.has_extension(lead.id) {
            let offset = layout.extension_offset().unwrap_or(layout.header_len());
            if lead.len == 0 {
                return Err(ProtocolViolation::MissingExtension {
                    offset: self.offset,
                }
                .into());
            }
            Some(rest[offset])
        } else {
            None
        };

        let scanned = scan(self.kind, rest).map_err(|err| rebase(err, self.offset))?;
        if scanned.is_fragment_sequence() {
            let payload = decode_sequence(self.kind, &rest[..scanned.total_len()])?;
            return Ok(Unit {
                identifier: lead.id,
                extension,
                payload,
                wire_len: scanned.total_len(),
                fragmented: true,
            });
        }

        let end = lead.end(&layout);
        let start = self.kind.lead_bytes(lead.id);
        Ok(Unit {
            identifier: lead.id,
            extension,
            payload: Bytes::copy_from_slice(&rest[start..end]),
            wire_len: end,
            fragmented: false,
        })
    }
}

impl Iterator for UnitWalker<'_> {
    type Item = Result<Unit>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.buf.len() {
            return None;
        }
        match self.next_unit() {
            Ok(unit) => {
                self.offset += unit.wire_len();
                Some(Ok(unit))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Report offsets relative to the whole walked buffer.
fn rebase(err: CodecError, base: usize) -> CodecError {
    use ProtocolViolation as V;

    let CodecError::ProtocolViolation(violation) = err else {
        return err;
    };
    let rebased = match violation {
        V::TruncatedHeader { offset, remaining } => V::TruncatedHeader {
            offset: offset + base,
            remaining,
        },
        V::TruncatedPayload {
            offset,
            declared,
            remaining,
        } => V::TruncatedPayload {
            offset: offset + base,
            declared,
            remaining,
        },
        V::ContinuationAfterShortUnit {
            offset,
            previous_len,
        } => V::ContinuationAfterShortUnit {
            offset: offset + base,
            previous_len,
        },
        V::EmptyContinuation { offset } => V::EmptyContinuation {
            offset: offset + base,
        },
        V::MissingExtension { offset } => V::MissingExtension {
            offset: offset + base,
        },
        V::NotAFragmentSequence => V::NotAFragmentSequence,
    };
    rebased.into()
}
