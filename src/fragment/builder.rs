//! Outbound helper that turns an oversized payload into a fragment sequence.
//!
//! The payload buffer reserves the lead unit's header (and, for extended
//! elements, the extension octet) in front of the payload:
//!
//! ```text
//! [id][len][ext?][payload ............][trailing caller bytes][slack]
//! ```
//!
//! Continuation headers are inserted by shifting later portions towards the
//! end of the buffer. Portions are processed from the highest offset down so
//! an in-place build never overwrites bytes it has yet to move.

use tracing::{debug, trace};

use super::{
    BufferRole,
    CodecError,
    FragmentationRequirement,
    Result,
    SizeError,
    UnitKind,
    UnitLayout,
    plan,
};

/// Where relocated portions land.
enum Target<'a> {
    /// Rewrite the payload buffer itself.
    InPlace(&'a mut [u8]),
    /// Copy from a read-only payload buffer into a separate destination.
    Separate { source: &'a [u8], dest: &'a mut [u8] },
}

impl Target<'_> {
    fn is_inline(&self) -> bool { matches!(self, Self::InPlace(_)) }

    /// Move `len` bytes from `src` in the payload buffer to `dst` in the output.
    fn relocate(&mut self, src: usize, dst: usize, len: usize) {
        match self {
            Self::InPlace(buf) => {
                debug_assert!(src + len <= buf.len() && dst + len <= buf.len());
                buf.copy_within(src..src + len, dst);
            }
            Self::Separate { source, dest } => {
                dest[dst..dst + len].copy_from_slice(&source[src..src + len]);
            }
        }
    }

    fn output(&mut self) -> &mut [u8] {
        match self {
            Self::InPlace(buf) => buf,
            Self::Separate { dest, .. } => dest,
        }
    }
}

/// Build a fragment sequence inside `buf`.
///
/// `buf` holds the reserved lead bytes, `payload_len` payload bytes, and
/// optionally further caller content. That content is shifted along with the
/// payload; the final `extra_header_bytes` of `buf` are treated as slack and
/// are overwritten. `extension` is ignored unless `identifier` is the
/// extended element ID.
///
/// # Errors
///
/// Returns [`CodecError::FragmentationNotRequired`] when the payload fits a
/// single unit, or [`CodecError::InvalidSize`] when `buf` is empty, cannot
/// hold the payload, or cannot hold the finished sequence.
///
/// # Examples
///
/// ```
/// use elemfrag::fragment::{UnitKind, build_in_place};
///
/// let mut buf = vec![0_u8; 304];
/// buf[2..302].fill(0xab);
/// let len = build_in_place(UnitKind::Element, 0xdd, 0, &mut buf, 300).unwrap();
/// assert_eq!(len, 304);
/// assert_eq!(&buf[..2], &[0xdd, 255]);
/// assert_eq!(&buf[257..259], &[242, 45]);
/// ```
pub fn build_in_place(
    kind: UnitKind,
    identifier: u8,
    extension: u8,
    buf: &mut [u8],
    payload_len: usize,
) -> Result<usize> {
    let requirement = checked_plan(kind, identifier, payload_len)?;
    check_payload_capacity(&requirement, buf.len(), payload_len)?;
    check_sequence_capacity(&requirement, BufferRole::Payload, buf.len())?;
    Ok(write_sequence(
        kind,
        identifier,
        extension,
        &requirement,
        payload_len,
        Target::InPlace(buf),
    ))
}

/// Build a fragment sequence from `source` into `dest`.
///
/// `source` uses the same layout as for [`build_in_place`]; its reserved lead
/// bytes are not read. Bytes of `dest` beyond the returned length are left
/// untouched.
///
/// # Errors
///
/// Returns [`CodecError::FragmentationNotRequired`] when the payload fits a
/// single unit, or [`CodecError::InvalidSize`] when either buffer is empty or
/// too small.
pub fn build_into(
    kind: UnitKind,
    identifier: u8,
    extension: u8,
    source: &[u8],
    payload_len: usize,
    dest: &mut [u8],
) -> Result<usize> {
    let requirement = checked_plan(kind, identifier, payload_len)?;
    check_payload_capacity(&requirement, source.len(), payload_len)?;
    if dest.is_empty() {
        return Err(SizeError::Empty {
            buffer: BufferRole::Destination,
        }
        .into());
    }
    check_sequence_capacity(&requirement, BufferRole::Destination, dest.len())?;
    Ok(write_sequence(
        kind,
        identifier,
        extension,
        &requirement,
        payload_len,
        Target::Separate { source, dest },
    ))
}

/// Build a fragment sequence, choosing the mode at run time.
///
/// This mirrors the driver-facing contract where buffers may be absent:
/// `dest` is consulted only when `inline` is false.
///
/// # Errors
///
/// Returns [`CodecError::NullBuffer`] when a required buffer is `None`, and
/// otherwise the errors of [`build_in_place`] or [`build_into`].
pub fn build(
    inline: bool,
    kind: UnitKind,
    identifier: u8,
    extension: u8,
    payload: Option<&mut [u8]>,
    payload_len: usize,
    dest: Option<&mut [u8]>,
) -> Result<usize> {
    checked_plan(kind, identifier, payload_len)?;
    let payload = payload.ok_or(CodecError::NullBuffer {
        buffer: BufferRole::Payload,
    })?;
    if inline {
        return build_in_place(kind, identifier, extension, payload, payload_len);
    }
    let dest = dest.ok_or(CodecError::NullBuffer {
        buffer: BufferRole::Destination,
    })?;
    build_into(kind, identifier, extension, payload, payload_len, dest)
}

fn checked_plan(
    kind: UnitKind,
    identifier: u8,
    payload_len: usize,
) -> Result<FragmentationRequirement> {
    let requirement = plan(kind, identifier, payload_len);
    if requirement.is_required() {
        Ok(requirement)
    } else {
        Err(CodecError::FragmentationNotRequired {
            kind,
            identifier,
            payload_len,
        })
    }
}

fn check_payload_capacity(
    requirement: &FragmentationRequirement,
    capacity: usize,
    payload_len: usize,
) -> Result<()> {
    if capacity == 0 {
        return Err(SizeError::Empty {
            buffer: BufferRole::Payload,
        }
        .into());
    }
    let required = requirement.lead_bytes().saturating_add(payload_len);
    if capacity < required {
        return Err(SizeError::PayloadExceedsCapacity { capacity, required }.into());
    }
    Ok(())
}

fn check_sequence_capacity(
    requirement: &FragmentationRequirement,
    buffer: BufferRole,
    capacity: usize,
) -> Result<()> {
    if capacity < requirement.total_len() {
        return Err(SizeError::SequenceExceedsCapacity {
            buffer,
            capacity,
            required: requirement.total_len(),
        }
        .into());
    }
    Ok(())
}

/// Lay out the sequence. All capacity checks have passed by this point.
fn write_sequence(
    kind: UnitKind,
    identifier: u8,
    extension: u8,
    requirement: &FragmentationRequirement,
    payload_len: usize,
    mut target: Target<'_>,
) -> usize {
    let layout = kind.layout();
    let header_len = layout.header_len();
    let max = layout.max_payload_len();
    let max_size_fragments = requirement.max_size_fragments();
    let trailing_len = requirement.trailing_fragment_len();

    // Caller content after the payload rides along with the highest portion.
    let mut tail_len = match &target {
        Target::InPlace(buf) => {
            buf.len() - requirement.lead_bytes() - payload_len - requirement.extra_header_bytes()
        }
        Target::Separate { .. } => 0,
    };
    let mut shift = requirement.extra_header_bytes();

    if trailing_len > 0 {
        let src = header_len + max_size_fragments * max;
        relocate_portion(
            &layout,
            &mut target,
            src,
            shift,
            trailing_len,
            std::mem::take(&mut tail_len),
        );
        shift -= header_len;
    }

    for index in (2..=max_size_fragments).rev() {
        let src = header_len + (index - 1) * max;
        relocate_portion(
            &layout,
            &mut target,
            src,
            shift,
            max,
            std::mem::take(&mut tail_len),
        );
        shift -= header_len;
    }
    debug_assert_eq!(shift, 0, "every continuation header must be placed");

    if let Target::Separate { source, dest } = &mut target {
        dest[header_len..header_len + max].copy_from_slice(&source[header_len..header_len + max]);
    }
    let inline = target.is_inline();
    let out = target.output();
    layout.write_header(out, 0, identifier, unit_len(max));
    if kind.has_extension(identifier)
        && let Some(offset) = layout.extension_offset()
    {
        out[offset] = extension;
    }

    debug!(
        %kind,
        identifier,
        payload_len,
        total_len = requirement.total_len(),
        inline,
        "fragment sequence built"
    );
    requirement.total_len()
}

/// Move one payload portion `shift` bytes up and write its continuation header.
fn relocate_portion(
    layout: &UnitLayout,
    target: &mut Target<'_>,
    src: usize,
    shift: usize,
    portion_len: usize,
    tail_len: usize,
) {
    let dst = src + shift;
    target.relocate(src, dst, portion_len + tail_len);
    let header_at = dst - layout.header_len();
    layout.write_header(
        target.output(),
        header_at,
        layout.fragment_id(),
        unit_len(portion_len),
    );
    trace!(offset = header_at, len = portion_len, "continuation unit placed");
}

/// Narrow a unit payload length to its length octet.
fn unit_len(len: usize) -> u8 { u8::try_from(len).unwrap_or(u8::MAX) }
