//! Fragmentation planning.
//!
//! The standard divides an oversized payload of `L` octets into `M` maximum
//! size portions followed by at most one smaller portion:
//!
//! - without an Element ID Extension: `M = L / 255`, remainder `L mod 255`;
//! - with an Element ID Extension: `M = (L + 1) / 255`, remainder
//!   `(L - 254) mod 255`, because the extension octet occupies one byte of
//!   the lead unit.
//!
//! `M` includes the lead unit. Every portion after the lead gains its own
//! header.

use super::UnitKind;

/// Byte budget for a fragment sequence.
///
/// # Examples
///
/// ```
/// use elemfrag::fragment::{UnitKind, plan};
///
/// let req = plan(UnitKind::Element, 0xdd, 300);
/// assert!(req.is_required());
/// assert_eq!(req.total_len(), 304);
/// assert_eq!(req.trailing_fragment_len(), 45);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FragmentationRequirement {
    required: bool,
    total_len: usize,
    lead_bytes: usize,
    max_size_fragments: usize,
    trailing_fragment_len: usize,
    extra_header_bytes: usize,
}

impl FragmentationRequirement {
    /// Whether the payload must be split into a fragment sequence.
    #[must_use]
    pub const fn is_required(&self) -> bool { self.required }

    /// Total sequence length including every header.
    ///
    /// When fragmentation is not required this is the length of the single
    /// unfragmented unit.
    #[must_use]
    pub const fn total_len(&self) -> usize { self.total_len }

    /// Header bytes (and the extension octet, if any) in front of the payload.
    #[must_use]
    pub const fn lead_bytes(&self) -> usize { self.lead_bytes }

    /// Number of 255-byte portions, counting the lead unit.
    #[must_use]
    pub const fn max_size_fragments(&self) -> usize { self.max_size_fragments }

    /// Payload length of the final short continuation, or zero if absent.
    #[must_use]
    pub const fn trailing_fragment_len(&self) -> usize { self.trailing_fragment_len }

    /// Header bytes introduced by continuation units.
    #[must_use]
    pub const fn extra_header_bytes(&self) -> usize { self.extra_header_bytes }

    /// Minimum size of the buffer a build writes into, in either mode.
    #[must_use]
    pub const fn required_buffer_size(&self) -> usize { self.total_len }
}

/// Decide whether `payload_len` bytes under `identifier` need fragmenting.
///
/// This never fails. A `false` answer means the builder must not be called.
/// Lengths no buffer could hold saturate `total_len` at `usize::MAX`, which
/// every capacity check rejects.
#[must_use]
pub fn plan(kind: UnitKind, identifier: u8, payload_len: usize) -> FragmentationRequirement {
    let layout = kind.layout();
    let max = layout.max_payload_len();
    let header_len = layout.header_len();
    let extended = kind.has_extension(identifier);
    let lead_bytes = kind.lead_bytes(identifier);

    let single_unit_cap = if extended { max - 1 } else { max };
    if payload_len <= single_unit_cap {
        return FragmentationRequirement {
            required: false,
            total_len: lead_bytes + payload_len,
            lead_bytes,
            max_size_fragments: 0,
            trailing_fragment_len: 0,
            extra_header_bytes: 0,
        };
    }

    let (max_size_fragments, trailing_fragment_len) = if extended {
        (payload_len.saturating_add(1) / max, (payload_len - (max - 1)) % max)
    } else {
        (payload_len / max, payload_len % max)
    };

    let mut extra_header_bytes = (max_size_fragments - 1) * header_len;
    if trailing_fragment_len > 0 {
        extra_header_bytes += header_len;
    }

    FragmentationRequirement {
        required: true,
        total_len: lead_bytes
            .saturating_add(payload_len)
            .saturating_add(extra_header_bytes),
        lead_bytes,
        max_size_fragments,
        trailing_fragment_len,
        extra_header_bytes,
    }
}
