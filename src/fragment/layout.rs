//! Byte-layout constants for element and sub-element framing.

use super::{ELEMID_FRAGMENT, MAX_UNIT_PAYLOAD_LEN, UNIT_HEADER_LEN, UnitKind};

/// Where each header field lives and how large a unit may be.
///
/// # Examples
///
/// ```
/// use elemfrag::fragment::{UnitKind, UnitLayout};
///
/// let layout = UnitLayout::resolve(UnitKind::Element);
/// assert_eq!(layout.header_len(), 2);
/// assert_eq!(layout.extension_offset(), Some(2));
/// assert_eq!(UnitKind::subelement(254).layout().extension_offset(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitLayout {
    header_len: usize,
    max_payload_len: usize,
    id_offset: usize,
    len_offset: usize,
    extension_offset: Option<usize>,
    fragment_id: u8,
}

impl UnitLayout {
    /// Resolve the layout for `kind`.
    #[must_use]
    pub const fn resolve(kind: UnitKind) -> Self {
        match kind {
            UnitKind::Element => Self {
                header_len: UNIT_HEADER_LEN,
                max_payload_len: MAX_UNIT_PAYLOAD_LEN,
                id_offset: 0,
                len_offset: 1,
                extension_offset: Some(UNIT_HEADER_LEN),
                fragment_id: ELEMID_FRAGMENT,
            },
            UnitKind::Subelement { fragment_id } => Self {
                header_len: UNIT_HEADER_LEN,
                max_payload_len: MAX_UNIT_PAYLOAD_LEN,
                id_offset: 0,
                len_offset: 1,
                extension_offset: None,
                fragment_id,
            },
        }
    }

    #[must_use]
    pub const fn header_len(&self) -> usize { self.header_len }

    #[must_use]
    pub const fn max_payload_len(&self) -> usize { self.max_payload_len }

    #[must_use]
    pub const fn id_offset(&self) -> usize { self.id_offset }

    #[must_use]
    pub const fn len_offset(&self) -> usize { self.len_offset }

    /// Offset of the Element ID Extension octet; only elements have one.
    #[must_use]
    pub const fn extension_offset(&self) -> Option<usize> { self.extension_offset }

    /// Identifier written into every continuation unit.
    #[must_use]
    pub const fn fragment_id(&self) -> u8 { self.fragment_id }

    /// Write a `{id, len}` header at `offset`.
    ///
    /// Callers validate `offset` against the buffer before writing.
    pub(crate) fn write_header(&self, buf: &mut [u8], offset: usize, id: u8, len: u8) {
        buf[offset + self.id_offset] = id;
        buf[offset + self.len_offset] = len;
    }
}
