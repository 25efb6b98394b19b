//! Unit kinds and the IEEE 802.11 identifiers that govern fragmentation.

use derive_more::Display;

use super::UnitLayout;
use crate::config::KindArg;

/// Element ID reserved for element fragment continuation units.
pub const ELEMID_FRAGMENT: u8 = 242;

/// Element ID signalling that an Element ID Extension octet follows the header.
pub const ELEMID_EXTENSION: u8 = 255;

/// Sub-element fragment ID used inside the Multi-Link element's Link Info field.
pub const ML_LINK_INFO_SUBELEMID_FRAGMENT: u8 = 254;

/// Size of the `{id, length}` header shared by elements and sub-elements.
pub const UNIT_HEADER_LEN: usize = 2;

/// Largest payload a single element or sub-element can carry.
pub const MAX_UNIT_PAYLOAD_LEN: usize = 255;

/// Which framing a buffer uses.
///
/// Sub-element fragment markers differ between protocol areas, so the
/// sub-element variant carries the continuation identifier chosen by the
/// caller.
///
/// # Examples
///
/// ```
/// use elemfrag::fragment::{ELEMID_FRAGMENT, UnitKind};
///
/// assert_eq!(UnitKind::Element.layout().fragment_id(), ELEMID_FRAGMENT);
/// assert_eq!(UnitKind::subelement(254).layout().fragment_id(), 254);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
pub enum UnitKind {
    /// A top-level information element.
    #[default]
    #[display("element")]
    Element,
    /// A sub-element nested inside another element's payload.
    #[display("subelement:{fragment_id}")]
    Subelement {
        /// Identifier marking the sub-element's continuation units.
        fragment_id: u8,
    },
}

impl UnitKind {
    /// Construct a sub-element kind with the given continuation identifier.
    #[must_use]
    pub const fn subelement(fragment_id: u8) -> Self { Self::Subelement { fragment_id } }

    /// Resolve the byte layout for this kind.
    #[must_use]
    pub const fn layout(self) -> UnitLayout { UnitLayout::resolve(self) }

    /// Whether a lead unit with `identifier` carries an identifier-extension octet.
    #[must_use]
    pub const fn has_extension(self, identifier: u8) -> bool {
        matches!(self, Self::Element) && identifier == ELEMID_EXTENSION
    }

    /// Bytes occupied in front of the payload of a lead unit with `identifier`.
    #[must_use]
    pub const fn lead_bytes(self, identifier: u8) -> usize {
        if self.has_extension(identifier) {
            UNIT_HEADER_LEN + 1
        } else {
            UNIT_HEADER_LEN
        }
    }
}

impl From<KindArg> for UnitKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Element => Self::Element,
            KindArg::Subelement { fragment_id } => Self::Subelement { fragment_id },
        }
    }
}
