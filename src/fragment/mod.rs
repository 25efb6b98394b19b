//! Fragment sequences for IEEE 802.11 elements and sub-elements.
//!
//! A unit carries at most 255 payload octets. Larger payloads travel as a
//! lead unit followed by continuation units that share a reserved
//! identifier. Each sub-module covers one step: resolving the layout,
//! planning, building, scanning, and defragmenting. The owned helpers and
//! the walker sit on top of those.

pub mod builder;
pub mod defrag;
pub mod error;
pub mod kind;
pub mod layout;
pub mod owned;
pub mod plan;
pub mod scanner;
pub mod walker;

pub use builder::{build, build_in_place, build_into};
pub use defrag::{defragment, defragment_in_place, defragment_into};
pub use error::{BufferRole, CodecError, ProtocolViolation, Result, SizeError};
pub use kind::{
    ELEMID_EXTENSION,
    ELEMID_FRAGMENT,
    MAX_UNIT_PAYLOAD_LEN,
    ML_LINK_INFO_SUBELEMID_FRAGMENT,
    UNIT_HEADER_LEN,
    UnitKind,
};
pub use layout::UnitLayout;
pub use owned::{decode_sequence, encode_sequence};
pub use plan::{FragmentationRequirement, plan};
pub use scanner::{ScanResult, scan, scan_buffer};
pub use walker::{Unit, UnitWalker};
