//! Test fixtures for the `elemfrag` codec.
//!
//! Provides deterministic payloads, build-ready payload buffers, hand-written
//! unit framing, and a serialised log capture.
//!
//! ```rust
//! use elemfrag::fragment::{UnitKind, build_in_place};
//! use elemfrag_testing::{PayloadBuffer, patterned_payload};
//!
//! let payload = patterned_payload(300);
//! let mut buf = PayloadBuffer::new(UnitKind::Element, 0xdd, &payload, &[]);
//! let len = build_in_place(UnitKind::Element, 0xdd, 0, &mut buf.bytes, buf.payload_len).unwrap();
//! assert_eq!(len, 304);
//! ```

pub mod logging;
pub mod payloads;
pub mod units;

pub use logging::{LoggerHandle, logger};
pub use payloads::{PayloadBuffer, patterned_payload};
pub use units::RawUnits;
