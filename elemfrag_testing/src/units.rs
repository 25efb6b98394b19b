//! Hand assembly of raw element and sub-element bytes.
//!
//! Tests use these helpers to craft framing independently of the builder,
//! including framing the builder would never produce.

use bytes::{BufMut, BytesMut};

/// Incrementally assembled run of units.
///
/// ```
/// use elemfrag_testing::RawUnits;
///
/// let bytes = RawUnits::new().unit(0xdd, &[1, 2]).unit(242, &[3]).into_vec();
/// assert_eq!(bytes, [0xdd, 2, 1, 2, 242, 1, 3]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RawUnits {
    buf: BytesMut,
}

impl RawUnits {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Append a unit whose length octet matches `payload`.
    ///
    /// # Panics
    ///
    /// Panics if `payload` exceeds 255 bytes.
    #[must_use]
    pub fn unit(self, id: u8, payload: &[u8]) -> Self {
        let len = u8::try_from(payload.len()).expect("unit payload must fit a length octet");
        self.unit_with_len(id, len, payload)
    }

    /// Append a unit with an arbitrary length octet, for malformed framing.
    #[must_use]
    pub fn unit_with_len(mut self, id: u8, len: u8, payload: &[u8]) -> Self {
        self.buf.put_u8(id);
        self.buf.put_u8(len);
        self.buf.put_slice(payload);
        self
    }

    /// Append raw bytes.
    #[must_use]
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.buf.put_slice(bytes);
        self
    }

    /// Append `count` units of `id`, each carrying 255 copies of `fill`.
    #[must_use]
    pub fn full_units(mut self, id: u8, fill: u8, count: usize) -> Self {
        for _ in 0..count {
            self = self.unit(id, &[fill; 255]);
        }
        self
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<u8> { self.buf.to_vec() }
}
