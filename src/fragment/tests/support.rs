//! Framing helpers shared by the unit tests.

/// Append a unit whose length octet matches `payload`.
pub(super) fn push_unit(buf: &mut Vec<u8>, id: u8, payload: &[u8]) {
    buf.push(id);
    buf.push(u8::try_from(payload.len()).expect("unit payload fits a length octet"));
    buf.extend_from_slice(payload);
}

/// Deterministic payload with a prime period.
pub(super) fn pattern(len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| u8::try_from(i % 251).expect("value below 251"))
        .collect()
}

/// Payload buffer with `lead_bytes` reserved, `payload`, then `trailing`,
/// sized to `capacity`.
pub(super) fn payload_buffer(
    lead_bytes: usize,
    payload: &[u8],
    trailing: &[u8],
    capacity: usize,
) -> Vec<u8> {
    let mut buf = vec![0_u8; capacity];
    buf[lead_bytes..lead_bytes + payload.len()].copy_from_slice(payload);
    let tail_at = lead_bytes + payload.len();
    buf[tail_at..tail_at + trailing.len()].copy_from_slice(trailing);
    buf
}
