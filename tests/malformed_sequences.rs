//! Behaviour of the inbound path on framing it must reject or cannot detect.

use elemfrag::fragment::{
    CodecError,
    ELEMID_EXTENSION,
    ELEMID_FRAGMENT,
    ProtocolViolation,
    UnitKind,
    UnitWalker,
    decode_sequence,
    defragment_in_place,
    scan,
};
use elemfrag_testing::RawUnits;
use rstest::rstest;

const VENDOR: u8 = 0xdd;

#[rstest]
#[case::lead_overruns_buffer(
    RawUnits::new().unit_with_len(VENDOR, 200, &[0; 10]),
    ProtocolViolation::TruncatedPayload { offset: 0, declared: 200, remaining: 10 }
)]
#[case::continuation_overruns_buffer(
    RawUnits::new().full_units(VENDOR, 1, 1).unit_with_len(ELEMID_FRAGMENT, 30, &[0; 3]),
    ProtocolViolation::TruncatedPayload { offset: 257, declared: 30, remaining: 3 }
)]
#[case::dangling_header_octet(
    RawUnits::new()
        .full_units(VENDOR, 1, 1)
        .full_units(ELEMID_FRAGMENT, 2, 1)
        .raw(&[ELEMID_FRAGMENT]),
    ProtocolViolation::TruncatedHeader { offset: 514, remaining: 1 }
)]
#[case::continuation_after_short_lead(
    RawUnits::new().unit(VENDOR, &[1; 254]).unit(ELEMID_FRAGMENT, &[2]),
    ProtocolViolation::ContinuationAfterShortUnit { offset: 256, previous_len: 254 }
)]
#[case::zero_length_continuation(
    RawUnits::new().full_units(VENDOR, 1, 1).unit(ELEMID_FRAGMENT, &[]),
    ProtocolViolation::EmptyContinuation { offset: 257 }
)]
fn malformed_framing_is_rejected(#[case] units: RawUnits, #[case] expected: ProtocolViolation) {
    let mut buf = units.into_vec();
    let before = buf.clone();

    let scanned = scan(UnitKind::Element, &buf).expect_err("malformed");
    let decoded = decode_sequence(UnitKind::Element, &buf).expect_err("malformed");
    let inline = defragment_in_place(UnitKind::Element, &mut buf).expect_err("malformed");

    for err in [scanned, decoded, inline] {
        assert_eq!(err, CodecError::ProtocolViolation(expected));
    }
    assert_eq!(buf, before);
}

#[test]
fn sequence_truncated_on_a_unit_boundary_is_undetectable() {
    // Three full units of a longer sequence, cut right after the third.
    let buf = RawUnits::new()
        .full_units(VENDOR, 1, 1)
        .full_units(ELEMID_FRAGMENT, 2, 2)
        .into_vec();

    let scanned = scan(UnitKind::Element, &buf).expect("scan");

    assert!(scanned.is_fragment_sequence());
    assert_eq!(scanned.total_len(), buf.len());
    assert_eq!(scanned.payload_len(), 3 * 255);
}

#[test]
fn continuation_without_lead_walks_as_its_own_unit() {
    let buf = RawUnits::new().unit(ELEMID_FRAGMENT, &[1, 2]).into_vec();

    let unit = UnitWalker::new(UnitKind::Element, &buf)
        .next()
        .expect("one unit")
        .expect("valid");

    assert_eq!(unit.identifier(), ELEMID_FRAGMENT);
    assert!(!unit.is_fragmented());
}

#[test]
fn walker_reports_offsets_within_whole_buffer() {
    let buf = RawUnits::new()
        .unit(ELEMID_EXTENSION, &[0x6b, 9])
        .unit_with_len(VENDOR, 40, &[0; 4])
        .into_vec();

    let err = UnitWalker::new(UnitKind::Element, &buf)
        .collect::<Result<Vec<_>, _>>()
        .expect_err("overrun");

    assert_eq!(
        err,
        CodecError::ProtocolViolation(ProtocolViolation::TruncatedPayload {
            offset: 4,
            declared: 40,
            remaining: 4,
        })
    );
}
