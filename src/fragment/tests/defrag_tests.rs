//! Tests for reassembling fragment sequences.

use rstest::rstest;

use super::support::{pattern, payload_buffer, push_unit};
use crate::fragment::{
    BufferRole,
    CodecError,
    ELEMID_EXTENSION,
    ELEMID_FRAGMENT,
    ML_LINK_INFO_SUBELEMID_FRAGMENT,
    ProtocolViolation,
    SizeError,
    UnitKind,
    build_in_place,
    defragment,
    defragment_in_place,
    defragment_into,
    plan,
};

const VENDOR: u8 = 0xdd;

fn plain_sequence_with_trailer() -> Vec<u8> {
    let mut buf = Vec::new();
    push_unit(&mut buf, VENDOR, &[1; 255]);
    push_unit(&mut buf, ELEMID_FRAGMENT, &[2; 45]);
    push_unit(&mut buf, 0x30, &[9]);
    buf
}

#[test]
fn in_place_packs_payload_after_lead_header() {
    let mut buf = plain_sequence_with_trailer();

    let len = defragment_in_place(UnitKind::Element, &mut buf).expect("defrag");

    assert_eq!(len, 300);
    assert_eq!(&buf[..2], &[VENDOR, 255], "lead header is left as is");
    assert!(buf[2..257].iter().all(|&b| b == 1));
    assert!(buf[257..302].iter().all(|&b| b == 2));
    assert_eq!(&buf[302..305], &[0x30, 1, 9]);
}

#[test]
fn into_copies_payload_only() {
    let buf = plain_sequence_with_trailer();
    let mut dest = vec![0_u8; 300];

    let len = defragment_into(UnitKind::Element, &buf, &mut dest).expect("defrag");

    assert_eq!(len, 300);
    assert!(dest[..255].iter().all(|&b| b == 1));
    assert!(dest[255..].iter().all(|&b| b == 2));
}

#[test]
fn extended_payload_starts_after_extension_octet() {
    let payload = pattern(600);
    let req = plan(UnitKind::Element, ELEMID_EXTENSION, 600);
    let mut buf = payload_buffer(3, &payload, &[], req.total_len());
    build_in_place(UnitKind::Element, ELEMID_EXTENSION, 0x6b, &mut buf, 600).expect("build");
    let mut dest = vec![0_u8; 600];

    let into_len = defragment_into(UnitKind::Element, &buf, &mut dest).expect("into");
    let inline_len = defragment_in_place(UnitKind::Element, &mut buf).expect("inline");

    assert_eq!(into_len, 600);
    assert_eq!(inline_len, 600);
    assert_eq!(dest, payload);
    assert_eq!(&buf[..3], &[ELEMID_EXTENSION, 255, 0x6b]);
    assert_eq!(&buf[3..603], &payload[..]);
}

#[rstest]
#[case(UnitKind::Element, VENDOR, 256)]
#[case(UnitKind::Element, VENDOR, 765)]
#[case(UnitKind::Element, ELEMID_EXTENSION, 1500)]
#[case(UnitKind::subelement(ML_LINK_INFO_SUBELEMID_FRAGMENT), 2, 511)]
fn both_modes_recover_built_payload(
    #[case] kind: UnitKind,
    #[case] identifier: u8,
    #[case] payload_len: usize,
) {
    let payload = pattern(payload_len);
    let req = plan(kind, identifier, payload_len);
    let lead = req.lead_bytes();
    let mut buf = payload_buffer(lead, &payload, &[], req.total_len());
    build_in_place(kind, identifier, 0, &mut buf, payload_len).expect("build");
    let mut dest = vec![0_u8; payload_len];

    defragment(false, kind, Some(&mut buf[..]), Some(&mut dest[..])).expect("into");
    let len = defragment(true, kind, Some(&mut buf[..]), None).expect("inline");

    assert_eq!(len, payload_len);
    assert_eq!(dest, payload);
    assert_eq!(&buf[lead..lead + len], &payload[..]);
}

#[test]
fn in_place_on_exact_buffer_leaves_stale_tail() {
    let mut buf = Vec::new();
    push_unit(&mut buf, VENDOR, &[1; 255]);
    push_unit(&mut buf, ELEMID_FRAGMENT, &[2; 3]);

    let len = defragment_in_place(UnitKind::Element, &mut buf).expect("defrag");

    assert_eq!(len, 258);
    assert_eq!(buf.len(), 262);
    assert_eq!(&buf[257..260], &[2, 2, 2]);
}

#[test]
fn single_unit_is_rejected() {
    let mut buf = Vec::new();
    push_unit(&mut buf, VENDOR, &[1, 2, 3]);
    let mut dest = vec![0_u8; 16];

    let inline = defragment_in_place(UnitKind::Element, &mut buf).expect_err("single");
    let into = defragment_into(UnitKind::Element, &buf, &mut dest).expect_err("single");

    let expected = CodecError::ProtocolViolation(ProtocolViolation::NotAFragmentSequence);
    assert_eq!(inline, expected);
    assert_eq!(into, expected);
}

#[test]
fn destination_must_hold_payload() {
    let buf = plain_sequence_with_trailer();
    let mut dest = vec![0_u8; 299];

    let err = defragment_into(UnitKind::Element, &buf, &mut dest).expect_err("short");

    assert_eq!(
        err,
        CodecError::InvalidSize(SizeError::DefragmentedExceedsCapacity {
            capacity: 299,
            required: 300,
        })
    );
    assert!(dest.iter().all(|&b| b == 0));
}

#[test]
fn empty_buffers_are_invalid() {
    let buf = plain_sequence_with_trailer();
    let err = defragment_into(UnitKind::Element, &buf, &mut []).expect_err("empty dest");
    assert_eq!(
        err,
        CodecError::InvalidSize(SizeError::Empty {
            buffer: BufferRole::Destination,
        })
    );

    let err = defragment_in_place(UnitKind::Element, &mut []).expect_err("empty source");
    assert_eq!(
        err,
        CodecError::InvalidSize(SizeError::Empty {
            buffer: BufferRole::Fragments,
        })
    );
}

#[test]
fn missing_buffers_are_reported() {
    let err = defragment(true, UnitKind::Element, None, None).expect_err("null");
    assert_eq!(
        err,
        CodecError::NullBuffer {
            buffer: BufferRole::Fragments,
        }
    );

    let mut buf = plain_sequence_with_trailer();
    let err = defragment(false, UnitKind::Element, Some(&mut buf[..]), None).expect_err("null");
    assert_eq!(
        err,
        CodecError::NullBuffer {
            buffer: BufferRole::Destination,
        }
    );
}

#[test]
fn malformed_sequence_is_left_untouched() {
    let mut buf = Vec::new();
    push_unit(&mut buf, VENDOR, &[1; 255]);
    push_unit(&mut buf, ELEMID_FRAGMENT, &[2; 10]);
    push_unit(&mut buf, ELEMID_FRAGMENT, &[3]);
    let before = buf.clone();

    let err = defragment_in_place(UnitKind::Element, &mut buf).expect_err("malformed");

    assert!(err.is_protocol_violation());
    assert_eq!(buf, before);
}
