#![doc(html_root_url = "https://docs.rs/elemfrag/latest")]
//! Public API for the `elemfrag` library.
//!
//! This crate fragments IEEE 802.11 elements and sub-elements whose payload
//! exceeds 255 octets, and reassembles such fragment sequences on receipt.
//! Every operation works on caller-supplied buffers, either in place or into
//! a separate destination.

pub mod config;
pub mod fragment;

pub use fragment::{
    CodecError,
    FragmentationRequirement,
    ScanResult,
    Unit,
    UnitKind,
    UnitLayout,
    UnitWalker,
    build,
    build_in_place,
    build_into,
    decode_sequence,
    defragment,
    defragment_in_place,
    defragment_into,
    encode_sequence,
    plan,
    scan,
};
