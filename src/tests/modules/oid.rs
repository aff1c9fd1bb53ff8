use std::str::FromStr;

use assert_matches::assert_matches;

use crate::{error::ErrorKind, oid::ObjectId};

#[test]
fn string_oid() {
    let s = "123456789012123456789012";
    let oid_res = ObjectId::parse_str(s);
    assert!(oid_res.is_ok());
    let actual_s = hex::encode(oid_res.unwrap().bytes());
    assert_eq!(s.to_owned(), actual_s);
}

#[test]
fn byte_string_oid() {
    let s = "541b1a00e8a23afa832b218e";
    let oid_res = ObjectId::parse_str(s);
    assert!(oid_res.is_ok());
    let oid = oid_res.unwrap();
    let bytes: [u8; 12] = [
        0x54u8, 0x1Bu8, 0x1Au8, 0x00u8, 0xE8u8, 0xA2u8, 0x3Au8, 0xFAu8, 0x83u8, 0x2Bu8, 0x21u8,
        0x8Eu8,
    ];

    assert_eq!(bytes, oid.bytes());
    assert_eq!(s, oid.to_string());
    assert_eq!(s, oid.to_hex());
    assert_eq!(oid, ObjectId::from_str(s).unwrap());
}

#[test]
fn invalid_hex() {
    assert_matches!(
        ObjectId::parse_str("not hex at all").unwrap_err().kind,
        ErrorKind::TypeMismatch { .. }
    );
    // valid hex, wrong length
    assert_matches!(
        ObjectId::parse_str("1234").unwrap_err().kind,
        ErrorKind::TypeMismatch { .. }
    );
}

#[test]
fn from_slice_requires_twelve_bytes() {
    assert_eq!(
        ObjectId::try_from(&[1u8; 12][..]).unwrap(),
        ObjectId::from_bytes([1; 12])
    );
    for len in [0, 11, 13] {
        let bytes = vec![0u8; len];
        let err = ObjectId::try_from(bytes.as_slice()).unwrap_err();
        assert_matches!(err.kind, ErrorKind::TypeMismatch { .. });
    }
}

#[test]
fn oid_debug() {
    let oid = ObjectId::parse_str("53e37d08776f724e42000000").unwrap();
    assert_eq!(
        format!("{:?}", oid),
        "ObjectId(\"53e37d08776f724e42000000\")"
    );
}
