use assert_matches::assert_matches;

use crate::{
    error::ErrorKind,
    raw::{self, Cursor},
};

#[test]
fn cursor_reads_little_endian() {
    let bytes = [1, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F];
    let mut cursor = Cursor::new(&bytes);
    assert_eq!(cursor.read_i32().unwrap(), 1);
    assert_eq!(cursor.read_i64().unwrap(), i64::MAX);
    assert!(cursor.is_empty());
    assert_matches!(
        cursor.read_u8().unwrap_err().kind,
        ErrorKind::BadInput { .. }
    );
}

#[test]
fn cstrings() {
    let mut cursor = Cursor::new(b"abc\0\0rest");
    assert_eq!(cursor.read_cstring().unwrap(), b"abc");
    assert_eq!(cursor.read_cstring().unwrap(), b"");
    assert!(cursor.read_cstring().unwrap_err().is_bad_input());

    let mut buf = Vec::new();
    raw::write_cstring(&mut buf, b"key").unwrap();
    assert_eq!(buf, b"key\0");
    assert!(raw::write_cstring(&mut buf, b"k\0y").unwrap_err().is_type_mismatch());
}

#[test]
fn strings() {
    let mut cursor = Cursor::new(b"\x04\x00\x00\x00a\0b\0");
    assert_eq!(cursor.read_string().unwrap(), b"a\0b");

    // declared length must cover the terminator
    let mut cursor = Cursor::new(b"\x00\x00\x00\x00");
    assert!(cursor.read_string().unwrap_err().is_bad_input());

    // last byte must be the terminator
    let mut cursor = Cursor::new(b"\x02\x00\x00\x00ab");
    assert!(cursor.read_string().unwrap_err().is_bad_input());

    let mut buf = Vec::new();
    raw::write_string(&mut buf, b"a\0b").unwrap();
    assert_eq!(buf, b"\x04\x00\x00\x00a\0b\0");
}

#[test]
fn document_framing() {
    assert_eq!(raw::document_body(b"\x05\x00\x00\x00\x00").unwrap(), b"");
    assert!(raw::document_body(b"\x06\x00\x00\x00\x00").unwrap_err().is_bad_input());
    assert!(raw::document_body(b"\x05\x00\x00\x00\x01").unwrap_err().is_bad_input());

    let mut buf = Vec::new();
    raw::write_document(&mut buf, b"").unwrap();
    assert_eq!(buf, b"\x05\x00\x00\x00\x00");
}

#[test]
fn length_prefix_overflow() {
    assert_eq!(raw::length_prefix(5).unwrap(), 5);
    assert_matches!(
        raw::length_prefix(i32::MAX as usize + 1).unwrap_err().kind,
        ErrorKind::Internal { .. }
    );
}

#[test]
fn booleans() {
    let mut cursor = Cursor::new(&[0, 1, 2]);
    assert!(!cursor.read_bool().unwrap());
    assert!(cursor.read_bool().unwrap());
    assert!(cursor.read_bool().unwrap_err().is_bad_input());
}
