use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use crate::{
    Binary,
    Bson,
    JavaScriptCodeWithScope,
    MAX_DEPTH,
    decode_document,
    doc,
    error::ErrorKind,
    spec::BinarySubtype,
};

/// A document holding `levels` embedded documents, each under the key "a".
pub(crate) fn nested_bytes(levels: usize) -> Vec<u8> {
    let mut doc = vec![5, 0, 0, 0, 0];
    for _ in 0..levels {
        let len = (doc.len() + 8) as i32;
        let mut outer = len.to_le_bytes().to_vec();
        outer.push(0x03);
        outer.extend_from_slice(b"a\0");
        outer.extend(doc);
        outer.push(0);
        doc = outer;
    }
    doc
}

#[test]
fn decode_string() {
    let bytes = b"\x13\x00\x00\x00\x02hi\x00\x06\x00\x00\x00y'all\x00\x00";
    let doc = decode_document(bytes).unwrap();
    assert_eq!(doc, doc! { "hi" => "y'all" });
}

#[test]
fn decode_empty() {
    let doc = decode_document(b"\x05\x00\x00\x00\x00").unwrap();
    assert!(doc.is_empty());
}

#[test]
fn duplicate_keys_are_kept() {
    let bytes = [
        19, 0, 0, 0, 0x10, b'a', 0, 1, 0, 0, 0, 0x10, b'a', 0, 2, 0, 0, 0, 0,
    ];
    let doc = decode_document(&bytes).unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.get("a"), Some(&Bson::Int32(2)));
    assert_eq!(doc.values().collect::<Vec<_>>(), vec![&Bson::Int32(1), &Bson::Int32(2)]);
}

#[test]
fn strings_are_copied_verbatim() {
    let bytes = [14, 0, 0, 0, 0x02, b's', 0, 2, 0, 0, 0, 0xFF, 0, 0];
    let doc = decode_document(&bytes).unwrap();
    assert_eq!(doc.get("s"), Some(&Bson::String(vec![0xFF])));
    assert_eq!(doc.get("s").and_then(Bson::as_str), None);

    let bytes = [16, 0, 0, 0, 0x02, b's', 0, 4, 0, 0, 0, b'a', 0, b'b', 0, 0];
    let doc = decode_document(&bytes).unwrap();
    assert_eq!(doc.get("s"), Some(&Bson::String(b"a\0b".to_vec())));
}

#[test]
fn old_binary_inner_length() {
    let bytes = [
        20, 0, 0, 0, 0x05, b'b', 0, 7, 0, 0, 0, 0x02, 3, 0, 0, 0, 1, 2, 3, 0,
    ];
    let doc = decode_document(&bytes).unwrap();
    assert_eq!(
        doc.get("b"),
        Some(&Bson::Binary(Binary::new(BinarySubtype::BinaryOld, vec![1, 2, 3])))
    );

    let mut bad = bytes;
    bad[12] = 2;
    let err = decode_document(&bad).unwrap_err();
    assert_matches!(err.kind, ErrorKind::BadInput { .. });
    assert_eq!(err.key.as_deref(), Some("b"));
}

#[test]
fn code_with_scope() {
    let bytes = [
        23, 0, 0, 0, 0x0F, b'c', 0, 15, 0, 0, 0, 2, 0, 0, 0, b'x', 0, 5, 0, 0, 0, 0, 0,
    ];
    let doc = decode_document(&bytes).unwrap();
    assert_eq!(
        doc.get("c"),
        Some(&Bson::JavaScriptCodeWithScope(JavaScriptCodeWithScope {
            code: b"x".to_vec(),
            scope: doc! {},
        }))
    );
}

#[test]
fn code_with_scope_length_must_match() {
    let bytes = [
        24, 0, 0, 0, 0x0F, b'c', 0, 16, 0, 0, 0, 2, 0, 0, 0, b'x', 0, 5, 0, 0, 0, 0, 0, 0,
    ];
    let err = decode_document(&bytes).unwrap_err();
    assert_matches!(err.kind, ErrorKind::BadInput { .. });
}

#[test]
fn invalid_tag() {
    let err = decode_document(&[8, 0, 0, 0, 0x13, b'x', 0, 0]).unwrap_err();
    assert_matches!(err.kind, ErrorKind::BadInput { .. });
    assert_eq!(err.key.as_deref(), Some("x"));
}

#[test]
fn boolean_must_be_zero_or_one() {
    let doc = decode_document(&[9, 0, 0, 0, 0x08, b'x', 0, 1, 0]).unwrap();
    assert_eq!(doc.get("x"), Some(&Bson::Boolean(true)));

    let err = decode_document(&[9, 0, 0, 0, 0x08, b'x', 0, 2, 0]).unwrap_err();
    assert_matches!(err.kind, ErrorKind::BadInput { .. });
}

#[test]
fn framing_errors() {
    let good = b"\x13\x00\x00\x00\x02hi\x00\x06\x00\x00\x00y'all\x00\x00";

    // truncated
    assert!(decode_document(&good[..18]).unwrap_err().is_bad_input());
    // trailing bytes
    let mut long = good.to_vec();
    long.push(0);
    assert!(decode_document(&long).unwrap_err().is_bad_input());
    // missing terminator
    let mut unterminated = good.to_vec();
    unterminated[18] = 1;
    assert!(decode_document(&unterminated).unwrap_err().is_bad_input());
    // string length past the end of the document
    let mut overlong = good.to_vec();
    overlong[8] = 0x40;
    assert!(decode_document(&overlong).unwrap_err().is_bad_input());

    assert!(decode_document(&[]).unwrap_err().is_bad_input());
    assert!(decode_document(&[4, 0, 0, 0]).unwrap_err().is_bad_input());
    assert!(decode_document(&[0xFF, 0xFF, 0xFF, 0xFF, 0]).unwrap_err().is_bad_input());
}

#[test]
fn depth_limit() {
    let doc = decode_document(&nested_bytes(MAX_DEPTH)).unwrap();
    let mut levels = 0;
    let mut current = &doc;
    while let Some(inner) = current.get("a").and_then(Bson::as_document) {
        levels += 1;
        current = inner;
    }
    assert_eq!(levels, MAX_DEPTH);

    let err = decode_document(&nested_bytes(MAX_DEPTH + 1)).unwrap_err();
    assert_matches!(err.kind, ErrorKind::TooDeep { limit: MAX_DEPTH });
}

#[test]
fn arrays_ignore_keys() {
    // keys "7" and "x" are not positional indices; values are kept in order regardless
    let bytes = [
        27, 0, 0, 0, 0x04, b'a', 0, 19, 0, 0, 0, 0x10, b'7', 0, 1, 0, 0, 0, 0x10, b'x', 0, 2, 0,
        0, 0, 0, 0,
    ];
    let doc = decode_document(&bytes).unwrap();
    assert_eq!(doc, doc! { "a" => [1, 2] });
}
