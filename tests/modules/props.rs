use cabala::{
    Binary,
    BinarySubtype,
    Bson,
    DateTime,
    DbPointer,
    DecodeOptions,
    Document,
    EncodeOptions,
    JavaScriptCodeWithScope,
    Map,
    ObjectId,
    Regex,
    Term,
    Timestamp,
    decode,
    decode_document,
    encode,
    encode_document,
    marker,
};
use proptest::prelude::*;

fn arbitrary_binary_subtype() -> impl Strategy<Value = BinarySubtype> {
    prop_oneof![
        Just(BinarySubtype::Generic),
        Just(BinarySubtype::Function),
        Just(BinarySubtype::BinaryOld),
        Just(BinarySubtype::UuidOld),
        Just(BinarySubtype::Uuid),
        Just(BinarySubtype::Md5),
        Just(BinarySubtype::UserDefined(0x80)),
    ]
}

/// Bytes without NUL, for keys and regex parts.
fn cstring() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..=255, 0..8)
}

fn finite_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("NaN is not equal to itself", |f| !f.is_nan())
}

fn arbitrary_bson() -> impl Strategy<Value = Bson> {
    let leaf = prop_oneof![
        Just(Bson::Null),
        Just(Bson::Undefined),
        Just(Bson::MinKey),
        Just(Bson::MaxKey),
        any::<Vec<u8>>().prop_map(Bson::String),
        any::<Vec<u8>>().prop_map(Bson::Symbol),
        any::<bool>().prop_map(Bson::Boolean),
        finite_f64().prop_map(Bson::Double),
        any::<i32>().prop_map(Bson::Int32),
        any::<i64>().prop_map(Bson::Int64),
        any::<i64>().prop_map(|millis| Bson::DateTime(DateTime::from_millis(millis))),
        any::<(u32, u32)>().prop_map(|(time, increment)| Bson::Timestamp(Timestamp {
            time,
            increment
        })),
        (cstring(), cstring())
            .prop_map(|(pattern, options)| Bson::RegularExpression(Regex { pattern, options })),
        any::<[u8; 12]>().prop_map(|bytes| Bson::ObjectId(ObjectId::from_bytes(bytes))),
        (any::<Vec<u8>>(), any::<[u8; 12]>()).prop_map(|(namespace, id)| {
            Bson::DbPointer(DbPointer {
                namespace,
                id: Some(ObjectId::from_bytes(id)),
            })
        }),
        (arbitrary_binary_subtype(), any::<Vec<u8>>())
            .prop_map(|(subtype, bytes)| Bson::Binary(Binary { subtype, bytes })),
        any::<Vec<u8>>().prop_map(Bson::JavaScriptCode),
    ];

    leaf.prop_recursive(4, 256, 10, |inner| {
        prop_oneof![
            prop::collection::vec((cstring(), inner.clone()), 0..12)
                .prop_map(|pairs| Bson::Document(pairs.into_iter().collect())),
            prop::collection::vec(inner.clone(), 0..12).prop_map(Bson::Array),
            (
                prop::collection::vec((cstring(), inner), 0..12)
                    .prop_map(|pairs| pairs.into_iter().collect::<Document>()),
                any::<Vec<u8>>()
            )
                .prop_map(|(scope, code)| Bson::JavaScriptCodeWithScope(
                    JavaScriptCodeWithScope { code, scope }
                )),
        ]
    })
}

fn arbitrary_document() -> impl Strategy<Value = Document> {
    prop::collection::vec((cstring(), arbitrary_bson()), 0..12)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn encodable_subtype() -> impl Strategy<Value = i128> {
    prop_oneof![0i128..=5, Just(0x80i128)]
}

/// Terms in exactly the shape `decode` produces, so that decoding their encoding gives them
/// back. Documents are maps when `maps` is set and flat tuples with unique keys otherwise.
fn arbitrary_term(maps: bool) -> impl Strategy<Value = Term> {
    let leaf = prop_oneof![
        any::<Vec<u8>>().prop_map(Term::Binary),
        any::<i64>().prop_map(Term::from),
        finite_f64().prop_map(Term::Float),
        prop_oneof![
            Just(marker::NULL),
            Just(marker::TRUE),
            Just(marker::FALSE),
            Just(marker::MIN_KEY),
            Just(marker::MAX_KEY),
        ]
        .prop_map(Term::Atom),
        any::<[u8; 12]>().prop_map(|bytes| Term::object_id(ObjectId::from_bytes(bytes))),
        any::<i64>().prop_map(Term::date),
        any::<Vec<u8>>().prop_map(|code| Term::javascript(code)),
        (cstring(), cstring()).prop_map(|(pattern, options)| Term::regex(pattern, options)),
        any::<(u32, u32)>().prop_map(|(time, increment)| Term::timestamp(time, increment)),
        (any::<Vec<u8>>(), any::<[u8; 12]>())
            .prop_map(|(ns, id)| Term::db_pointer(ns, Some(ObjectId::from_bytes(id)))),
        (encodable_subtype(), any::<Vec<u8>>()).prop_map(|(subtype, bytes)| {
            Term::Tuple(vec![
                Term::Atom(marker::TYPE),
                Term::Integer(subtype),
                Term::Atom(marker::BINARY),
                Term::Binary(bytes),
            ])
        }),
    ];

    leaf.prop_recursive(4, 256, 10, move |inner| {
        let document = move |inner: BoxedStrategy<Term>| {
            prop::collection::hash_map(cstring(), inner, 0..8).prop_map(move |entries| {
                if maps {
                    Term::Map(entries.into_iter().collect::<Map>())
                } else {
                    Term::document(entries)
                }
            })
        };
        prop_oneof![
            document(inner.clone()),
            prop::collection::vec(inner.clone(), 0..8).prop_map(Term::List),
            (any::<Vec<u8>>(), document(inner))
                .prop_map(|(code, scope)| Term::javascript_with_scope(code, scope)),
        ]
    })
}

fn arbitrary_top_level(maps: bool) -> impl Strategy<Value = Term> {
    prop::collection::hash_map(cstring(), arbitrary_term(maps), 0..8).prop_map(move |entries| {
        if maps {
            Term::Map(entries.into_iter().collect())
        } else {
            Term::document(entries)
        }
    })
}

proptest! {
    #[test]
    fn typed_round_trip(doc in arbitrary_document()) {
        let bytes = encode_document(&doc)?;
        let decoded = decode_document(&bytes)?;
        prop_assert_eq!(&decoded, &doc);
        prop_assert_eq!(encode_document(&decoded)?, bytes);
    }

    #[test]
    fn term_round_trip(term in arbitrary_top_level(false)) {
        let bytes = encode(&term, &EncodeOptions::new())?;
        prop_assert_eq!(decode(&bytes, &DecodeOptions::new())?, term);
    }

    #[test]
    fn map_round_trip(term in arbitrary_top_level(true)) {
        let bytes = encode(&term, &EncodeOptions::new())?;
        let options = DecodeOptions::new().map_documents(true);
        prop_assert_eq!(decode(&bytes, &options)?, term);
    }

    #[test]
    fn typed_and_term_layers_agree(doc in arbitrary_document()) {
        let bytes = encode_document(&doc)?;
        let term = decode(&bytes, &DecodeOptions::new())?;
        let reencoded = encode(&term, &EncodeOptions::new())?;
        // symbols collapse to strings and undefined to null, which keeps every length
        prop_assert_eq!(reencoded.len(), bytes.len());
        let normalized = decode(&reencoded, &DecodeOptions::new())?;
        prop_assert_eq!(encode(&normalized, &EncodeOptions::new())?, reencoded);
    }

    #[test]
    fn arbitrary_bytes_do_not_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode_document(&bytes);
        let _ = decode(&bytes, &DecodeOptions::new().map_documents(true));
    }
}
