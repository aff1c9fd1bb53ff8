use cabala::{
    Binary,
    Bson,
    DateTime,
    DbPointer,
    JavaScriptCodeWithScope,
    ObjectId,
    Regex,
    Timestamp,
    doc,
    encode_document,
    spec::BinarySubtype,
};
use std::{
    fs,
    io::{Error, ErrorKind},
    path::Path,
};

fn main() -> std::io::Result<()> {
    let corpus_dir = Path::new("fuzz/corpus");
    fs::create_dir_all(corpus_dir)?;

    generate_length_edge_cases(corpus_dir)?;
    generate_type_cases(corpus_dir)?;
    generate_nesting_cases(corpus_dir)?;
    Ok(())
}

fn encode(doc: &cabala::Document) -> std::io::Result<Vec<u8>> {
    encode_document(doc).map_err(|e| Error::new(ErrorKind::Other, e.to_string()))
}

fn generate_length_edge_cases(dir: &Path) -> std::io::Result<()> {
    let target_dir = dir.join("decode");
    fs::create_dir_all(&target_dir)?;

    // Invalid length
    fs::write(target_dir.join("invalid_len"), vec![4, 5])?;

    fs::write(target_dir.join("min_doc"), encode(&doc! {})?)?;

    // Declared length past the end of the buffer
    fs::write(target_dir.join("overlong"), vec![0x20, 0, 0, 0, 0])?;

    Ok(())
}

fn generate_type_cases(dir: &Path) -> std::io::Result<()> {
    let target_dir = dir.join("reencode");
    fs::create_dir_all(&target_dir)?;

    let id = ObjectId::from_bytes([0x53, 0xe3, 0x7d, 0x08, 0x77, 0x6f, 0x72, 0x4e, 0x42, 0, 0, 0]);
    let all_types = doc! {
        "double" => 1.0f64,
        "double_nan" => (f64::NAN),
        "double_infinity" => (f64::INFINITY),
        "string" => "test",
        "document" => {},
        "array" => [1, 2, 3],
        "binary" => (Binary::new(BinarySubtype::Generic, vec![1, 2, 3])),
        "binary_old" => (Binary::new(BinarySubtype::BinaryOld, vec![1, 2, 3])),
        "object_id" => id,
        "bool" => true,
        "date" => (DateTime::from_millis(1_700_000_000_000)),
        "null" => (Bson::Null),
        "regex" => (Regex::new("pattern", "i")),
        "int32" => 123i32,
        "timestamp" => (Timestamp { time: 12345, increment: 1 }),
        "int64" => 123i64,
        "code" => (Bson::JavaScriptCode(b"f()".to_vec())),
        "code_w_scope" => (JavaScriptCodeWithScope { code: b"x".to_vec(), scope: doc! { "x" => 1 } }),
        "symbol" => (Bson::Symbol(b"sym".to_vec())),
        "db_pointer" => (DbPointer { namespace: b"db.coll".to_vec(), id: Some(id) }),
        "min_key" => (Bson::MinKey),
        "max_key" => (Bson::MaxKey),
        "undefined" => (Bson::Undefined)
    };
    fs::write(target_dir.join("all_types"), encode(&all_types)?)?;

    let strings = doc! {
        "empty" => "",
        "null_bytes" => "hello\0world",
        "unicode" => "\u{1f980}",
        "invalid_continuation" => (Bson::String(vec![0x80, 0x80, 0x80])),
        "overlong" => (Bson::String(vec![0xC0, 0x80]))
    };
    fs::write(target_dir.join("strings"), encode(&strings)?)?;

    Ok(())
}

fn generate_nesting_cases(dir: &Path) -> std::io::Result<()> {
    let target_dir = dir.join("decode_term");
    fs::create_dir_all(&target_dir)?;

    let mut nested_doc = doc! {};
    for i in 0..100 {
        nested_doc = doc! { (i.to_string()) => nested_doc };
    }
    fs::write(target_dir.join("nested_doc"), encode(&nested_doc)?)?;

    let duplicates = doc! { "k" => 1, "k" => 2 };
    fs::write(target_dir.join("duplicates"), encode(&duplicates)?)?;

    Ok(())
}
