use pretty_assertions::assert_eq;

use crate::{Bson, Document, Regex, bson, doc, oid::ObjectId};

#[test]
fn standard_format() {
    let id = ObjectId::from_bytes(*b"thisismyname");

    let doc = doc! {
        "float" => 2.4,
        "string" => "hello",
        "array" => ["testing", 1, true, [1, 2]],
        "doc" => {
            "fish" => "in",
            "a" => "barrel",
            "!" => 1
        },
        "bool" => true,
        "null" => (Bson::Null),
        "regexp" => (Regex::new("s[ao]d", "i")),
        "with_wrapped_parens" => (-20),
        "_id" => id
    };

    let mut expected = Document::new();
    expected.push("float", 2.4);
    expected.push("string", "hello");
    expected.push(
        "array",
        vec![
            Bson::from("testing"),
            Bson::Int32(1),
            Bson::Boolean(true),
            Bson::Array(vec![Bson::Int32(1), Bson::Int32(2)]),
        ],
    );
    let mut inner = Document::new();
    inner.push("fish", "in");
    inner.push("a", "barrel");
    inner.push("!", 1);
    expected.push("doc", inner);
    expected.push("bool", true);
    expected.push("null", Bson::Null);
    expected.push("regexp", Regex::new("s[ao]d", "i"));
    expected.push("with_wrapped_parens", -20);
    expected.push("_id", id);

    assert_eq!(doc, expected);
}

#[test]
fn empty_values() {
    assert_eq!(doc! {}, Document::new());
    assert_eq!(bson!([]), Bson::Array(Vec::new()));
    assert_eq!(bson!({}), Bson::Document(Document::new()));
}

#[test]
fn repeated_keys() {
    let doc = doc! { "k" => 1, "k" => 2 };
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.get("k"), Some(&Bson::Int32(2)));
}
