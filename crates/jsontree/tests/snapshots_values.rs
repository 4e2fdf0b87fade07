#![expect(missing_docs)]

use jsontree::{ErrorKind, Parser, ParserOptions, Value, parse, stringify};
use quickcheck_macros::quickcheck;

const DOCUMENT: &str = r#"
{
    "name": "jsontree",
    "tags": ["json", "parser"],
    "version": 0.1,
    "big": 1e300,
    "tiny": -2.5e-8,
    "escaped": "line\nbreak \"quoted\" \u00e9 \u0001",
    "empty": {"a": [], "o": {}},
    "flags": [true, false, null]
}
"#;

fn render_errors(inputs: &[&str]) -> String {
    inputs
        .iter()
        .map(|input| match parse(input) {
            Ok(value) => format!("{input:?} -> ok {value}"),
            Err(err) => format!("{input:?} -> {err}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test_log::test]
fn snapshot_compact_output() {
    let value = parse(DOCUMENT).expect("document parses");
    insta::assert_snapshot!(stringify(&value), @r#"{"name":"jsontree","tags":["json","parser"],"version":0.1,"big":1e300,"tiny":-2.5e-8,"escaped":"line\nbreak \"quoted\" é \u0001","empty":{"a":[],"o":{}},"flags":[true,false,null]}"#);
}

#[test_log::test]
fn snapshot_error_messages() {
    let inputs = [
        "",
        "[1,]",
        r#"{"a" 1}"#,
        "[1 2]",
        r#""\uD800""#,
        "true x",
        "1e309",
        r#"{"a":1,}"#,
        "[\n  1,\n  tru\n]",
    ];
    insta::assert_snapshot!(render_errors(&inputs), @r#"
    "" -> expected a value at 1:1
    "[1,]" -> invalid value at 1:4
    "{\"a\" 1}" -> expected ':' at 1:6
    "[1 2]" -> expected ',' or ']' at 1:4
    "\"\\uD800\"" -> invalid unicode surrogate pair at 1:8
    "true x" -> root value is followed by trailing content at 1:6
    "1e309" -> number too big at 1:6
    "{\"a\":1,}" -> expected an object key at 1:8
    "[\n  1,\n  tru\n]" -> invalid value at 3:6
    "#);
}

#[test_log::test]
fn display_matches_stringify() {
    let value = parse(DOCUMENT).expect("document parses");
    assert_eq!(value.to_string().as_bytes(), stringify(&value).as_slice());
}

#[test_log::test]
fn depth_limit_is_configurable() {
    let deep = format!("{}{}", "[".repeat(200), "]".repeat(200));
    assert_eq!(
        parse(&deep).unwrap_err().kind(),
        ErrorKind::MaxDepthExceeded
    );

    let mut parser = Parser::new(ParserOptions { max_depth: 256 });
    let value = parser.parse(&deep).expect("within the raised limit");
    assert_eq!(stringify(&value), deep.as_str());
}

#[test_log::test]
fn release_is_idempotent() {
    let mut value = parse(r#"{"a":[1,2,3],"b":"text"}"#).expect("parses");
    value.release();
    assert_eq!(value, Value::Null);
    value.release();
    assert_eq!(value, Value::Null);
}

/// Arbitrary text either fails cleanly or yields a value whose compact form
/// parses back to the same value.
#[quickcheck]
fn arbitrary_text_roundtrips_when_accepted(input: String) -> bool {
    match parse(&input) {
        Ok(value) => parse(stringify(&value)).is_ok_and(|again| again == value),
        Err(err) => err.line >= 1 && err.column >= 1,
    }
}

#[quickcheck]
fn arbitrary_bytes_never_panic(input: Vec<u8>) -> bool {
    let _ = parse(&input);
    true
}
