//! Converting a JSON document to an s-expression file and back.
use sexpression::{parse, stringify, stringify_pretty, Tree};
use std::fs;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn load_json() -> serde_json::Value {
    let contents = fs::read_to_string(fixture("testfile.json")).expect("read fixture");
    serde_json::from_str(&contents).expect("valid json")
}

#[test]
fn json_to_sexp_and_back() {
    let json = load_json();
    assert!(json.is_object());

    let sexp = stringify(&Tree::from(json.clone())).expect("stringify");
    assert!(sexp.starts_with(r#"(("name" . "sexpression")"#));

    let value = parse(&sexp).expect("parse");
    let back = serde_json::Value::from(Tree::try_from(&value).expect("convert"));
    assert_eq!(json, back);
}

#[test]
fn pretty_sexp_reads_back() {
    let json = load_json();
    let sexp = stringify_pretty(&Tree::from(json.clone()), 40).expect("stringify");
    assert!(sexp.lines().count() > 1);

    let value = parse(&sexp).expect("parse");
    let back = serde_json::Value::from(Tree::try_from(&value).expect("convert"));
    assert_eq!(json, back);
}
