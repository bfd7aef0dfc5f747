//! A JSON-compatible tree and its conversions.
//!
//! [`Tree`] is the shape exchanged with JSON documents. It prints as an
//! s-expression through [`Print`]: mappings become association lists of
//! `("key" . value)` pairs, booleans become the symbols `true` and `false`.
//! Reading that text back and converting with [`Tree::try_from`] recovers the
//! tree, except that empty sequences and empty mappings both come back as
//! [`Tree::Null`].
use crate::printer::{Print, Printer};
use crate::value::{Number, Value};
use ordered_float::OrderedFloat;
use proptest::arbitrary::Arbitrary;
use smol_str::SmolStr;

/// A JSON-compatible value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Tree {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(SmolStr),
    Seq(Vec<Tree>),
    /// Entries in insertion order.
    Map(Vec<(SmolStr, Tree)>),
}

/// Failure to convert a [`Value`] into a [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("dotted list outside of a mapping entry")]
    ImproperList,
}

impl Print for Tree {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        match self {
            Tree::Null => printer.nil(),
            Tree::Bool(true) => printer.symbol("true"),
            Tree::Bool(false) => printer.symbol("false"),
            Tree::Number(number) => printer.number(*number),
            Tree::String(string) => printer.string(string),
            Tree::Seq(items) => printer.list(|printer| {
                for item in items {
                    printer.print(item)?;
                }
                Ok(())
            }),
            Tree::Map(entries) => printer.list(|printer| {
                for (key, value) in entries {
                    printer.list(|printer| {
                        printer.string(key)?;
                        printer.dot()?;
                        printer.print(value)
                    })?;
                }
                Ok(())
            }),
        }
    }
}

/// Integers that fit `i64` or `u64` are kept exactly; other numbers become floats.
impl From<serde_json::Value> for Tree {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Tree::Null,
            serde_json::Value::Bool(bool) => Tree::Bool(bool),
            serde_json::Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    Tree::Number(Number::Int(int))
                } else if let Some(uint) = number.as_u64() {
                    Tree::Number(Number::UInt(uint))
                } else {
                    Tree::Number(Number::Float(OrderedFloat(
                        number.as_f64().unwrap_or(f64::NAN),
                    )))
                }
            }
            serde_json::Value::String(string) => Tree::String(string.into()),
            serde_json::Value::Array(items) => {
                Tree::Seq(items.into_iter().map(Tree::from).collect())
            }
            serde_json::Value::Object(entries) => Tree::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.into(), Tree::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Non-finite floats have no JSON form and become `null`. Later entries win
/// over earlier ones with the same key.
impl From<Tree> for serde_json::Value {
    fn from(tree: Tree) -> Self {
        match tree {
            Tree::Null => serde_json::Value::Null,
            Tree::Bool(bool) => serde_json::Value::Bool(bool),
            Tree::Number(Number::Int(int)) => serde_json::Value::Number(int.into()),
            Tree::Number(Number::UInt(uint)) => serde_json::Value::Number(uint.into()),
            Tree::Number(Number::Float(float)) => {
                serde_json::Number::from_f64(float.into_inner())
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null)
            }
            Tree::String(string) => serde_json::Value::String(string.into()),
            Tree::Seq(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Tree::Map(entries) => serde_json::Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<&Value> for Tree {
    type Error = ConvertError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Nil => Ok(Tree::Null),
            Value::Number(number) => Ok(Tree::Number(*number)),
            Value::String(string) => Ok(Tree::String(string.clone())),
            Value::Symbol(symbol) => Ok(match symbol.name() {
                "true" => Tree::Bool(true),
                "false" => Tree::Bool(false),
                name => Tree::String(name.into()),
            }),
            Value::Cons(cell) => {
                if !cell.is_proper() {
                    return Err(ConvertError::ImproperList);
                }

                if cell.iter().all(is_entry) {
                    cell.iter()
                        .filter_map(Value::as_cons)
                        .map(|entry| -> Result<(SmolStr, Tree), ConvertError> {
                            let key = entry.car().as_str().unwrap_or_default().into();
                            Ok((key, Tree::try_from(entry.cdr())?))
                        })
                        .collect::<Result<Vec<_>, _>>()
                        .map(Tree::Map)
                } else {
                    cell.iter()
                        .map(Tree::try_from)
                        .collect::<Result<Vec<_>, _>>()
                        .map(Tree::Seq)
                }
            }
        }
    }
}

impl TryFrom<Value> for Tree {
    type Error = ConvertError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Tree::try_from(&value)
    }
}

/// A mapping entry is a cell whose `car` is a string key.
fn is_entry(value: &Value) -> bool {
    value
        .as_cons()
        .is_some_and(|cell| matches!(cell.car(), Value::String(_)))
}

/// Generates trees that survive a print/read/convert round trip unchanged:
/// containers are non-empty and sequences never directly contain sequences.
impl Arbitrary for Tree {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        use proptest::prelude::*;

        let leaf = proptest::prop_oneof![
            Just(Tree::Null),
            any::<bool>().prop_map(Tree::Bool),
            any::<i64>().prop_map(|int| Tree::Number(Number::Int(int))),
            any::<u64>().prop_map(|uint| Tree::Number(Number::from(uint))),
            (-1e12..1e12f64).prop_map(|float| Tree::Number(Number::from(float))),
            any::<String>().prop_map(|string| Tree::String(string.into())),
        ];

        leaf.prop_recursive(6, 128, 6, |inner| {
            let map = proptest::collection::vec((any::<String>(), inner.clone()), 1..6).prop_map(
                |entries| {
                    Tree::Map(
                        entries
                            .into_iter()
                            .map(|(key, value)| (key.into(), value))
                            .collect(),
                    )
                },
            );
            let element = inner.prop_filter("no directly nested sequence", |tree| {
                !matches!(tree, Tree::Seq(_))
            });
            proptest::prop_oneof![
                map,
                proptest::collection::vec(element, 1..6).prop_map(Tree::Seq),
            ]
        })
        .boxed()
    }
}

#[cfg(test)]
mod test {
    use super::{ConvertError, Tree};
    use crate::value::Number;
    use crate::{parse, stringify};
    use proptest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    fn tree(json: serde_json::Value) -> Tree {
        Tree::from(json)
    }

    #[rstest]
    #[case(json!(null), "()")]
    #[case(json!(true), "true")]
    #[case(json!(false), "false")]
    #[case(json!(42), "42")]
    #[case(json!(u64::MAX), "18446744073709551615")]
    #[case(json!(-1.5), "-1.5")]
    #[case(json!(2.0), "2.0")]
    #[case(json!("say \"hi\"\n"), r#""say \"hi\"\n""#)]
    #[case(json!([]), "()")]
    #[case(json!([1, "two", null]), r#"(1 "two" ())"#)]
    #[case(json!({}), "()")]
    #[case(json!({"a": 1, "b": [1, 2]}), r#"(("a" . 1) ("b" . (1 2)))"#)]
    #[case(json!({"z": {"y": "x"}}), r#"(("z" . (("y" . "x"))))"#)]
    fn test_stringify(#[case] json: serde_json::Value, #[case] expected: &str) {
        assert_eq!(expected, stringify(&tree(json)).unwrap());
    }

    #[test]
    fn test_map_keeps_insertion_order() {
        let tree = tree(json!({"zebra": 1, "apple": 2, "mango": 3}));
        assert_eq!(
            r#"(("zebra" . 1) ("apple" . 2) ("mango" . 3))"#,
            stringify(&tree).unwrap()
        );
    }

    #[rstest]
    #[case(json!({"name": "sexp", "tags": ["a", "b"], "nested": {"ok": true, "n": null}}))]
    #[case(json!([{"a": 1}, {"b": 2.25}]))]
    #[case(json!({"a": [{"b": [1, 2]}]}))]
    #[case(json!(["true", true]))]
    #[case(json!({"max": u64::MAX, "min": i64::MIN}))]
    fn test_json_round_trip(#[case] json: serde_json::Value) {
        let text = stringify(&tree(json.clone())).unwrap();
        let back = Tree::try_from(parse(&text).unwrap()).unwrap();
        assert_eq!(json, serde_json::Value::from(back));
    }

    #[rstest]
    #[case("(1 2 3)", Tree::Seq(vec![
        Tree::Number(Number::Int(1)),
        Tree::Number(Number::Int(2)),
        Tree::Number(Number::Int(3)),
    ]))]
    #[case("(hoge true)", Tree::Seq(vec![Tree::String("hoge".into()), Tree::Bool(true)]))]
    #[case(r#"(("k"))"#, Tree::Map(vec![("k".into(), Tree::Null)]))]
    #[case(r#"(("k" . v) ("k" . w))"#, Tree::Map(vec![
        ("k".into(), Tree::String("v".into())),
        ("k".into(), Tree::String("w".into())),
    ]))]
    fn test_from_value(#[case] source: &str, #[case] expected: Tree) {
        assert_eq!(expected, Tree::try_from(parse(source).unwrap()).unwrap());
    }

    #[rstest]
    #[case("(hoge . fuga)")]
    #[case("(1 (2 . 3))")]
    fn test_improper_list(#[case] source: &str) {
        assert_eq!(
            ConvertError::ImproperList,
            Tree::try_from(parse(source).unwrap()).unwrap_err()
        );
    }

    #[test]
    fn test_non_finite_to_json() {
        let tree = Tree::Number(Number::from(f64::NAN));
        assert_eq!(serde_json::Value::Null, serde_json::Value::from(tree.clone()));
        assert!(stringify(&tree).is_err());
    }

    proptest! {
        #[test]
        fn stringify_then_parse(tree: Tree) {
            let text = stringify(&tree).unwrap();
            let back = Tree::try_from(parse(&text).unwrap()).unwrap();
            prop_assert_eq!(tree, back);
        }
    }
}
