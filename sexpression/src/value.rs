//! Values produced by the reader.
use crate::symbol::{intern, Symbol};
use ordered_float::OrderedFloat;
use proptest::arbitrary::Arbitrary;
use smol_str::SmolStr;
use std::fmt;
use std::sync::Arc;

mod cons;

pub use cons::{list, list_with_tail, Cons, Iter};

/// A numeric literal.
///
/// `UInt` only ever holds values above `i64::MAX`; smaller unsigned values are
/// normalised to `Int` by `Number::from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(OrderedFloat<f64>),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(int) => int as f64,
            Number::UInt(uint) => uint as f64,
            Number::Float(float) => float.into_inner(),
        }
    }

    pub fn as_i64(self) -> Option<i64> {
        match self {
            Number::Int(int) => Some(int),
            Number::UInt(_) | Number::Float(_) => None,
        }
    }

    pub fn is_finite(self) -> bool {
        match self {
            Number::Int(_) | Number::UInt(_) => true,
            Number::Float(float) => float.is_finite(),
        }
    }
}

/// Integers print plainly. Floats always carry a decimal point so that they
/// read back as floats.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(int) => write!(f, "{}", int),
            Number::UInt(uint) => write!(f, "{}", uint),
            Number::Float(float) => {
                let text = float.into_inner().to_string();
                if float.is_finite() && !text.contains('.') {
                    write!(f, "{}.0", text)
                } else {
                    f.write_str(&text)
                }
            }
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(int) => Number::Int(int),
            Err(_) => Number::UInt(value),
        }
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(OrderedFloat(value))
    }
}

/// A parsed s-expression.
///
/// `Nil` doubles as the empty list. Lists are chains of [`Cons`] cells that
/// are shared through [`Arc`], so cloning a value never copies a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Value {
    #[default]
    Nil,
    Number(Number),
    String(SmolStr),
    Symbol(Symbol),
    Cons(Arc<Cons>),
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(string) => Some(string),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn as_cons(&self) -> Option<&Cons> {
        match self {
            Value::Cons(cons) => Some(cons),
            _ => None,
        }
    }

    /// Iterates over the elements of a list. `Nil` and atoms yield nothing.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// The number of proper-list elements; zero for `Nil` and atoms.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// The `index`th element of a list, if there is one.
    pub fn nth(&self, index: usize) -> Option<&Value> {
        self.iter().nth(index)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value.into())
    }
}

impl From<SmolStr> for Value {
    fn from(value: SmolStr) -> Self {
        Value::String(value)
    }
}

impl From<Symbol> for Value {
    fn from(value: Symbol) -> Self {
        Value::Symbol(value)
    }
}

impl From<Cons> for Value {
    fn from(value: Cons) -> Self {
        Value::Cons(Arc::new(value))
    }
}

/// Generates readable values: finite numbers, non-empty symbols in the global
/// table, and proper or dotted lists of those.
impl Arbitrary for Value {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        use proptest::prelude::*;

        let leaf = proptest::prop_oneof![
            Just(Value::Nil),
            any::<i64>().prop_map(Value::from),
            any::<u64>().prop_map(|uint| Value::Number(uint.into())),
            any::<f64>()
                .prop_filter("finite", |float| float.is_finite())
                .prop_map(Value::from),
            any::<String>().prop_map(Value::from),
            "\\PC+".prop_map(|name| Value::Symbol(intern(&name))),
        ];

        leaf.prop_recursive(6, 128, 8, |inner| {
            proptest::prop_oneof![
                proptest::collection::vec(inner.clone(), 0..8).prop_map(list),
                (proptest::collection::vec(inner.clone(), 1..8), inner)
                    .prop_map(|(items, tail)| list_with_tail(items, tail)),
            ]
        })
        .boxed()
    }
}
