use super::Value;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::sync::Arc;

/// A pair of values. Chains of cells whose last `cdr` is [`Value::Nil`] form
/// proper lists; any other final `cdr` makes the chain a dotted list.
///
/// Equality, hashing and `Debug` walk the `cdr` chain in a loop, so their
/// stack use depends on nesting depth only, not on list length.
#[derive(Clone)]
pub struct Cons {
    car: Value,
    cdr: Value,
}

impl Cons {
    pub fn new(car: impl Into<Value>, cdr: impl Into<Value>) -> Self {
        Self {
            car: car.into(),
            cdr: cdr.into(),
        }
    }

    #[inline]
    pub fn car(&self) -> &Value {
        &self.car
    }

    #[inline]
    pub fn cdr(&self) -> &Value {
        &self.cdr
    }

    /// Counts the cells in this chain. For a dotted list the final non-list
    /// `cdr` is not counted, so `(a b . c)` has size 2.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// The `car` of the `index`th cell, or `None` past the end of the chain.
    pub fn nth(&self, index: usize) -> Option<&Value> {
        self.iter().nth(index)
    }

    /// Iterates over the `car` of every cell in the chain.
    pub fn iter(&self) -> Iter<'_> {
        Iter { next: Some(self) }
    }

    /// Calls `f` with every element and its index, in list order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&Value, usize),
    {
        for (index, value) in self.iter().enumerate() {
            f(value, index);
        }
    }

    /// The `cdr` of the last cell: `Nil` for a proper list.
    pub fn tail(&self) -> &Value {
        let mut cell = self;
        while let Value::Cons(next) = &cell.cdr {
            cell = next;
        }
        &cell.cdr
    }

    pub fn is_proper(&self) -> bool {
        self.tail().is_nil()
    }
}

impl PartialEq for Cons {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.iter();
        let mut right = other.iter();
        loop {
            match (left.next(), right.next()) {
                (Some(a), Some(b)) if a == b => continue,
                (None, None) => return self.tail() == other.tail(),
                _ => return false,
            }
        }
    }
}

impl Eq for Cons {}

impl Hash for Cons {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0usize;
        for item in self.iter() {
            item.hash(state);
            len += 1;
        }
        len.hash(state);
        self.tail().hash(state);
    }
}

/// Formats as the list of elements, with `.` and the tail appended for a
/// dotted list.
impl fmt::Debug for Cons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        list.entries(self.iter());
        match self.tail() {
            Value::Nil => {}
            tail => {
                list.entry(&format_args!("."));
                list.entry(tail);
            }
        }
        list.finish()
    }
}

// Cells are unlinked onto an explicit stack so that neither long lists nor
// deeply nested ones overflow the native stack when dropped.
impl Drop for Cons {
    fn drop(&mut self) {
        if !matches!(self.car, Value::Cons(_)) && !matches!(self.cdr, Value::Cons(_)) {
            return;
        }

        let mut pending = vec![std::mem::take(&mut self.car), std::mem::take(&mut self.cdr)];
        while let Some(value) = pending.pop() {
            if let Value::Cons(cell) = value {
                if let Ok(mut cell) = Arc::try_unwrap(cell) {
                    pending.push(std::mem::take(&mut cell.car));
                    pending.push(std::mem::take(&mut cell.cdr));
                }
            }
        }
    }
}

impl<'a> IntoIterator for &'a Cons {
    type Item = &'a Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of a list.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    next: Option<&'a Cons>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(value: &'a Value) -> Self {
        Self {
            next: value.as_cons(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.next?;
        self.next = cell.cdr.as_cons();
        Some(&cell.car)
    }
}

impl FusedIterator for Iter<'_> {}

/// Builds a proper list. An empty input yields [`Value::Nil`].
pub fn list<I>(items: I) -> Value
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    list_with_tail(items, Value::Nil)
}

/// Builds a list whose last `cdr` is `tail` instead of `Nil`.
///
/// With no items this is just `tail`.
pub fn list_with_tail<I>(items: I, tail: impl Into<Value>) -> Value
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let items: Vec<Value> = items.into_iter().map(Into::into).collect();
    items
        .into_iter()
        .rev()
        .fold(tail.into(), |cdr, car| Cons::new(car, cdr).into())
}
