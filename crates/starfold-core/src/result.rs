//! Result shapes returned by `execute` and `process`.
//!
//! An aggregate may produce nothing, a single item, or several items at
//! once. `DispatchResult` normalizes those shapes so the kernel walks a
//! flat, ordered sequence no matter how the aggregate built it. The tagged
//! union shape is the domain's own `enum`; optional, list and fixed-size
//! group shapes convert in through `From`.

use std::vec;

/// Zero, one or many events (from `execute`) or commands (from `process`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub enum DispatchResult<T> {
    /// Nothing was produced.
    #[default]
    None,
    /// Exactly one item.
    One(T),
    /// Several items, in the order they must be handled.
    Many(Vec<T>),
}

impl<T> DispatchResult<T> {
    /// Calls `visit` once per produced item, in order.
    ///
    /// `None` makes no call, `One` makes exactly one, `Many` one per
    /// element in list order.
    pub fn visit(self, mut visit: impl FnMut(T)) {
        match self {
            Self::None => {}
            Self::One(item) => visit(item),
            Self::Many(items) => items.into_iter().for_each(visit),
        }
    }

    /// Concatenates two results, keeping `self` first.
    pub fn chain(self, other: Self) -> Self {
        match (self, other) {
            (Self::None, other) => other,
            (this, Self::None) => this,
            (this, other) => {
                let mut items = this.into_vec();
                items.extend(other);
                Self::Many(items)
            }
        }
    }

    /// Number of items produced.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::One(_) => 1,
            Self::Many(items) => items.len(),
        }
    }

    /// Returns `true` if nothing was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens into a vector, preserving order.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::None => Vec::new(),
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

impl<T> From<Option<T>> for DispatchResult<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Self::One)
    }
}

impl<T> From<Vec<T>> for DispatchResult<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items)
    }
}

impl<T, const N: usize> From<[T; N]> for DispatchResult<T> {
    fn from(items: [T; N]) -> Self {
        Self::Many(items.into())
    }
}

impl<T> From<(T, T)> for DispatchResult<T> {
    fn from((first, second): (T, T)) -> Self {
        Self::Many(vec![first, second])
    }
}

impl<T> From<(T, T, T)> for DispatchResult<T> {
    fn from((first, second, third): (T, T, T)) -> Self {
        Self::Many(vec![first, second, third])
    }
}

impl<T> FromIterator<T> for DispatchResult<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Many(iter.into_iter().collect())
    }
}

impl<T> Extend<T> for DispatchResult<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut items = std::mem::take(self).into_vec();
        items.extend(iter);
        *self = Self::Many(items);
    }
}

impl<T> IntoIterator for DispatchResult<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}
