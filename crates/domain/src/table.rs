//! Fixed-size tables keyed by a [`Location`] enum.

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::location::Location;

/// One slot per variant of `L`, always fully populated.
///
/// Lookups by typed location cannot miss; lookups by name go through
/// [`Location::parse`] and fail with a typed error instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationTable<L, V> {
    slots: Vec<V>,
    _location: PhantomData<L>,
}

impl<L: Location, V> LocationTable<L, V> {
    /// Build a table by computing the value of every location.
    pub fn from_fn(mut init: impl FnMut(L) -> V) -> Self {
        Self {
            slots: L::ALL.iter().map(|&location| init(location)).collect(),
            _location: PhantomData,
        }
    }

    /// Iterate `(location, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (L, &V)> {
        L::ALL.iter().copied().zip(self.slots.iter())
    }

    /// Iterate the values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.slots.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<L: Location, V: Clone> LocationTable<L, V> {
    /// Build a table where every location starts with the same value.
    pub fn filled(value: V) -> Self {
        Self::from_fn(|_| value.clone())
    }
}

impl<L: Location, V> Index<L> for LocationTable<L, V> {
    type Output = V;

    fn index(&self, location: L) -> &V {
        &self.slots[location.index()]
    }
}

impl<L: Location, V> IndexMut<L> for LocationTable<L, V> {
    fn index_mut(&mut self, location: L) -> &mut V {
        &mut self.slots[location.index()]
    }
}

impl<L: Location, V: Serialize> Serialize for LocationTable<L, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (location, value) in self.iter() {
            map.serialize_entry(location.as_str(), value)?;
        }
        map.end()
    }
}
