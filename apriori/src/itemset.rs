// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Canonical itemset representation.

use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::Error;

/// Bound for item identifiers.
///
/// Items must be totally ordered (for the canonical form and the join's prefix rule) and
/// hashable (for subset lookups). They are shared read-only with counting workers, hence
/// `Send + Sync`. Blanket-implemented for every qualifying type.
pub trait Item: Ord + Hash + Clone + Debug + Send + Sync {}

impl<T: Ord + Hash + Clone + Debug + Send + Sync> Item for T {}

/// A set of distinct items stored as a strictly increasing sequence.
///
/// Equality, ordering and hashing are structural over the canonical sequence, so two itemsets
/// holding the same items always compare equal no matter how they were built.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Itemset<T> {
    items: Vec<T>,
}

impl<T: Item> Itemset<T> {
    /// Creates an itemset from arbitrary items, sorting and removing duplicates.
    ///
    /// Canonicalizing an already canonical sequence leaves it unchanged.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        let mut items: Vec<T> = items.into_iter().collect();
        items.sort_unstable();
        items.dedup();
        Self { items }
    }

    /// Creates an itemset from items that are already strictly increasing.
    ///
    /// Returns an error if any item is not strictly greater than its predecessor.
    pub fn try_from_sorted(items: Vec<T>) -> Result<Self, Error> {
        if is_strictly_increasing(&items) {
            Ok(Self { items })
        } else {
            Err(Error::unsorted_itemset())
        }
    }

    /// Creates a single-item itemset.
    pub fn singleton(item: T) -> Self {
        Self { items: vec![item] }
    }

    /// Returns true if `item` is a member of this itemset.
    pub fn contains(&self, item: &T) -> bool {
        self.items.binary_search(item).is_ok()
    }

    /// Returns true if every item of this itemset appears in `sorted`.
    ///
    /// `sorted` must be in ascending order; duplicates are tolerated.
    pub fn is_subset_of(&self, sorted: &[T]) -> bool {
        is_sorted_subset(&self.items, sorted)
    }

    /// Returns the itemset extended with `item`, which must be greater than every member.
    pub(crate) fn extended_with(&self, item: &T) -> Self {
        debug_assert!(self.items.last().is_none_or(|last| last < item));
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend_from_slice(&self.items);
        items.push(item.clone());
        Self { items }
    }
}

impl<T> Itemset<T> {
    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the itemset holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the items in ascending order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns an iterator over the items in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns all items but the last one.
    ///
    /// For the empty itemset this is empty as well.
    pub fn prefix(&self) -> &[T] {
        match self.items.split_last() {
            Some((_, prefix)) => prefix,
            None => &[],
        }
    }

    /// Returns the greatest item.
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Consumes the itemset and returns the canonical item vector.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Item> From<Vec<T>> for Itemset<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T: Item, const N: usize> From<[T; N]> for Itemset<T> {
    fn from(items: [T; N]) -> Self {
        Self::new(items)
    }
}

impl<T: Item> FromIterator<T> for Itemset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T> AsRef<[T]> for Itemset<T> {
    fn as_ref(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a Itemset<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Display> fmt::Display for Itemset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("}")
    }
}

pub(crate) fn is_strictly_increasing<T: Ord>(items: &[T]) -> bool {
    items.windows(2).all(|pair| pair[0] < pair[1])
}

/// Merge walk over two ascending sequences.
pub(crate) fn is_sorted_subset<T: Ord>(needle: &[T], haystack: &[T]) -> bool {
    if needle.len() > haystack.len() {
        return false;
    }
    let mut rest = haystack;
    for item in needle {
        loop {
            match rest.split_first() {
                None => return false,
                Some((head, tail)) => {
                    rest = tail;
                    match head.cmp(item) {
                        std::cmp::Ordering::Less => continue,
                        std::cmp::Ordering::Equal => break,
                        std::cmp::Ordering::Greater => return false,
                    }
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_new_canonicalizes() {
        let set = Itemset::new([3, 1, 2, 3, 1]);
        assert_eq!(set.as_slice(), &[1, 2, 3]);
        assert_eq!(set.len(), 3);
        assert_eq!(set, Itemset::from(vec![2, 3, 1]));
    }

    #[test]
    fn test_canonicalization_is_idempotent() {
        let once = Itemset::new([5u32, 4, 9, 4]);
        let twice = Itemset::new(once.clone().into_vec());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_try_from_sorted() {
        assert!(Itemset::try_from_sorted(vec![1, 4, 7]).is_ok());
        let err = Itemset::try_from_sorted(vec![1, 1, 2]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedTransaction);
        assert!(Itemset::try_from_sorted(vec![2, 1]).is_err());
    }

    #[test]
    fn test_prefix_and_last() {
        let set = Itemset::new([1, 2, 5]);
        assert_eq!(set.prefix(), &[1, 2]);
        assert_eq!(set.last(), Some(&5));
        let single = Itemset::singleton(9);
        assert!(single.prefix().is_empty());
        let empty: Itemset<u32> = Itemset::new([]);
        assert!(empty.prefix().is_empty());
        assert_eq!(empty.last(), None);
    }

    #[test]
    fn test_is_subset_of() {
        let set = Itemset::new([2, 4]);
        assert!(set.is_subset_of(&[1, 2, 3, 4]));
        assert!(set.is_subset_of(&[2, 2, 4]));
        assert!(!set.is_subset_of(&[1, 2, 3]));
        assert!(!set.is_subset_of(&[4]));
        assert!(Itemset::<u32>::new([]).is_subset_of(&[]));
    }

    #[test]
    fn test_extended_with() {
        let set = Itemset::new([1, 3]).extended_with(&8);
        assert_eq!(set.as_slice(), &[1, 3, 8]);
        assert!(set.contains(&8));
        assert!(!set.contains(&2));
    }

    #[test]
    fn test_display() {
        assert_eq!(Itemset::new([3, 1, 2]).to_string(), "{1, 2, 3}");
        assert_eq!(Itemset::<u8>::new([]).to_string(), "{}");
    }
}
