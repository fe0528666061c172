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

//! Per-scan support tallies and confirmed frequent itemsets.

use std::fmt;

use crate::itemset::Item;
use crate::itemset::Itemset;

/// An itemset whose support met the minimum threshold.
///
/// Each entry carries the absolute number of supporting transactions and the size of the
/// transaction source, so the support fraction is exact up to one division.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrequentItemset<T> {
    itemset: Itemset<T>,
    count: u64,
    num_transactions: u64,
}

impl<T> FrequentItemset<T> {
    /// Returns the itemset.
    pub fn itemset(&self) -> &Itemset<T> {
        &self.itemset
    }

    /// Returns the items in ascending order.
    pub fn items(&self) -> &[T] {
        self.itemset.as_slice()
    }

    /// Returns the number of transactions containing the itemset.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the number of transactions in the source.
    pub fn num_transactions(&self) -> u64 {
        self.num_transactions
    }

    /// Returns the fraction of transactions containing the itemset.
    pub fn support(&self) -> f64 {
        support_of(self.count, self.num_transactions)
    }

    /// Consumes the entry and returns its itemset.
    pub fn into_itemset(self) -> Itemset<T> {
        self.itemset
    }
}

impl<T: fmt::Display> fmt::Display for FrequentItemset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} count={} support={}",
            self.itemset,
            self.count,
            self.support()
        )
    }
}

/// Candidate itemsets with the number of transactions supporting each.
///
/// A tally is created fresh by every scan and returned by value; nothing is shared between
/// levels. Tallies over the same candidates (for instance, from disjoint partitions of a
/// source) combine with [`SupportCounts::merge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportCounts<T> {
    candidates: Vec<Itemset<T>>,
    counts: Vec<u64>,
    num_transactions: u64,
    // candidates strictly increasing, which every level the miner builds is
    sorted: bool,
}

impl<T> SupportCounts<T> {
    /// Returns the number of transactions scanned.
    pub fn num_transactions(&self) -> u64 {
        self.num_transactions
    }

    /// Returns the number of candidates tallied.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true if no candidates were tallied.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Returns the candidates in the order they were supplied.
    pub fn candidates(&self) -> &[Itemset<T>] {
        &self.candidates
    }

    /// Returns an iterator over `(candidate, count)` pairs, one per candidate.
    pub fn iter(&self) -> impl Iterator<Item = (&Itemset<T>, u64)> {
        self.candidates.iter().zip(self.counts.iter().copied())
    }
}

impl<T: Item> SupportCounts<T> {
    pub(crate) fn from_parts(
        candidates: Vec<Itemset<T>>,
        counts: Vec<u64>,
        num_transactions: u64,
    ) -> Self {
        debug_assert_eq!(candidates.len(), counts.len());
        let sorted = candidates.windows(2).all(|pair| pair[0] < pair[1]);
        Self {
            candidates,
            counts,
            num_transactions,
            sorted,
        }
    }

    /// Returns the count for `items`, or `None` if it was not a candidate.
    ///
    /// `items` must be in ascending order. Lookups are a binary search when the candidates were
    /// supplied in ascending order (as [`generate_candidates`](crate::generate_candidates) and
    /// [`count_items`](crate::support::count_items) produce them) and a linear scan otherwise.
    pub fn count(&self, items: &[T]) -> Option<u64> {
        let index = if self.sorted {
            self.candidates
                .binary_search_by(|candidate| candidate.as_slice().cmp(items))
                .ok()
        } else {
            self.candidates
                .iter()
                .position(|candidate| candidate.as_slice() == items)
        };
        index.map(|i| self.counts[i])
    }

    /// Returns the support fraction for `items`, or `None` if it was not a candidate.
    pub fn support(&self, items: &[T]) -> Option<f64> {
        self.count(items)
            .map(|count| support_of(count, self.num_transactions))
    }

    /// Adds the tallies of `other` into this one.
    ///
    /// Merging is plain integer addition, so it is associative and commutative.
    ///
    /// # Panics
    ///
    /// Panics if `other` tallied different candidates.
    pub fn merge(&mut self, other: &Self) {
        assert!(
            self.candidates == other.candidates,
            "cannot merge support counts over different candidates"
        );
        add_counts(&mut self.counts, &other.counts);
        self.num_transactions += other.num_transactions;
    }

    /// Returns the candidates meeting `min_support`, in candidate order.
    pub fn frequent(&self, min_support: f64) -> Vec<FrequentItemset<T>> {
        self.iter()
            .filter(|(_, count)| is_frequent(*count, self.num_transactions, min_support))
            .map(|(itemset, count)| FrequentItemset {
                itemset: itemset.clone(),
                count,
                num_transactions: self.num_transactions,
            })
            .collect()
    }

    /// Consumes the tally and returns the candidates meeting `min_support`.
    pub fn into_frequent(self, min_support: f64) -> Vec<FrequentItemset<T>> {
        let num_transactions = self.num_transactions;
        self.candidates
            .into_iter()
            .zip(self.counts)
            .filter(|(_, count)| is_frequent(*count, num_transactions, min_support))
            .map(|(itemset, count)| FrequentItemset {
                itemset,
                count,
                num_transactions,
            })
            .collect()
    }
}

pub(crate) fn add_counts(into: &mut [u64], from: &[u64]) {
    for (total, partial) in into.iter_mut().zip(from) {
        *total += *partial;
    }
}

/// Inclusive threshold test. An empty source supports nothing.
pub(crate) fn is_frequent(count: u64, num_transactions: u64, min_support: f64) -> bool {
    count > 0 && support_of(count, num_transactions) >= min_support
}

fn support_of(count: u64, num_transactions: u64) -> f64 {
    if num_transactions == 0 {
        0.0
    } else {
        count as f64 / num_transactions as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs() -> Vec<Itemset<u32>> {
        vec![Itemset::new([1, 2]), Itemset::new([1, 3])]
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(is_frequent(2, 4, 0.5));
        assert!(!is_frequent(1, 4, 0.5));
        assert!(is_frequent(1, 10, 0.1));
        assert!(is_frequent(4, 4, 1.0));
        assert!(!is_frequent(0, 0, 0.5));
    }

    #[test]
    fn test_lookup_and_frequent() {
        let counts = SupportCounts::from_parts(pairs(), vec![3, 1], 4);
        assert_eq!(counts.count(&[1, 2]), Some(3));
        assert_eq!(counts.support(&[1, 3]), Some(0.25));
        assert_eq!(counts.count(&[2, 3]), None);

        let frequent = counts.frequent(0.5);
        assert_eq!(frequent.len(), 1);
        assert_eq!(frequent[0].items(), &[1, 2]);
        assert_eq!(frequent[0].support(), 0.75);
        assert_eq!(counts.into_frequent(0.25).len(), 2);
    }

    #[test]
    fn test_lookup_in_unsorted_candidates() {
        let candidates = vec![Itemset::new([2, 3]), Itemset::new([1, 2]), Itemset::new([1, 3])];
        let counts = SupportCounts::from_parts(candidates, vec![5, 3, 1], 6);
        assert!(!counts.sorted);
        assert_eq!(counts.count(&[1, 2]), Some(3));
        assert_eq!(counts.count(&[2, 3]), Some(5));
        assert_eq!(counts.count(&[1, 4]), None);
    }

    #[test]
    fn test_lookup_in_sorted_candidates() {
        let candidates: Vec<Itemset<u32>> = (0..50u32).map(|i| Itemset::new([i, i + 1])).collect();
        let counts = SupportCounts::from_parts(candidates, (0..50).collect(), 100);
        assert!(counts.sorted);
        assert_eq!(counts.count(&[0, 1]), Some(0));
        assert_eq!(counts.count(&[37, 38]), Some(37));
        assert_eq!(counts.count(&[49, 50]), Some(49));
        assert_eq!(counts.count(&[3, 5]), None);
    }

    #[test]
    fn test_merge_sums_counts() {
        let mut left = SupportCounts::from_parts(pairs(), vec![1, 0], 2);
        let right = SupportCounts::from_parts(pairs(), vec![2, 1], 3);
        left.merge(&right);
        assert_eq!(left.num_transactions(), 5);
        assert_eq!(left.iter().map(|(_, c)| c).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[test]
    #[should_panic(expected = "cannot merge support counts over different candidates")]
    fn test_merge_rejects_different_candidates() {
        let mut left = SupportCounts::from_parts(pairs(), vec![1, 0], 2);
        let right = SupportCounts::from_parts(vec![Itemset::new([4, 5])], vec![1], 1);
        left.merge(&right);
    }

    #[test]
    fn test_display() {
        let counts = SupportCounts::from_parts(pairs(), vec![2, 0], 4);
        let frequent = counts.frequent(0.5);
        assert_eq!(frequent[0].to_string(), "{1, 2} count=2 support=0.5");
    }
}
