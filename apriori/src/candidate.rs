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

//! Level-wise candidate generation.
//!
//! Candidates of size `k + 1` are built from the frequent itemsets of size `k` in two steps:
//!
//! 1. **Join.** Frequent itemsets are grouped by their first `k - 1` items. Within a group, every
//!    pair `(a, b)` with `last(a) < last(b)` yields `a ∪ {last(b)}`. Since each candidate has
//!    exactly one such pair (its two largest items decide `a` and `b`), no candidate is produced
//!    twice.
//! 2. **Prune.** A joined candidate survives only if every one of its `k`-subsets is frequent.
//!    By downward closure, a candidate with an infrequent subset cannot be frequent itself.
//!
//! The prune is sound only when the input is exactly the set of frequent `k`-itemsets. An
//! approximate or partial input may discard candidates that are in fact frequent.

use std::collections::BTreeSet;
use std::collections::HashSet;

use tracing::trace;

use crate::itemset::Item;
use crate::itemset::Itemset;

/// Generates the candidate `(k + 1)`-itemsets from the frequent `k`-itemsets.
///
/// Duplicate inputs are ignored. The output is duplicate-free and sorted lexicographically.
/// It is empty when fewer than two distinct itemsets share a `(k - 1)`-prefix.
///
/// # Panics
///
/// Panics if the itemsets do not all have the same size.
///
/// # Examples
///
/// ```
/// # use apriori::Itemset;
/// # use apriori::generate_candidates;
/// let frequent = [
///     Itemset::new([1, 2]),
///     Itemset::new([1, 3]),
///     Itemset::new([2, 3]),
/// ];
/// assert_eq!(generate_candidates(&frequent), vec![Itemset::new([1, 2, 3])]);
/// ```
pub fn generate_candidates<T: Item>(frequent: &[Itemset<T>]) -> Vec<Itemset<T>> {
    let Some(k) = frequent.first().map(Itemset::len) else {
        return vec![];
    };
    assert!(
        frequent.iter().all(|itemset| itemset.len() == k),
        "frequent itemsets must all have the same size"
    );
    if k == 0 {
        return vec![];
    }

    let sorted: BTreeSet<&Itemset<T>> = frequent.iter().collect();
    let sorted: Vec<&Itemset<T>> = sorted.into_iter().collect();
    let lookup: HashSet<&[T]> = sorted.iter().map(|itemset| itemset.as_slice()).collect();

    let mut candidates = vec![];
    let mut joined = 0usize;
    let mut subset = Vec::with_capacity(k);
    // equal-length itemsets sharing a prefix are adjacent in lexicographic order
    for group in sorted.chunk_by(|a, b| a.prefix() == b.prefix()) {
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                let Some(last) = b.last() else { continue };
                let candidate = a.extended_with(last);
                joined += 1;
                if all_subsets_frequent(&candidate, &lookup, &mut subset) {
                    candidates.push(candidate);
                }
            }
        }
    }

    trace!(
        k,
        frequent = sorted.len(),
        joined,
        retained = candidates.len(),
        "generated candidates"
    );
    candidates
}

/// Checks the downward-closure condition for a joined candidate of size `k + 1`.
///
/// Dropping either of the last two items gives back one of the two joined parents, so only the
/// first `k - 1` removals need a lookup. For `k = 1` that leaves nothing to check.
fn all_subsets_frequent<T: Item>(
    candidate: &Itemset<T>,
    lookup: &HashSet<&[T]>,
    subset: &mut Vec<T>,
) -> bool {
    let items = candidate.as_slice();
    let parents_from = items.len().saturating_sub(2);
    (0..parents_from).all(|skip| {
        subset.clear();
        subset.extend_from_slice(&items[..skip]);
        subset.extend_from_slice(&items[skip + 1..]);
        lookup.contains(subset.as_slice())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets<const K: usize>(raw: &[[u32; K]]) -> Vec<Itemset<u32>> {
        raw.iter().map(|items| Itemset::new(*items)).collect()
    }

    #[test]
    fn test_join_singletons() {
        let frequent = sets(&[[3], [1], [2]]);
        let candidates = generate_candidates(&frequent);
        assert_eq!(candidates, sets(&[[1, 2], [1, 3], [2, 3]]));
    }

    #[test]
    fn test_join_and_prune_pairs() {
        let frequent = sets(&[[1, 2], [1, 3], [2, 3]]);
        assert_eq!(generate_candidates(&frequent), sets(&[[1, 2, 3]]));
    }

    #[test]
    fn test_prune_drops_candidates_with_infrequent_subsets() {
        // {1, 3, 4} joins from {1, 3} and {1, 4} but {3, 4} is not frequent
        let frequent = sets(&[[1, 2], [1, 3], [1, 4], [2, 3]]);
        assert_eq!(generate_candidates(&frequent), sets(&[[1, 2, 3]]));
    }

    #[test]
    fn test_prune_checks_every_subset() {
        let frequent = sets(&[
            [1, 2, 3],
            [1, 2, 4],
            [1, 3, 4],
            [1, 3, 5],
            [2, 3, 4],
        ]);
        // {1, 3, 4, 5} is pruned since {1, 4, 5} and {3, 4, 5} are missing
        assert_eq!(generate_candidates(&frequent), sets(&[[1, 2, 3, 4]]));
    }

    #[test]
    fn test_no_shared_prefix() {
        let frequent = sets(&[[1, 2], [3, 4], [5, 6]]);
        assert!(generate_candidates(&frequent).is_empty());
    }

    #[test]
    fn test_small_inputs() {
        assert!(generate_candidates::<u32>(&[]).is_empty());
        assert!(generate_candidates(&sets(&[[7]])).is_empty());
        assert!(generate_candidates(&sets(&[[7], [7]])).is_empty());
        assert!(generate_candidates(&[Itemset::<u32>::new([]), Itemset::new([])]).is_empty());
    }

    #[test]
    fn test_duplicates_are_ignored() {
        let frequent = sets(&[[2], [1], [2], [1]]);
        assert_eq!(generate_candidates(&frequent), sets(&[[1, 2]]));
    }

    #[test]
    #[should_panic(expected = "frequent itemsets must all have the same size")]
    fn test_mixed_sizes() {
        let frequent = vec![Itemset::new([1u32]), Itemset::new([1, 2])];
        generate_candidates(&frequent);
    }
}
