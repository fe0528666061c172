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

//! Results of a mining run.

use std::fmt;

use crate::itemset::Item;
use crate::itemset::Itemset;
use crate::itemset::is_strictly_increasing;
use crate::support::FrequentItemset;

/// Why the mining loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A level yielded no candidates or no frequent itemsets; the result is complete.
    Exhausted,
    /// The configured maximum itemset size was reached.
    MaxLength,
    /// The caller's level callback asked to stop.
    Interrupted,
}

/// Counts for one completed level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStats {
    level: usize,
    candidates: usize,
    frequent: usize,
}

impl LevelStats {
    pub(crate) fn new(level: usize, candidates: usize, frequent: usize) -> Self {
        Self {
            level,
            candidates,
            frequent,
        }
    }

    /// Returns the itemset size of this level.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Returns the number of candidates counted.
    ///
    /// For level one this is the number of distinct items in the source.
    pub fn candidates(&self) -> usize {
        self.candidates
    }

    /// Returns the number of candidates that met the minimum support.
    pub fn frequent(&self) -> usize {
        self.frequent
    }
}

/// Frequent itemsets of every size, with run diagnostics.
///
/// Itemsets are ordered by size, then lexicographically.
#[derive(Debug, Clone, PartialEq)]
pub struct MiningResult<T> {
    itemsets: Vec<FrequentItemset<T>>,
    levels: Vec<LevelStats>,
    num_transactions: u64,
    distinct_items: usize,
    stop_reason: StopReason,
}

impl<T> MiningResult<T> {
    pub(crate) fn new(
        itemsets: Vec<FrequentItemset<T>>,
        levels: Vec<LevelStats>,
        num_transactions: u64,
        distinct_items: usize,
        stop_reason: StopReason,
    ) -> Self {
        Self {
            itemsets,
            levels,
            num_transactions,
            distinct_items,
            stop_reason,
        }
    }

    /// Returns all frequent itemsets.
    pub fn itemsets(&self) -> &[FrequentItemset<T>] {
        &self.itemsets
    }

    /// Consumes the result and returns all frequent itemsets.
    pub fn into_itemsets(self) -> Vec<FrequentItemset<T>> {
        self.itemsets
    }

    /// Returns the number of frequent itemsets.
    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    /// Returns true if nothing was frequent.
    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }

    /// Returns the frequent itemsets of size `k`.
    pub fn level(&self, k: usize) -> &[FrequentItemset<T>] {
        let start = self.itemsets.partition_point(|f| f.items().len() < k);
        let end = self.itemsets.partition_point(|f| f.items().len() <= k);
        &self.itemsets[start..end]
    }

    /// Returns the size of the largest frequent itemset, or zero if there is none.
    pub fn max_len(&self) -> usize {
        self.itemsets.last().map_or(0, |f| f.items().len())
    }

    /// Returns the number of transactions in the source.
    pub fn num_transactions(&self) -> u64 {
        self.num_transactions
    }

    /// Returns the number of distinct items seen, frequent or not.
    pub fn distinct_items(&self) -> usize {
        self.distinct_items
    }

    /// Returns per-level counts in level order.
    pub fn levels(&self) -> &[LevelStats] {
        &self.levels
    }

    /// Returns why the run ended.
    pub fn stop_reason(&self) -> StopReason {
        self.stop_reason
    }

    /// Returns true if every frequent itemset was found.
    pub fn is_exhaustive(&self) -> bool {
        self.stop_reason == StopReason::Exhausted
    }
}

impl<T: Item> MiningResult<T> {
    /// Looks up the frequent itemset with exactly these items.
    ///
    /// Items may be given in any order. A repeated item never names a frequent itemset.
    pub fn get(&self, items: &[T]) -> Option<&FrequentItemset<T>> {
        if is_strictly_increasing(items) {
            return self.find(items);
        }
        let canonical = Itemset::new(items.iter().cloned());
        if canonical.len() != items.len() {
            return None;
        }
        self.find(canonical.as_slice())
    }

    /// Returns true if the given items form a frequent itemset.
    pub fn contains(&self, items: &[T]) -> bool {
        self.get(items).is_some()
    }

    fn find(&self, items: &[T]) -> Option<&FrequentItemset<T>> {
        let level = self.level(items.len());
        level
            .binary_search_by(|f| f.items().cmp(items))
            .ok()
            .map(|i| &level[i])
    }
}

impl<T: fmt::Display> fmt::Display for MiningResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for itemset in &self.itemsets {
            writeln!(f, "{itemset}")?;
        }
        Ok(())
    }
}
