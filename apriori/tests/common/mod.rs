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

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::BTreeMap;

use apriori::FrequentItemset;
use apriori::TransactionSource;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// The four baskets used throughout the docs: every item in three of them, every pair in two.
pub fn triangle() -> Vec<Vec<u32>> {
    vec![vec![1, 2, 3], vec![1, 2], vec![1, 3], vec![2, 3]]
}

/// Generates `num_transactions` random baskets over items `0..universe`.
pub fn random_baskets(
    seed: u64,
    num_transactions: usize,
    universe: u32,
    density: f64,
) -> Vec<Vec<u32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_transactions)
        .map(|_| {
            let mut basket: Vec<u32> = (0..universe).filter(|_| rng.random_bool(density)).collect();
            // exercise canonicalization with unsorted input
            if rng.random_bool(0.5) {
                basket.reverse();
            }
            basket
        })
        .collect()
}

/// Reference miner enumerating every non-empty subset of a small universe.
pub fn brute_force(baskets: &[Vec<u32>], universe: u32, min_support: f64) -> Vec<(Vec<u32>, u64)> {
    assert!(universe <= 16, "universe too large for brute force");
    let n = baskets.len() as f64;
    let masks: Vec<u32> = baskets
        .iter()
        .map(|basket| basket.iter().fold(0u32, |mask, item| mask | (1 << item)))
        .collect();
    let mut out = vec![];
    for subset in 1u32..(1 << universe) {
        let count = masks.iter().filter(|mask| *mask & subset == subset).count() as u64;
        if count > 0 && count as f64 / n >= min_support {
            let items: Vec<u32> = (0..universe).filter(|i| subset & (1 << i) != 0).collect();
            out.push((items, count));
        }
    }
    out.sort_by(|a, b| a.0.len().cmp(&b.0.len()).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Flattens mined itemsets into comparable `(items, count)` pairs.
pub fn flatten(itemsets: &[FrequentItemset<u32>]) -> Vec<(Vec<u32>, u64)> {
    itemsets
        .iter()
        .map(|f| (f.items().to_vec(), f.count()))
        .collect()
}

/// Indexes mined itemsets by their items.
pub fn by_items(itemsets: &[FrequentItemset<u32>]) -> BTreeMap<Vec<u32>, f64> {
    itemsets
        .iter()
        .map(|f| (f.items().to_vec(), f.support()))
        .collect()
}

/// A source that yields different data once it has been scanned.
pub struct ShiftingSource {
    first: Vec<Vec<u32>>,
    later: Vec<Vec<u32>>,
    scans: Cell<usize>,
}

impl ShiftingSource {
    pub fn new(first: Vec<Vec<u32>>, later: Vec<Vec<u32>>) -> Self {
        Self {
            first,
            later,
            scans: Cell::new(0),
        }
    }

    pub fn scans(&self) -> usize {
        self.scans.get()
    }
}

impl TransactionSource<u32> for ShiftingSource {
    fn scan<'a>(&'a self) -> impl Iterator<Item = &'a [u32]>
    where
        u32: 'a,
    {
        let scans = self.scans.get();
        self.scans.set(scans + 1);
        let data = if scans == 0 { &self.first } else { &self.later };
        data.iter().map(|basket| basket.as_slice())
    }
}
