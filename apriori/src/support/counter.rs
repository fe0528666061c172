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

//! Transaction scans that tally single items and candidate itemsets.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::thread;

use crate::error::Error;
use crate::itemset::Item;
use crate::itemset::Itemset;
use crate::itemset::is_sorted_subset;
use crate::source::Canonicalizer;
use crate::source::ScanDigest;
use crate::source::TransactionSource;
use crate::support::counts::SupportCounts;
use crate::support::counts::add_counts;

/// How candidates are matched against each transaction.
///
/// Both strategies produce identical counts; they differ only in cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountingStrategy {
    /// Test every candidate against every transaction.
    Naive,
    /// Index candidates by their first item and test only those whose first item occurs in
    /// the transaction.
    #[default]
    Indexed,
}

/// Scan parameters for a support-counting pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScanOptions {
    pub strategy: CountingStrategy,
    pub threads: NonZeroUsize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            strategy: CountingStrategy::default(),
            threads: NonZeroUsize::MIN,
        }
    }
}

/// Counts, for every distinct item, the transactions containing it.
///
/// The result holds one single-item candidate per distinct item seen, sorted by item.
pub fn count_items<T: Item, S: TransactionSource<T> + ?Sized>(
    source: &S,
) -> Result<SupportCounts<T>, Error> {
    initial_pass(source).map(|(counts, _)| counts)
}

/// Counts, for every candidate, the transactions that are a superset of it.
///
/// The result covers every candidate exactly once, in the order given, including those with a
/// count of zero.
pub fn count_support<T: Item, S: TransactionSource<T> + ?Sized>(
    candidates: Vec<Itemset<T>>,
    source: &S,
    strategy: CountingStrategy,
) -> Result<SupportCounts<T>, Error> {
    let options = ScanOptions {
        strategy,
        ..ScanOptions::default()
    };
    count_level(candidates, source, options).map(|(counts, _)| counts)
}

pub(crate) fn initial_pass<T: Item, S: TransactionSource<T> + ?Sized>(
    source: &S,
) -> Result<(SupportCounts<T>, ScanDigest), Error> {
    let mut digest = ScanDigest::default();
    let mut canonicalizer = Canonicalizer::new();
    let mut tally: HashMap<T, u64> = HashMap::new();
    for (index, raw) in source.scan().enumerate() {
        digest.observe(raw);
        let transaction = canonicalizer.canonical(index as u64, raw)?;
        for item in transaction {
            match tally.get_mut(item) {
                Some(count) => *count += 1,
                None => {
                    tally.insert(item.clone(), 1);
                }
            }
        }
    }

    let mut items: Vec<(T, u64)> = tally.into_iter().collect();
    items.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    let (candidates, counts): (Vec<_>, Vec<_>) = items
        .into_iter()
        .map(|(item, count)| (Itemset::singleton(item), count))
        .unzip();
    let counts = SupportCounts::from_parts(candidates, counts, digest.transactions());
    Ok((counts, digest))
}

pub(crate) fn count_level<T: Item, S: TransactionSource<T> + ?Sized>(
    candidates: Vec<Itemset<T>>,
    source: &S,
    options: ScanOptions,
) -> Result<(SupportCounts<T>, ScanDigest), Error> {
    let matcher = Matcher::new(&candidates, options.strategy);
    let (counts, digest) = if options.threads.get() > 1 {
        scan_partitioned(&matcher, source, options.threads)?
    } else {
        scan_sequential(&matcher, source)?
    };
    let counts = SupportCounts::from_parts(candidates, counts, digest.transactions());
    Ok((counts, digest))
}

fn scan_sequential<T: Item, S: TransactionSource<T> + ?Sized>(
    matcher: &Matcher<'_, T>,
    source: &S,
) -> Result<(Vec<u64>, ScanDigest), Error> {
    let mut digest = ScanDigest::default();
    let mut canonicalizer = Canonicalizer::new();
    let mut counts = vec![0; matcher.len()];
    for (index, raw) in source.scan().enumerate() {
        digest.observe(raw);
        let transaction = canonicalizer.canonical(index as u64, raw)?;
        matcher.tally(transaction, &mut counts);
    }
    Ok((counts, digest))
}

/// Splits the transactions into contiguous chunks, tallies each on its own worker and sums the
/// partial counts. Reports the malformed transaction with the lowest index, like a sequential
/// scan would.
fn scan_partitioned<T: Item, S: TransactionSource<T> + ?Sized>(
    matcher: &Matcher<'_, T>,
    source: &S,
    threads: NonZeroUsize,
) -> Result<(Vec<u64>, ScanDigest), Error> {
    let mut digest = ScanDigest::default();
    let transactions: Vec<&[T]> = source.scan().inspect(|raw| digest.observe(*raw)).collect();
    let chunk_len = transactions.len().div_ceil(threads.get()).max(1);

    let partials: Vec<Result<Vec<u64>, Error>> = thread::scope(|scope| {
        let handles: Vec<_> = transactions
            .chunks(chunk_len)
            .enumerate()
            .map(|(chunk_index, chunk)| {
                let first_index = (chunk_index * chunk_len) as u64;
                scope.spawn(move || tally_chunk(matcher, chunk, first_index))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
            .collect()
    });

    let mut counts = vec![0; matcher.len()];
    for partial in partials {
        add_counts(&mut counts, &partial?);
    }
    Ok((counts, digest))
}

fn tally_chunk<T: Item>(
    matcher: &Matcher<'_, T>,
    chunk: &[&[T]],
    first_index: u64,
) -> Result<Vec<u64>, Error> {
    let mut canonicalizer = Canonicalizer::new();
    let mut counts = vec![0; matcher.len()];
    for (offset, raw) in chunk.iter().copied().enumerate() {
        let transaction = canonicalizer.canonical(first_index + offset as u64, raw)?;
        matcher.tally(transaction, &mut counts);
    }
    Ok(counts)
}

/// Read-only candidate lookup shared by every worker of a scan.
#[derive(Debug)]
enum Matcher<'c, T> {
    Naive {
        candidates: &'c [Itemset<T>],
    },
    Indexed {
        candidates: &'c [Itemset<T>],
        by_first: HashMap<&'c T, Vec<usize>>,
        // empty candidates are contained in every transaction
        unanchored: Vec<usize>,
    },
}

impl<'c, T: Item> Matcher<'c, T> {
    fn new(candidates: &'c [Itemset<T>], strategy: CountingStrategy) -> Self {
        match strategy {
            CountingStrategy::Naive => Matcher::Naive { candidates },
            CountingStrategy::Indexed => {
                let mut by_first: HashMap<&'c T, Vec<usize>> = HashMap::new();
                let mut unanchored = vec![];
                for (i, candidate) in candidates.iter().enumerate() {
                    match candidate.as_slice().first() {
                        Some(first) => by_first.entry(first).or_default().push(i),
                        None => unanchored.push(i),
                    }
                }
                Matcher::Indexed {
                    candidates,
                    by_first,
                    unanchored,
                }
            }
        }
    }

    fn len(&self) -> usize {
        match self {
            Matcher::Naive { candidates } | Matcher::Indexed { candidates, .. } => {
                candidates.len()
            }
        }
    }

    /// Adds one to the count of every candidate contained in `transaction`, which must be
    /// canonical.
    fn tally(&self, transaction: &[T], counts: &mut [u64]) {
        match self {
            Matcher::Naive { candidates } => {
                for (i, candidate) in candidates.iter().enumerate() {
                    if candidate.is_subset_of(transaction) {
                        counts[i] += 1;
                    }
                }
            }
            Matcher::Indexed {
                candidates,
                by_first,
                unanchored,
            } => {
                for &i in unanchored {
                    counts[i] += 1;
                }
                for (pos, item) in transaction.iter().enumerate() {
                    let Some(ids) = by_first.get(item) else {
                        continue;
                    };
                    let rest = &transaction[pos + 1..];
                    for &i in ids {
                        if is_sorted_subset(&candidates[i].as_slice()[1..], rest) {
                            counts[i] += 1;
                        }
                    }
                }
            }
        }
    }
}
