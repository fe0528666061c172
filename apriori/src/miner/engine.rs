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

//! The level-wise mining loop and its configuration.

use std::num::NonZeroUsize;
use std::ops::ControlFlow;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::candidate::generate_candidates;
use crate::error::Error;
use crate::itemset::Item;
use crate::itemset::Itemset;
use crate::miner::result::LevelStats;
use crate::miner::result::MiningResult;
use crate::miner::result::StopReason;
use crate::source::ScanDigest;
use crate::source::TransactionSource;
use crate::support::CountingStrategy;
use crate::support::FrequentItemset;
use crate::support::ScanOptions;
use crate::support::count_level;
use crate::support::initial_pass;

/// Minimum support used when the builder is not given one.
pub const DEFAULT_MIN_SUPPORT: f64 = 0.5;

/// Configured Apriori miner.
///
/// A miner holds only its configuration; every call to [`Apriori::mine`] is an independent run
/// with its own state, so one miner can be shared freely.
#[derive(Debug, Clone)]
pub struct Apriori {
    min_support: f64,
    max_len: Option<NonZeroUsize>,
    counting: CountingStrategy,
    threads: NonZeroUsize,
}

impl Apriori {
    /// Creates a miner with the given minimum support and default settings otherwise.
    ///
    /// Returns an [`ErrorKind::InvalidThreshold`](crate::ErrorKind::InvalidThreshold) error if
    /// `min_support` is not in `(0, 1]`.
    pub fn new(min_support: f64) -> Result<Self, Error> {
        Self::builder().min_support(min_support).build()
    }

    /// Creates a new builder.
    pub fn builder() -> AprioriBuilder {
        AprioriBuilder::default()
    }

    /// Returns the minimum support.
    pub fn min_support(&self) -> f64 {
        self.min_support
    }

    /// Returns the maximum itemset size, if capped.
    pub fn max_len(&self) -> Option<usize> {
        self.max_len.map(NonZeroUsize::get)
    }

    /// Returns the counting strategy.
    pub fn counting(&self) -> CountingStrategy {
        self.counting
    }

    /// Returns the number of worker threads used per counting scan.
    pub fn threads(&self) -> usize {
        self.threads.get()
    }

    /// Mines every frequent itemset in `source`.
    pub fn mine<T: Item, S: TransactionSource<T> + ?Sized>(
        &self,
        source: &S,
    ) -> Result<MiningResult<T>, Error> {
        self.mine_until(source, |_| ControlFlow::Continue(()))
    }

    /// Mines frequent itemsets, consulting `on_level` after every level that produced
    /// frequent itemsets.
    ///
    /// Returning [`ControlFlow::Break`] ends the run after that level; the itemsets found so
    /// far are returned with [`StopReason::Interrupted`]. This is how a caller layers a
    /// deadline or a size budget over a long run.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::ops::ControlFlow;
    /// # use apriori::Apriori;
    /// # use apriori::StopReason;
    /// let baskets = vec![vec![1u32, 2, 3], vec![1, 2], vec![1, 3], vec![2, 3]];
    /// let miner = Apriori::new(0.5).unwrap();
    /// let result = miner.mine_until(&baskets, |_| ControlFlow::Break(())).unwrap();
    /// assert_eq!(result.stop_reason(), StopReason::Interrupted);
    /// assert_eq!(result.len(), 3);
    /// ```
    pub fn mine_until<T, S, F>(
        &self,
        source: &S,
        mut on_level: F,
    ) -> Result<MiningResult<T>, Error>
    where
        T: Item,
        S: TransactionSource<T> + ?Sized,
        F: FnMut(&LevelStats) -> ControlFlow<()>,
    {
        let options = ScanOptions {
            strategy: self.counting,
            threads: self.threads,
        };
        let mut run = Run::default();
        let mut baseline = ScanDigest::default();
        let mut stage = Stage::Initializing;

        let stop_reason = loop {
            stage = match stage {
                Stage::Initializing => {
                    let (counts, digest) =
                        initial_pass(source).map_err(|err| err.with_context("level", 1))?;
                    baseline = digest;
                    run.num_transactions = counts.num_transactions();
                    run.distinct_items = counts.len();
                    let candidates = counts.len();
                    let frequent = counts.into_frequent(self.min_support);
                    self.complete_level(&mut run, 1, candidates, frequent, &mut on_level)
                }
                Stage::Leveling { k, frequent } => {
                    let candidates = generate_candidates(&frequent);
                    if candidates.is_empty() {
                        Stage::Done(StopReason::Exhausted)
                    } else {
                        let level = k + 1;
                        let (counts, digest) = count_level(candidates, source, options)
                            .map_err(|err| err.with_context("level", level))?;
                        if let Err(err) = baseline.ensure_matches(&digest) {
                            warn!(level, error = %err, "transaction source changed between scans");
                            return Err(err.with_context("level", level));
                        }
                        let candidates = counts.len();
                        let frequent = counts.into_frequent(self.min_support);
                        self.complete_level(&mut run, level, candidates, frequent, &mut on_level)
                    }
                }
                Stage::Done(reason) => break reason,
            };
        };

        info!(
            transactions = run.num_transactions,
            distinct_items = run.distinct_items,
            itemsets = run.itemsets.len(),
            levels = run.levels.len(),
            stop_reason = ?stop_reason,
            "apriori run finished"
        );
        Ok(MiningResult::new(
            run.itemsets,
            run.levels,
            run.num_transactions,
            run.distinct_items,
            stop_reason,
        ))
    }

    /// Records a counted level and decides what the loop does next.
    fn complete_level<T: Item, F>(
        &self,
        run: &mut Run<T>,
        level: usize,
        candidates: usize,
        frequent: Vec<FrequentItemset<T>>,
        on_level: &mut F,
    ) -> Stage<T>
    where
        F: FnMut(&LevelStats) -> ControlFlow<()>,
    {
        let stats = LevelStats::new(level, candidates, frequent.len());
        debug!(level, candidates, frequent = frequent.len(), "counted level");
        run.levels.push(stats);
        if frequent.is_empty() {
            return Stage::Done(StopReason::Exhausted);
        }

        let next: Vec<Itemset<T>> = frequent
            .iter()
            .map(|entry| entry.itemset().clone())
            .collect();
        run.itemsets.extend(frequent);

        if on_level(&stats).is_break() {
            return Stage::Done(StopReason::Interrupted);
        }
        if self.max_len.is_some_and(|max| level >= max.get()) {
            return Stage::Done(StopReason::MaxLength);
        }
        Stage::Leveling {
            k: level,
            frequent: next,
        }
    }
}

/// States of the mining loop.
enum Stage<T> {
    Initializing,
    Leveling { k: usize, frequent: Vec<Itemset<T>> },
    Done(StopReason),
}

/// Accumulated output of one run, owned by the loop.
struct Run<T> {
    itemsets: Vec<FrequentItemset<T>>,
    levels: Vec<LevelStats>,
    num_transactions: u64,
    distinct_items: usize,
}

impl<T> Default for Run<T> {
    fn default() -> Self {
        Self {
            itemsets: vec![],
            levels: vec![],
            num_transactions: 0,
            distinct_items: 0,
        }
    }
}

/// Builder for [`Apriori`].
#[derive(Debug, Clone)]
pub struct AprioriBuilder {
    min_support: f64,
    max_len: Option<usize>,
    counting: CountingStrategy,
    threads: usize,
}

impl Default for AprioriBuilder {
    fn default() -> Self {
        Self {
            min_support: DEFAULT_MIN_SUPPORT,
            max_len: None,
            counting: CountingStrategy::default(),
            threads: 1,
        }
    }
}

impl AprioriBuilder {
    /// Sets the minimum support, a fraction in `(0, 1]`.
    ///
    /// An itemset is frequent when its support is greater than or equal to this value.
    pub fn min_support(mut self, min_support: f64) -> Self {
        self.min_support = min_support;
        self
    }

    /// Caps the size of mined itemsets; the loop stops after level `max_len`.
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Sets how candidates are matched against transactions.
    pub fn counting(mut self, counting: CountingStrategy) -> Self {
        self.counting = counting;
        self
    }

    /// Sets the number of worker threads for counting scans.
    ///
    /// With more than one thread, transactions are split into contiguous chunks whose tallies
    /// are summed afterwards. Results do not depend on this setting.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Validates the settings and builds the miner.
    pub fn build(self) -> Result<Apriori, Error> {
        if !(self.min_support > 0.0 && self.min_support <= 1.0) {
            return Err(Error::invalid_threshold(self.min_support));
        }
        let max_len = match self.max_len {
            None => None,
            Some(max_len) => Some(
                NonZeroUsize::new(max_len)
                    .ok_or_else(|| Error::invalid_argument("max_len must be at least 1"))?,
            ),
        };
        let threads = NonZeroUsize::new(self.threads)
            .ok_or_else(|| Error::invalid_argument("threads must be at least 1"))?;
        Ok(Apriori {
            min_support: self.min_support,
            max_len,
            counting: self.counting,
            threads,
        })
    }
}

/// Mines every itemset of `source` whose support is at least `min_support`.
///
/// Itemsets are returned level by level, each level in lexicographic order.
///
/// # Examples
///
/// ```
/// let baskets = vec![vec![1u32, 2, 3], vec![1, 2], vec![1, 3], vec![2, 3]];
/// let itemsets = apriori::mine(&baskets, 0.5).unwrap();
/// let found: Vec<&[u32]> = itemsets.iter().map(|f| f.items()).collect();
/// assert_eq!(found, vec![&[1][..], &[2][..], &[3][..], &[1, 2][..], &[1, 3][..], &[2, 3][..]]);
/// ```
pub fn mine<T: Item, S: TransactionSource<T> + ?Sized>(
    source: &S,
    min_support: f64,
) -> Result<Vec<FrequentItemset<T>>, Error> {
    Apriori::new(min_support)?
        .mine(source)
        .map(MiningResult::into_itemsets)
}
