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

//! # Apriori
//!
//! Frequent itemset mining with the level-wise Apriori algorithm.
//!
//! Given a collection of transactions, each a set of items, and a minimum support threshold,
//! the miner finds every itemset contained in at least that fraction of the transactions. The
//! mined itemsets are the input to association-rule derivation (market-basket analysis), which
//! this crate leaves to the caller.
//!
//! The crate consists of:
//!
//! * [`Itemset`]: the canonical, sorted and duplicate-free representation of a set of items.
//! * [`TransactionSource`]: anything that can be scanned repeatedly for transactions.
//! * [`support`]: the counting passes that measure support.
//! * [`generate_candidates`]: the join and prune step producing the next level's candidates.
//! * [`Apriori`] and [`mine`]: the level-wise loop tying it all together.
//!
//! # Usage
//!
//! ```
//! let baskets = vec![vec![1u32, 2, 3], vec![1, 2], vec![1, 3], vec![2, 3]];
//! let itemsets = apriori::mine(&baskets, 0.5).unwrap();
//! assert_eq!(itemsets.len(), 6);
//! assert!(itemsets.iter().all(|f| f.support() >= 0.5));
//! ```
//!
//! Runs log through [`tracing`](https://docs.rs/tracing); install a subscriber to see per-level
//! progress.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod support;

mod candidate;
mod itemset;
mod miner;
mod source;

pub use self::candidate::generate_candidates;
pub use self::error::Error;
pub use self::error::ErrorKind;
pub use self::itemset::Item;
pub use self::itemset::Itemset;
pub use self::miner::Apriori;
pub use self::miner::AprioriBuilder;
pub use self::miner::DEFAULT_MIN_SUPPORT;
pub use self::miner::LevelStats;
pub use self::miner::MiningResult;
pub use self::miner::StopReason;
pub use self::miner::mine;
pub use self::source::TransactionSource;
pub use self::source::canonical_transactions;
pub use self::support::FrequentItemset;
