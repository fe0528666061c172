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

//! Level-wise frequent itemset mining.
//!
//! # Overview
//!
//! The miner runs the classic Apriori loop:
//!
//! 1. An initial pass counts every item and keeps those meeting the minimum support.
//! 2. The frequent itemsets of size `k` produce the candidates of size `k + 1`
//!    ([`generate_candidates`](crate::generate_candidates)).
//! 3. A counting pass measures the support of every candidate; survivors become the frequent
//!    itemsets of size `k + 1`.
//!
//! Steps 2 and 3 repeat until a level has no candidates or no survivors. The source is scanned
//! once per level and must yield the same transactions every time; a later scan that differs
//! from the initial pass aborts the run with
//! [`ErrorKind::SourceExhaustionMismatch`](crate::ErrorKind::SourceExhaustionMismatch).
//!
//! An itemset is frequent when `count / transactions >= min_support`. Thresholds are accepted
//! in `(0, 1]`.
//!
//! # Examples
//!
//! ```
//! # use apriori::Apriori;
//! # use apriori::support::CountingStrategy;
//! let baskets = vec![
//!     vec!["bread", "milk"],
//!     vec!["bread", "butter", "milk"],
//!     vec!["butter", "milk"],
//!     vec!["bread", "butter"],
//! ];
//! let miner = Apriori::builder()
//!     .min_support(0.5)
//!     .counting(CountingStrategy::Naive)
//!     .build()
//!     .unwrap();
//! let result = miner.mine(&baskets).unwrap();
//! assert_eq!(result.num_transactions(), 4);
//! assert_eq!(result.get(&["bread", "milk"]).unwrap().count(), 2);
//! assert!(!result.contains(&["bread", "butter", "milk"]));
//! ```

mod engine;
mod result;

pub use self::engine::Apriori;
pub use self::engine::AprioriBuilder;
pub use self::engine::DEFAULT_MIN_SUPPORT;
pub use self::engine::mine;
pub use self::result::LevelStats;
pub use self::result::MiningResult;
pub use self::result::StopReason;
