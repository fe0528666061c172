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

//! Support counting.
//!
//! The support of an itemset is the fraction of transactions that contain every one of its
//! items. Counting happens in scans over a [`TransactionSource`](crate::TransactionSource):
//!
//! * [`count_items`] is the initial pass. It tallies every distinct item seen, so its result
//!   doubles as the inventory of items in the source.
//! * [`count_support`] tallies a set of candidate itemsets of equal size. Candidates are matched
//!   either exhaustively or through an index keyed by their first item
//!   ([`CountingStrategy`]); the counts are identical either way.
//!
//! Every scan owns its tally and returns it by value. Tallies over disjoint partitions of a
//! source combine with [`SupportCounts::merge`], which is why the miner can split a scan across
//! worker threads without any shared mutable state.
//!
//! # Examples
//!
//! ```
//! # use apriori::Itemset;
//! # use apriori::support::CountingStrategy;
//! # use apriori::support::count_support;
//! let baskets = vec![vec![1u32, 2, 3], vec![1, 2], vec![2, 3]];
//! let candidates = vec![Itemset::new([1, 2]), Itemset::new([1, 3])];
//! let counts = count_support(candidates, &baskets, CountingStrategy::Indexed).unwrap();
//! assert_eq!(counts.count(&[1, 2]), Some(2));
//! assert_eq!(counts.count(&[1, 3]), Some(1));
//! ```

mod counter;
mod counts;

pub use self::counter::CountingStrategy;
pub use self::counter::count_items;
pub use self::counter::count_support;
pub use self::counts::FrequentItemset;
pub use self::counts::SupportCounts;

pub(crate) use self::counter::ScanOptions;
pub(crate) use self::counter::count_level;
pub(crate) use self::counter::initial_pass;
