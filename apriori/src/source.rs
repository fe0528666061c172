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

//! Transaction sources and per-scan bookkeeping.
//!
//! The engine scans its source once for the initial pass and once per later level. A source
//! must therefore yield the same transactions, in the same order, on every call to
//! [`TransactionSource::scan`]. Scans never mutate the source.

use std::hash::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use crate::error::Error;
use crate::itemset::Item;
use crate::itemset::Itemset;
use crate::itemset::is_strictly_increasing;

/// A finite, repeatable sequence of transactions over items of type `T`.
///
/// Transactions need not be sorted. Each scan canonicalizes them into a scratch buffer; a
/// transaction naming the same item twice is rejected as malformed.
///
/// # Examples
///
/// ```
/// # use apriori::TransactionSource;
/// let baskets = vec![vec![1u32, 2], vec![2, 3]];
/// assert_eq!(baskets.scan().count(), 2);
/// ```
pub trait TransactionSource<T> {
    /// Returns an iterator over every transaction, in a stable order.
    fn scan<'a>(&'a self) -> impl Iterator<Item = &'a [T]>
    where
        T: 'a;
}

impl<T, X: AsRef<[T]>> TransactionSource<T> for [X] {
    fn scan<'a>(&'a self) -> impl Iterator<Item = &'a [T]>
    where
        T: 'a,
    {
        self.iter().map(|transaction| transaction.as_ref())
    }
}

impl<T, X: AsRef<[T]>> TransactionSource<T> for Vec<X> {
    fn scan<'a>(&'a self) -> impl Iterator<Item = &'a [T]>
    where
        T: 'a,
    {
        self.as_slice().scan()
    }
}

impl<T, X: AsRef<[T]>, const N: usize> TransactionSource<T> for [X; N] {
    fn scan<'a>(&'a self) -> impl Iterator<Item = &'a [T]>
    where
        T: 'a,
    {
        self.as_slice().scan()
    }
}

impl<T, S: TransactionSource<T> + ?Sized> TransactionSource<T> for &S {
    fn scan<'a>(&'a self) -> impl Iterator<Item = &'a [T]>
    where
        T: 'a,
    {
        (**self).scan()
    }
}

/// Reusable buffer that turns raw transactions into sorted, duplicate-free slices.
#[derive(Debug)]
pub(crate) struct Canonicalizer<T> {
    scratch: Vec<T>,
}

impl<T: Item> Canonicalizer<T> {
    pub fn new() -> Self {
        Self { scratch: vec![] }
    }

    /// Returns `raw` in canonical order, borrowing it directly when already canonical.
    pub fn canonical<'a>(&'a mut self, index: u64, raw: &'a [T]) -> Result<&'a [T], Error> {
        if is_strictly_increasing(raw) {
            return Ok(raw);
        }
        self.scratch.clear();
        self.scratch.extend_from_slice(raw);
        self.scratch.sort_unstable();
        if let Some(pair) = self.scratch.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(Error::duplicate_item(index, &pair[0]));
        }
        Ok(&self.scratch)
    }
}

/// Order-sensitive fingerprint of everything a scan observed.
///
/// Every transaction is fed, length-prefixed and in scan order, into a single hasher per scan.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScanDigest {
    transactions: u64,
    hasher: DefaultHasher,
}

impl ScanDigest {
    pub fn observe<T: Hash>(&mut self, raw: &[T]) {
        // slice hashing writes the length before the items
        raw.hash(&mut self.hasher);
        self.transactions += 1;
    }

    pub fn fingerprint(&self) -> u64 {
        let mut hasher = self.hasher.clone();
        hasher.write_u64(self.transactions);
        hasher.finish()
    }

    pub fn transactions(&self) -> u64 {
        self.transactions
    }

    /// Checks a later scan against the initial one.
    pub fn ensure_matches(&self, later: &ScanDigest) -> Result<(), Error> {
        if self.transactions != later.transactions {
            return Err(Error::transaction_count_changed(
                self.transactions,
                later.transactions,
            ));
        }
        if self.fingerprint() != later.fingerprint() {
            return Err(Error::transaction_content_changed());
        }
        Ok(())
    }
}

impl PartialEq for ScanDigest {
    fn eq(&self, other: &Self) -> bool {
        self.transactions == other.transactions && self.fingerprint() == other.fingerprint()
    }
}

impl Eq for ScanDigest {}

/// Collects canonical copies of every transaction in `source`.
///
/// Useful for callers that want to validate a source once up front.
pub fn canonical_transactions<T: Item, S: TransactionSource<T> + ?Sized>(
    source: &S,
) -> Result<Vec<Itemset<T>>, Error> {
    let mut canonicalizer = Canonicalizer::new();
    let mut out = vec![];
    for (index, raw) in source.scan().enumerate() {
        let items = canonicalizer.canonical(index as u64, raw)?;
        out.push(Itemset::try_from_sorted(items.to_vec())?);
    }
    Ok(out)
}
