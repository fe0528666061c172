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

//! Error types for mining runs.

use std::fmt;

/// The kind of failure reported by [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Minimum support is not a finite value in `(0, 1]`.
    InvalidThreshold,
    /// A configuration value other than the threshold is out of range.
    InvalidArgument,
    /// A transaction holds the same item more than once.
    MalformedTransaction,
    /// The transaction source yielded different data on a later scan.
    SourceExhaustionMismatch,
}

impl ErrorKind {
    /// Returns a static string for the kind.
    pub fn into_static(self) -> &'static str {
        match self {
            ErrorKind::InvalidThreshold => "InvalidThreshold",
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::MalformedTransaction => "MalformedTransaction",
            ErrorKind::SourceExhaustionMismatch => "SourceExhaustionMismatch",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.into_static())
    }
}

/// Error returned by mining operations.
///
/// All errors are caller-input errors: nothing is retried and a failed run returns no partial
/// result.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    context: Vec<(&'static str, String)>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: vec![],
        }
    }

    /// Adds a key/value pair of context to this error.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the context value recorded under `key`, if any.
    pub fn context(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl Error {
    pub(crate) fn invalid_threshold(value: f64) -> Self {
        Self::new(
            ErrorKind::InvalidThreshold,
            format!("minimum support must be in (0, 1], got {value}"),
        )
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub(crate) fn duplicate_item(index: u64, item: impl fmt::Debug) -> Self {
        Self::new(
            ErrorKind::MalformedTransaction,
            format!("duplicate item {item:?} in transaction"),
        )
        .with_context("transaction", index)
    }

    pub(crate) fn unsorted_itemset() -> Self {
        Self::new(
            ErrorKind::MalformedTransaction,
            "itemset items are not strictly increasing",
        )
    }

    pub(crate) fn transaction_count_changed(expected: u64, actual: u64) -> Self {
        Self::new(
            ErrorKind::SourceExhaustionMismatch,
            format!("source yielded {actual} transactions, initial pass saw {expected}"),
        )
    }

    pub(crate) fn transaction_content_changed() -> Self {
        Self::new(
            ErrorKind::SourceExhaustionMismatch,
            "source yielded different transactions than the initial pass",
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if !self.context.is_empty() {
            write!(f, " (")?;
            for (i, (key, value)) in self.context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}: {value}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}
