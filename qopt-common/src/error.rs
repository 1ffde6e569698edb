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

//! The enumerator's only error type.
//!
//! An empty candidate list is never an error: the enumerator returns
//! `Ok(vec![])` when no physical shape of a given kind applies under
//! the requested property. Recoverable analysis failures (missing or
//! failing statistics) are swallowed by the caller, which substitutes
//! a documented default and logs at debug level; they never reach this
//! type either. `Error` exists only for the third kind: a violated
//! structural invariant that makes the logical tree itself
//! untrustworthy.

/// A violated structural invariant (mismatched key-length vectors, an
/// unrecognized join type, ...). The search aborts for the statement
/// when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Catch-all for invariant violations that have no more specific
    /// variant below.
    #[error("internal error: {0}")]
    Internal(String),
    /// `JoinKeys`'s three parallel vectors did not have equal length.
    #[error("mismatched join key vectors: left={left} right={right} null_eq={null_eq}")]
    MismatchedJoinKeys {
        left: usize,
        right: usize,
        null_eq: usize,
    },
    /// A `LogicalOp::Join` carried a join type the enumerator does not
    /// recognize.
    #[error("unknown join type: {0}")]
    UnknownJoinType(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Build and return an `Err(Error::Internal(..))`, formatting its
/// arguments the way `format!` does.
#[macro_export]
macro_rules! internal_err {
    ($($arg:tt)*) => {
        Err($crate::error::Error::Internal(format!($($arg)*)))
    };
}

/// Build an `Error::Internal(..)` without wrapping it in `Err`, for
/// call sites that need to return it through another combinator.
#[macro_export]
macro_rules! internal_error {
    ($($arg:tt)*) => {
        $crate::error::Error::Internal(format!($($arg)*))
    };
}
