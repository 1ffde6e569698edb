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

//! Column-level ranges, the unit the index-join build helper and the
//! expression service exchange.

use crate::value::ScalarValue;

/// One bound of a `ColumnRange`. `Placeholder` stands in for a value
/// that is only known once an outer row is produced at execution time
/// (an index-join join-key position); `Open` means unbounded on that
/// side.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeBound {
    Open,
    Placeholder,
    Literal(ScalarValue),
}

/// A half-open or closed range on a single column, plus whether each
/// end is inclusive. `is_point()` is true for the common equality /
/// IN-list case.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRange {
    pub low: RangeBound,
    pub low_inclusive: bool,
    pub high: RangeBound,
    pub high_inclusive: bool,
}

impl ColumnRange {
    pub fn point_placeholder() -> Self {
        ColumnRange {
            low: RangeBound::Placeholder,
            low_inclusive: true,
            high: RangeBound::Placeholder,
            high_inclusive: true,
        }
    }

    pub fn point_literal(v: ScalarValue) -> Self {
        ColumnRange {
            low: RangeBound::Literal(v.clone()),
            low_inclusive: true,
            high: RangeBound::Literal(v),
            high_inclusive: true,
        }
    }

    pub fn full() -> Self {
        ColumnRange {
            low: RangeBound::Open,
            low_inclusive: true,
            high: RangeBound::Open,
            high_inclusive: true,
        }
    }

    pub fn is_point(&self) -> bool {
        matches!(
            (&self.low, &self.high),
            (RangeBound::Placeholder, RangeBound::Placeholder)
        ) || matches!(
            (&self.low, &self.high),
            (RangeBound::Literal(a), RangeBound::Literal(b)) if a == b
        )
    }

    /// `true` iff a concrete literal range is statically known to be
    /// empty, e.g. `x > 10 AND x < 10`. Placeholder bounds are never
    /// statically empty since their value isn't known yet.
    pub fn is_statically_empty(&self) -> bool {
        if let (RangeBound::Literal(lo), RangeBound::Literal(hi)) = (&self.low, &self.high) {
            match lo.partial_cmp(hi) {
                Some(std::cmp::Ordering::Greater) => true,
                Some(std::cmp::Ordering::Equal) => !(self.low_inclusive && self.high_inclusive),
                _ => false,
            }
        } else {
            false
        }
    }
}
