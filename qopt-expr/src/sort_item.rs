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

//! `SortItem`: one column of a lexicographic ordering.

use qopt_common::ColumnRef;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortItem {
    pub column_ref: ColumnRef,
    pub descending: bool,
}

impl SortItem {
    pub fn asc(column_ref: ColumnRef) -> Self {
        SortItem {
            column_ref,
            descending: false,
        }
    }

    pub fn desc(column_ref: ColumnRef) -> Self {
        SortItem {
            column_ref,
            descending: true,
        }
    }

    pub fn reversed(&self) -> Self {
        SortItem {
            column_ref: self.column_ref.clone(),
            descending: !self.descending,
        }
    }
}

/// `true` iff `items` has no column appearing twice (an invariant
/// `PhysicalProperty::sort_items` must uphold).
pub fn no_duplicate_columns(items: &[SortItem]) -> bool {
    let mut seen = std::collections::HashSet::new();
    items.iter().all(|i| seen.insert(&i.column_ref))
}

/// True if every item in `items` agrees on direction; if so, returns
/// that shared direction.
pub fn all_same_order(items: &[SortItem]) -> (bool, bool) {
    match items.first() {
        None => (true, false),
        Some(first) => {
            let same = items.iter().all(|i| i.descending == first.descending);
            (same, first.descending)
        }
    }
}
