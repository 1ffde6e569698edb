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

//! `AccessPath`: the inner-side description an index-join candidate is
//! built from.

use qopt_common::schema::StoreEngine;
use qopt_common::ColumnRef;

#[derive(Debug, Clone)]
pub struct AccessPath {
    pub is_table_path: bool,
    pub is_common_handle_path: bool,
    pub index_columns: Vec<ColumnRef>,
    /// Prefix length for each index column, `None` when the column is
    /// indexed in full (the "not a prefix column" case `4.3.3` cares
    /// about when deciding whether merge-join order survives).
    pub index_column_prefix_lengths: Vec<Option<usize>>,
    /// The columns of the underlying table/index beyond what's usable
    /// for range construction, kept so callers can recover the full
    /// shape (e.g. to decide common-handle PK coverage).
    pub full_index_columns: Vec<ColumnRef>,
    pub store_engine: StoreEngine,
}

impl AccessPath {
    pub fn table_path(store_engine: StoreEngine) -> Self {
        AccessPath {
            is_table_path: true,
            is_common_handle_path: false,
            index_columns: Vec::new(),
            index_column_prefix_lengths: Vec::new(),
            full_index_columns: Vec::new(),
            store_engine,
        }
    }

    pub fn index_path(
        index_columns: Vec<ColumnRef>,
        index_column_prefix_lengths: Vec<Option<usize>>,
        store_engine: StoreEngine,
    ) -> Self {
        let full_index_columns = index_columns.clone();
        AccessPath {
            is_table_path: false,
            is_common_handle_path: false,
            index_columns,
            index_column_prefix_lengths,
            full_index_columns,
            store_engine,
        }
    }

    /// `true` iff any index column used as a prefix (truncated) is
    /// among `used_len` leading columns — a prefix column destroys
    /// ordering, suppressing index-merge-join per `4.3.3`.
    pub fn has_prefix_column_within(&self, used_len: usize) -> bool {
        self.index_column_prefix_lengths
            .iter()
            .take(used_len)
            .any(|p| p.is_some())
    }
}
