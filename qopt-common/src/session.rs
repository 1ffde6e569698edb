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

//! Read-only accessors onto session/statement configuration. The
//! enumerator is handed a `&dyn SessionContext` the same way a
//! `PhysicalOptimizerRule` is handed a `&ConfigOptions`: it promises
//! not to mutate it, and the caller promises nothing else mutates it
//! concurrently for the duration of one `enumerate` call.
///
/// `allow_cartesian_bcj` follows the source three-way switch: `0`
/// never allow, `1` allow only when explicitly hinted, `2` always
/// allow when otherwise eligible.
pub trait SessionContext {
    fn broadcast_threshold_bytes(&self) -> f64;
    fn broadcast_threshold_rows(&self) -> f64;
    fn mpp_allowed(&self) -> bool;
    fn allow_bcj(&self) -> bool;
    fn allow_cartesian_bcj(&self) -> u8;
    fn allow_distinct_agg_pushdown(&self) -> bool;
    fn mpp_outer_join_fixed_build_side(&self) -> bool;
    fn enable_index_merge_join(&self) -> bool;
    fn mem_quota_apply_cache(&self) -> u64;
    /// Cost-model scan factor (row store), used only to scale
    /// candidate row-count hints, never to rank candidates.
    fn scan_factor(&self) -> f64;
    fn concurrency_factor(&self) -> f64;
    /// Fallback selectivity used when the statistics service cannot
    /// produce an estimate (see the crate docs' "Selectivity
    /// fallback" note).
    fn selection_factor(&self) -> f64;
    fn collation_new_mode(&self) -> bool;
}

/// A plain-data `SessionContext` for tests and for embedding callers
/// that don't yet have a real session object.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub broadcast_threshold_bytes: f64,
    pub broadcast_threshold_rows: f64,
    pub mpp_allowed: bool,
    pub allow_bcj: bool,
    pub allow_cartesian_bcj: u8,
    pub allow_distinct_agg_pushdown: bool,
    pub mpp_outer_join_fixed_build_side: bool,
    pub enable_index_merge_join: bool,
    pub mem_quota_apply_cache: u64,
    pub scan_factor: f64,
    pub concurrency_factor: f64,
    pub selection_factor: f64,
    pub collation_new_mode: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            broadcast_threshold_bytes: 100.0 * 1024.0 * 1024.0,
            broadcast_threshold_rows: 10_000_000.0,
            mpp_allowed: false,
            allow_bcj: true,
            allow_cartesian_bcj: 1,
            allow_distinct_agg_pushdown: true,
            mpp_outer_join_fixed_build_side: false,
            enable_index_merge_join: true,
            mem_quota_apply_cache: 32 << 20,
            scan_factor: 1.5,
            concurrency_factor: 3.0,
            selection_factor: 0.8,
            collation_new_mode: true,
        }
    }
}

impl SessionContext for SessionConfig {
    fn broadcast_threshold_bytes(&self) -> f64 {
        self.broadcast_threshold_bytes
    }
    fn broadcast_threshold_rows(&self) -> f64 {
        self.broadcast_threshold_rows
    }
    fn mpp_allowed(&self) -> bool {
        self.mpp_allowed
    }
    fn allow_bcj(&self) -> bool {
        self.allow_bcj
    }
    fn allow_cartesian_bcj(&self) -> u8 {
        self.allow_cartesian_bcj
    }
    fn allow_distinct_agg_pushdown(&self) -> bool {
        self.allow_distinct_agg_pushdown
    }
    fn mpp_outer_join_fixed_build_side(&self) -> bool {
        self.mpp_outer_join_fixed_build_side
    }
    fn enable_index_merge_join(&self) -> bool {
        self.enable_index_merge_join
    }
    fn mem_quota_apply_cache(&self) -> u64 {
        self.mem_quota_apply_cache
    }
    fn scan_factor(&self) -> f64 {
        self.scan_factor
    }
    fn concurrency_factor(&self) -> f64 {
        self.concurrency_factor
    }
    fn selection_factor(&self) -> f64 {
        self.selection_factor
    }
    fn collation_new_mode(&self) -> bool {
        self.collation_new_mode
    }
}
