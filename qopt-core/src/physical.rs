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

//! The physical operator model: one variant per executable shape the
//! dispatcher can hand back to the search driver. Mirrors
//! `logical::LogicalOpKind` one-for-one.

use crate::access_path::AccessPath;
use crate::logical::{JoinKeys, JoinSide, JoinType};
use qopt_common::schema::SchemaRef;
use qopt_common::{ColumnRef, Expr};
use qopt_expr::SortItem;

#[derive(Debug, Clone)]
pub struct BasePhysicalPlan {
    pub schema: SchemaRef,
    pub block_offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinAlgorithm {
    HashJoin,
    MergeJoin { enforced: bool },
    IndexJoin,
    IndexHashJoin,
    IndexMergeJoin,
    BroadcastJoin,
    MppHashJoin,
    NestedLoopJoin,
}

#[derive(Debug, Clone)]
pub struct PhysJoin {
    pub algorithm: JoinAlgorithm,
    pub join_type: JoinType,
    pub keys: JoinKeys,
    pub other_conds: Vec<Expr>,
    pub build_side: JoinSide,
    pub inner_access_path: Option<AccessPath>,
    /// Index→outer-key mapping for index-join variants, parallel to
    /// the inner access path's index columns; `None` where unmatched.
    pub key_off_to_idx_off: Vec<Option<usize>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggMode {
    Complete,
    Partial,
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggStrategy {
    Stream,
    Hash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MppAggRunMode {
    OnePhase,
    TwoPhase,
    TidbPhase,
    Scalar,
}

#[derive(Debug, Clone)]
pub struct PhysAgg {
    pub strategy: AggStrategy,
    pub mode: AggMode,
    pub mpp_run_mode: Option<MppAggRunMode>,
}

#[derive(Debug, Clone)]
pub struct PhysTopN {
    pub by_items: Vec<SortItem>,
    pub offset: usize,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct PhysLimit {
    pub offset: usize,
    pub count: usize,
    /// When `true`, this `Limit` preserves the order its required
    /// property asked for rather than materializing a `TopN` — the
    /// variant `4.5` describes alongside `PhysTopN`.
    pub preserves_order: bool,
}

#[derive(Debug, Clone)]
pub struct PhysSort {
    pub by_items: Vec<SortItem>,
    /// `true` for a "nominal" sort: a zero-cost marker that the child
    /// already provides the requested order, per `4.5`.
    pub is_nominal: bool,
}

#[derive(Debug, Clone)]
pub struct PhysProjection {
    pub exprs: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct PhysUnionAll {
    pub is_mpp: bool,
}

#[derive(Debug, Clone)]
pub struct PhysUnionScan {
    pub conditions: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct PhysWindow {
    pub partition_by: Vec<ColumnRef>,
    pub order_by: Vec<SortItem>,
}

#[derive(Debug, Clone)]
pub struct PhysLock;

#[derive(Debug, Clone)]
pub struct PhysMaxOneRow;

#[derive(Debug, Clone)]
pub struct PhysSelection {
    pub conditions: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct PhysTableScan {
    pub access_path: AccessPath,
}

#[derive(Debug, Clone)]
pub struct PhysIndexScan {
    pub access_path: AccessPath,
}

#[derive(Debug, Clone)]
pub struct PhysDual;

#[derive(Debug, Clone)]
pub enum PhysicalOpKind {
    Join(PhysJoin),
    Agg(PhysAgg),
    TopN(PhysTopN),
    Limit(PhysLimit),
    Projection(PhysProjection),
    Sort(PhysSort),
    UnionAll(PhysUnionAll),
    UnionScan(PhysUnionScan),
    Window(PhysWindow),
    Lock(PhysLock),
    MaxOneRow(PhysMaxOneRow),
    Selection(PhysSelection),
    TableScan(PhysTableScan),
    IndexScan(PhysIndexScan),
    Dual(PhysDual),
}

#[derive(Debug, Clone)]
pub struct PhysicalOp {
    pub base: BasePhysicalPlan,
    pub kind: PhysicalOpKind,
    /// Physical operators produced as children of the one returned to
    /// the search driver (e.g. the inner scan of an index join, or a
    /// wrapping residual `Selection`), held so the candidate is a
    /// self-contained tree rather than requiring the caller to thread
    /// them back in.
    pub children: Vec<PhysicalOp>,
}

impl PhysicalOp {
    pub fn leaf(base: BasePhysicalPlan, kind: PhysicalOpKind) -> Self {
        PhysicalOp {
            base,
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(base: BasePhysicalPlan, kind: PhysicalOpKind, children: Vec<PhysicalOp>) -> Self {
        PhysicalOp {
            base,
            kind,
            children,
        }
    }

    /// Wraps `self` in a residual `Selection` iff `conditions` is
    /// non-empty, matching `constructInnerTableScanTask`/
    /// `constructInnerIndexScanTask`'s handling of `chosenRemained`.
    pub fn with_residual_selection(self, conditions: Vec<Expr>) -> Self {
        if conditions.is_empty() {
            return self;
        }
        let base = self.base.clone();
        PhysicalOp::with_children(base, PhysicalOpKind::Selection(PhysSelection { conditions }), vec![self])
    }
}
