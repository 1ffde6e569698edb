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

//! The logical operator model: a closed tagged union with shared base
//! fields embedded by value in every variant, mirroring how
//! `datafusion`'s `ExecutionPlan` implementors each hold their own
//! `PlanProperties` rather than inheriting it.

use crate::access_path::AccessPath;
use crate::hints::HintFlags;
use qopt_common::schema::SchemaRef;
use qopt_common::{ColumnRef, Expr};
use std::sync::Arc;

/// Fields every logical operator carries, regardless of kind.
#[derive(Debug, Clone)]
pub struct BaseLogicalPlan {
    pub schema: SchemaRef,
    pub estimated_row_count: f64,
    pub block_offset: usize,
}

/// `(left_keys, right_keys, null_eq_flags)`, equal-length parallel
/// sequences describing the equi-join conditions of a `LogicalJoin`.
#[derive(Debug, Clone, Default)]
pub struct JoinKeys {
    pub left_keys: Vec<ColumnRef>,
    pub right_keys: Vec<ColumnRef>,
    pub null_eq_flags: Vec<bool>,
}

impl JoinKeys {
    pub fn len(&self) -> usize {
        self.left_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left_keys.is_empty()
    }

    pub fn is_well_formed(&self) -> bool {
        self.left_keys.len() == self.right_keys.len()
            && self.left_keys.len() == self.null_eq_flags.len()
    }

    pub fn has_null_safe_eq(&self) -> bool {
        self.null_eq_flags.iter().any(|b| *b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    LeftOuter,
    RightOuter,
    SemiJoin,
    AntiSemiJoin,
    LeftOuterSemiJoin,
    AntiLeftOuterSemiJoin,
}

impl JoinType {
    pub fn is_outer(&self) -> bool {
        matches!(self, JoinType::LeftOuter | JoinType::RightOuter)
    }

    pub fn is_semi_family(&self) -> bool {
        matches!(
            self,
            JoinType::SemiJoin
                | JoinType::AntiSemiJoin
                | JoinType::LeftOuterSemiJoin
                | JoinType::AntiLeftOuterSemiJoin
        )
    }

    /// `true` for inner and anti-semi, which always build on the right
    /// per the MPP build-side policy in `4.3.1`.
    pub fn always_builds_right(&self) -> bool {
        matches!(self, JoinType::AntiSemiJoin)
    }

    /// The side that must never be the build side for an outer join
    /// (the null-producing side stays the probe side when there are
    /// other-conditions), `None` for non-outer types.
    pub fn preserved_side(&self) -> Option<JoinSide> {
        match self {
            JoinType::LeftOuter => Some(JoinSide::Left),
            JoinType::RightOuter => Some(JoinSide::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinSide {
    Left,
    Right,
}

impl JoinSide {
    pub fn other(self) -> JoinSide {
        match self {
            JoinSide::Left => JoinSide::Right,
            JoinSide::Right => JoinSide::Left,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogicalJoin {
    pub join_type: JoinType,
    pub keys: JoinKeys,
    pub left_conds: Vec<Expr>,
    pub right_conds: Vec<Expr>,
    pub other_conds: Vec<Expr>,
    pub hints: HintFlags,
    pub left: Arc<LogicalOp>,
    pub right: Arc<LogicalOp>,
    /// `true` when either child is a `UnionScan`/partitioned
    /// relation, used by the cartesian-broadcast and partition-table
    /// restrictions in `4.3.1`.
    pub left_is_partitioned: bool,
    pub right_is_partitioned: bool,
}

/// The decorrelated-subquery join the original calls `LogicalApply`:
/// same shape as a join, but physicalized only as index-join/nested
/// loop since the right side is re-evaluated per left row.
#[derive(Debug, Clone)]
pub struct LogicalApply {
    pub join_type: JoinType,
    pub keys: JoinKeys,
    pub other_conds: Vec<Expr>,
    pub left: Arc<LogicalOp>,
    pub right: Arc<LogicalOp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggFuncKind {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    FirstRow,
}

#[derive(Debug, Clone)]
pub struct AggFuncDesc {
    pub kind: AggFuncKind,
    pub args: Vec<Expr>,
    pub distinct: bool,
}

#[derive(Debug, Clone)]
pub struct LogicalAgg {
    pub group_by: Vec<Expr>,
    pub agg_funcs: Vec<AggFuncDesc>,
    pub hints: HintFlags,
    pub child: Arc<LogicalOp>,
}

#[derive(Debug, Clone)]
pub struct LogicalTopN {
    pub by_items: Vec<qopt_expr::SortItem>,
    pub offset: usize,
    pub count: usize,
    pub child: Arc<LogicalOp>,
}

#[derive(Debug, Clone)]
pub struct LogicalLimit {
    pub offset: usize,
    pub count: usize,
    pub hints: HintFlags,
    pub child: Arc<LogicalOp>,
}

#[derive(Debug, Clone)]
pub struct LogicalProjection {
    pub exprs: Vec<Expr>,
    pub child: Arc<LogicalOp>,
}

#[derive(Debug, Clone)]
pub struct LogicalSort {
    pub by_items: Vec<qopt_expr::SortItem>,
    pub child: Arc<LogicalOp>,
}

#[derive(Debug, Clone)]
pub struct LogicalUnionAll {
    pub children: Vec<Arc<LogicalOp>>,
}

#[derive(Debug, Clone)]
pub struct LogicalUnionScan {
    pub conditions: Vec<Expr>,
    pub child: Arc<LogicalOp>,
}

#[derive(Debug, Clone)]
pub struct LogicalWindow {
    pub partition_by: Vec<ColumnRef>,
    pub order_by: Vec<qopt_expr::SortItem>,
    pub child: Arc<LogicalOp>,
}

#[derive(Debug, Clone)]
pub struct LogicalLock {
    pub child: Arc<LogicalOp>,
}

#[derive(Debug, Clone)]
pub struct LogicalMaxOneRow {
    pub child: Arc<LogicalOp>,
}

#[derive(Debug, Clone)]
pub struct LogicalSelection {
    pub conditions: Vec<Expr>,
    pub child: Arc<LogicalOp>,
}

#[derive(Debug, Clone)]
pub struct LogicalDual;

#[derive(Debug, Clone)]
pub struct LogicalDataSource {
    pub access_paths: Vec<AccessPath>,
    pub is_partitioned: bool,
}

/// The closed union of logical operator kinds. `PhysicalOp` in
/// `physical.rs` mirrors this shape one-for-one.
#[derive(Debug, Clone)]
pub enum LogicalOpKind {
    Join(LogicalJoin),
    Apply(LogicalApply),
    Agg(LogicalAgg),
    TopN(LogicalTopN),
    Limit(LogicalLimit),
    Projection(LogicalProjection),
    Sort(LogicalSort),
    UnionAll(LogicalUnionAll),
    UnionScan(LogicalUnionScan),
    Window(LogicalWindow),
    Lock(LogicalLock),
    MaxOneRow(LogicalMaxOneRow),
    Selection(LogicalSelection),
    Dual(LogicalDual),
    DataSource(LogicalDataSource),
}

#[derive(Debug, Clone)]
pub struct LogicalOp {
    pub base: BaseLogicalPlan,
    pub kind: LogicalOpKind,
}

impl LogicalOp {
    pub fn children(&self) -> Vec<&LogicalOp> {
        match &self.kind {
            LogicalOpKind::Join(j) => vec![j.left.as_ref(), j.right.as_ref()],
            LogicalOpKind::Apply(a) => vec![a.left.as_ref(), a.right.as_ref()],
            LogicalOpKind::Agg(a) => vec![a.child.as_ref()],
            LogicalOpKind::TopN(t) => vec![t.child.as_ref()],
            LogicalOpKind::Limit(l) => vec![l.child.as_ref()],
            LogicalOpKind::Projection(p) => vec![p.child.as_ref()],
            LogicalOpKind::Sort(s) => vec![s.child.as_ref()],
            LogicalOpKind::UnionAll(u) => u.children.iter().map(|c| c.as_ref()).collect(),
            LogicalOpKind::UnionScan(u) => vec![u.child.as_ref()],
            LogicalOpKind::Window(w) => vec![w.child.as_ref()],
            LogicalOpKind::Lock(l) => vec![l.child.as_ref()],
            LogicalOpKind::MaxOneRow(m) => vec![m.child.as_ref()],
            LogicalOpKind::Selection(s) => vec![s.child.as_ref()],
            LogicalOpKind::Dual(_) | LogicalOpKind::DataSource(_) => vec![],
        }
    }

    /// `true` iff a `UnionScan` appears anywhere strictly below this
    /// node, used to decide whether the index-join inner plan needs a
    /// union-scan overlay wrapped around it (`4.3.3`).
    pub fn contains_union_scan(&self) -> bool {
        match &self.kind {
            LogicalOpKind::UnionScan(_) => true,
            _ => self.children().iter().any(|c| c.contains_union_scan()),
        }
    }
}
