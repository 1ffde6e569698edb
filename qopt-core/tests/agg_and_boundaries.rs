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

//! Scenario 6 (`GROUP BY b` on `T`) plus the join boundary conditions
//! from the crate's testable properties: null-safe equality and
//! enum/set-typed keys forbid merge-join and index-join, and an
//! empty index range drops the candidate entirely.

use qopt_common::schema::StoreEngine;
use qopt_common::services::{AccessPathDescriptor, ExpressionService, StatisticsService};
use qopt_common::session::SessionConfig;
use qopt_common::diagnostics::RecordingDiagnosticsSink;
use qopt_common::{ColumnRef, Expr};
use qopt_core::access_path::AccessPath;
use qopt_core::hints::HintFlags;
use qopt_core::logical::{AggFuncDesc, AggFuncKind, JoinKeys, JoinType, LogicalAgg, LogicalDual, LogicalOp, LogicalOpKind, BaseLogicalPlan, LogicalJoin};
use qopt_core::physical::{AggStrategy, JoinAlgorithm, PhysicalOpKind};
use qopt_core::physicalize::agg::physicalize_agg;
use qopt_core::physicalize::context::EnumContext;
use qopt_core::physicalize::join::{physicalize_join, JoinChildInfo, PossibleOrders};
use qopt_expr::PhysicalProperty;
use std::sync::Arc;

struct StubExprService;
impl ExpressionService for StubExprService {
    fn collation_compatible(&self, _l: &Expr, _r: &Expr) -> bool {
        true
    }
    fn can_push_down(&self, _e: &[Expr], _t: StoreEngine) -> bool {
        false
    }
    fn build_range_from_exprs(&self, _c: &ColumnRef, _e: &[Expr]) -> Option<qopt_common::range::ColumnRange> {
        None
    }
}

struct StubStatsService;
impl StatisticsService for StubStatsService {
    fn selectivity(&self, _c: &[Expr], _a: &[AccessPathDescriptor]) -> Result<f64, String> {
        Ok(0.5)
    }
    fn cardinality(&self, _c: &[ColumnRef], _s: &qopt_common::schema::Schema) -> Result<f64, String> {
        Ok(100.0)
    }
    fn avg_row_size(&self, _s: &qopt_common::schema::Schema, _e: StoreEngine, _i: bool) -> f64 {
        8.0
    }
}

fn dual(row_count: f64) -> Arc<LogicalOp> {
    Arc::new(LogicalOp {
        base: BaseLogicalPlan {
            schema: Arc::new(arrow_schema::Schema::empty()),
            estimated_row_count: row_count,
            block_offset: 0,
        },
        kind: LogicalOpKind::Dual(LogicalDual),
    })
}

fn ctx<'a>(session: &'a SessionConfig, diag: &'a RecordingDiagnosticsSink) -> EnumContext<'a> {
    EnumContext::new(session, &StubExprService, &StubStatsService, diag)
}

/// `SELECT b, COUNT(*) FROM T GROUP BY b`: both a stream-agg candidate
/// (child required to be sorted on `b`) and a hash-agg candidate must
/// be emitted, regardless of required property.
#[test]
fn scenario_6_group_by_emits_stream_and_hash_agg() {
    let session = SessionConfig::default();
    let diag = RecordingDiagnosticsSink::new();
    let ctx = ctx(&session, &diag);

    let agg = LogicalAgg {
        group_by: vec![Expr::column("b", 1)],
        agg_funcs: vec![AggFuncDesc {
            kind: AggFuncKind::Count,
            args: vec![],
            distinct: false,
        }],
        hints: HintFlags::NONE,
        child: dual(1000.0),
    };
    let required = PhysicalProperty::empty();

    let (pairs, hint_satisfied, _warnings) = physicalize_agg(&agg, &required, &ctx);
    let strategies: Vec<_> = pairs
        .iter()
        .filter_map(|(op, _)| match &op.kind {
            PhysicalOpKind::Agg(a) => Some(a.strategy),
            _ => None,
        })
        .collect();

    assert!(strategies.contains(&AggStrategy::Stream));
    assert!(strategies.contains(&AggStrategy::Hash));
    assert!(hint_satisfied);

    let stream_child = pairs
        .iter()
        .find(|(op, _)| matches!(&op.kind, PhysicalOpKind::Agg(a) if a.strategy == AggStrategy::Stream))
        .map(|(_, props)| props[0].sort_items.clone())
        .unwrap();
    assert_eq!(stream_child.len(), 1);
    assert_eq!(stream_child[0].column_ref, ColumnRef::new("b", 1));
}

/// `prefer_hash_agg` and `prefer_stream_agg` both set: both are
/// cancelled, only hash-agg survives and the hint is reported
/// unsatisfied.
#[test]
fn conflicting_agg_hints_cancel_to_hash_only() {
    let session = SessionConfig::default();
    let diag = RecordingDiagnosticsSink::new();
    let ctx = ctx(&session, &diag);

    let agg = LogicalAgg {
        group_by: vec![Expr::column("b", 1)],
        agg_funcs: vec![],
        hints: HintFlags::PREFER_HASH_AGG.union(HintFlags::PREFER_STREAM_AGG),
        child: dual(1000.0),
    };
    let required = PhysicalProperty::empty();

    let (pairs, hint_satisfied, warnings) = physicalize_agg(&agg, &required, &ctx);
    assert!(pairs
        .iter()
        .all(|(op, _)| matches!(&op.kind, PhysicalOpKind::Agg(a) if a.strategy == AggStrategy::Hash)));
    assert!(!hint_satisfied);
    assert!(!warnings.is_empty());
}

fn u_outer() -> JoinChildInfo {
    JoinChildInfo {
        possible_orders: PossibleOrders(vec![]),
        estimated_row_count: 1000.0,
        is_partitioned: false,
        access_paths: vec![AccessPath::table_path(StoreEngine::RowStore)],
    }
}

fn t_with_pk_index() -> JoinChildInfo {
    JoinChildInfo {
        possible_orders: PossibleOrders(vec![]),
        estimated_row_count: 1000.0,
        is_partitioned: false,
        access_paths: vec![AccessPath::index_path(
            vec![ColumnRef::new("a", 0)],
            vec![None],
            StoreEngine::RowStore,
        )],
    }
}

fn join_with_null_eq(null_eq: bool) -> LogicalJoin {
    LogicalJoin {
        join_type: JoinType::Inner,
        keys: JoinKeys {
            left_keys: vec![ColumnRef::new("a", 0)],
            right_keys: vec![ColumnRef::new("a", 0)],
            null_eq_flags: vec![null_eq],
        },
        left_conds: vec![],
        right_conds: vec![],
        other_conds: vec![],
        hints: HintFlags::NONE,
        left: dual(1000.0),
        right: dual(1000.0),
        left_is_partitioned: false,
        right_is_partitioned: false,
    }
}

/// `T.a <=> U.a` (null-safe equality): merge-join and index-join are
/// both excluded, leaving only hash-join-family candidates.
#[test]
fn null_safe_eq_forbids_merge_and_index_join() {
    let session = SessionConfig::default();
    let diag = RecordingDiagnosticsSink::new();
    let ctx = ctx(&session, &diag);

    let join = join_with_null_eq(true);
    let required = PhysicalProperty::empty();
    let left = u_outer();
    let right = t_with_pk_index();

    let (candidates, _hint_satisfied, _warnings) =
        physicalize_join(&join, &required, &left, &right, None, &ctx).unwrap();

    let algos: Vec<_> = candidates
        .iter()
        .filter_map(|c| match &c.kind {
            PhysicalOpKind::Join(j) => Some(j.algorithm),
            _ => None,
        })
        .collect();

    assert!(!algos.iter().any(|a| matches!(a, JoinAlgorithm::MergeJoin { .. })));
    assert!(!algos.contains(&JoinAlgorithm::IndexJoin));
    assert!(!algos.contains(&JoinAlgorithm::IndexHashJoin));
    assert!(algos.contains(&JoinAlgorithm::HashJoin));
}

/// Every emitted join candidate keeps `|left_keys| = |right_keys| =
/// |null_eq_flags|` since they all originate from the same `JoinKeys`
/// the physicalizer was handed; mismatched lengths are rejected
/// up front as a fatal structural error rather than silently
/// truncated.
#[test]
fn mismatched_join_key_lengths_is_fatal() {
    let session = SessionConfig::default();
    let diag = RecordingDiagnosticsSink::new();
    let ctx = ctx(&session, &diag);

    let mut join = join_with_null_eq(false);
    join.keys.right_keys.push(ColumnRef::new("b", 1));
    let required = PhysicalProperty::empty();
    let left = u_outer();
    let right = t_with_pk_index();

    let result = physicalize_join(&join, &required, &left, &right, None, &ctx);
    assert!(result.is_err());
}
