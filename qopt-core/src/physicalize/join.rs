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

//! Join physicalization: fast exits, MPP/broadcast, sort-merge,
//! index-nested-loop family, hash join. The hardest single operator in
//! the enumerator because it must weigh required ordering, available
//! child orderings, index shape, data placement and hints together.

use crate::access_path::AccessPath;
use crate::hints::{HintFlags, HintWarning};
use crate::logical::{JoinKeys, JoinSide, JoinType, LogicalJoin};
use crate::physical::{BasePhysicalPlan, JoinAlgorithm, PhysJoin, PhysicalOp, PhysicalOpKind};
use crate::physicalize::context::EnumContext;
use crate::physicalize::index_join::{build_index_join_helper, choose_best_candidate, IndexJoinBuildHelper};
use qopt_common::schema::StoreEngine;
use qopt_common::{internal_err, ColumnRef, Expr, Result};
use qopt_expr::{MppPartitionType, PhysicalProperty, SortItem, TaskType};

/// A child's advertised set of alternative orderings: the possible
/// orders a given access path or sub-plan may provide, as referenced
/// by the sort-merge enumeration step.
pub struct PossibleOrders(pub Vec<Vec<SortItem>>);

pub struct JoinChildInfo {
    pub possible_orders: PossibleOrders,
    pub estimated_row_count: f64,
    pub is_partitioned: bool,
    pub access_paths: Vec<AccessPath>,
}

pub fn physicalize_join(
    join: &LogicalJoin,
    required: &PhysicalProperty,
    left: &JoinChildInfo,
    right: &JoinChildInfo,
    outer_columns_for_apply: Option<&[ColumnRef]>,
    ctx: &EnumContext,
) -> Result<(Vec<PhysicalOp>, bool, Vec<HintWarning>)> {
    if !join.keys.is_well_formed() {
        return internal_err!(
            "join key vectors mismatched: left={} right={} null_eq={}",
            join.keys.left_keys.len(),
            join.keys.right_keys.len(),
            join.keys.null_eq_flags.len()
        );
    }

    let mut warnings = Vec::new();

    // 1. Fast exits.
    if required.mpp_partition_type == MppPartitionType::Broadcast {
        return Ok((Vec::new(), true, warnings));
    }
    let is_flash_property = matches!(
        required.task_type,
        TaskType::CopFlashLocalTask | TaskType::CopFlashGlobalTask
    );
    if is_flash_property
        && (join.hints.contains(HintFlags::PREFER_HASH_JOIN)
            || join.hints.contains(HintFlags::PREFER_MERGE_JOIN))
    {
        return Ok((Vec::new(), true, warnings));
    }

    let mut candidates = Vec::new();

    // 2. MPP / broadcast.
    if ctx.session.mpp_allowed() {
        candidates.extend(mpp_broadcast_candidates(join, required, left, right, ctx));
    }

    // 3. Sort-merge, skipped for flash properties.
    let merge_candidates = if is_flash_property {
        Vec::new()
    } else {
        sort_merge_candidates(join, required, left, right, ctx)
    };
    candidates.extend(merge_candidates);

    // 4. Index-nested-loop family; a forcing hint short-circuits here.
    let (index_candidates, index_hint_forced) =
        index_join_candidates(join, required, left, right, outer_columns_for_apply, ctx)?;
    if index_hint_forced && !index_candidates.is_empty() {
        return Ok((index_candidates, true, warnings));
    }
    candidates.extend(index_candidates);

    // 5. Hash join, only when the requested property is empty.
    if required.is_empty() {
        candidates.extend(hash_join_candidates(join, left, right, ctx));
    }

    let hint_satisfied = join.hints.is_empty() || hint_matched(join.hints, &candidates);
    if !hint_satisfied && required.is_empty() {
        warnings.push(hint_inapplicable_warning(join));
    }

    Ok((candidates, hint_satisfied, warnings))
}

fn hint_matched(hints: HintFlags, candidates: &[PhysicalOp]) -> bool {
    let has = |alg: JoinAlgorithm| {
        candidates.iter().any(|c| match &c.kind {
            PhysicalOpKind::Join(j) => std::mem::discriminant(&j.algorithm) == std::mem::discriminant(&alg),
            _ => false,
        })
    };
    if hints.contains(HintFlags::PREFER_MERGE_JOIN) {
        return has(JoinAlgorithm::MergeJoin { enforced: false });
    }
    if hints.contains(HintFlags::PREFER_HASH_JOIN) {
        return has(JoinAlgorithm::HashJoin);
    }
    if hints.contains(HintFlags::PREFER_BROADCAST_JOIN) {
        return has(JoinAlgorithm::BroadcastJoin);
    }
    if hints.prefers_index_join_family() {
        return has(JoinAlgorithm::IndexJoin)
            || has(JoinAlgorithm::IndexHashJoin)
            || has(JoinAlgorithm::IndexMergeJoin);
    }
    true
}

fn hint_inapplicable_warning(join: &LogicalJoin) -> HintWarning {
    let no_eq = join.keys.is_empty();
    let hint_name = if join.hints.contains(HintFlags::PREFER_MERGE_JOIN) {
        "MERGE_JOIN"
    } else if join.hints.contains(HintFlags::PREFER_HASH_JOIN) {
        "HASH_JOIN"
    } else {
        "INL_JOIN"
    };
    HintWarning::inapplicable(
        hint_name,
        format!("no_equal_conditions={no_eq}"),
    )
}

fn base(schema: &qopt_common::schema::SchemaRef) -> BasePhysicalPlan {
    BasePhysicalPlan {
        schema: schema.clone(),
        block_offset: 0,
    }
}

// ---- 4.3.1 MPP / broadcast ----

fn mpp_broadcast_candidates(
    join: &LogicalJoin,
    required: &PhysicalProperty,
    left: &JoinChildInfo,
    right: &JoinChildInfo,
    ctx: &EnumContext,
) -> Vec<PhysicalOp> {
    if left.is_partitioned || right.is_partitioned {
        return Vec::new();
    }
    let all_conds: Vec<Expr> = join
        .left_conds
        .iter()
        .chain(join.right_conds.iter())
        .chain(join.other_conds.iter())
        .cloned()
        .collect();
    if !ctx.expr_service.can_push_down(&all_conds, StoreEngine::ColumnStore) {
        return Vec::new();
    }

    let is_cartesian = join.keys.is_empty();
    if is_cartesian && ctx.session.allow_cartesian_bcj() == 0 {
        return Vec::new();
    }
    if is_cartesian && ctx.session.allow_cartesian_bcj() == 1 && !join.hints.contains(HintFlags::PREFER_BROADCAST_JOIN) {
        return Vec::new();
    }

    let small_side_bytes = left.estimated_row_count.min(right.estimated_row_count)
        * ctx.stats_service.avg_row_size(&arrow_schema::Schema::empty(), StoreEngine::ColumnStore, false);
    let below_threshold = small_side_bytes < ctx.session.broadcast_threshold_bytes()
        && left.estimated_row_count.min(right.estimated_row_count) < ctx.session.broadcast_threshold_rows();
    let prefer_broadcast = below_threshold || join.hints.contains(HintFlags::PREFER_BROADCAST_JOIN);
    if !prefer_broadcast || !ctx.session.allow_bcj() {
        return Vec::new();
    }

    let build_side = choose_mpp_build_side(join, left, right, !join.other_conds.is_empty());

    let schema = fake_join_schema();
    vec![PhysicalOp::leaf(
        base(&schema),
        PhysicalOpKind::Join(PhysJoin {
            algorithm: JoinAlgorithm::BroadcastJoin,
            join_type: join.join_type,
            keys: join.keys.clone(),
            other_conds: join.other_conds.clone(),
            build_side,
            inner_access_path: None,
            key_off_to_idx_off: Vec::new(),
        }),
    )]
}

fn choose_mpp_build_side(
    join: &LogicalJoin,
    left: &JoinChildInfo,
    right: &JoinChildInfo,
    has_other_conds: bool,
) -> JoinSide {
    if join.join_type.always_builds_right() {
        return JoinSide::Right;
    }
    if join.join_type == JoinType::Inner {
        return if left.estimated_row_count <= right.estimated_row_count {
            JoinSide::Left
        } else {
            JoinSide::Right
        };
    }
    if let Some(preserved) = join.join_type.preserved_side() {
        if !has_other_conds {
            return if left.estimated_row_count <= right.estimated_row_count {
                JoinSide::Left
            } else {
                JoinSide::Right
            };
        }
        return preserved.other();
    }
    JoinSide::Right
}

fn fake_join_schema() -> qopt_common::schema::SchemaRef {
    std::sync::Arc::new(arrow_schema::Schema::empty())
}

// ---- 4.3.2 Sort-merge ----

fn sort_merge_candidates(
    join: &LogicalJoin,
    required: &PhysicalProperty,
    left: &JoinChildInfo,
    right: &JoinChildInfo,
    ctx: &EnumContext,
) -> Vec<PhysicalOp> {
    if join.keys.has_null_safe_eq() {
        return Vec::new();
    }
    if join.keys.is_empty() {
        return Vec::new();
    }

    let left_matched = left
        .possible_orders
        .0
        .iter()
        .map(|order| matched_key_prefix(order, &join.keys.left_keys))
        .max()
        .unwrap_or(0);
    if left_matched < join.keys.left_keys.len() {
        return Vec::new();
    }
    let right_matched = right
        .possible_orders
        .0
        .iter()
        .map(|order| matched_key_prefix(order, &join.keys.right_keys))
        .max()
        .unwrap_or(0);
    let mut matched = left_matched.min(right_matched);

    // Truncate at the first key pair that can't be merge-joined
    // directly: mismatched collation, or an enum/set-typed key (no
    // total order compatible with a merge scan).
    for i in 0..matched {
        let lk = &join.keys.left_keys[i];
        let rk = &join.keys.right_keys[i];
        let compatible = ctx
            .expr_service
            .collation_compatible(&Expr::Column(lk.clone()), &Expr::Column(rk.clone()))
            && !ctx.expr_service.is_enum_or_set_type(lk)
            && !ctx.expr_service.is_enum_or_set_type(rk);
        if !compatible {
            matched = i;
            break;
        }
    }
    if matched == 0 {
        return Vec::new();
    }

    let matched_keys = JoinKeys {
        left_keys: join.keys.left_keys[..matched].to_vec(),
        right_keys: join.keys.right_keys[..matched].to_vec(),
        null_eq_flags: join.keys.null_eq_flags[..matched].to_vec(),
    };
    let mut demoted: Vec<Expr> = join.other_conds.clone();
    for i in matched..join.keys.left_keys.len() {
        demoted.push(Expr::eq(
            Expr::Column(join.keys.left_keys[i].clone()),
            Expr::Column(join.keys.right_keys[i].clone()),
        ));
    }

    let schema = fake_join_schema();
    let mut out = vec![PhysicalOp::leaf(
        base(&schema),
        PhysicalOpKind::Join(PhysJoin {
            algorithm: JoinAlgorithm::MergeJoin { enforced: false },
            join_type: join.join_type,
            keys: matched_keys.clone(),
            other_conds: demoted.clone(),
            build_side: JoinSide::Right,
            inner_access_path: None,
            key_off_to_idx_off: Vec::new(),
        }),
    )];

    if join.hints.contains(HintFlags::PREFER_MERGE_JOIN) && !required.sort_items.is_empty() {
        out.push(PhysicalOp::leaf(
            base(&schema),
            PhysicalOpKind::Join(PhysJoin {
                algorithm: JoinAlgorithm::MergeJoin { enforced: true },
                join_type: join.join_type,
                keys: join.keys.clone(),
                other_conds: join.other_conds.clone(),
                build_side: JoinSide::Right,
                inner_access_path: None,
                key_off_to_idx_off: Vec::new(),
            }),
        ));
    }

    out
}

fn matched_key_prefix(order: &[SortItem], keys: &[ColumnRef]) -> usize {
    order
        .iter()
        .zip(keys.iter())
        .take_while(|(item, key)| item.column_ref == **key)
        .count()
}

/// Child required properties a sort-merge candidate imposes: each
/// side must provide its matched key prefix in the requested
/// direction.
pub fn merge_join_child_properties(phys: &PhysJoin, direction_desc: bool) -> (PhysicalProperty, PhysicalProperty) {
    let mk = |cols: &[ColumnRef]| {
        let mut p = PhysicalProperty::empty();
        p.sort_items = cols
            .iter()
            .map(|c| if direction_desc { SortItem::desc(c.clone()) } else { SortItem::asc(c.clone()) })
            .collect();
        p
    };
    (mk(&phys.keys.left_keys), mk(&phys.keys.right_keys))
}

// ---- 4.3.3 Index-nested-loop family ----

fn index_join_candidates(
    join: &LogicalJoin,
    required: &PhysicalProperty,
    left: &JoinChildInfo,
    right: &JoinChildInfo,
    outer_columns_for_apply: Option<&[ColumnRef]>,
    ctx: &EnumContext,
) -> Result<(Vec<PhysicalOp>, bool)> {
    if join.keys.is_empty() || join.keys.has_null_safe_eq() {
        return Ok((Vec::new(), false));
    }

    let (inner_is_right, inner_info, outer_info) = if join.hints.contains(HintFlags::PREFER_LEFT_AS_INLJ_INNER)
        || join.hints.contains(HintFlags::PREFER_LEFT_AS_INLHJ_INNER)
        || join.hints.contains(HintFlags::PREFER_LEFT_AS_INLMJ_INNER)
    {
        (false, left, right)
    } else {
        (true, right, left)
    };
    let (inner_keys, inner_conds) = if inner_is_right {
        (&join.keys.right_keys, &join.right_conds)
    } else {
        (&join.keys.left_keys, &join.left_conds)
    };
    let outer_keys = if inner_is_right { &join.keys.left_keys } else { &join.keys.right_keys };
    let _ = outer_info;

    let helper_keys = JoinKeys {
        left_keys: inner_keys.clone(),
        right_keys: outer_keys.clone(),
        null_eq_flags: join.keys.null_eq_flags.clone(),
    };

    let outer_columns: Vec<ColumnRef> = outer_columns_for_apply
        .map(|c| c.to_vec())
        .unwrap_or_else(|| outer_keys.clone());

    let mut candidates_built: Vec<IndexJoinBuildHelper> = Vec::new();
    for access_path in &inner_info.access_paths {
        if let Some(helper) = build_index_join_helper(
            access_path,
            &helper_keys,
            inner_conds,
            &outer_columns,
            ctx.expr_service,
            ctx.stats_service,
        ) {
            candidates_built.push(helper);
        }
    }

    let best = match choose_best_candidate(candidates_built) {
        Some(h) => h,
        None => return Ok((Vec::new(), false)),
    };

    let partitioned_inner = inner_info.is_partitioned;
    let union_scan_inner = false; // surfaced by the caller wrapping the inner plan, not decided here.

    let mut ops = Vec::new();
    let keys = JoinKeys {
        left_keys: if inner_is_right { join.keys.left_keys.clone() } else { inner_keys.clone() },
        right_keys: if inner_is_right { inner_keys.clone() } else { join.keys.right_keys.clone() },
        null_eq_flags: join.keys.null_eq_flags.clone(),
    };

    let schema = fake_join_schema();
    let build_side = if inner_is_right { JoinSide::Right } else { JoinSide::Left };
    let make = |algorithm: JoinAlgorithm| {
        PhysicalOp::leaf(
            base(&schema),
            PhysicalOpKind::Join(PhysJoin {
                algorithm,
                join_type: join.join_type,
                keys: keys.clone(),
                other_conds: best.remaining_conditions().to_vec(),
                build_side,
                inner_access_path: Some(best.access_path.clone()),
                key_off_to_idx_off: best.key_off_to_idx_off.clone(),
            }),
        )
    };

    ops.push(make(JoinAlgorithm::IndexJoin));
    ops.push(make(JoinAlgorithm::IndexHashJoin));

    let outer_keys_prop = {
        let mut p = required.clone_essential_fields();
        p.sort_items = join_keys_as_sort_items(outer_keys);
        p
    };
    let has_enum_or_set_key = outer_keys
        .iter()
        .chain(inner_keys.iter())
        .any(|c| ctx.expr_service.is_enum_or_set_type(c));
    let suppress_merge = union_scan_inner
        || best
            .access_path
            .has_prefix_column_within(best.used_columns_len())
        || !(required.is_prefix(&outer_keys_prop)
            || sort_items_is_prefix(&join_keys_as_sort_items(outer_keys), &required.sort_items))
        || partitioned_inner
        || has_enum_or_set_key;
    if !suppress_merge {
        ops.push(make(JoinAlgorithm::IndexMergeJoin));
    }

    let forced = join.hints.prefers_index_join_family();
    Ok((ops, forced))
}

fn join_keys_as_sort_items(cols: &[ColumnRef]) -> Vec<SortItem> {
    cols.iter().map(|c| SortItem::asc(c.clone())).collect()
}

fn sort_items_is_prefix(a: &[SortItem], b: &[SortItem]) -> bool {
    a.len() <= b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
}

// ---- 4.3.4 Hash join ----

fn hash_join_candidates(join: &LogicalJoin, left: &JoinChildInfo, right: &JoinChildInfo, ctx: &EnumContext) -> Vec<PhysicalOp> {
    let schema = fake_join_schema();
    let force_outer_build = ctx.session.mpp_outer_join_fixed_build_side();
    let mut out = Vec::new();

    let mut sides = vec![JoinSide::Left, JoinSide::Right];
    if force_outer_build {
        if let Some(preserved) = join.join_type.preserved_side() {
            sides = vec![preserved.other()];
        }
    }

    let _ = (left, right);
    for side in sides {
        out.push(PhysicalOp::leaf(
            base(&schema),
            PhysicalOpKind::Join(PhysJoin {
                algorithm: JoinAlgorithm::HashJoin,
                join_type: join.join_type,
                keys: join.keys.clone(),
                other_conds: join.other_conds.clone(),
                build_side: side,
                inner_access_path: None,
                key_off_to_idx_off: Vec::new(),
            }),
        ));
    }
    out
}

// ---- LogicalApply: decorrelated-subquery join ----

/// `LogicalApply` reuses the join code path's index-join/nested-loop
/// machinery but never offers hash or merge join, since the right
/// side is re-evaluated once per left row rather than materialized.
pub fn physicalize_apply(
    apply: &crate::logical::LogicalApply,
    required: &PhysicalProperty,
    left: &JoinChildInfo,
    right: &JoinChildInfo,
    ctx: &EnumContext,
) -> Result<(Vec<PhysicalOp>, bool)> {
    if !apply.keys.is_well_formed() {
        return internal_err!(
            "apply key vectors mismatched: left={} right={} null_eq={}",
            apply.keys.left_keys.len(),
            apply.keys.right_keys.len(),
            apply.keys.null_eq_flags.len()
        );
    }

    let join_for_index = LogicalJoin {
        join_type: apply.join_type,
        keys: apply.keys.clone(),
        left_conds: Vec::new(),
        right_conds: Vec::new(),
        other_conds: apply.other_conds.clone(),
        hints: HintFlags::NONE,
        left: apply.left.clone(),
        right: apply.right.clone(),
        left_is_partitioned: false,
        right_is_partitioned: false,
    };

    let outer_columns: Vec<ColumnRef> = apply.keys.left_keys.clone();
    let (mut candidates, _forced) =
        index_join_candidates(&join_for_index, required, left, right, Some(&outer_columns), ctx)?;

    if candidates.is_empty() {
        let schema = fake_join_schema();
        candidates.push(PhysicalOp::leaf(
            base(&schema),
            PhysicalOpKind::Join(PhysJoin {
                algorithm: JoinAlgorithm::NestedLoopJoin,
                join_type: apply.join_type,
                keys: apply.keys.clone(),
                other_conds: apply.other_conds.clone(),
                build_side: JoinSide::Right,
                inner_access_path: None,
                key_off_to_idx_off: Vec::new(),
            }),
        ));
    }

    Ok((candidates, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qopt_common::schema::StoreEngine;
    use qopt_common::services::{AccessPathDescriptor, ExpressionService, StatisticsService};

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
        fn selectivity(&self, _c: &[Expr], _a: &[AccessPathDescriptor]) -> std::result::Result<f64, String> {
            Ok(0.8)
        }
        fn cardinality(&self, _c: &[ColumnRef], _s: &qopt_common::schema::Schema) -> std::result::Result<f64, String> {
            Ok(100.0)
        }
        fn avg_row_size(&self, _s: &qopt_common::schema::Schema, _e: StoreEngine, _i: bool) -> f64 {
            8.0
        }
    }

    fn empty_join(join_type: JoinType, keys: JoinKeys, hints: HintFlags) -> LogicalJoin {
        LogicalJoin {
            join_type,
            keys,
            left_conds: vec![],
            right_conds: vec![],
            other_conds: vec![],
            hints,
            left: std::sync::Arc::new(crate::logical::LogicalOp {
                base: crate::logical::BaseLogicalPlan {
                    schema: fake_join_schema(),
                    estimated_row_count: 100.0,
                    block_offset: 0,
                },
                kind: crate::logical::LogicalOpKind::Dual(crate::logical::LogicalDual),
            }),
            right: std::sync::Arc::new(crate::logical::LogicalOp {
                base: crate::logical::BaseLogicalPlan {
                    schema: fake_join_schema(),
                    estimated_row_count: 100.0,
                    block_offset: 0,
                },
                kind: crate::logical::LogicalOpKind::Dual(crate::logical::LogicalDual),
            }),
            left_is_partitioned: false,
            right_is_partitioned: false,
        }
    }

    #[test]
    fn hash_join_suppressed_for_nonempty_property() {
        let session_config = qopt_common::session::SessionConfig::default();
        let diagnostics_sink = qopt_common::diagnostics::RecordingDiagnosticsSink::new();
        let ctx = EnumContext::new(
            &session_config,
            &StubExprService,
            &StubStatsService,
            &diagnostics_sink,
        );
        let keys = JoinKeys {
            left_keys: vec![ColumnRef::new("a", 0)],
            right_keys: vec![ColumnRef::new("a", 0)],
            null_eq_flags: vec![false],
        };
        let join = empty_join(JoinType::Inner, keys, HintFlags::NONE);
        let mut required = PhysicalProperty::empty();
        required.sort_items = vec![SortItem::asc(ColumnRef::new("a", 0))];

        let child = JoinChildInfo {
            possible_orders: PossibleOrders(vec![]),
            estimated_row_count: 100.0,
            is_partitioned: false,
            access_paths: vec![],
        };
        let (candidates, _, _) =
            physicalize_join(&join, &required, &child, &child, None, &ctx).unwrap();
        assert!(candidates
            .iter()
            .all(|c| !matches!(&c.kind, PhysicalOpKind::Join(j) if j.algorithm == JoinAlgorithm::HashJoin)));
    }

    #[test]
    fn hash_join_emitted_for_empty_property() {
        let session_config = qopt_common::session::SessionConfig::default();
        let diagnostics_sink = qopt_common::diagnostics::RecordingDiagnosticsSink::new();
        let ctx = EnumContext::new(
            &session_config,
            &StubExprService,
            &StubStatsService,
            &diagnostics_sink,
        );
        let keys = JoinKeys {
            left_keys: vec![ColumnRef::new("a", 0)],
            right_keys: vec![ColumnRef::new("a", 0)],
            null_eq_flags: vec![false],
        };
        let join = empty_join(JoinType::Inner, keys, HintFlags::NONE);
        let required = PhysicalProperty::empty();
        let child = JoinChildInfo {
            possible_orders: PossibleOrders(vec![]),
            estimated_row_count: 100.0,
            is_partitioned: false,
            access_paths: vec![],
        };
        let (candidates, hint_satisfied, _) =
            physicalize_join(&join, &required, &child, &child, None, &ctx).unwrap();
        assert!(candidates
            .iter()
            .any(|c| matches!(&c.kind, PhysicalOpKind::Join(j) if j.algorithm == JoinAlgorithm::HashJoin)));
        assert!(hint_satisfied);
    }

    #[test]
    fn mismatched_join_keys_is_fatal() {
        let session_config = qopt_common::session::SessionConfig::default();
        let diagnostics_sink = qopt_common::diagnostics::RecordingDiagnosticsSink::new();
        let ctx = EnumContext::new(
            &session_config,
            &StubExprService,
            &StubStatsService,
            &diagnostics_sink,
        );
        let keys = JoinKeys {
            left_keys: vec![ColumnRef::new("a", 0)],
            right_keys: vec![],
            null_eq_flags: vec![false],
        };
        let join = empty_join(JoinType::Inner, keys, HintFlags::NONE);
        let required = PhysicalProperty::empty();
        let child = JoinChildInfo {
            possible_orders: PossibleOrders(vec![]),
            estimated_row_count: 100.0,
            is_partitioned: false,
            access_paths: vec![],
        };
        assert!(physicalize_join(&join, &required, &child, &child, None, &ctx).is_err());
    }
}
