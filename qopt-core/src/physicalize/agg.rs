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

//! Aggregation physicalization: stream-agg vs hash-agg families, MPP
//! run-mode enumeration, and the DISTINCT/GROUP-BY containment check.

use crate::hints::{HintFlags, HintWarning};
use crate::logical::LogicalAgg;
use crate::physical::{AggMode, AggStrategy, BasePhysicalPlan, MppAggRunMode, PhysAgg, PhysicalOp, PhysicalOpKind};
use crate::physicalize::context::EnumContext;
use qopt_expr::{MppPartitionType, PhysicalProperty, SortItem, TaskType};

fn base() -> BasePhysicalPlan {
    BasePhysicalPlan {
        schema: std::sync::Arc::new(arrow_schema::Schema::empty()),
        block_offset: 0,
    }
}

/// `true` iff every DISTINCT aggregate argument is already a GROUP BY
/// item — stream agg is only valid when this holds.
fn distinct_args_covered_by_group_by(agg: &LogicalAgg) -> bool {
    agg.agg_funcs
        .iter()
        .filter(|f| f.distinct)
        .all(|f| f.args.iter().all(|a| agg.group_by.contains(a)))
}

pub fn physicalize_agg(
    agg: &LogicalAgg,
    required: &PhysicalProperty,
    ctx: &EnumContext,
) -> (Vec<(PhysicalOp, Vec<PhysicalProperty>)>, bool, Vec<HintWarning>) {
    let mut warnings = Vec::new();
    let mut out = Vec::new();

    if agg.hints.contains(HintFlags::PREFER_HASH_AGG) && agg.hints.contains(HintFlags::PREFER_STREAM_AGG) {
        warnings.push(HintWarning::inapplicable(
            "AGG_TO_COP",
            "prefer_hash_agg and prefer_stream_agg both set, cancelling",
        ));
        return physicalize_hash_agg_only(agg, required, ctx, warnings);
    }

    let group_by_cols: Vec<_> = agg
        .group_by
        .iter()
        .filter_map(|e| e.as_column())
        .cloned()
        .collect();

    let want_stream = !agg.hints.contains(HintFlags::PREFER_HASH_AGG) && distinct_args_covered_by_group_by(agg);
    if want_stream && !group_by_cols.is_empty() {
        let mut child_prop = required.clone_essential_fields();
        child_prop.sort_items = group_by_cols.iter().map(|c| SortItem::asc(c.clone())).collect();
        for task_type in [TaskType::Root, TaskType::CopSingleReadTask, TaskType::CopDoubleReadTask] {
            let mut cp = child_prop.clone();
            cp.task_type = task_type;
            out.push((
                PhysicalOp::leaf(
                    base(),
                    PhysicalOpKind::Agg(PhysAgg {
                        strategy: AggStrategy::Stream,
                        mode: AggMode::Complete,
                        mpp_run_mode: None,
                    }),
                ),
                vec![cp],
            ));
        }
    } else if agg.hints.contains(HintFlags::PREFER_STREAM_AGG) && group_by_cols.is_empty() {
        warnings.push(HintWarning::inapplicable("STREAM_AGG", "no group-by columns"));
    }

    for task_type in [TaskType::Root, TaskType::CopSingleReadTask, TaskType::CopDoubleReadTask] {
        out.push((
            PhysicalOp::leaf(
                base(),
                PhysicalOpKind::Agg(PhysAgg {
                    strategy: AggStrategy::Hash,
                    mode: AggMode::Complete,
                    mpp_run_mode: None,
                }),
            ),
            vec![PhysicalProperty { task_type, ..required.clone_essential_fields() }],
        ));
    }

    if ctx.session.mpp_allowed() {
        out.extend(mpp_hash_agg_variants(agg, required, &group_by_cols, ctx, &mut warnings));
    }

    let hint_satisfied = !agg.hints.contains(HintFlags::PREFER_STREAM_AGG) || want_stream;
    (out, hint_satisfied, warnings)
}

fn physicalize_hash_agg_only(
    agg: &LogicalAgg,
    required: &PhysicalProperty,
    _ctx: &EnumContext,
    warnings: Vec<HintWarning>,
) -> (Vec<(PhysicalOp, Vec<PhysicalProperty>)>, bool, Vec<HintWarning>) {
    let _ = agg;
    (
        vec![(
            PhysicalOp::leaf(
                base(),
                PhysicalOpKind::Agg(PhysAgg {
                    strategy: AggStrategy::Hash,
                    mode: AggMode::Complete,
                    mpp_run_mode: None,
                }),
            ),
            vec![required.clone_essential_fields()],
        )],
        false,
        warnings,
    )
}

fn has_unsupported_distinct(agg: &LogicalAgg, ctx: &EnumContext) -> bool {
    agg.agg_funcs.iter().any(|f| f.distinct) && !ctx.session.allow_distinct_agg_pushdown()
}

fn mpp_hash_agg_variants(
    agg: &LogicalAgg,
    required: &PhysicalProperty,
    group_by_cols: &[qopt_common::ColumnRef],
    ctx: &EnumContext,
    warnings: &mut Vec<HintWarning>,
) -> Vec<(PhysicalOp, Vec<PhysicalProperty>)> {
    if has_unsupported_distinct(agg, ctx) {
        warnings.push(HintWarning::inapplicable(
            "AGG_TO_COP",
            "unsupported DISTINCT for MPP, falling back to non-MPP hash agg",
        ));
        return Vec::new();
    }

    let mut out = Vec::new();
    let make = |run_mode: MppAggRunMode, mode: AggMode, child: PhysicalProperty| {
        (
            PhysicalOp::leaf(
                base(),
                PhysicalOpKind::Agg(PhysAgg {
                    strategy: AggStrategy::Hash,
                    mode,
                    mpp_run_mode: Some(run_mode),
                }),
            ),
            vec![child],
        )
    };

    if !group_by_cols.is_empty() {
        // 1-phase: exchange on group-by, final agg at destination.
        let mut child = required.clone_essential_fields();
        child.task_type = TaskType::Mpp;
        child.mpp_partition_type = MppPartitionType::Hash;
        child.mpp_partition_cols = group_by_cols.to_vec();
        out.push(make(MppAggRunMode::OnePhase, AggMode::Final, child));

        // 2-phase: partial agg locally, exchange, final remote.
        let mut child2 = required.clone_essential_fields();
        child2.task_type = TaskType::Mpp;
        child2.mpp_partition_type = MppPartitionType::Any;
        out.push(make(MppAggRunMode::TwoPhase, AggMode::Partial, child2));

        // tidb-phase: partial on remote engine, final on the driver.
        let mut child3 = required.clone_essential_fields();
        child3.task_type = TaskType::Mpp;
        child3.mpp_partition_type = MppPartitionType::Any;
        out.push(make(MppAggRunMode::TidbPhase, AggMode::Partial, child3));
    } else {
        let mut child = required.clone_essential_fields();
        child.task_type = TaskType::Mpp;
        child.mpp_partition_type = MppPartitionType::Singleton;
        out.push(make(MppAggRunMode::Scalar, AggMode::Complete, child));
    }
    out
}
