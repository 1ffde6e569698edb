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

//! The single entry point the search driver calls:
//! `enumerate(logical_op, required_property)`. A single `match` over
//! `LogicalOpKind` routes to the per-kind physicalizer and collects
//! its candidates plus the child required properties it imposes.

use crate::hints::HintWarning;
use crate::logical::{JoinSide, LogicalDataSource, LogicalOp, LogicalOpKind};
use crate::physical::{JoinAlgorithm, PhysicalOp, PhysicalOpKind};
use crate::physicalize::context::EnumContext;
use crate::physicalize::{agg, join, misc, projection, sort, topn_limit, union};
use qopt_common::Result;
use qopt_expr::{PhysicalProperty, SortItem};

/// What the search driver receives from one `enumerate` call: the
/// candidates, the required property for each candidate's children
/// (index-aligned with `candidates`, outer `Vec` one entry per
/// candidate, inner `Vec` one entry per child), and whether hints
/// were fully honored.
pub struct EnumerateResult {
    pub candidates: Vec<PhysicalOp>,
    pub children_properties: Vec<Vec<PhysicalProperty>>,
    pub hint_satisfied: bool,
    pub warnings: Vec<HintWarning>,
}

pub fn enumerate(logical_op: &LogicalOp, required: &PhysicalProperty, ctx: &EnumContext) -> Result<EnumerateResult> {
    log::trace!(
        "enumerate: kind={} sort_items={} task_type={:?}",
        kind_name(&logical_op.kind),
        required.sort_items.len(),
        required.task_type
    );

    let result = match &logical_op.kind {
        LogicalOpKind::Join(j) => {
            let left_info = join_child_info(&j.left, j.left_is_partitioned);
            let right_info = join_child_info(&j.right, j.right_is_partitioned);
            let (candidates, hint_satisfied, warnings) =
                join::physicalize_join(j, required, &left_info, &right_info, None, ctx)?;
            let children_properties = candidates
                .iter()
                .map(|c| join_children_properties(c, required))
                .collect();
            EnumerateResult {
                candidates,
                children_properties,
                hint_satisfied,
                warnings,
            }
        }
        LogicalOpKind::Apply(a) => {
            let left_info = join_child_info(&a.left, false);
            let right_info = join_child_info(&a.right, false);
            let (candidates, hint_satisfied) = join::physicalize_apply(a, required, &left_info, &right_info, ctx)?;
            let children_properties = candidates
                .iter()
                .map(|c| join_children_properties(c, required))
                .collect();
            EnumerateResult {
                candidates,
                children_properties,
                hint_satisfied,
                warnings: Vec::new(),
            }
        }
        LogicalOpKind::Agg(a) => {
            let (pairs, hint_satisfied, warnings) = agg::physicalize_agg(a, required, ctx);
            let candidates = pairs.iter().map(|(op, _)| op.clone()).collect();
            let children_properties = pairs.into_iter().map(|(_, props)| props).collect();
            EnumerateResult {
                candidates,
                children_properties,
                hint_satisfied,
                warnings,
            }
        }
        LogicalOpKind::TopN(t) => {
            let conditions: Vec<qopt_common::Expr> = Vec::new();
            let (pairs, hint_satisfied) = topn_limit::physicalize_topn(t, required, &[], &conditions, ctx);
            let candidates = pairs.iter().map(|(op, _)| op.clone()).collect();
            let children_properties = pairs.into_iter().map(|(_, p)| vec![p]).collect();
            EnumerateResult {
                candidates,
                children_properties,
                hint_satisfied,
                warnings: Vec::new(),
            }
        }
        LogicalOpKind::Limit(l) => {
            let conditions: Vec<qopt_common::Expr> = Vec::new();
            let (pairs, hint_satisfied) = topn_limit::physicalize_limit(l, required, &conditions, ctx);
            let candidates = pairs.iter().map(|(op, _)| op.clone()).collect();
            let children_properties = pairs.into_iter().map(|(_, p)| vec![p]).collect();
            EnumerateResult {
                candidates,
                children_properties,
                hint_satisfied,
                warnings: Vec::new(),
            }
        }
        LogicalOpKind::Projection(p) => {
            let (pairs, hint_satisfied) = projection::physicalize_projection(p, required);
            let candidates = pairs.iter().map(|(op, _)| op.clone()).collect();
            let children_properties = pairs.into_iter().map(|(_, prop)| vec![prop]).collect();
            EnumerateResult {
                candidates,
                children_properties,
                hint_satisfied,
                warnings: Vec::new(),
            }
        }
        LogicalOpKind::Sort(s) => {
            let pairs = sort::physicalize_sort(s, required);
            let candidates = pairs.iter().map(|(op, _)| op.clone()).collect();
            let children_properties = pairs.into_iter().map(|(_, prop)| vec![prop]).collect();
            EnumerateResult {
                candidates,
                children_properties,
                hint_satisfied: true,
                warnings: Vec::new(),
            }
        }
        LogicalOpKind::UnionAll(u) => {
            let pairs = union::physicalize_union_all(u, required, ctx);
            let candidates = pairs.iter().map(|(op, _)| op.clone()).collect();
            let children_properties = pairs.into_iter().map(|(_, props)| props).collect();
            EnumerateResult {
                candidates,
                children_properties,
                hint_satisfied: true,
                warnings: Vec::new(),
            }
        }
        LogicalOpKind::UnionScan(u) => {
            let (op, prop) = misc::physicalize_union_scan(u, required);
            EnumerateResult {
                candidates: vec![op],
                children_properties: vec![vec![prop]],
                hint_satisfied: true,
                warnings: Vec::new(),
            }
        }
        LogicalOpKind::Window(w) => {
            let (op, prop) = misc::physicalize_window(w, required);
            EnumerateResult {
                candidates: vec![op],
                children_properties: vec![vec![prop]],
                hint_satisfied: true,
                warnings: Vec::new(),
            }
        }
        LogicalOpKind::Lock(l) => {
            let (op, prop) = misc::physicalize_lock(l, required);
            EnumerateResult {
                candidates: vec![op],
                children_properties: vec![vec![prop]],
                hint_satisfied: true,
                warnings: Vec::new(),
            }
        }
        LogicalOpKind::MaxOneRow(m) => {
            let (op, prop) = misc::physicalize_max_one_row(m, required);
            EnumerateResult {
                candidates: vec![op],
                children_properties: vec![vec![prop]],
                hint_satisfied: true,
                warnings: Vec::new(),
            }
        }
        LogicalOpKind::Selection(s) => {
            let (op, prop) = misc::physicalize_selection(s, required);
            EnumerateResult {
                candidates: vec![op],
                children_properties: vec![vec![prop]],
                hint_satisfied: true,
                warnings: Vec::new(),
            }
        }
        LogicalOpKind::Dual(_) => EnumerateResult {
            candidates: vec![misc::physicalize_dual()],
            children_properties: vec![vec![]],
            hint_satisfied: true,
            warnings: Vec::new(),
        },
        LogicalOpKind::DataSource(ds) => EnumerateResult {
            candidates: vec![misc::physicalize_data_source(ds)],
            children_properties: vec![vec![]],
            hint_satisfied: true,
            warnings: Vec::new(),
        },
    };

    log::debug!(
        "enumerate: kind={} candidates={}",
        kind_name(&logical_op.kind),
        result.candidates.len()
    );

    Ok(result)
}

fn kind_name(kind: &LogicalOpKind) -> &'static str {
    match kind {
        LogicalOpKind::Join(_) => "Join",
        LogicalOpKind::Apply(_) => "Apply",
        LogicalOpKind::Agg(_) => "Agg",
        LogicalOpKind::TopN(_) => "TopN",
        LogicalOpKind::Limit(_) => "Limit",
        LogicalOpKind::Projection(_) => "Projection",
        LogicalOpKind::Sort(_) => "Sort",
        LogicalOpKind::UnionAll(_) => "UnionAll",
        LogicalOpKind::UnionScan(_) => "UnionScan",
        LogicalOpKind::Window(_) => "Window",
        LogicalOpKind::Lock(_) => "Lock",
        LogicalOpKind::MaxOneRow(_) => "MaxOneRow",
        LogicalOpKind::Selection(_) => "Selection",
        LogicalOpKind::Dual(_) => "Dual",
        LogicalOpKind::DataSource(_) => "DataSource",
    }
}

/// The required property each side of a join candidate imposes on its
/// child, which varies by algorithm: merge-join requires both sides
/// sorted on their matched keys, the index-join family requires
/// ordering only on the outer (probe) side and leaves the inner
/// (index-driven) side unconstrained, and every other algorithm
/// (hash, broadcast, MPP, nested-loop) just passes `required` through
/// unchanged to both sides.
fn join_children_properties(candidate: &PhysicalOp, required: &PhysicalProperty) -> Vec<PhysicalProperty> {
    let j = match &candidate.kind {
        PhysicalOpKind::Join(j) => j,
        _ => return vec![required.clone_essential_fields(), required.clone_essential_fields()],
    };

    match j.algorithm {
        JoinAlgorithm::MergeJoin { .. } => {
            let (_, direction_desc) = required.all_same_order();
            let (left_prop, right_prop) = join::merge_join_child_properties(j, direction_desc);
            vec![left_prop, right_prop]
        }
        JoinAlgorithm::IndexJoin | JoinAlgorithm::IndexHashJoin | JoinAlgorithm::IndexMergeJoin => {
            let outer_cols = match j.build_side {
                JoinSide::Left => &j.keys.right_keys,
                JoinSide::Right => &j.keys.left_keys,
            };
            let mut outer_prop = required.clone_essential_fields();
            if matches!(j.algorithm, JoinAlgorithm::IndexMergeJoin) {
                outer_prop.sort_items = outer_cols.iter().map(|c| SortItem::asc(c.clone())).collect();
            }
            let inner_prop = PhysicalProperty::empty();
            match j.build_side {
                JoinSide::Left => vec![inner_prop, outer_prop],
                JoinSide::Right => vec![outer_prop, inner_prop],
            }
        }
        JoinAlgorithm::HashJoin
        | JoinAlgorithm::BroadcastJoin
        | JoinAlgorithm::MppHashJoin
        | JoinAlgorithm::NestedLoopJoin => {
            vec![required.clone_essential_fields(), required.clone_essential_fields()]
        }
    }
}

/// Derives a join child's access paths, possible orderings and row
/// count directly from its logical sub-tree, looking through
/// `Selection`/`UnionScan` wrappers down to the underlying
/// `DataSource`. A simplification of what a real search driver would
/// supply (the already-enumerated best plans for the child); adequate
/// for driving the join physicalizer's own decisions, which only
/// consult these fields.
fn join_child_info(op: &LogicalOp, is_partitioned: bool) -> join::JoinChildInfo {
    fn find_data_source(op: &LogicalOp) -> Option<&LogicalDataSource> {
        match &op.kind {
            LogicalOpKind::DataSource(ds) => Some(ds),
            _ => op.children().into_iter().find_map(find_data_source),
        }
    }

    let data_source = find_data_source(op);
    let possible_orders = join::PossibleOrders(
        data_source
            .map(|ds| {
                ds.access_paths
                    .iter()
                    .map(|p| p.index_columns.iter().map(|c| SortItem::asc(c.clone())).collect())
                    .collect()
            })
            .unwrap_or_default(),
    );
    let access_paths = data_source.map(|ds| ds.access_paths.clone()).unwrap_or_default();

    join::JoinChildInfo {
        possible_orders,
        estimated_row_count: op.base.estimated_row_count,
        is_partitioned,
        access_paths,
    }
}
