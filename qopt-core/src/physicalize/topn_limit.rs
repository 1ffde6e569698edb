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

//! TopN and Limit physicalization, sharing the `can_push_to_remote`
//! pushdown guard with Aggregation and the broader join
//! pushdown-safety check.

use crate::hints::HintFlags;
use crate::logical::{LogicalLimit, LogicalTopN};
use crate::physical::{BasePhysicalPlan, PhysLimit, PhysTopN, PhysicalOp, PhysicalOpKind};
use crate::physicalize::context::{can_push_to_remote, EnumContext};
use qopt_common::schema::StoreEngine;
use qopt_expr::{PhysicalProperty, TaskType};

fn base() -> BasePhysicalPlan {
    BasePhysicalPlan {
        schema: std::sync::Arc::new(arrow_schema::Schema::empty()),
        block_offset: 0,
    }
}

const PUSHABLE_TASKS: [TaskType; 4] = [
    TaskType::Root,
    TaskType::CopSingleReadTask,
    TaskType::CopDoubleReadTask,
    TaskType::CopFlashLocalTask,
];

pub fn physicalize_topn(
    topn: &LogicalTopN,
    required: &PhysicalProperty,
    child_provides: &[qopt_expr::SortItem],
    conditions: &[qopt_common::Expr],
    ctx: &EnumContext,
) -> (Vec<(PhysicalOp, PhysicalProperty)>, bool) {
    let mut out = Vec::new();
    for &task_type in &PUSHABLE_TASKS {
        if task_type != TaskType::Root && !can_push_to_remote(conditions, engine_for(task_type), ctx) {
            continue;
        }
        let mut child_prop = required.clone_essential_fields();
        child_prop.task_type = task_type;
        out.push((
            PhysicalOp::leaf(
                base(),
                PhysicalOpKind::TopN(PhysTopN {
                    by_items: topn.by_items.clone(),
                    offset: topn.offset,
                    count: topn.count,
                }),
            ),
            child_prop,
        ));
    }

    // A Limit variant preserving order when the child already
    // provides the TopN's BY items.
    if qopt_expr::matched_prefix_len(&topn.by_items, child_provides, &qopt_expr::EquivalenceProperties::new())
        == topn.by_items.len()
    {
        let mut child_prop = required.clone_essential_fields();
        child_prop.sort_items = topn.by_items.clone();
        out.push((
            PhysicalOp::leaf(
                base(),
                PhysicalOpKind::Limit(PhysLimit {
                    offset: topn.offset,
                    count: topn.count,
                    preserves_order: true,
                }),
            ),
            child_prop,
        ));
    }

    (out, true)
}

pub fn physicalize_limit(
    limit: &LogicalLimit,
    required: &PhysicalProperty,
    conditions: &[qopt_common::Expr],
    ctx: &EnumContext,
) -> (Vec<(PhysicalOp, PhysicalProperty)>, bool) {
    let mut out = Vec::new();
    for &task_type in &PUSHABLE_TASKS {
        if task_type != TaskType::Root && !can_push_to_remote(conditions, engine_for(task_type), ctx) {
            continue;
        }
        let mut child_prop = required.clone_essential_fields();
        child_prop.task_type = task_type;
        out.push((
            PhysicalOp::leaf(
                base(),
                PhysicalOpKind::Limit(PhysLimit {
                    offset: limit.offset,
                    count: limit.count,
                    preserves_order: false,
                }),
            ),
            child_prop,
        ));
    }
    let hint_satisfied = !limit.hints.contains(HintFlags::PREFER_LIMIT_TO_COP)
        || out.iter().any(|(_, p)| p.task_type != TaskType::Root);
    (out, hint_satisfied)
}

fn engine_for(task_type: TaskType) -> StoreEngine {
    match task_type {
        TaskType::CopFlashLocalTask | TaskType::CopFlashGlobalTask | TaskType::Mpp => StoreEngine::ColumnStore,
        _ => StoreEngine::RowStore,
    }
}
