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

//! Projection physicalization: rewrite each required SortItem through
//! the projection when its expression is a bare column; any
//! `ScalarFunction` in a SortItem disables pushthrough entirely.

use crate::logical::LogicalProjection;
use crate::physical::{BasePhysicalPlan, PhysProjection, PhysicalOp, PhysicalOpKind};
use qopt_common::Expr;
use qopt_expr::{PhysicalProperty, SortItem};

fn base() -> BasePhysicalPlan {
    BasePhysicalPlan {
        schema: std::sync::Arc::new(arrow_schema::Schema::empty()),
        block_offset: 0,
    }
}

/// Rewrites `item`'s column through `exprs` (the projection's output
/// list, indexed by position) if the underlying output expression is
/// a bare column; `None` if it is not (a `ScalarFunction` output
/// disables pushthrough for that item, per the projection
/// physicalizer's contract).
fn rewrite_through_projection(item: &SortItem, exprs: &[Expr]) -> Option<SortItem> {
    let out_idx = exprs
        .iter()
        .position(|e| matches!(e.as_column(), Some(c) if *c == item.column_ref))?;
    let out_expr = &exprs[out_idx];
    if out_expr.is_scalar_function() {
        return None;
    }
    out_expr.as_column().map(|c| SortItem {
        column_ref: c.clone(),
        descending: item.descending,
    })
}

pub fn physicalize_projection(
    projection: &LogicalProjection,
    required: &PhysicalProperty,
) -> (Vec<(PhysicalOp, PhysicalProperty)>, bool) {
    let mut child_prop = required.clone_essential_fields();
    let mut pushthrough_ok = true;
    let mut rewritten = Vec::with_capacity(required.sort_items.len());
    for item in &required.sort_items {
        match rewrite_through_projection(item, &projection.exprs) {
            Some(r) => rewritten.push(r),
            None => {
                pushthrough_ok = false;
                break;
            }
        }
    }
    child_prop.sort_items = if pushthrough_ok { rewritten } else { Vec::new() };

    (
        vec![(
            PhysicalOp::leaf(
                base(),
                PhysicalOpKind::Projection(PhysProjection {
                    exprs: projection.exprs.clone(),
                }),
            ),
            child_prop,
        )],
        true,
    )
}
