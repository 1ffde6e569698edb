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

//! Sort physicalization: a materializing sort, plus a zero-cost
//! "nominal" sort when the request already matches the sort's own BY
//! items.

use crate::logical::LogicalSort;
use crate::physical::{BasePhysicalPlan, PhysSort, PhysicalOp, PhysicalOpKind};
use qopt_expr::PhysicalProperty;

fn base() -> BasePhysicalPlan {
    BasePhysicalPlan {
        schema: std::sync::Arc::new(arrow_schema::Schema::empty()),
        block_offset: 0,
    }
}

pub fn physicalize_sort(sort: &LogicalSort, required: &PhysicalProperty) -> Vec<(PhysicalOp, PhysicalProperty)> {
    let child_prop = {
        let mut p = required.clone_essential_fields();
        p.sort_items = Vec::new();
        p
    };

    let mut out = vec![(
        PhysicalOp::leaf(
            base(),
            PhysicalOpKind::Sort(PhysSort {
                by_items: sort.by_items.clone(),
                is_nominal: false,
            }),
        ),
        child_prop,
    )];

    if required.sort_items == sort.by_items {
        let mut nominal_child = required.clone_essential_fields();
        nominal_child.sort_items = sort.by_items.clone();
        out.push((
            PhysicalOp::leaf(
                base(),
                PhysicalOpKind::Sort(PhysSort {
                    by_items: sort.by_items.clone(),
                    is_nominal: true,
                }),
            ),
            nominal_child,
        ));
    }

    out
}
