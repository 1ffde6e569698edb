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

//! UnionAll physicalization: all children must run at the same task
//! type; an MPP variant is offered in addition when the requested
//! property is the root/empty property.

use crate::logical::LogicalUnionAll;
use crate::physical::{BasePhysicalPlan, PhysUnionAll, PhysicalOp, PhysicalOpKind};
use crate::physicalize::context::EnumContext;
use qopt_expr::{PhysicalProperty, TaskType};

fn base() -> BasePhysicalPlan {
    BasePhysicalPlan {
        schema: std::sync::Arc::new(arrow_schema::Schema::empty()),
        block_offset: 0,
    }
}

pub fn physicalize_union_all(
    union: &LogicalUnionAll,
    required: &PhysicalProperty,
    ctx: &EnumContext,
) -> Vec<(PhysicalOp, Vec<PhysicalProperty>)> {
    let n = union.children.len();
    let child_prop = required.clone_essential_fields();
    let mut out = vec![(
        PhysicalOp::leaf(base(), PhysicalOpKind::UnionAll(PhysUnionAll { is_mpp: false })),
        vec![child_prop.clone(); n],
    )];

    if required.is_empty() && ctx.session.mpp_allowed() {
        let mut mpp_child = child_prop;
        mpp_child.task_type = TaskType::Mpp;
        out.push((
            PhysicalOp::leaf(base(), PhysicalOpKind::UnionAll(PhysUnionAll { is_mpp: true })),
            vec![mpp_child; n],
        ));
    }

    out
}
