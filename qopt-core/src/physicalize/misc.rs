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

//! Straightforward wrappers: Selection, Lock, MaxOneRow and Window
//! each just clone the request's essential fields through to their
//! single child (Window additionally prepends its PartitionBy/OrderBy
//! prefix); Dual and DataSource are leaves with no child property at
//! all; UnionScan passes its essential fields through unchanged and
//! carries its own filter conditions for the caller to republish.

use crate::logical::{LogicalDataSource, LogicalLock, LogicalMaxOneRow, LogicalSelection, LogicalUnionScan, LogicalWindow};
use crate::physical::{
    BasePhysicalPlan, PhysDual, PhysLock, PhysMaxOneRow, PhysSelection, PhysTableScan, PhysUnionScan, PhysWindow,
    PhysicalOp, PhysicalOpKind,
};
use qopt_expr::{PhysicalProperty, SortItem};

fn base() -> BasePhysicalPlan {
    BasePhysicalPlan {
        schema: std::sync::Arc::new(arrow_schema::Schema::empty()),
        block_offset: 0,
    }
}

pub fn physicalize_selection(sel: &LogicalSelection, required: &PhysicalProperty) -> (PhysicalOp, PhysicalProperty) {
    (
        PhysicalOp::leaf(base(), PhysicalOpKind::Selection(PhysSelection { conditions: sel.conditions.clone() })),
        required.clone_essential_fields(),
    )
}

pub fn physicalize_lock(_lock: &LogicalLock, required: &PhysicalProperty) -> (PhysicalOp, PhysicalProperty) {
    (
        PhysicalOp::leaf(base(), PhysicalOpKind::Lock(PhysLock)),
        required.clone_essential_fields(),
    )
}

pub fn physicalize_max_one_row(_m: &LogicalMaxOneRow, required: &PhysicalProperty) -> (PhysicalOp, PhysicalProperty) {
    (
        PhysicalOp::leaf(base(), PhysicalOpKind::MaxOneRow(PhysMaxOneRow)),
        required.clone_essential_fields(),
    )
}

pub fn physicalize_window(window: &LogicalWindow, required: &PhysicalProperty) -> (PhysicalOp, PhysicalProperty) {
    let mut child_prop = required.clone_essential_fields();
    let mut prefix: Vec<SortItem> = window.partition_by.iter().map(|c| SortItem::asc(c.clone())).collect();
    prefix.extend(window.order_by.clone());
    child_prop.sort_items = prefix;
    (
        PhysicalOp::leaf(
            base(),
            PhysicalOpKind::Window(PhysWindow {
                partition_by: window.partition_by.clone(),
                order_by: window.order_by.clone(),
            }),
        ),
        child_prop,
    )
}

pub fn physicalize_union_scan(union_scan: &LogicalUnionScan, required: &PhysicalProperty) -> (PhysicalOp, PhysicalProperty) {
    (
        PhysicalOp::leaf(
            base(),
            PhysicalOpKind::UnionScan(PhysUnionScan { conditions: union_scan.conditions.clone() }),
        ),
        required.clone_essential_fields(),
    )
}

pub fn physicalize_dual() -> PhysicalOp {
    PhysicalOp::leaf(base(), PhysicalOpKind::Dual(PhysDual))
}

pub fn physicalize_data_source(ds: &LogicalDataSource) -> PhysicalOp {
    let access_path = ds
        .access_paths
        .first()
        .cloned()
        .unwrap_or_else(|| crate::access_path::AccessPath::table_path(qopt_common::schema::StoreEngine::RowStore));
    PhysicalOp::leaf(base(), PhysicalOpKind::TableScan(PhysTableScan { access_path }))
}
