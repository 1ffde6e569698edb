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

//! `PhysicalProperty`: the contract a child plan fragment is required
//! to satisfy, and that a produced plan fragment is known to provide.
//! This is the value exchanged at every edge of the search: the
//! dispatcher asks each physicalizer "can you (optionally with an
//! enforcer) meet this property", and the physicalizer answers by
//! handing back a plan whose own provided property satisfies it.

use crate::sort_item::{all_same_order, no_duplicate_columns, SortItem};
use qopt_common::schema::{all_cols_from_schema, Schema};
use qopt_common::ColumnRef;
use std::collections::HashSet;

/// Which tier of the storage/compute stack a fragment is required to
/// run on. `Root` means "back in the driver"; the `Cop*` and `Mpp`
/// variants mean "pushed down", with increasing degrees of
/// distribution and columnar-ness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskType {
    Root,
    CopSingleReadTask,
    CopDoubleReadTask,
    CopFlashLocalTask,
    CopFlashGlobalTask,
    Mpp,
}

impl TaskType {
    pub fn is_cop(&self) -> bool {
        matches!(
            self,
            TaskType::CopSingleReadTask
                | TaskType::CopDoubleReadTask
                | TaskType::CopFlashLocalTask
                | TaskType::CopFlashGlobalTask
        )
    }
}

/// How rows are required to be partitioned across an MPP fragment's
/// instances. Only meaningful when `task_type == TaskType::Mpp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MppPartitionType {
    /// No partitioning requirement; any distribution satisfies it.
    Any,
    /// Every instance must see the full relation.
    Broadcast,
    /// Rows are partitioned by a hash of `mpp_partition_cols`.
    Hash,
    /// Exactly one instance, holding all rows.
    Singleton,
}

/// A requirement imposed on (or satisfied by) one plan fragment:
/// which tier it must run on, what ordering it must produce, how rows
/// must be distributed if it's an MPP fragment, and whether the
/// dispatcher is allowed to wrap a cheaper candidate in an enforcer
/// (a `Sort`/`Exchange`) to make it comply.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalProperty {
    pub task_type: TaskType,
    pub sort_items: Vec<SortItem>,
    /// A hint, not a hard bound: physicalizers may use it to prefer
    /// one join algorithm over another, but must not reject a
    /// candidate solely for exceeding it.
    pub expected_row_count: f64,
    pub mpp_partition_type: MppPartitionType,
    pub mpp_partition_cols: Vec<ColumnRef>,
    pub can_add_enforcer: bool,
}

impl PhysicalProperty {
    /// The property with no requirements at all: root task, no
    /// ordering, unbounded row count, no partitioning requirement.
    pub fn empty() -> Self {
        PhysicalProperty {
            task_type: TaskType::Root,
            sort_items: Vec::new(),
            expected_row_count: f64::MAX,
            mpp_partition_type: MppPartitionType::Any,
            mpp_partition_cols: Vec::new(),
            can_add_enforcer: true,
        }
    }

    /// `true` iff this property imposes no ordering, no partitioning,
    /// and targets the root task — the starting point of enumeration
    /// for a top-level plan.
    pub fn is_empty(&self) -> bool {
        self.task_type == TaskType::Root
            && self.sort_items.is_empty()
            && self.mpp_partition_type == MppPartitionType::Any
    }

    /// Internal-invariant check: no duplicate sort columns, and a
    /// hash partition type always carries at least one partition
    /// column. Debug-asserted at construction boundaries rather than
    /// enforced by the type itself, matching how the teacher validates
    /// `SymmetricHashJoinExec::try_new`'s `on` argument.
    pub fn is_well_formed(&self) -> bool {
        no_duplicate_columns(&self.sort_items)
            && self.expected_row_count >= 0.0
            && (self.mpp_partition_type != MppPartitionType::Hash
                || !self.mpp_partition_cols.is_empty())
    }

    /// `true` iff `self`'s ordering requirement is satisfied by a
    /// child that provides the property `child`: `self.sort_items` is
    /// a prefix of `child.sort_items` (same columns, same per-column
    /// direction, in the same order), `self`'s task type matches
    /// `child`'s, and `self`'s partitioning requirement is satisfied by
    /// `child`'s partitioning. An empty requirement is trivially a
    /// prefix of anything with a matching task type; `prop.is_prefix(
    /// &prop)` is always `true`.
    pub fn is_prefix(&self, child: &PhysicalProperty) -> bool {
        if self.task_type != child.task_type {
            return false;
        }
        if !self.partitioning_satisfied_by(child) {
            return false;
        }
        if self.sort_items.len() > child.sort_items.len() {
            return false;
        }
        self.sort_items
            .iter()
            .zip(child.sort_items.iter())
            .all(|(req, have)| req == have)
    }

    /// `true` iff a fragment partitioned as `child` satisfies `self`'s
    /// partitioning requirement: `Any` is satisfied by anything, every
    /// other partition type must match exactly (type and, for `Hash`,
    /// the partition columns too).
    fn partitioning_satisfied_by(&self, child: &PhysicalProperty) -> bool {
        match self.mpp_partition_type {
            MppPartitionType::Any => true,
            MppPartitionType::Hash => {
                child.mpp_partition_type == MppPartitionType::Hash
                    && self.mpp_partition_cols == child.mpp_partition_cols
            }
            _ => self.mpp_partition_type == child.mpp_partition_type,
        }
    }

    /// `true` iff every item of `sort_items` shares the same
    /// direction, paired with that direction (arbitrarily `false` when
    /// there are no items to disagree).
    pub fn all_same_order(&self) -> (bool, bool) {
        all_same_order(&self.sort_items)
    }

    /// A copy retaining only the fields that distinguish one required
    /// property from another for memoization purposes: task type,
    /// ordering, and MPP partitioning. `expected_row_count` and
    /// `can_add_enforcer` are cardinality/search-strategy hints, not
    /// part of the property's identity.
    pub fn clone_essential_fields(&self) -> Self {
        PhysicalProperty {
            task_type: self.task_type,
            sort_items: self.sort_items.clone(),
            expected_row_count: f64::MAX,
            mpp_partition_type: self.mpp_partition_type,
            mpp_partition_cols: self.mpp_partition_cols.clone(),
            can_add_enforcer: true,
        }
    }

    /// `true` iff every column this property mentions (sort items and
    /// partition columns) is drawn from `cols`.
    pub fn is_subset_of(&self, cols: &HashSet<ColumnRef>) -> bool {
        self.sort_items.iter().all(|s| cols.contains(&s.column_ref))
            && self
                .mpp_partition_cols
                .iter()
                .all(|c| cols.contains(c))
    }

    /// `true` iff every column this property mentions is present in
    /// `schema`.
    pub fn all_cols_from_schema(&self, schema: &Schema) -> bool {
        let sort_cols: Vec<ColumnRef> =
            self.sort_items.iter().map(|s| s.column_ref.clone()).collect();
        all_cols_from_schema(&sort_cols, schema)
            && all_cols_from_schema(&self.mpp_partition_cols, schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(name: &str, idx: usize) -> ColumnRef {
        ColumnRef::new(name, idx)
    }

    #[test]
    fn empty_property_is_empty() {
        assert!(PhysicalProperty::empty().is_empty());
    }

    #[test]
    fn prefix_requires_same_direction_and_order() {
        let mut p = PhysicalProperty::empty();
        p.sort_items = vec![SortItem::asc(c("a", 0))];

        let mut provided = PhysicalProperty::empty();
        provided.sort_items = vec![SortItem::asc(c("a", 0)), SortItem::asc(c("b", 1))];
        assert!(p.is_prefix(&provided));

        let mut wrong_dir = PhysicalProperty::empty();
        wrong_dir.sort_items = vec![SortItem::desc(c("a", 0)), SortItem::asc(c("b", 1))];
        assert!(!p.is_prefix(&wrong_dir));

        let too_short = PhysicalProperty::empty();
        assert!(!p.is_prefix(&too_short));
    }

    #[test]
    fn prefix_is_reflexive() {
        let mut p = PhysicalProperty::empty();
        p.sort_items = vec![SortItem::asc(c("a", 0))];
        p.mpp_partition_type = MppPartitionType::Hash;
        p.mpp_partition_cols = vec![c("a", 0)];
        assert!(p.is_prefix(&p));
    }

    #[test]
    fn prefix_rejects_mismatched_task_type() {
        let p = PhysicalProperty::empty();
        let mut other = PhysicalProperty::empty();
        other.task_type = TaskType::Mpp;
        assert!(!p.is_prefix(&other));
    }

    #[test]
    fn prefix_rejects_mismatched_hash_partition_columns() {
        let mut p = PhysicalProperty::empty();
        p.mpp_partition_type = MppPartitionType::Hash;
        p.mpp_partition_cols = vec![c("a", 0)];

        let mut other = PhysicalProperty::empty();
        other.mpp_partition_type = MppPartitionType::Hash;
        other.mpp_partition_cols = vec![c("b", 1)];
        assert!(!p.is_prefix(&other));
    }

    #[test]
    fn essential_fields_drop_row_count_and_enforcer_flag() {
        let mut p = PhysicalProperty::empty();
        p.expected_row_count = 42.0;
        p.can_add_enforcer = false;
        let essential = p.clone_essential_fields();
        assert_eq!(essential.expected_row_count, f64::MAX);
        assert!(essential.can_add_enforcer);
    }

    #[test]
    fn well_formed_rejects_duplicate_sort_columns() {
        let mut p = PhysicalProperty::empty();
        p.sort_items = vec![SortItem::asc(c("a", 0)), SortItem::desc(c("a", 0))];
        assert!(!p.is_well_formed());
    }

    #[test]
    fn well_formed_rejects_hash_partition_without_columns() {
        let mut p = PhysicalProperty::empty();
        p.mpp_partition_type = MppPartitionType::Hash;
        assert!(!p.is_well_formed());
        p.mpp_partition_cols = vec![c("a", 0)];
        assert!(p.is_well_formed());
    }
}
