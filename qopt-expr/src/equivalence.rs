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

//! Tracks which columns are known to carry the same value in every
//! row of a relation, so that an ordering on one member of a class
//! satisfies a requirement phrased in terms of another. Equivalence
//! classes come from equi-join conditions and equality filters.

use qopt_common::ColumnRef;
use std::collections::HashSet;

/// A set of columns known to be pairwise equal in every row.
#[derive(Debug, Clone)]
pub struct EquivalentClass {
    head: ColumnRef,
    others: HashSet<ColumnRef>,
}

impl EquivalentClass {
    pub fn new(head: ColumnRef, others: Vec<ColumnRef>) -> Self {
        EquivalentClass {
            head,
            others: others.into_iter().collect(),
        }
    }

    pub fn contains(&self, col: &ColumnRef) -> bool {
        self.head == *col || self.others.contains(col)
    }

    pub fn insert(&mut self, col: ColumnRef) -> bool {
        self.head != col && self.others.insert(col)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnRef> {
        std::iter::once(&self.head).chain(self.others.iter())
    }

    pub fn len(&self) -> usize {
        self.others.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// A collection of `EquivalentClass`es built up from equi-join keys
/// and equality filters over the course of enumerating one operator.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceProperties {
    classes: Vec<EquivalentClass>,
}

impl EquivalenceProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> &[EquivalentClass] {
        &self.classes
    }

    pub fn extend<I: IntoIterator<Item = EquivalentClass>>(&mut self, iter: I) {
        self.classes.extend(iter);
    }

    /// Folds a newly discovered `left = right` equality into the
    /// class structure, merging two existing classes if the equality
    /// bridges them.
    pub fn add_equal_conditions(&mut self, left: &ColumnRef, right: &ColumnRef) {
        let mut idx1: Option<usize> = None;
        let mut idx2: Option<usize> = None;
        for (idx, class) in self.classes.iter_mut().enumerate() {
            let contains_left = class.contains(left);
            let contains_right = class.contains(right);
            match (contains_left, contains_right) {
                (true, false) => {
                    class.insert(right.clone());
                    idx1 = Some(idx);
                }
                (false, true) => {
                    class.insert(left.clone());
                    idx2 = Some(idx);
                }
                (true, true) => {
                    idx1 = Some(idx);
                    idx2 = Some(idx);
                    break;
                }
                (false, false) => {}
            }
        }
        match (idx1, idx2) {
            (Some(i1), Some(i2)) if i1 != i2 => {
                let moved = self.classes.remove(i2);
                let i1 = if i2 < i1 { i1 - 1 } else { i1 };
                for col in moved.iter() {
                    self.classes[i1].insert(col.clone());
                }
            }
            (None, None) => {
                self.classes
                    .push(EquivalentClass::new(left.clone(), vec![right.clone()]));
            }
            _ => {}
        }
    }

    /// `true` iff `a` and `b` are known to carry the same value in
    /// every row, either because they're the same column or because
    /// they've been folded into the same equivalence class.
    pub fn are_equivalent(&self, a: &ColumnRef, b: &ColumnRef) -> bool {
        a == b || self.classes.iter().any(|c| c.contains(a) && c.contains(b))
    }

    /// Rewrites `col` to the canonical (class head) representative if
    /// it belongs to a known equivalence class, otherwise returns it
    /// unchanged. Used to normalize a required ordering's columns
    /// before comparing it against a child's provided ordering.
    pub fn normalize(&self, col: &ColumnRef) -> ColumnRef {
        for class in &self.classes {
            if class.contains(col) {
                return class.head.clone();
            }
        }
        col.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(name: &str, idx: usize) -> ColumnRef {
        ColumnRef::new(name, idx)
    }

    #[test]
    fn merges_classes_on_bridging_equality() {
        let mut eq = EquivalenceProperties::new();
        eq.add_equal_conditions(&c("a", 0), &c("b", 1));
        eq.add_equal_conditions(&c("x", 3), &c("y", 4));
        assert_eq!(eq.classes().len(), 2);
        eq.add_equal_conditions(&c("b", 1), &c("x", 3));
        assert_eq!(eq.classes().len(), 1);
        assert!(eq.are_equivalent(&c("a", 0), &c("y", 4)));
    }

    #[test]
    fn normalize_returns_class_head() {
        let mut eq = EquivalenceProperties::new();
        eq.add_equal_conditions(&c("a", 0), &c("b", 1));
        assert_eq!(eq.normalize(&c("b", 1)), c("a", 0));
        assert_eq!(eq.normalize(&c("z", 9)), c("z", 9));
    }
}
