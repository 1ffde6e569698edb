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

//! The index-join build helper: given an inner access path and the
//! outer join keys, derives prefix ranges over the index columns and
//! heuristically picks the best matching path among several
//! candidates.

use crate::access_path::AccessPath;
use crate::logical::JoinKeys;
use qopt_common::range::ColumnRange;
use qopt_common::services::{AccessPathDescriptor, ExpressionService, StatisticsService};
use qopt_common::{ColumnRef, Expr, Operator};

/// One inner index column bound to inequalities whose other side
/// references only outer columns: `<`/`<=`/`>`/`>=` op list, the
/// paired non-column expression, and the outer columns that
/// participate (used at execution time to dedup outer rows that would
/// yield the same inner range).
#[derive(Debug, Clone)]
pub struct ColWithCmpFuncManager {
    pub column: ColumnRef,
    pub op_kinds: Vec<Operator>,
    pub target_exprs: Vec<Expr>,
    pub affected_outer_columns: Vec<ColumnRef>,
}

impl ColWithCmpFuncManager {
    fn new(column: ColumnRef) -> Self {
        ColWithCmpFuncManager {
            column,
            op_kinds: Vec::new(),
            target_exprs: Vec::new(),
            affected_outer_columns: Vec::new(),
        }
    }

    fn push(&mut self, op: Operator, target: Expr, outer_columns: &[ColumnRef]) {
        self.op_kinds.push(op);
        self.target_exprs.push(target);
        for c in outer_columns {
            if !self.affected_outer_columns.contains(c) {
                self.affected_outer_columns.push(c.clone());
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.op_kinds.is_empty()
    }
}

/// One candidate's fully-resolved build result: which inner columns
/// matched outer keys or filters, the ranges to scan, the filters that
/// must be re-applied as a residual `Selection`, and the NDV used to
/// break ties against sibling candidates.
#[derive(Debug, Clone)]
pub struct IndexJoinBuildHelper {
    pub access_path: AccessPath,
    /// For each index column position, the outer join-key offset it's
    /// bound to, or `None`.
    pub key_off_to_idx_off: Vec<Option<usize>>,
    pub chosen_ranges: Vec<ColumnRange>,
    pub chosen_remained: Vec<Expr>,
    pub col_cmp_manager: Option<ColWithCmpFuncManager>,
    pub ndv_used: f64,
}

impl IndexJoinBuildHelper {
    pub fn used_columns_len(&self) -> usize {
        self.chosen_ranges.len()
    }

    pub fn remaining_conditions(&self) -> &[Expr] {
        &self.chosen_remained
    }
}

/// Maps each inner index column to the outer join-key position it
/// matches (by structural column equality and collation compatibility,
/// via the expression service), stopping mapping consideration for
/// columns that don't match any key — those remain `None` and must be
/// covered by a filter instead.
fn map_index_columns_to_keys(
    access_path: &AccessPath,
    keys: &JoinKeys,
    expr_service: &dyn ExpressionService,
) -> Vec<Option<usize>> {
    access_path
        .index_columns
        .iter()
        .map(|idx_col| {
            keys.left_keys.iter().position(|k| {
                expr_service.columns_equal(k, idx_col)
                    && expr_service.collation_compatible(
                        &Expr::Column(k.clone()),
                        &Expr::Column(idx_col.clone()),
                    )
            })
        })
        .collect()
}

/// Builds one candidate `IndexJoinBuildHelper` for `access_path`
/// against `keys` and the set of local filter conditions available on
/// the inner side (`other_conds` plus the inner side's own
/// conditions), following the five-step algorithm in the join
/// physicalizer's index-join family description.
pub fn build_index_join_helper(
    access_path: &AccessPath,
    keys: &JoinKeys,
    inner_conditions: &[Expr],
    outer_columns: &[ColumnRef],
    expr_service: &dyn ExpressionService,
    stats_service: &dyn StatisticsService,
) -> Option<IndexJoinBuildHelper> {
    if access_path.index_columns.is_empty() && !access_path.is_table_path {
        return None;
    }

    let key_off_to_idx_off = map_index_columns_to_keys(access_path, keys, expr_service);

    // Step 1/2: walk index columns in order, consuming an outer key
    // match or an eq/IN filter per position, stopping at the first
    // column satisfied by neither.
    let mut ranges = Vec::new();
    let mut consumed = vec![false; inner_conditions.len()];
    let mut ndv_cols = Vec::new();

    for (pos, idx_col) in access_path.index_columns.iter().enumerate() {
        if let Some(key_off) = key_off_to_idx_off[pos] {
            let _ = key_off;
            ranges.push(ColumnRange::point_placeholder());
            ndv_cols.push(idx_col.clone());
            continue;
        }

        // look for an eq/IN filter on this column among the
        // not-yet-consumed inner conditions.
        let found = inner_conditions.iter().enumerate().find(|(i, e)| {
            !consumed[*i] && matches_eq_or_in_filter(e, idx_col, expr_service)
        });

        match found {
            Some((i, e)) => {
                consumed[i] = true;
                ranges.push(range_from_eq_or_in(e, idx_col));
                ndv_cols.push(idx_col.clone());
            }
            None => break,
        }
    }

    let used_len = ranges.len();

    let col_cmp_manager = if used_len < access_path.index_columns.len() {
        // Step 4: the first uncovered column - try inequality bounds
        // referencing the outer row, else detach a local range.
        let col = &access_path.index_columns[used_len];
        let mut manager = ColWithCmpFuncManager::new(col.clone());
        for (i, e) in inner_conditions.iter().enumerate() {
            if consumed[i] {
                continue;
            }
            if let Some((c, op, other)) = e.as_column_comparison() {
                if c == col && op.is_inequality() && other.references_only(outer_columns) {
                    let outer_refs = other.extract_columns();
                    manager.push(op, other.clone(), &outer_refs);
                    consumed[i] = true;
                }
            }
        }
        if manager.is_empty() {
            let local: Vec<Expr> = inner_conditions
                .iter()
                .enumerate()
                .filter(|(i, e)| !consumed[*i] && e.references_only(std::slice::from_ref(col)))
                .map(|(_, e)| e.clone())
                .collect();
            if let Some(range) = expr_service.build_range_from_exprs(col, &local) {
                ranges.push(range);
                ndv_cols.push(col.clone());
                for (i, e) in inner_conditions.iter().enumerate() {
                    if local.contains(e) {
                        consumed[i] = true;
                    }
                }
            }
            None
        } else {
            Some(manager)
        }
    } else {
        None
    };

    if ranges.is_empty() {
        return None;
    }
    if ranges.iter().any(ColumnRange::is_statically_empty) {
        return None;
    }

    let chosen_remained: Vec<Expr> = inner_conditions
        .iter()
        .enumerate()
        .filter(|(i, _)| !consumed[*i])
        .map(|(_, e)| e.clone())
        .collect();

    let descriptor = AccessPathDescriptor {
        is_table_path: access_path.is_table_path,
        is_unique: access_path.is_common_handle_path || access_path.is_table_path,
        columns: ndv_cols.clone(),
    };
    let schema = qopt_common::schema::Schema::empty();
    let ndv_used = stats_service
        .cardinality(&ndv_cols, &schema)
        .unwrap_or(0.0);
    let _ = descriptor;

    Some(IndexJoinBuildHelper {
        access_path: access_path.clone(),
        key_off_to_idx_off,
        chosen_ranges: ranges,
        chosen_remained,
        col_cmp_manager,
        ndv_used,
    })
}

fn matches_eq_or_in_filter(e: &Expr, col: &ColumnRef, expr_service: &dyn ExpressionService) -> bool {
    match e {
        Expr::BinaryExpr { left, op: Operator::Eq, right } => {
            matches!(left.as_column(), Some(c) if expr_service.columns_equal(c, col))
                || matches!(right.as_column(), Some(c) if expr_service.columns_equal(c, col))
        }
        Expr::InList { expr, .. } => matches!(expr.as_column(), Some(c) if expr_service.columns_equal(c, col)),
        _ => false,
    }
}

fn range_from_eq_or_in(e: &Expr, _col: &ColumnRef) -> ColumnRange {
    match e {
        Expr::InList { list, .. } if list.len() == 1 => {
            if let Expr::Literal(v) = &list[0] {
                return ColumnRange::point_literal(v.clone());
            }
            ColumnRange::full()
        }
        Expr::BinaryExpr { left, right, .. } => {
            if let Expr::Literal(v) = left.as_ref() {
                return ColumnRange::point_literal(v.clone());
            }
            if let Expr::Literal(v) = right.as_ref() {
                return ColumnRange::point_literal(v.clone());
            }
            ColumnRange::full()
        }
        _ => ColumnRange::full(),
    }
}

/// Step 5: among candidates that produced usable ranges, pick the one
/// maximizing `(ndv_used, used_columns_len)` lexicographically, per
/// the NDV tie-break law.
pub fn choose_best_candidate(candidates: Vec<IndexJoinBuildHelper>) -> Option<IndexJoinBuildHelper> {
    candidates.into_iter().fold(None, |best, cand| match best {
        None => Some(cand),
        Some(b) => {
            let better = (cand.ndv_used, cand.used_columns_len())
                > (b.ndv_used, b.used_columns_len());
            Some(if better { cand } else { b })
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qopt_common::schema::{Schema, StoreEngine};

    struct StubExprService;
    impl ExpressionService for StubExprService {
        fn collation_compatible(&self, _left: &Expr, _right: &Expr) -> bool {
            true
        }
        fn can_push_down(&self, _exprs: &[Expr], _target_engine: StoreEngine) -> bool {
            true
        }
        fn build_range_from_exprs(&self, _column: &ColumnRef, exprs: &[Expr]) -> Option<ColumnRange> {
            exprs.first().map(|_| ColumnRange::full())
        }
    }

    struct StubStatsService(f64);
    impl StatisticsService for StubStatsService {
        fn selectivity(&self, _c: &[Expr], _a: &[AccessPathDescriptor]) -> Result<f64, String> {
            Ok(1.0)
        }
        fn cardinality(&self, _cols: &[ColumnRef], _schema: &Schema) -> Result<f64, String> {
            Ok(self.0)
        }
        fn avg_row_size(&self, _schema: &Schema, _engine: StoreEngine, _is_index: bool) -> f64 {
            8.0
        }
    }

    #[test]
    fn builds_point_range_on_matched_join_key() {
        let access_path = AccessPath::index_path(
            vec![ColumnRef::new("b", 1)],
            vec![None],
            StoreEngine::RowStore,
        );
        let keys = JoinKeys {
            left_keys: vec![ColumnRef::new("b", 1)],
            right_keys: vec![ColumnRef::new("a", 0)],
            null_eq_flags: vec![false],
        };
        let helper = build_index_join_helper(
            &access_path,
            &keys,
            &[],
            &[],
            &StubExprService,
            &StubStatsService(10.0),
        )
        .unwrap();
        assert_eq!(helper.chosen_ranges.len(), 1);
        assert!(helper.chosen_ranges[0].is_point());
    }

    #[test]
    fn tie_break_prefers_higher_ndv_then_more_columns() {
        let low = IndexJoinBuildHelper {
            access_path: AccessPath::table_path(StoreEngine::RowStore),
            key_off_to_idx_off: vec![],
            chosen_ranges: vec![ColumnRange::full()],
            chosen_remained: vec![],
            col_cmp_manager: None,
            ndv_used: 5.0,
        };
        let high = IndexJoinBuildHelper {
            ndv_used: 50.0,
            ..low.clone()
        };
        let chosen = choose_best_candidate(vec![low, high]).unwrap();
        assert_eq!(chosen.ndv_used, 50.0);
    }
}
