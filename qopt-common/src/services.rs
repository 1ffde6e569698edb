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

//! Narrow interfaces onto the collaborators the enumerator consumes
//! but does not own: the expression service (structural reasoning
//! over `Expr`s) and the statistics service (selectivity, NDV, row
//! size). Neither is implemented in this crate — the planner wires a
//! real implementation in; tests use a stub.

use crate::column::ColumnRef;
use crate::expr::Expr;
use crate::range::ColumnRange;
use crate::schema::{Schema, StoreEngine};

/// A lightweight description of an access path, just enough for the
/// statistics service to estimate selectivity against. The richer
/// `AccessPath` the index-join build helper works with lives in
/// `qopt-core`; it is reduced to this shape at the service boundary.
#[derive(Debug, Clone)]
pub struct AccessPathDescriptor {
    pub is_table_path: bool,
    pub is_unique: bool,
    pub columns: Vec<ColumnRef>,
}

pub trait ExpressionService {
    /// Structural equality on column references (`ColumnRef`'s
    /// `PartialEq` already gives us this; the indirection exists so
    /// future collation-aware equality can live behind the trait).
    fn columns_equal(&self, a: &ColumnRef, b: &ColumnRef) -> bool {
        a == b
    }

    fn extract_columns(&self, expr: &Expr) -> Vec<ColumnRef> {
        expr.extract_columns()
    }

    /// `true` iff `left` and `right` share a collation compatible
    /// enough to order or join on directly (see the merge-join and
    /// index-merge-join boundaries in the crate docs).
    fn collation_compatible(&self, left: &Expr, right: &Expr) -> bool;

    /// `true` iff every expression in `exprs` can be evaluated by
    /// `target_engine` without bringing rows back to the driver
    /// first.
    fn can_push_down(&self, exprs: &[Expr], target_engine: StoreEngine) -> bool;

    /// Builds a single-column range from a set of filter expressions
    /// already known to reference only `column`. Returns `None` if
    /// the expressions don't reduce to a usable range (e.g. a
    /// non-comparison predicate).
    fn build_range_from_exprs(&self, column: &ColumnRef, exprs: &[Expr]) -> Option<ColumnRange>;

    /// `true` iff `column` has an enumerable/set type (`ENUM`, `SET`)
    /// rather than a type with the usual total order. Arrow's schema
    /// has no such variant, so this domain fact lives behind the
    /// service rather than on `Schema`/`DataType` directly. Merge-join
    /// and index-merge-join keys of this type are excluded (see the
    /// join boundaries in the crate docs). Default `false`: no column
    /// is enum/set-typed unless the service says otherwise.
    fn is_enum_or_set_type(&self, column: &ColumnRef) -> bool {
        let _ = column;
        false
    }
}

pub trait StatisticsService {
    /// Estimated fraction of rows surviving `conditions`, given the
    /// set of access paths under consideration. `Err` / a
    /// non-positive result means "no estimate" — per the crate docs,
    /// callers substitute the session's selection factor and
    /// continue; this is never propagated as a hard error.
    fn selectivity(
        &self,
        conditions: &[Expr],
        access_paths: &[AccessPathDescriptor],
    ) -> Result<f64, String>;

    /// Number of distinct values `cols` take on, used to break ties
    /// between index-join candidate paths.
    fn cardinality(&self, cols: &[ColumnRef], schema: &Schema) -> Result<f64, String>;

    fn avg_row_size(&self, schema: &Schema, engine: StoreEngine, is_index: bool) -> f64;
}
