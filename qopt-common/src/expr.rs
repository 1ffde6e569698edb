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

//! A small scalar-expression tree. The enumerator is never asked to
//! evaluate these; it only inspects their shape (is this a bare
//! column? an equality between a column and an outer-row reference? a
//! conjunction it can split apart?).

use crate::column::ColumnRef;
use crate::operator::Operator;
use crate::value::ScalarValue;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Column(ColumnRef),
    Literal(ScalarValue),
    BinaryExpr {
        left: Arc<Expr>,
        op: Operator,
        right: Arc<Expr>,
    },
    InList {
        expr: Arc<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
    /// An opaque call the enumerator does not interpret, e.g. a cast
    /// or a string function. Present so `Expr` can round-trip
    /// arbitrary filter conditions without evaluating them.
    ScalarFunction { name: Arc<str>, args: Vec<Expr> },
}

impl Expr {
    pub fn column(name: impl Into<Arc<str>>, index: usize) -> Self {
        Expr::Column(ColumnRef::new(name, index))
    }

    pub fn eq(left: Expr, right: Expr) -> Self {
        Expr::BinaryExpr {
            left: Arc::new(left),
            op: Operator::Eq,
            right: Arc::new(right),
        }
    }

    pub fn binary(left: Expr, op: Operator, right: Expr) -> Self {
        Expr::BinaryExpr {
            left: Arc::new(left),
            op,
            right: Arc::new(right),
        }
    }

    /// `Some(column_ref)` iff this expression is nothing but a bare
    /// column reference.
    pub fn as_column(&self) -> Option<&ColumnRef> {
        match self {
            Expr::Column(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_scalar_function(&self) -> bool {
        matches!(self, Expr::ScalarFunction { .. })
    }

    /// Collects every distinct column reference touched by this
    /// expression, in first-seen order.
    pub fn extract_columns(&self) -> Vec<ColumnRef> {
        let mut out = Vec::new();
        self.extract_columns_into(&mut out);
        out
    }

    fn extract_columns_into(&self, out: &mut Vec<ColumnRef>) {
        match self {
            Expr::Column(c) => {
                if !out.contains(c) {
                    out.push(c.clone());
                }
            }
            Expr::Literal(_) => {}
            Expr::BinaryExpr { left, right, .. } => {
                left.extract_columns_into(out);
                right.extract_columns_into(out);
            }
            Expr::InList { expr, list, .. } => {
                expr.extract_columns_into(out);
                for item in list {
                    item.extract_columns_into(out);
                }
            }
            Expr::ScalarFunction { args, .. } => {
                for a in args {
                    a.extract_columns_into(out);
                }
            }
        }
    }

    /// True iff every column this expression touches belongs to
    /// `schema_columns` (used to tell "outer row reference" filters
    /// apart from ordinary local predicates).
    pub fn references_only(&self, schema_columns: &[ColumnRef]) -> bool {
        self.extract_columns()
            .iter()
            .all(|c| schema_columns.contains(c))
    }

    /// If this expression is `column OP other` or `other OP column`
    /// for a comparison operator, returns `(column, op, other)` with
    /// `op` normalized to read left-to-right from `column`.
    pub fn as_column_comparison(&self) -> Option<(&ColumnRef, Operator, &Expr)> {
        if let Expr::BinaryExpr { left, op, right } = self {
            if !op.is_inequality() && *op != Operator::Eq {
                return None;
            }
            if let Expr::Column(c) = left.as_ref() {
                return Some((c, *op, right.as_ref()));
            }
            if let Expr::Column(c) = right.as_ref() {
                return Some((c, op.swap_sides(), left.as_ref()));
            }
        }
        None
    }

    /// Splits a top-level conjunction (`a AND b AND c`) into its
    /// conjuncts. A non-conjunction expression is returned as a
    /// single-element vector.
    pub fn split_conjunction(&self) -> Vec<&Expr> {
        let mut out = Vec::new();
        self.split_conjunction_into(&mut out);
        out
    }

    fn split_conjunction_into<'a>(&'a self, out: &mut Vec<&'a Expr>) {
        match self {
            Expr::ScalarFunction { name, args } if name.as_ref() == "and" && args.len() == 2 => {
                args[0].split_conjunction_into(out);
                args[1].split_conjunction_into(out);
            }
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_columns_dedups_and_preserves_order() {
        let e = Expr::binary(
            Expr::column("a", 0),
            Operator::Lt,
            Expr::binary(Expr::column("b", 1), Operator::Eq, Expr::column("a", 0)),
        );
        let cols = e.extract_columns();
        assert_eq!(cols, vec![ColumnRef::new("a", 0), ColumnRef::new("b", 1)]);
    }

    #[test]
    fn as_column_comparison_normalizes_swapped_sides() {
        let e = Expr::binary(
            Expr::Literal(ScalarValue::Int64(10)),
            Operator::Lt,
            Expr::column("c", 2),
        );
        let (col, op, other) = e.as_column_comparison().unwrap();
        assert_eq!(col, &ColumnRef::new("c", 2));
        assert_eq!(op, Operator::Gt);
        assert_eq!(other, &Expr::Literal(ScalarValue::Int64(10)));
    }
}
