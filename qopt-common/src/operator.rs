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

/// The comparison/equality operators the enumerator reasons about
/// directly. Arithmetic and other scalar operators are opaque to it
/// (carried as `Expr::ScalarFunction`) since physicalization never
/// needs to evaluate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    NotEq,
    /// The null-safe equality operator `<=>`: `NULL <=> NULL` is true.
    NullSafeEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl Operator {
    pub fn is_inequality(self) -> bool {
        matches!(
            self,
            Operator::Lt | Operator::LtEq | Operator::Gt | Operator::GtEq
        )
    }

    /// Flips `a OP b` into the equivalent `b OP' a`.
    pub fn swap_sides(self) -> Operator {
        match self {
            Operator::Lt => Operator::Gt,
            Operator::LtEq => Operator::GtEq,
            Operator::Gt => Operator::Lt,
            Operator::GtEq => Operator::LtEq,
            other => other,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::NullSafeEq => "<=>",
            Operator::Lt => "<",
            Operator::LtEq => "<=",
            Operator::Gt => ">",
            Operator::GtEq => ">=",
        };
        write!(f, "{s}")
    }
}
