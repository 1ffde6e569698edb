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

//! The bundle of read-only collaborators every physicalizer is handed,
//! the way a `PhysicalOptimizerRule::optimize` call is handed a
//! `&ConfigOptions` plus whatever else the rule needs.

use qopt_common::services::{ExpressionService, StatisticsService};
use qopt_common::session::SessionContext;
use qopt_common::diagnostics::DiagnosticsSink;

pub struct EnumContext<'a> {
    pub session: &'a dyn SessionContext,
    pub expr_service: &'a dyn ExpressionService,
    pub stats_service: &'a dyn StatisticsService,
    pub diagnostics: &'a dyn DiagnosticsSink,
}

impl<'a> EnumContext<'a> {
    pub fn new(
        session: &'a dyn SessionContext,
        expr_service: &'a dyn ExpressionService,
        stats_service: &'a dyn StatisticsService,
        diagnostics: &'a dyn DiagnosticsSink,
    ) -> Self {
        EnumContext {
            session,
            expr_service,
            stats_service,
            diagnostics,
        }
    }

    /// Falls back to the session's configured selection factor and
    /// logs at debug level when `selectivity` could not produce an
    /// estimate — the "recoverable analysis failure" path from the
    /// crate's error-handling design, never surfaced as an `Err`.
    pub fn selectivity_or_fallback(&self, conditions: &[qopt_common::Expr], access_paths: &[qopt_common::services::AccessPathDescriptor]) -> f64 {
        match self.stats_service.selectivity(conditions, access_paths) {
            Ok(s) if s > 0.0 => s,
            Ok(_) => {
                log::debug!("selectivity estimate <= 0, falling back to selection_factor");
                self.session.selection_factor()
            }
            Err(e) => {
                log::debug!("selectivity estimation failed ({e}), falling back to selection_factor");
                self.session.selection_factor()
            }
        }
    }
}

/// `true` iff `access_path`'s store engine can be reached without
/// bringing rows back to the driver first, for every expression in
/// `conditions`. Shared by the join physicalizer's MPP/broadcast fast
/// exit, by aggregation's MPP-engine enumeration, and by TopN/Limit's
/// pushdown guard, replacing three independent copies of the same
/// pushdown-safety check.
pub fn can_push_to_remote(
    conditions: &[qopt_common::Expr],
    target_engine: qopt_common::schema::StoreEngine,
    ctx: &EnumContext,
) -> bool {
    ctx.expr_service.can_push_down(conditions, target_engine)
}
