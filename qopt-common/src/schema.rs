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

//! Schema plumbing. We reuse `arrow_schema` for the schema/field/type
//! model rather than inventing one, the way `datafusion-common` reuses
//! `arrow` throughout.

pub use arrow_schema::{DataType, Field, Schema, SchemaRef};

use crate::column::ColumnRef;

/// Which storage engine a physical fragment targets. Mirrors
/// `PhysicalProperty::task_type`'s distinction between a row-oriented
/// remote store reachable through a coprocessor and a columnar remote
/// store reachable through MPP/flash reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreEngine {
    RowStore,
    ColumnStore,
}

/// True iff every column referenced by `cols` is present in `schema`
/// (by name).
pub fn all_cols_from_schema(cols: &[ColumnRef], schema: &Schema) -> bool {
    cols.iter()
        .all(|c| schema.fields().iter().any(|f| f.name() == c.name.as_ref()))
}
