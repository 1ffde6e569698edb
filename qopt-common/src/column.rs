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

//! A structural reference to a column in some relation's schema.

use std::sync::Arc;

/// Refers to a column by its position in a schema. Two `ColumnRef`s
/// are structurally equal iff they share both `name` and `index` —
/// this is the "structural equality on column references" the
/// expression service is required to provide (see the crate docs).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub name: Arc<str>,
    pub index: usize,
}

impl ColumnRef {
    pub fn new(name: impl Into<Arc<str>>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, self.index)
    }
}
