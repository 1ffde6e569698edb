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

//! The physical plan enumerator: given a logical operator tree and a
//! required `PhysicalProperty`, derives the physical alternatives that
//! satisfy it, plus the child properties a cost-based search driver
//! would need to recurse with. The dispatcher (`dispatcher::enumerate`)
//! is the sole entry point; everything else in this crate supports it.

pub mod access_path;
pub mod dispatcher;
pub mod hints;
pub mod logical;
pub mod physical;
pub mod physicalize;

pub use dispatcher::{enumerate, EnumerateResult};
pub use physicalize::context::EnumContext;
