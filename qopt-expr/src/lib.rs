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

//! Sort/partitioning property algebra: `PhysicalProperty`, the
//! `SortItem` ordering it carries, equivalence-class tracking, and
//! prefix matching against an access path's candidate orderings.

pub mod equivalence;
pub mod property;
pub mod sort_item;
pub mod sort_prefix;

pub use equivalence::{EquivalenceProperties, EquivalentClass};
pub use property::{MppPartitionType, PhysicalProperty, TaskType};
pub use sort_item::SortItem;
pub use sort_prefix::{find_max_prefix_len, matched_prefix_len};
