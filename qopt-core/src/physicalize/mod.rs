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

//! One submodule per logical operator kind, plus the shared
//! `EnumContext` collaborators bundle and the index-join build helper
//! that the join physicalizer leans on.

pub mod agg;
pub mod context;
pub mod index_join;
pub mod join;
pub mod misc;
pub mod projection;
pub mod sort;
pub mod topn_limit;
pub mod union;
