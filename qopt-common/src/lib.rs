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

//! Shared primitives for the `qopt` physical plan enumerator: the
//! error type, the scalar expression tree, schema plumbing, and the
//! read-only interfaces onto session configuration, statistics and
//! diagnostics that the enumerator crate (`qopt-core`) consumes.

pub mod column;
pub mod diagnostics;
pub mod error;
pub mod expr;
pub mod operator;
pub mod range;
pub mod schema;
pub mod services;
pub mod session;
pub mod value;

pub use column::ColumnRef;
pub use error::{Error, Result};
pub use expr::Expr;
pub use operator::Operator;
pub use value::ScalarValue;
