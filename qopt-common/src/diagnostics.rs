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

//! Hint inapplicability is a user-visible warning, not an error: it
//! goes through this sink with a stable message key rather than
//! bubbling up as a `Result::Err`.

use std::cell::RefCell;

pub trait DiagnosticsSink {
    fn append_warning(&self, code: &'static str, message: String);
}

/// An in-memory sink for tests and for callers that just want to
/// collect warnings for the statement and render them later.
#[derive(Debug, Default)]
pub struct RecordingDiagnosticsSink {
    warnings: RefCell<Vec<(&'static str, String)>>,
}

impl RecordingDiagnosticsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<(&'static str, String)> {
        self.warnings.borrow().clone()
    }
}

impl DiagnosticsSink for RecordingDiagnosticsSink {
    fn append_warning(&self, code: &'static str, message: String) {
        log::debug!("warning[{code}]: {message}");
        self.warnings.borrow_mut().push((code, message));
    }
}
