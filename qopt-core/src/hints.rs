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

//! Join/agg hints as a bitset, not a class hierarchy.

/// Hint bits a logical operator may carry. A bitset rather than a
/// hierarchy of hint types, per the crate's design notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HintFlags(u32);

macro_rules! hint_bit {
    ($name:ident, $setter:ident, $bit:expr) => {
        pub const $name: HintFlags = HintFlags(1 << $bit);

        pub fn $setter(self) -> bool {
            self.0 & (1 << $bit) != 0
        }
    };
}

impl HintFlags {
    pub const NONE: HintFlags = HintFlags(0);

    hint_bit!(PREFER_MERGE_JOIN, prefer_merge_join, 0);
    hint_bit!(PREFER_HASH_JOIN, prefer_hash_join, 1);
    hint_bit!(PREFER_BROADCAST_JOIN, prefer_broadcast_join, 2);
    hint_bit!(PREFER_LEFT_AS_INLJ_INNER, prefer_left_as_inlj_inner, 3);
    hint_bit!(PREFER_RIGHT_AS_INLJ_INNER, prefer_right_as_inlj_inner, 4);
    hint_bit!(PREFER_LEFT_AS_INLHJ_INNER, prefer_left_as_inlhj_inner, 5);
    hint_bit!(PREFER_RIGHT_AS_INLHJ_INNER, prefer_right_as_inlhj_inner, 6);
    hint_bit!(PREFER_LEFT_AS_INLMJ_INNER, prefer_left_as_inlmj_inner, 7);
    hint_bit!(PREFER_RIGHT_AS_INLMJ_INNER, prefer_right_as_inlmj_inner, 8);
    hint_bit!(PREFER_LIMIT_TO_COP, prefer_limit_to_cop, 9);
    hint_bit!(PREFER_STREAM_AGG, prefer_stream_agg, 10);
    hint_bit!(PREFER_HASH_AGG, prefer_hash_agg, 11);
    hint_bit!(PREFER_AGG_TO_COP, prefer_agg_to_cop, 12);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: HintFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn union(self, other: HintFlags) -> HintFlags {
        HintFlags(self.0 | other.0)
    }

    /// Any `prefer_*_inlj/inlhj/inlmj_inner` bit set.
    pub fn prefers_index_join_family(self) -> bool {
        self.contains(Self::PREFER_LEFT_AS_INLJ_INNER)
            || self.contains(Self::PREFER_RIGHT_AS_INLJ_INNER)
            || self.contains(Self::PREFER_LEFT_AS_INLHJ_INNER)
            || self.contains(Self::PREFER_RIGHT_AS_INLHJ_INNER)
            || self.contains(Self::PREFER_LEFT_AS_INLMJ_INNER)
            || self.contains(Self::PREFER_RIGHT_AS_INLMJ_INNER)
    }
}

impl std::ops::BitOr for HintFlags {
    type Output = HintFlags;
    fn bitor(self, rhs: HintFlags) -> HintFlags {
        self.union(rhs)
    }
}

/// A stable warning code/message pair appended to the diagnostics sink
/// when a hint could not be honored, per the crate's hint-interpreter
/// contract.
pub struct HintWarning {
    pub code: &'static str,
    pub message: String,
}

impl HintWarning {
    pub fn inapplicable(hint_name: &'static str, detail: impl Into<String>) -> HintWarning {
        HintWarning {
            code: hint_name,
            message: format!("{hint_name} inapplicable: {}", detail.into()),
        }
    }
}
