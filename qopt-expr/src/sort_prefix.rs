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

//! Matches a required ordering against an access path's several
//! candidate provided orderings (e.g. one per index), picking the
//! longest usable prefix. Equivalence-aware: a provided column
//! satisfies a required column if they're known to carry the same
//! value in every row.

use crate::equivalence::EquivalenceProperties;
use crate::sort_item::SortItem;

/// Length of the longest prefix of `required` that `provided`
/// satisfies, treating columns related by `equivalences` as
/// interchangeable. Direction must still match exactly; an
/// equivalence class never bridges an ASC requirement to a DESC
/// provided column.
///
/// First-match-wins: this does not search for the longest prefix
/// achievable by reordering `provided`, only the longest contiguous
/// prefix `provided` already presents in its own order.
pub fn matched_prefix_len(
    required: &[SortItem],
    provided: &[SortItem],
    equivalences: &EquivalenceProperties,
) -> usize {
    let mut n = 0;
    for (req, have) in required.iter().zip(provided.iter()) {
        if req.descending != have.descending {
            break;
        }
        if !equivalences.are_equivalent(&req.column_ref, &have.column_ref) {
            break;
        }
        n += 1;
    }
    n
}

/// Picks the candidate ordering (by index into `candidates`) that
/// satisfies the longest prefix of `required`, returning `None` if no
/// candidate satisfies even the first required column (an empty
/// `required` is satisfied by any candidate, including none at all —
/// callers should special-case `required.is_empty()` before relying
/// on this returning `Some`).
///
/// Ties are broken by first match: candidates are scanned in order
/// and a later candidate only displaces the current best by
/// strictly beating its matched length, so that identical matches
/// among several indexes deterministically keep the earliest.
pub fn find_max_prefix_len(
    required: &[SortItem],
    candidates: &[Vec<SortItem>],
    equivalences: &EquivalenceProperties,
) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for (idx, provided) in candidates.iter().enumerate() {
        let len = matched_prefix_len(required, provided, equivalences);
        if len == 0 {
            continue;
        }
        match best {
            Some((_, best_len)) if best_len >= len => {}
            _ => best = Some((idx, len)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use qopt_common::ColumnRef;

    fn c(name: &str, idx: usize) -> ColumnRef {
        ColumnRef::new(name, idx)
    }

    #[test]
    fn matches_exact_prefix() {
        let eq = EquivalenceProperties::new();
        let required = vec![SortItem::asc(c("a", 0)), SortItem::asc(c("b", 1))];
        let provided = vec![
            SortItem::asc(c("a", 0)),
            SortItem::asc(c("b", 1)),
            SortItem::asc(c("c", 2)),
        ];
        assert_eq!(matched_prefix_len(&required, &provided, &eq), 2);
    }

    #[test]
    fn stops_at_direction_mismatch() {
        let eq = EquivalenceProperties::new();
        let required = vec![SortItem::asc(c("a", 0)), SortItem::desc(c("b", 1))];
        let provided = vec![SortItem::asc(c("a", 0)), SortItem::asc(c("b", 1))];
        assert_eq!(matched_prefix_len(&required, &provided, &eq), 1);
    }

    #[test]
    fn equivalence_bridges_different_columns() {
        let mut eq = EquivalenceProperties::new();
        eq.add_equal_conditions(&c("a", 0), &c("x", 3));
        let required = vec![SortItem::asc(c("a", 0))];
        let provided = vec![SortItem::asc(c("x", 3))];
        assert_eq!(matched_prefix_len(&required, &provided, &eq), 1);
    }

    #[test]
    fn find_max_prefix_keeps_first_on_tie() {
        let eq = EquivalenceProperties::new();
        let required = vec![SortItem::asc(c("a", 0))];
        let candidates = vec![
            vec![SortItem::asc(c("a", 0))],
            vec![SortItem::asc(c("a", 0)), SortItem::asc(c("b", 1))],
        ];
        let (idx, len) = find_max_prefix_len(&required, &candidates, &eq).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(len, 1);
    }

    #[test]
    fn find_max_prefix_prefers_strictly_longer_later_candidate() {
        let eq = EquivalenceProperties::new();
        let required = vec![SortItem::asc(c("a", 0)), SortItem::asc(c("b", 1))];
        let candidates = vec![
            vec![SortItem::asc(c("a", 0))],
            vec![SortItem::asc(c("a", 0)), SortItem::asc(c("b", 1))],
        ];
        let (idx, len) = find_max_prefix_len(&required, &candidates, &eq).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(len, 2);
    }
}
