// (C) Copyright IBM Corp. 2025.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod errors;
mod matches_attributes;
mod rule_operator;

use std::collections::HashMap;

use crate::models::Segment;
use crate::Value;
use matches_attributes::MatchesAttributes;

/// Whether the user belongs to `segment`.
///
/// Unknown segments, and segments without an id, have no members.
pub(crate) fn is_member(
    user_id: &str,
    attributes: &HashMap<String, Value>,
    segment: Option<&Segment>,
) -> bool {
    match segment {
        Some(segment) if !segment.id.is_empty() => {
            segment.matches_attributes(user_id, attributes)
        }
        _ => false,
    }
}

/// Whether the user belongs to every segment in `pre_requisites`.
pub(crate) fn prerequisites_satisfied(
    pre_requisites: &[String],
    segments: &HashMap<String, Segment>,
    user_id: &str,
    attributes: &HashMap<String, Value>,
) -> bool {
    pre_requisites
        .iter()
        .all(|segment_id| is_member(user_id, attributes, segments.get(segment_id)))
}
