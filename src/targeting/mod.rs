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

//! Decides which variant of a flag a user receives.

mod bucketing;
mod errors;

use std::collections::HashMap;

use crate::models::{Flag, Segment};
use crate::segment_evaluation::{is_member, prerequisites_satisfied};
use crate::Value;
pub(crate) use errors::EvaluationError;

/// Resolves the variant key `user_id` receives for `flag`.
///
/// The first applicable step wins:
/// 1. an inactive flag serves its off variant,
/// 2. so does a flag whose prerequisite segments don't all admit the user,
/// 3. a user listed in the flag's target users gets the listed variant,
/// 4. the first targeted segment the user belongs to allocates with its own weights,
/// 5. otherwise the flag's traffic weights allocate.
pub(crate) fn resolve_variant(
    flag: &Flag,
    segments: &HashMap<String, Segment>,
    user_id: &str,
    attributes: &HashMap<String, Value>,
) -> Result<String, EvaluationError> {
    let env_data = &flag.env_data;

    if flag.is_inactive() {
        return Ok(env_data.off_variant.clone());
    }

    if !prerequisites_satisfied(&env_data.pre_requisites, segments, user_id, attributes) {
        return Ok(env_data.off_variant.clone());
    }

    if let Some(variant) = env_data.target_users.get(user_id) {
        if !variant.is_empty() {
            return Ok(variant.clone());
        }
    }

    for segment_id in &env_data.target_segments_order {
        if is_member(user_id, attributes, segments.get(segment_id)) {
            return match env_data.target_segments.get(segment_id) {
                Some(weights) => allocate(user_id, flag, weights),
                None => allocate(user_id, flag, &HashMap::new()),
            };
        }
    }

    allocate(user_id, flag, &env_data.traffic)
}

/// Picks a variant according to `weights` by bucketing the user.
pub(crate) fn allocate(
    user_id: &str,
    flag: &Flag,
    weights: &HashMap<String, u32>,
) -> Result<String, EvaluationError> {
    allocate_with(user_id, flag, weights, bucketing::bucket)
}

fn allocate_with<B>(
    user_id: &str,
    flag: &Flag,
    weights: &HashMap<String, u32>,
    bucket: B,
) -> Result<String, EvaluationError>
where
    B: FnOnce(&str, u32) -> Result<u32, EvaluationError>,
{
    if weights.len() == 1 {
        if let Some(key) = weights.keys().next() {
            return Ok(key.clone());
        }
    }

    let Some(last) = flag.variants_order.last() else {
        return Err(EvaluationError::NoVariantAllocated(flag.id.clone()));
    };

    let bucket_value = bucket(&format!("{user_id}{}", flag.id), flag.seed)?;

    let mut end_of_range: u64 = 0;
    for variant in &flag.variants_order {
        end_of_range += u64::from(weights.get(variant).copied().unwrap_or(0));
        if u64::from(bucket_value) < end_of_range {
            return Ok(variant.clone());
        }
    }

    Ok(last.clone())
}
