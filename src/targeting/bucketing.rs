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

use std::io::Cursor;

use murmur3::murmur3_32;

use super::EvaluationError;

/// Traffic weights are expressed in thousandths of a percent.
pub(crate) const TOTAL_THREE_DECIMAL_TRAFFIC: u32 = 100_000;

const MAX_HASH_VALUE: f64 = 4_294_967_296.0;

/// Maps `identity` to a bucket in `[0, TOTAL_THREE_DECIMAL_TRAFFIC)`.
pub(crate) fn bucket(identity: &str, seed: u32) -> Result<u32, EvaluationError> {
    let hash = murmur3_32(&mut Cursor::new(identity.as_bytes()), seed).map_err(|source| {
        EvaluationError::Hashing {
            identity: identity.to_string(),
            source,
        }
    })?;
    let ratio = f64::from(hash) / MAX_HASH_VALUE;
    Ok((ratio * f64::from(TOTAL_THREE_DECIMAL_TRAFFIC)) as u32)
}
