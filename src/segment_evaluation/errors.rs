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

use thiserror::Error;

use crate::models::RuleType;

/// Reasons a rule cannot be applied to an attribute at all. A rule failing
/// with any of these never matches, whatever its `match` flag says.
#[derive(Debug, Error, Clone, PartialEq)]
pub(crate) enum CheckOperatorErrorDetail {
    #[error("Entity attribute does not fit rule type {0:?}.")]
    AttributeTypeMismatch(RuleType),

    #[error("Rule has no reference value.")]
    MissingReferenceValue,

    #[error("Rule reference value does not fit rule type {0:?}.")]
    LiteralTypeMismatch(RuleType),
}
