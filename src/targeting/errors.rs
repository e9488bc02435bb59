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

use crate::{ValueCoercionError, VariantType};

/// Everything that makes an evaluation fall back to the caller's default.
#[derive(Debug, Error)]
pub(crate) enum EvaluationError {
    #[error("Flag data has not been loaded yet")]
    NotInitialized,

    #[error("User id is blank")]
    BlankUserId,

    #[error("Flag '{0}' does not exist")]
    FlagNotFound(String),

    #[error("Flag '{flag_id}' is of type {found}, requested {requested}")]
    TypeMismatch {
        flag_id: String,
        found: String,
        requested: VariantType,
    },

    #[error("Cannot compute bucket for '{identity}': {source}")]
    Hashing {
        identity: String,
        source: std::io::Error,
    },

    #[error("Flag '{0}' has no variants to allocate")]
    NoVariantAllocated(String),

    #[error("Variant '{variant}' of flag '{flag_id}' has no value")]
    UnknownVariant { flag_id: String, variant: String },

    #[error(transparent)]
    Coercion(#[from] ValueCoercionError),
}
