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

//! Models that are used for de/serialization of the data interchanged with
//! the server

mod flag;
mod segment;
mod snapshot;

pub(crate) use flag::{EnvDataJson, FlagJson, FlagStatus};
pub use flag::VariantType;
pub(crate) use segment::{RuleJson, RuleOperator, RuleType, SegmentJson};
pub(crate) use snapshot::{FetchLatestRequestJson, SnapshotJson};

use serde::{Deserialize, Deserializer};

/// The server sends `null` for empty collections; treat it like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
