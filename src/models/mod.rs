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

//! In-memory representation of the flag and segment definitions used by
//! evaluation.

mod flag;
mod segment;
mod snapshot;

pub(crate) use flag::Flag;
pub(crate) use segment::{Rule, Segment};
pub(crate) use snapshot::Snapshot;

pub(crate) use crate::network::serialization::{RuleOperator, RuleType};
pub use crate::network::serialization::VariantType;
