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

use crate::network::NetworkError;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned while building or tearing down a [`crate::FlagsenseClient`].
///
/// Flag evaluation itself never fails: every problem found while evaluating
/// a flag resolves to the default variation of the requested flag.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("Cannot spawn background thread: {0}")]
    ThreadSpawn(#[from] std::io::Error),
}
