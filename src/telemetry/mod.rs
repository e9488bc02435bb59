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

//! Counts evaluation outcomes per time window and ships them to the events service.

mod aggregator;
mod client;
mod client_http;
mod flush;
mod serialization;

pub(crate) use aggregator::TelemetryAggregator;
pub(crate) use client::TelemetryClient;
pub(crate) use client_http::TelemetryClientHttp;
pub(crate) use flush::{start_telemetry, TelemetryMetadata};
#[cfg(any(test, feature = "test_utils"))]
pub(crate) use serialization::TelemetryRequestJson;

use thiserror::Error;

use crate::network::NetworkError;

pub(crate) type TelemetryResult<T> = std::result::Result<T, TelemetryError>;

#[derive(Debug, Error)]
pub(crate) enum TelemetryError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("Telemetry data not accepted by server: {0}")]
    DataNotAccepted(String),
}
