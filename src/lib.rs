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

//! Client-side feature flag evaluation.
//!
//! A [`FlagsenseClient`] keeps a locally cached snapshot of flag and segment
//! definitions fresh by polling the SDK service in a background thread. Flags
//! are evaluated against that snapshot without any network round-trip, and
//! the outcome of every evaluation is counted into time-sliced telemetry
//! windows that a second background thread ships to the events service.
//!
//! ```no_run
//! use std::collections::HashMap;
//! use flagsense::{ClientConfig, Credentials, FlagDescriptor, FlagsenseClient, ServiceEndpoints, User, Value};
//!
//! # fn main() -> flagsense::Result<()> {
//! let credentials = Credentials::new("sdk-id", "sdk-secret", "production");
//! let endpoints = ServiceEndpoints::new(
//!     "https://sdk.example.com/v1/sdk-service",
//!     "https://events.example.com/v1/event-service",
//! );
//! let client = FlagsenseClient::new(credentials, ClientConfig::new(endpoints))?;
//! client.wait_for_initialization_complete();
//!
//! let user = User::new("user-1", HashMap::from([("country".to_string(), Value::from("NL"))]));
//! let flag = FlagDescriptor::boolean("new-checkout", "off", false);
//! let variation = client.boolean_variation(&flag, &user);
//! println!("{} -> {:?}", variation.key, variation.value);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod entity;
mod errors;
mod models;
mod network;
mod segment_evaluation;
mod snapshot_store;
mod targeting;
mod telemetry;
mod utils;
mod value;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

#[cfg(test)]
mod tests;

pub use client::{FlagDescriptor, FlagsenseClient, Variation};
pub use config::{ClientConfig, Credentials, ServiceEndpoints};
pub use entity::{Entity, User};
pub use errors::{Error, Result};
pub use models::VariantType;
pub use network::NetworkError;
pub use value::{Value, ValueCoercionError};
