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

mod common;

use std::collections::HashMap;
use std::time::Duration;

use common::example_snapshot;
use flagsense::test_utils::create_client_with_payload;
use flagsense::{ClientConfig, FlagDescriptor, ServiceEndpoints, User};
use serde_json::json;

#[test]
fn main() {
    let config = ClientConfig::new(ServiceEndpoints::new("http://unused", "http://unused"))
        .with_telemetry_initial_delay(Duration::from_secs(3600))
        .with_telemetry_window(Duration::from_secs(24 * 3600));
    let (client, telemetry) = create_client_with_payload(example_snapshot(), config).unwrap();
    assert!(client.wait_for_initialization_complete_timeout(Duration::from_secs(5)));

    let adult = User::new("power-user", HashMap::new()).with_attribute("age", 30);
    let max_items = FlagDescriptor::integer("max-items", "default", 1);
    for _ in 0..3 {
        client.integer_variation(&max_items, &adult);
    }
    client.integer_variation(&max_items, &User::new("minor", HashMap::new()).with_attribute("age", 9));
    client.boolean_variation(&FlagDescriptor::boolean("max-items", "default", false), &adult);
    client.boolean_variation(&FlagDescriptor::boolean("new-checkout", "default", false), &User::new(" ", HashMap::new()));

    client.close();
    let request = telemetry.recv_timeout(Duration::from_secs(5)).unwrap();

    assert_eq!(request["sdkType"], "rust");
    assert_eq!(request["environment"], "test");
    assert!(request["machineId"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(request["time"].as_i64().is_some());
    assert_eq!(
        request["data"],
        json!({
            "max-items": {"many": 3, "few": 1, "default": 1},
            "new-checkout": {"default": 1}
        })
    );
    assert_eq!(request["errors"], json!({"max-items": 1, "new-checkout": 1}));
    assert_eq!(request["codeBugs"], json!({}));

    assert!(telemetry.try_recv().is_err());
}
