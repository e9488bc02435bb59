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

use std::collections::HashMap;
use std::time::Duration;

use rstest::{fixture, rstest};
use serde_json::json;

use crate::network::serialization::fixtures::snapshot_payload;
use crate::test_utils::create_client_with_payload;
use crate::{ClientConfig, Entity, FlagDescriptor, FlagsenseClient, ServiceEndpoints, Value};

pub struct GenericEntity {
    pub id: String,
    pub attributes: HashMap<String, Value>,
}

impl Entity for GenericEntity {
    fn get_id(&self) -> String {
        self.id.clone()
    }

    fn get_attributes(&self) -> HashMap<String, Value> {
        self.attributes.clone()
    }
}

fn entity(id: &str) -> GenericEntity {
    GenericEntity {
        id: id.to_string(),
        attributes: HashMap::new(),
    }
}

#[fixture]
fn config() -> ClientConfig {
    ClientConfig::new(ServiceEndpoints::new(
        "http://localhost/sdk",
        "http://localhost/events",
    ))
    .with_telemetry_initial_delay(Duration::from_secs(3600))
}

fn loaded_client(
    payload: serde_json::Value,
    config: ClientConfig,
) -> (FlagsenseClient, std::sync::mpsc::Receiver<serde_json::Value>) {
    let (client, receiver) = create_client_with_payload(payload, config).unwrap();
    assert!(client.wait_for_initialization_complete_timeout(Duration::from_secs(5)));
    (client, receiver)
}

#[rstest]
fn test_bool_flag_is_sticky_per_user(config: ClientConfig) {
    let (client, _telemetry) = loaded_client(snapshot_payload(1.0), config);
    let flag = FlagDescriptor::boolean("F", "default", false);

    let mut served = HashMap::new();
    for i in 0..200 {
        let user = entity(&format!("user-{i}"));
        let first = client.boolean_variation(&flag, &user);
        assert_eq!(client.boolean_variation(&flag, &user), first);
        assert_eq!(first.value, Value::Boolean(first.key == "on"));
        *served.entry(first.key).or_insert(0) += 1;
    }

    assert!(served["on"] > 0);
    assert!(served["off"] > 0);
}

#[rstest]
fn test_inactive_flag_serves_off(config: ClientConfig) {
    let mut payload = snapshot_payload(1.0);
    payload["flags"]["F"]["envData"]["status"] = json!("INACTIVE");
    let (client, _telemetry) = loaded_client(payload, config);
    let flag = FlagDescriptor::boolean("F", "default", true);

    for id in ["alice", "bob", "carol"] {
        let variation = client.boolean_variation(&flag, &entity(id));
        assert_eq!(variation.key, "off");
        assert_eq!(variation.value, Value::Boolean(false));
    }
}

#[rstest]
fn test_type_mismatch_is_reported_once(config: ClientConfig) {
    let (client, telemetry) = loaded_client(snapshot_payload(1.0), config);
    let flag = FlagDescriptor::integer("greeting", "zero", 0);

    let variation = client.integer_variation(&flag, &entity("alice"));
    assert_eq!(variation.key, "zero");
    assert_eq!(variation.value, Value::Int32(0));

    client.close();
    let request = telemetry.try_recv().unwrap();
    assert_eq!(request["errors"], json!({"greeting": 1}));
    assert_eq!(request["data"], json!({"greeting": {"zero": 1}}));
    assert_eq!(request["codeBugs"], json!({}));
}

#[rstest]
fn test_numeric_and_json_coercion(config: ClientConfig) {
    let mut payload = snapshot_payload(1.0);
    payload["flags"]["limit"] = json!({
        "id": "limit",
        "seed": 0,
        "variants": {"low": {"value": 3.7}},
        "variantsOrder": ["low"],
        "type": "INT",
        "envData": {"offVariant": "low", "traffic": {"low": 100000}}
    });
    payload["flags"]["ratio"] = json!({
        "id": "ratio",
        "seed": 0,
        "variants": {"half": {"value": 2}},
        "variantsOrder": ["half"],
        "type": "DOUBLE",
        "envData": {"offVariant": "half", "traffic": {"half": 100000}}
    });
    payload["flags"]["theme"] = json!({
        "id": "theme",
        "seed": 0,
        "variants": {"blue": {"value": {"color": "blue"}}},
        "variantsOrder": ["blue"],
        "type": "JSON",
        "envData": {"offVariant": "blue", "traffic": {"blue": 100000}}
    });
    let (client, _telemetry) = loaded_client(payload, config);
    let alice = entity("alice");

    let limit = client.integer_variation(&FlagDescriptor::integer("limit", "none", 0), &alice);
    assert_eq!(limit.value, Value::Int32(3));

    let ratio = client.decimal_variation(&FlagDescriptor::decimal("ratio", "none", 0.0), &alice);
    assert_eq!(ratio.value, Value::Float64(2.0));

    let theme = client.json_variation(
        &FlagDescriptor::json("theme", "none", serde_json::Map::new()),
        &alice,
    );
    assert_eq!(theme.key, "blue");
    assert_eq!(
        theme.value,
        Value::Json(json!({"color": "blue"}).as_object().cloned().unwrap())
    );
}

#[rstest]
fn test_segment_targeting(config: ClientConfig) {
    let mut payload = snapshot_payload(1.0);
    payload["flags"]["F"]["envData"]["targetSegments"] = json!({"adults": {"on": 100000}});
    payload["flags"]["F"]["envData"]["targetSegmentsOrder"] = json!(["adults"]);
    payload["flags"]["F"]["envData"]["traffic"] = json!({"off": 100000});
    let (client, _telemetry) = loaded_client(payload, config);
    let flag = FlagDescriptor::boolean("F", "default", false);

    let adult = GenericEntity {
        id: "alice".to_string(),
        attributes: HashMap::from([("age".to_string(), Value::Int32(40))]),
    };
    assert_eq!(client.boolean_variation(&flag, &adult).key, "on");
    assert_eq!(client.boolean_variation(&flag, &entity("alice")).key, "off");
}
