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

use std::{collections::HashMap, env, io::Write, thread, time::Duration};

use dotenvy::dotenv;
use flagsense::{
    ClientConfig, Credentials, Entity, FlagDescriptor, FlagsenseClient, ServiceEndpoints, Value,
};
use std::error::Error;

#[derive(Debug)]
struct CustomerEntity {
    id: String,
    city: String,
    radius: i32,
}

impl Entity for CustomerEntity {
    fn get_id(&self) -> String {
        self.id.clone()
    }

    fn get_attributes(&self) -> HashMap<String, Value> {
        HashMap::from_iter(vec![
            ("city".to_string(), Value::from(self.city.clone())),
            ("radius".to_string(), Value::from(self.radius)),
        ])
    }
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    dotenv().ok();
    let sdk_id = env::var("SDK_ID").expect("SDK_ID should be set.");
    let sdk_secret = env::var("SDK_SECRET").expect("SDK_SECRET should be set.");
    let environment = env::var("ENVIRONMENT").expect("ENVIRONMENT should be set.");
    let sdk_service = env::var("SDK_SERVICE_URL").expect("SDK_SERVICE_URL should be set.");
    let events_service = env::var("EVENTS_SERVICE_URL").expect("EVENTS_SERVICE_URL should be set.");
    let flag_id = env::var("FLAG_ID").expect("FLAG_ID should be set.");

    let config = ClientConfig::new(ServiceEndpoints::new(sdk_service, events_service))
        .with_polling_interval(Duration::from_secs(30))
        .with_request_timeout(Duration::from_secs(10));
    let client = FlagsenseClient::new(Credentials::new(sdk_id, sdk_secret, environment), config)?;
    print!("Waiting for initial data...");
    std::io::stdout().flush()?;
    client.wait_for_initialization_complete();
    println!(" DONE");

    let entity = CustomerEntity {
        id: "user123".to_string(),
        city: "Bangalore".to_string(),
        radius: 60,
    };
    let flag = FlagDescriptor::boolean(flag_id, "default", false);
    println!("The evaluation is displayed every 5 seconds.");
    println!("Try changing the flag on the server; updates arrive with the next poll.");

    loop {
        let variation = client.boolean_variation(&flag, &entity);
        println!("Flag '{}' serves '{}': {:?}", flag.flag_id, variation.key, variation.value);
        thread::sleep(Duration::from_secs(5));
    }
}
