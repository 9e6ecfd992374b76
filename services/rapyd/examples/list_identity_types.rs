// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! List the identity types accepted in a country.
//!
//! ```shell
//! RAPYD_ACCESS_KEY=rak_xxx RAPYD_SECRET_KEY=rsk_xxx RAPYD_ENVIRONMENT=sandbox \
//!     cargo run --example list_identity_types -- DE
//! ```

use log::info;
use rapyd_api::{CallOptions, Client, PathParams, QueryParams};
use rapyd_core::{Context, OsEnv, Result};
use rapyd_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let _ = dotenv::dotenv();

    let country = std::env::args().nth(1).unwrap_or_else(|| "US".to_string());

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let client = Client::from_env(ctx)?;
    info!("using {} at {}", client.environment(), client.base_url());

    let mut events = client.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            info!("[{}] {}: {}", event.level, event.message, event.payload);
        }
    });

    let types = client
        .resource("identities.types")?
        .list(
            PathParams::none(),
            Some(&QueryParams::from([("country", country.as_str())])),
            CallOptions::data_only(),
        )
        .await?;

    match types.as_array() {
        Some(types) => {
            for t in types {
                println!("{}", t["name"].as_str().unwrap_or_default());
            }
        }
        None => println!("{types:#}"),
    }

    Ok(())
}
