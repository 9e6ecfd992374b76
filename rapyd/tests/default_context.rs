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

use rapyd::{default_client, default_context, Environment, ErrorKind};

#[test]
fn test_default_context_reads_os_env() {
    temp_env::with_var("RAPYD_FACADE_PROBE", Some("on"), || {
        let ctx = default_context();
        assert_eq!(ctx.env_var("RAPYD_FACADE_PROBE").as_deref(), Some("on"));
    });
}

#[test]
fn test_default_client() {
    temp_env::with_vars(
        [
            ("RAPYD_ACCESS_KEY", Some("rak_facade")),
            ("RAPYD_SECRET_KEY", Some("rsk_facade")),
            ("RAPYD_ENVIRONMENT", Some("sandbox")),
        ],
        || {
            let client = default_client().unwrap();
            assert_eq!(client.environment(), Environment::Sandbox);
            assert!(client.resource("customers").is_ok());
        },
    );
}

#[test]
fn test_default_client_rejects_unknown_environment() {
    temp_env::with_vars(
        [
            ("RAPYD_ACCESS_KEY", Some("rak_facade")),
            ("RAPYD_SECRET_KEY", Some("rsk_facade")),
            ("RAPYD_ENVIRONMENT", Some("staging")),
        ],
        || {
            let err = default_client().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        },
    );
}

#[tokio::test]
async fn test_default_context_reads_files() {
    let ctx = default_context();
    let content = ctx
        .file_read_as_string(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"))
        .await
        .unwrap();
    assert!(content.contains("name = \"rapyd\""));
}
