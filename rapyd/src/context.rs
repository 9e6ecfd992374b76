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

use rapyd_api::Client;
use rapyd_core::{Context, OsEnv, Result};
use rapyd_file_read_tokio::TokioFileRead;
use rapyd_http_send_reqwest::ReqwestHttpSend;

/// Context reading files with tokio, sending requests with reqwest and
/// reading the OS environment.
pub fn default_context() -> Context {
    Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
}

/// Client built from the OS environment on top of [`default_context`].
///
/// Reads `RAPYD_ACCESS_KEY`, `RAPYD_SECRET_KEY` and `RAPYD_ENVIRONMENT`.
pub fn default_client() -> Result<Client> {
    Client::from_env(default_context())
}
