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

//! Client for the Rapyd payment API.
//!
//! [`Client`] signs every request with the Rapyd signature scheme and sends
//! it through the http client of its [`Context`](rapyd_core::Context).
//! [`ResourceInterface`] maps the CRUD verbs of one resource onto its
//! endpoint templates.
//!
//! ```no_run
//! use rapyd_api::{CallOptions, Client, PathParams, QueryParams};
//! use rapyd_core::Context;
//!
//! # async fn example(ctx: Context) -> rapyd_core::Result<()> {
//! let client = Client::new(ctx, "rak_xxx", "rsk_xxx", "sandbox")?;
//! let mut events = client.subscribe();
//!
//! let countries = client
//!     .resource("data.countries")?
//!     .list(
//!         PathParams::none(),
//!         Some(&QueryParams::from([("page", "2")])),
//!         CallOptions::default(),
//!     )
//!     .await?;
//!
//! while let Ok(event) = events.try_recv() {
//!     println!("{}: {}", event.message, event.payload);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
pub use client::{Client, ClientBuilder, RequestOptions};

mod config;
pub use config::Config;

mod constants;
pub use constants::{DEFAULT_TIMEOUT, PRODUCTION_BASE_URL, SANDBOX_BASE_URL};

mod credential;
pub use credential::Credential;

mod environment;
pub use environment::Environment;

mod provide_credential;
pub use provide_credential::*;

mod resource;
pub use resource::{CallOptions, EndpointSet, ResourceInterface, Verb};

mod sign_request;
pub use sign_request::RequestSigner;

mod table;
pub use table::ResourceTable;

pub use rapyd_core::template::{PathParams, QueryParams};
