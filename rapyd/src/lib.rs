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

//! Rapyd payment API client.
//!
//! This crate bundles [`rapyd_core`] and [`rapyd_api`]. With the
//! `default-context` feature (enabled by default) it also provides a
//! [`default_context`] backed by tokio, reqwest and the OS environment.
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> rapyd::Result<()> {
//! use rapyd::{CallOptions, PathParams};
//!
//! // Reads RAPYD_ACCESS_KEY, RAPYD_SECRET_KEY and RAPYD_ENVIRONMENT.
//! let client = rapyd::default_client()?;
//!
//! let countries = client
//!     .resource("data.countries")?
//!     .list(PathParams::none(), None, CallOptions::default())
//!     .await?;
//! println!("{countries:#}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub use rapyd_api::*;
pub use rapyd_core::template;
pub use rapyd_core::{
    Context, Env, Error, ErrorKind, EventStream, FileRead, HttpSend, LogEvent, OsEnv, Result,
    StaticEnv,
};

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::{default_client, default_context};
