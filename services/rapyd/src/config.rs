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

use std::fmt::{Debug, Formatter};

use rapyd_core::{utils::Redact, Context};

use crate::constants::*;

/// Config carries all the configuration for the Rapyd client.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`RAPYD_ACCESS_KEY`]
    pub access_key: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`RAPYD_SECRET_KEY`]
    pub secret_key: Option<String>,
    /// `environment` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`RAPYD_ENVIRONMENT`]
    ///
    /// Must be `production` or `sandbox`.
    pub environment: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set access_key
    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    /// Set secret_key
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set environment
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Load config from env, fields already set win.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(RAPYD_ACCESS_KEY) {
            self.access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(RAPYD_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(RAPYD_ENVIRONMENT) {
            self.environment.get_or_insert(v);
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key", &Redact::from(&self.access_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("environment", &self.environment)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapyd_core::StaticEnv;

    #[test]
    fn test_config_from_env() {
        let ctx = Context::new().with_env(StaticEnv::from_iter([
            (RAPYD_ACCESS_KEY, "env_access_key"),
            (RAPYD_SECRET_KEY, "env_secret_key"),
            (RAPYD_ENVIRONMENT, "sandbox"),
        ]));

        let config = Config::new()
            .with_access_key("explicit_access_key")
            .from_env(&ctx);

        assert_eq!(config.access_key.as_deref(), Some("explicit_access_key"));
        assert_eq!(config.secret_key.as_deref(), Some("env_secret_key"));
        assert_eq!(config.environment.as_deref(), Some("sandbox"));
    }

    #[test]
    fn test_config_debug_redacts_keys() {
        let config = Config::new()
            .with_access_key("rak_35151028166B9A46DBFD")
            .with_secret_key("rsk_0123456789abcdef0123456789");

        let s = format!("{config:?}");
        assert!(!s.contains("35151028166B9A46"));
        assert!(!s.contains("0123456789abcdef"));
        assert!(s.contains("rak***BFD"));
    }
}
