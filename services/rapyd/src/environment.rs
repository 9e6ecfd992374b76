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

use std::fmt;
use std::str::FromStr;

use rapyd_core::{Error, Result};

use crate::constants::*;

/// Environment selects the Rapyd deployment requests are sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Live API at `https://api.rapyd.net`.
    Production,
    /// Sandbox API at `https://sandboxapi.rapyd.net`.
    Sandbox,
}

impl Environment {
    /// Base url of this environment, without trailing slash.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_BASE_URL,
            Environment::Sandbox => SANDBOX_BASE_URL,
        }
    }

    /// Name of this environment as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Sandbox => "sandbox",
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    /// Names are matched exactly: `Production` is rejected.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "production" => Ok(Environment::Production),
            "sandbox" => Ok(Environment::Sandbox),
            v => Err(Error::config_invalid(format!("invalid environment: {v}"))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapyd_core::ErrorKind;
    use test_case::test_case;

    #[test_case("production", "https://api.rapyd.net")]
    #[test_case("sandbox", "https://sandboxapi.rapyd.net")]
    fn test_base_url(name: &str, expected: &str) {
        let env: Environment = name.parse().unwrap();
        assert_eq!(env.base_url(), expected);
        assert_eq!(env.to_string(), name);
    }

    #[test_case("staging")]
    #[test_case("Production")]
    #[test_case("")]
    fn test_invalid_environment(name: &str) {
        let err = name.parse::<Environment>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(err.to_string().contains("invalid environment"));
    }
}
