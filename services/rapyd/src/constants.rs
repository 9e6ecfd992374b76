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

// Env values used by rapyd services.
pub const RAPYD_ACCESS_KEY: &str = "RAPYD_ACCESS_KEY";
pub const RAPYD_SECRET_KEY: &str = "RAPYD_SECRET_KEY";
pub const RAPYD_ENVIRONMENT: &str = "RAPYD_ENVIRONMENT";

/// Base url of the production environment.
pub const PRODUCTION_BASE_URL: &str = "https://api.rapyd.net";
/// Base url of the sandbox environment.
pub const SANDBOX_BASE_URL: &str = "https://sandboxapi.rapyd.net";

// Headers used in rapyd signing.
pub const HEADER_ACCESS_KEY: &str = "access_key";
pub const HEADER_SALT: &str = "salt";
pub const HEADER_SIGNATURE: &str = "signature";
pub const HEADER_TIMESTAMP: &str = "timestamp";

/// Bytes of randomness in every salt.
pub const SALT_LEN: usize = 12;
/// Requests are stamped this far in the past.
pub const TIMESTAMP_SKEW: std::time::Duration = std::time::Duration::from_secs(10);
/// Timeout applied to every request unless overridden.
pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(15);
