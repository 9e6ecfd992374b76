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

//! Rapyd request signer.

use async_trait::async_trait;
use http::Method;
use log::debug;
use rapyd_core::hash::{base64_hex_hmac_sha256, random_hex};
use rapyd_core::time::{now, unix_timestamp_with_skew, DateTime};
use rapyd_core::{Context, Error, Result, SignRequest, SigningCredential, SigningRequest};

use crate::constants::*;
use crate::credential::Credential;

/// RequestSigner that implements Rapyd request signatures.
///
/// Adds `timestamp`, `salt`, `signature` and `access_key` headers. Every
/// request gets a fresh salt, so two signatures of the same request never
/// repeat.
///
/// - [Request Signatures](https://docs.rapyd.net/en/request-signatures.html)
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
    salt: Option<String>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Specify the salt.
    ///
    /// # Note
    ///
    /// Reusing a salt allows replaying requests. Only use this function for testing.
    #[cfg(test)]
    pub fn with_salt(mut self, salt: &str) -> Self {
        self.salt = Some(salt.to_string());
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        parts: &mut http::request::Parts,
        body: &[u8],
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let cred = credential
            .filter(|cred| cred.is_valid())
            .ok_or_else(|| Error::credential_invalid("missing access key or secret key"))?;

        let timestamp = unix_timestamp_with_skew(self.time.unwrap_or_else(now), TIMESTAMP_SKEW);
        let salt = self
            .salt
            .clone()
            .unwrap_or_else(|| random_hex(SALT_LEN));

        let mut req = SigningRequest::build(parts)?;
        let signature = signature(&req.method, &req.endpoint, &salt, &timestamp, cred, body);

        req.header_insert(HEADER_TIMESTAMP, &timestamp)?;
        req.header_insert(HEADER_SALT, &salt)?;
        req.header_insert(HEADER_SIGNATURE, &signature)?;
        req.header_insert_sensitive(HEADER_ACCESS_KEY, &cred.access_key)?;

        req.apply(parts)
    }
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// lowercase(method) + endpoint + salt + timestamp + access_key + secret_key + body
/// ```
///
/// `endpoint` carries the query string, `body` is empty for requests without
/// payload.
fn string_to_sign(
    method: &Method,
    endpoint: &str,
    salt: &str,
    timestamp: &str,
    cred: &Credential,
    body: &[u8],
) -> Vec<u8> {
    let method = method.as_str().to_lowercase();

    let mut s = Vec::with_capacity(
        method.len()
            + endpoint.len()
            + salt.len()
            + timestamp.len()
            + cred.access_key.len()
            + cred.secret_key.len()
            + body.len(),
    );
    s.extend_from_slice(method.as_bytes());
    s.extend_from_slice(endpoint.as_bytes());
    s.extend_from_slice(salt.as_bytes());
    s.extend_from_slice(timestamp.as_bytes());
    s.extend_from_slice(cred.access_key.as_bytes());
    s.extend_from_slice(cred.secret_key.as_bytes());
    s.extend_from_slice(body);

    // The string to sign embeds the secret key, never log its content.
    debug!(
        "string to sign for {method} {endpoint}: {} bytes, body {} bytes",
        s.len(),
        body.len()
    );
    s
}

/// `base64(hex(hmac_sha256(secret_key, string_to_sign)))`
fn signature(
    method: &Method,
    endpoint: &str,
    salt: &str,
    timestamp: &str,
    cred: &Credential,
    body: &[u8],
) -> String {
    let s = string_to_sign(method, endpoint, salt, timestamp, cred, body);
    base64_hex_hmac_sha256(cred.secret_key.as_bytes(), &s)
}
