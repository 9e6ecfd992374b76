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

//! Hash related utils.

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hmac::Hmac;
use hmac::Mac;
use rand::RngCore;
use sha2::Sha256;

/// Base64 encode
pub fn base64_encode(content: &[u8]) -> String {
    BASE64_STANDARD.encode(content)
}

/// Hex encoded HMAC with SHA256 hash.
pub fn hex_hmac_sha256(key: &[u8], content: &[u8]) -> String {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha256>::new_from_slice(key).unwrap();
    h.update(content);

    hex::encode(h.finalize().into_bytes())
}

/// Base64 encoded text of the hex encoded HMAC with SHA256 hash.
///
/// The hex digest is encoded as text, so the output is
/// `base64(hex(hmac))` and not `base64(hmac)`.
pub fn base64_hex_hmac_sha256(key: &[u8], content: &[u8]) -> String {
    base64_encode(hex_hmac_sha256(key, content).as_bytes())
}

/// Lowercase hex of `len` random bytes drawn from the thread local CSPRNG.
pub fn random_hex(len: usize) -> String {
    let mut bs = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bs);
    hex::encode(bs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hmac_sha256(key: &[u8], content: &[u8]) -> Vec<u8> {
        let mut h = Hmac::<Sha256>::new_from_slice(key).unwrap();
        h.update(content);
        h.finalize().into_bytes().to_vec()
    }

    #[test]
    fn test_hex_hmac_sha256() {
        assert_eq!(
            hex_hmac_sha256(b"Jefe", b"what do ya want for nothing?"),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
        assert_eq!(
            hex::encode(hmac_sha256(b"Jefe", b"what do ya want for nothing?")),
            hex_hmac_sha256(b"Jefe", b"what do ya want for nothing?")
        );
    }

    #[test]
    fn test_base64_hex_hmac_sha256() {
        assert_eq!(
            base64_hex_hmac_sha256(b"Jefe", b"what do ya want for nothing?"),
            "NWJkY2MxNDZiZjYwNzU0ZTZhMDQyNDI2MDg5NTc1Yzc1YTAwM2YwODlkMjczOTgzOWRlYzU4Yjk2NGVjMzg0Mw=="
        );
        assert_ne!(
            base64_hex_hmac_sha256(b"Jefe", b"what do ya want for nothing?"),
            base64_encode(&hmac_sha256(b"Jefe", b"what do ya want for nothing?"))
        );
    }

    #[test]
    fn test_random_hex() {
        let a = random_hex(12);
        let b = random_hex(12);

        assert_eq!(a.len(), 24);
        assert!(a
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_ne!(a, b);
    }
}
