//! Authentication vectors: SIP Digest and IMS AKA, plus the hex/base64
//! encodings the HTTP surface exposes them under.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestAuthVector {
    pub ha1: String,
    pub realm: String,
    pub qop: String,
}

impl DigestAuthVector {
    /// Empty `qop` on the wire is reported as `"auth"` over HTTP (boundary
    /// behavior in the testable-properties list).
    pub fn qop_for_http(&self) -> &str {
        if self.qop.is_empty() { "auth" } else { &self.qop }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AkaAuthVector {
    pub challenge: Vec<u8>,
    pub response: Vec<u8>,
    pub crypt_key: Vec<u8>,
    pub integrity_key: Vec<u8>,
}

impl AkaAuthVector {
    pub fn challenge_base64(&self) -> String {
        BASE64.encode(&self.challenge)
    }

    pub fn response_hex(&self) -> String {
        hex::encode(&self.response)
    }

    pub fn crypt_key_hex(&self) -> String {
        hex::encode(&self.crypt_key)
    }

    pub fn integrity_key_hex(&self) -> String {
        hex::encode(&self.integrity_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_qop_reports_as_auth() {
        let v = DigestAuthVector {
            ha1: "abc".into(),
            realm: "example.com".into(),
            qop: String::new(),
        };
        assert_eq!(v.qop_for_http(), "auth");
    }

    #[test]
    fn aka_fields_encode_as_documented() {
        let v = AkaAuthVector {
            challenge: vec![0xAB, 0xCD],
            response: vec![0x01, 0x02],
            crypt_key: vec![0xFF],
            integrity_key: vec![0x00, 0x10],
        };
        assert_eq!(v.challenge_base64(), BASE64.encode([0xAB, 0xCD]));
        assert_eq!(v.response_hex(), "0102");
        assert_eq!(v.crypt_key_hex(), "ff");
        assert_eq!(v.integrity_key_hex(), "0010");
    }
}
