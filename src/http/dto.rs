//! JSON request/response shapes for the Sprout-facing HTTP surface.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use serde::{Deserialize, Serialize};

use crate::model::{
    auth_vector::{AkaAuthVector, DigestAuthVector},
    server_caps::ServerCapabilities,
};

#[derive(Debug, Serialize)]
pub struct DigestOnlyResponse {
    pub digest_ha1: String,
}

#[derive(Debug, Serialize)]
pub struct DigestResponse {
    pub digest: DigestBody,
}

#[derive(Debug, Serialize)]
pub struct DigestBody {
    pub ha1: String,
    pub realm: String,
    pub qop: String,
}

impl From<&DigestAuthVector> for DigestBody {
    fn from(v: &DigestAuthVector) -> Self {
        DigestBody {
            ha1: v.ha1.clone(),
            realm: v.realm.clone(),
            qop: v.qop_for_http().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AkaResponse {
    pub aka: AkaBody,
}

#[derive(Debug, Serialize)]
pub struct AkaBody {
    pub challenge: String,
    pub response: String,
    pub cryptkey: String,
    pub integritykey: String,
}

impl From<&AkaAuthVector> for AkaBody {
    fn from(v: &AkaAuthVector) -> Self {
        AkaBody {
            challenge: v.challenge_base64(),
            response: v.response_hex(),
            cryptkey: v.crypt_key_hex(),
            integritykey: v.integrity_key_hex(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IcscfResponse {
    #[serde(rename = "result-code")]
    pub result_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scscf: Option<String>,
    #[serde(rename = "mandatory-capabilities")]
    pub mandatory_capabilities: Vec<i32>,
    #[serde(rename = "optional-capabilities")]
    pub optional_capabilities: Vec<i32>,
}

impl IcscfResponse {
    pub fn success(server_name: Option<String>, caps: &ServerCapabilities) -> Self {
        IcscfResponse {
            result_code: crate::cx::result_codes::DIAMETER_SUCCESS,
            scscf: server_name,
            mandatory_capabilities: caps.mandatory.clone(),
            optional_capabilities: caps.optional.clone(),
        }
    }

    pub fn from_result(result_code: i32, server_name: Option<String>, caps: &ServerCapabilities) -> Self {
        IcscfResponse {
            result_code,
            scscf: server_name,
            mandatory_capabilities: caps.mandatory.clone(),
            optional_capabilities: caps.optional.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegDataRequest {
    pub reqtype: String,
}

#[derive(Debug, Deserialize)]
pub struct PublicIdQuery {
    pub public_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AvQuery {
    pub impu: Option<String>,
    pub autn: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegistrationStatusQuery {
    pub impu: String,
    #[serde(rename = "visited-network")]
    pub visited_network: Option<String>,
    #[serde(rename = "auth-type")]
    pub auth_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub originating: Option<bool>,
    #[serde(rename = "auth-type")]
    pub auth_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PrivateIdQuery {
    pub private_id: Option<String>,
}
