//! Location-Info-Request/Answer: the I-CSCF "where does this IMPU live"
//! query. Structurally identical to UAR/UAA, with an originating-request
//! flag and, for capabilities-only lookups, `User-Authorization-Type=3`.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::{
    avp::Message,
    cx::{
        AnswerResult, RequestEnvelope, command_codes, new_request, read_answer_result,
        read_server_capabilities,
    },
    model::server_caps::ServerCapabilities,
};

/// Sentinel value the original HSS extension uses for "capabilities-only,
/// no registration implied" location-info lookups.
const CAPABILITIES_ONLY_AUTH_TYPE: i32 = 3;

pub struct LirRequest<'a> {
    pub impu: &'a str,
    pub originating: bool,
    pub capabilities_only: bool,
}

pub fn build(env: &RequestEnvelope<'_>, req: &LirRequest<'_>) -> Message {
    let mut msg = new_request(command_codes::LOCATION_INFO, env);
    msg.push_str("PublicIdentity", req.impu);
    if req.originating {
        msg.push_i32("OriginatingRequest", 0);
    }
    if req.capabilities_only {
        msg.push_i32("UserAuthorizationType", CAPABILITIES_ONLY_AUTH_TYPE);
    }
    msg
}

#[derive(Debug, Clone, Default)]
pub struct LiaResponse {
    pub result: AnswerResult,
    pub server_name: Option<String>,
    pub capabilities: ServerCapabilities,
}

pub fn read(msg: &Message) -> LiaResponse {
    LiaResponse {
        result: read_answer_result(msg),
        server_name: msg.get_str("ServerName").map(String::from),
        capabilities: read_server_capabilities(msg),
    }
}
