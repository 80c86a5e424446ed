//! User-Authorization-Request/Answer: the I-CSCF registration-status query.

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAuthorizationType {
    Registration = 0,
    Deregistration = 1,
    RegistrationAndCapabilities = 2,
}

pub struct UarRequest<'a> {
    pub impi: &'a str,
    pub impu: &'a str,
    pub visited_network_identifier: &'a str,
    pub auth_type: UserAuthorizationType,
}

pub fn build(env: &RequestEnvelope<'_>, req: &UarRequest<'_>) -> Message {
    let mut msg = new_request(command_codes::USER_AUTHORIZATION, env);
    msg.push_str("UserName", req.impi);
    msg.push_str("PublicIdentity", req.impu);
    msg.push_str(
        "VisitedNetworkIdentifier",
        req.visited_network_identifier,
    );
    msg.push_i32("UserAuthorizationType", req.auth_type as i32);
    msg
}

#[derive(Debug, Clone, Default)]
pub struct UaaResponse {
    pub result: AnswerResult,
    pub server_name: Option<String>,
    pub capabilities: ServerCapabilities,
}

pub fn read(msg: &Message) -> UaaResponse {
    UaaResponse {
        result: read_answer_result(msg),
        server_name: msg.get_str("ServerName").map(String::from),
        capabilities: read_server_capabilities(msg),
    }
}
