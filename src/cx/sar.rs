//! Server-Assignment-Request/Answer: registers, re-registers, or
//! deregisters a subscriber against the HSS and fetches/pushes its
//! IMS-Subscription XML and charging addresses.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::{
    avp::Message,
    cx::{
        AnswerResult, RequestEnvelope, command_codes, new_request, read_answer_result,
        read_charging_addresses,
    },
    model::charging::ChargingAddresses,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerAssignmentType {
    Registration = 1,
    ReRegistration = 2,
    UnregisteredUser = 3,
    TimeoutDeregistration = 4,
    UserDeregistration = 5,
    AdministrativeDeregistration = 8,
    AuthenticationFailure = 9,
    AuthenticationTimeout = 10,
}

pub struct SarRequest<'a> {
    /// May be empty: some flows (e.g. `call`) never had an IMPI to hand.
    pub impi: &'a str,
    pub impu: &'a str,
    pub server_name: &'a str,
    pub assignment_type: ServerAssignmentType,
}

/// Applies the IMPI-empty override decided for the SAR type ambiguity: an
/// empty IMPI always yields `UNREGISTERED_USER`, regardless of what the
/// caller asked for.
fn effective_assignment_type(impi: &str, requested: ServerAssignmentType) -> ServerAssignmentType {
    if impi.is_empty() {
        ServerAssignmentType::UnregisteredUser
    } else {
        requested
    }
}

pub fn build(env: &RequestEnvelope<'_>, req: &SarRequest<'_>) -> Message {
    let mut msg = new_request(command_codes::SERVER_ASSIGNMENT, env);
    if !req.impi.is_empty() {
        msg.push_str("UserName", req.impi);
    }
    msg.push_str("PublicIdentity", req.impu);
    msg.push_str("ServerName", req.server_name);
    msg.push_i32(
        "ServerAssignmentType",
        effective_assignment_type(req.impi, req.assignment_type) as i32,
    );
    msg.push_i32("UserDataAlreadyAvailable", 0);
    msg
}

#[derive(Debug, Clone, Default)]
pub struct SaaResponse {
    pub result: AnswerResult,
    pub user_data: Option<String>,
    pub charging_addrs: Option<ChargingAddresses>,
}

pub fn read(msg: &Message) -> SaaResponse {
    SaaResponse {
        result: read_answer_result(msg),
        user_data: msg.get_str("UserData").map(String::from),
        charging_addrs: read_charging_addresses(msg),
    }
}
