//! Registration-Termination-Request/Answer: HSS-initiated deregistration.
//! Inbound direction (the HSS is the one sending the request here), so this
//! module is a reader for the request and a builder for the answer.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::{
    avp::{Avp, Message},
    cx::{AUTH_SESSION_STATE_NO_STATE_MAINTAINED, CX_APPLICATION_ID, command_codes},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeregistrationReason {
    PermanentTermination = 0,
    NewServerAssigned = 1,
    ServerChange = 2,
    RemoveScscf = 3,
}

impl DeregistrationReason {
    pub fn parse(code: i32) -> Option<Self> {
        match code {
            0 => Some(DeregistrationReason::PermanentTermination),
            1 => Some(DeregistrationReason::NewServerAssigned),
            2 => Some(DeregistrationReason::ServerChange),
            3 => Some(DeregistrationReason::RemoveScscf),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RtrRequest {
    pub session_id: String,
    pub impi: String,
    pub associated_identities: Vec<String>,
    pub public_identities: Vec<String>,
    /// `None` when the reason code is not one this crate understands; the
    /// handler rejects the RTR with `UNABLE_TO_COMPLY` in that case.
    pub reason: Option<DeregistrationReason>,
    pub reason_info: Option<String>,
}

pub fn read(msg: &Message) -> RtrRequest {
    let associated_identities = msg
        .find_all("AssociatedIdentities")
        .filter_map(Avp::as_str)
        .map(String::from)
        .collect();
    let public_identities = msg
        .find_all("PublicIdentity")
        .filter_map(Avp::as_str)
        .map(String::from)
        .collect();

    let (reason, reason_info) = match msg.get_group("DeregistrationReason") {
        Some(group) => {
            let code = group
                .iter()
                .find(|a| a.name == "ReasonCode")
                .and_then(Avp::as_i32);
            let info = group
                .iter()
                .find(|a| a.name == "ReasonInfo")
                .and_then(Avp::as_str)
                .map(String::from);
            (code.and_then(DeregistrationReason::parse), info)
        },
        None => (None, None),
    };

    RtrRequest {
        session_id: msg.session_id.clone(),
        impi: msg.get_str("UserName").unwrap_or_default().to_string(),
        associated_identities,
        public_identities,
        reason,
        reason_info,
    }
}

pub struct RtaAnswer<'a> {
    pub session_id: &'a str,
    pub result_code: i32,
    pub associated_identities: &'a [String],
}

pub fn build_answer(ans: &RtaAnswer<'_>) -> Message {
    let mut msg = Message::new(command_codes::REGISTRATION_TERMINATION, CX_APPLICATION_ID, false);
    msg.session_id = ans.session_id.to_string();
    msg.push_i32("ResultCode", ans.result_code);
    msg.push_i32(
        "AuthSessionState",
        AUTH_SESSION_STATE_NO_STATE_MAINTAINED,
    );
    for id in ans.associated_identities {
        msg.push_str("AssociatedIdentities", id.as_str());
    }
    msg
}
