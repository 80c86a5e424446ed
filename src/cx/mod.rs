//! Cx/Dx command codec: builders that turn handler intent into an outbound
//! [`Message`](crate::avp::Message) and readers that pull typed fields back
//! out of an inbound answer.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

pub mod lir;
pub mod mar;
pub mod ppr;
pub mod result_codes;
pub mod rtr;
pub mod sar;
pub mod uar;

use crate::{
    avp::{Avp, AvpValue, Message},
    model::{charging::ChargingAddresses, server_caps::ServerCapabilities},
};

/// 3GPP Cx/Dx application id (3GPP TS 29.229 §8).
pub const CX_APPLICATION_ID: u32 = 16777216;

/// `Auth-Session-State` value used on every Cx command: Cx is stateless at
/// the Diameter session layer.
pub const AUTH_SESSION_STATE_NO_STATE_MAINTAINED: i32 = 1;

pub mod command_codes {
    pub const USER_AUTHORIZATION: u32 = 300;
    pub const SERVER_ASSIGNMENT: u32 = 301;
    pub const LOCATION_INFO: u32 = 302;
    pub const MULTIMEDIA_AUTH: u32 = 303;
    pub const REGISTRATION_TERMINATION: u32 = 304;
    pub const PUSH_PROFILE: u32 = 305;
}

/// Common request envelope fields every Cx command carries.
pub struct RequestEnvelope<'a> {
    pub session_id: &'a str,
    pub origin_host: &'a str,
    pub origin_realm: &'a str,
    pub destination_host: Option<&'a str>,
    pub destination_realm: &'a str,
}

pub(crate) fn new_request(command_code: u32, env: &RequestEnvelope<'_>) -> Message {
    let mut msg = Message::new(command_code, CX_APPLICATION_ID, true);
    msg.session_id = env.session_id.to_string();
    msg.push_str("OriginHost", env.origin_host);
    msg.push_str("OriginRealm", env.origin_realm);
    if let Some(dh) = env.destination_host {
        msg.push_str("DestinationHost", dh);
    }
    msg.push_str("DestinationRealm", env.destination_realm);
    msg.push_i32(
        "AuthSessionState",
        AUTH_SESSION_STATE_NO_STATE_MAINTAINED,
    );
    msg
}

/// Both result fields an Answer may carry: the base `Result-Code` and the
/// Cx-specific `Experimental-Result-Code`. Per §9 of the design notes, the
/// experimental code wins when present and non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnswerResult {
    pub result_code: Option<i32>,
    pub experimental_result_code: Option<i32>,
}

impl AnswerResult {
    pub fn effective(&self) -> Option<i32> {
        match self.experimental_result_code {
            Some(c) if c != 0 => Some(c),
            _ => self.result_code,
        }
    }
}

pub(crate) fn read_answer_result(msg: &Message) -> AnswerResult {
    let result_code = msg.get_i32("ResultCode");
    let experimental_result_code = msg
        .get_group("ExperimentalResult")
        .and_then(|group| group.iter().find(|a| a.name == "ExperimentalResultCode"))
        .and_then(|a| a.as_i32());
    AnswerResult {
        result_code,
        experimental_result_code,
    }
}

/// Shared by UAA and LIA: both carry an optional `Server-Capabilities`
/// group with repeating mandatory/optional capability children.
pub(crate) fn read_server_capabilities(msg: &Message) -> ServerCapabilities {
    let mut caps = ServerCapabilities::default();
    if let Some(group) = msg.get_group("ServerCapabilities") {
        for avp in group {
            match avp.name {
                "MandatoryCapability" => {
                    if let Some(v) = avp.as_i32() {
                        caps.mandatory.push(v);
                    }
                },
                "OptionalCapability" => {
                    if let Some(v) = avp.as_i32() {
                        caps.optional.push(v);
                    }
                },
                _ => {},
            }
        }
    }
    caps.server_name = msg.get_str("ServerName").map(String::from);
    caps
}

/// Read the `Charging-Information` group carried on an SAA/PPR, if any.
pub(crate) fn read_charging_addresses(msg: &Message) -> Option<ChargingAddresses> {
    let group = msg.get_group("ChargingInformation")?;
    let mut addrs = ChargingAddresses::default();
    for avp in group {
        match avp.name {
            "PrimaryChargingCollectionFunctionName" | "SecondaryChargingCollectionFunctionName" => {
                if let Some(s) = avp.as_str() {
                    addrs.ccfs.push_back(s.to_string());
                }
            },
            "PrimaryEventChargingFunctionName" | "SecondaryEventChargingFunctionName" => {
                if let Some(s) = avp.as_str() {
                    addrs.ecfs.push_back(s.to_string());
                }
            },
            _ => {},
        }
    }
    if addrs.is_empty() { None } else { Some(addrs) }
}

/// Build the `Charging-Information` group for an outbound PPA, if this
/// crate ever needs to originate one (kept for symmetry with `read_...`).
pub(crate) fn push_charging_addresses(msg: &mut Message, addrs: &ChargingAddresses) {
    let mut group = Vec::new();
    let mut ccfs = addrs.ccfs.iter();
    if let Some(p) = ccfs.next() {
        group.push(Avp::new(
            "PrimaryChargingCollectionFunctionName",
            AvpValue::UTF8String(p.clone()),
        ));
    }
    if let Some(s) = ccfs.next() {
        group.push(Avp::new(
            "SecondaryChargingCollectionFunctionName",
            AvpValue::UTF8String(s.clone()),
        ));
    }
    let mut ecfs = addrs.ecfs.iter();
    if let Some(p) = ecfs.next() {
        group.push(Avp::new(
            "PrimaryEventChargingFunctionName",
            AvpValue::UTF8String(p.clone()),
        ));
    }
    if let Some(s) = ecfs.next() {
        group.push(Avp::new(
            "SecondaryEventChargingFunctionName",
            AvpValue::UTF8String(s.clone()),
        ));
    }
    msg.push_group("ChargingInformation", group);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avp::AvpValue;

    #[test]
    fn experimental_result_wins_when_nonzero() {
        let r = AnswerResult {
            result_code: Some(2001),
            experimental_result_code: Some(2002),
        };
        assert_eq!(r.effective(), Some(2002));
    }

    #[test]
    fn falls_back_to_result_code_when_experimental_absent() {
        let r = AnswerResult {
            result_code: Some(2001),
            experimental_result_code: None,
        };
        assert_eq!(r.effective(), Some(2001));
    }

    #[test]
    fn reads_experimental_result_from_grouped_avp() {
        let mut msg = Message::new(300, CX_APPLICATION_ID, false);
        msg.push_group("ExperimentalResult", vec![
            crate::avp::Avp::new("VendorId", AvpValue::Unsigned32(10415)),
            crate::avp::Avp::new("ExperimentalResultCode", AvpValue::Integer32(2001)),
        ]);
        let result = read_answer_result(&msg);
        assert_eq!(result.experimental_result_code, Some(2001));
    }
}
