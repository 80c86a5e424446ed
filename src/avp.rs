//! The transport-agnostic Diameter AVP tree. A [`Message`] is what the
//! `cx` builders produce and what the `diameter::DiameterTransport`
//! collaborator is handed to encode on the wire, and what it hands back
//! decoded from a received answer.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::dictionary::{self, AvpCode};

/// The value carried by one AVP. Grouped AVPs nest further [`Avp`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum AvpValue {
    UTF8String(String),
    OctetString(Vec<u8>),
    Integer32(i32),
    Unsigned32(u32),
    Grouped(Vec<Avp>),
}

/// One Attribute-Value-Pair: a dictionary-resolved code plus its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Avp {
    pub name: &'static str,
    pub code: AvpCode,
    pub value: AvpValue,
}

impl Avp {
    pub fn new(name: &'static str, value: AvpValue) -> Self {
        Avp {
            name,
            code: dictionary::code(name),
            value,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            AvpValue::UTF8String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_octets(&self) -> Option<&[u8]> {
        match &self.value {
            AvpValue::OctetString(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match &self.value {
            AvpValue::Integer32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match &self.value {
            AvpValue::Unsigned32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&[Avp]> {
        match &self.value {
            AvpValue::Grouped(g) => Some(g.as_slice()),
            _ => None,
        }
    }
}

/// One Diameter message: either a request built by a `cx` builder to be
/// handed to a `DiameterTransport`, or an answer the transport handed back
/// (or an inbound server-initiated request for RTR/PPR).
#[derive(Debug, Clone, Default)]
pub struct Message {
    pub command_code: u32,
    pub application_id: u32,
    pub is_request: bool,
    pub session_id: String,
    pub avps: Vec<Avp>,
}

impl Message {
    pub fn new(command_code: u32, application_id: u32, is_request: bool) -> Self {
        Message {
            command_code,
            application_id,
            is_request,
            session_id: String::new(),
            avps: Vec::new(),
        }
    }

    pub fn push(&mut self, avp: Avp) -> &mut Self {
        self.avps.push(avp);
        self
    }

    pub fn push_str(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        self.push(Avp::new(name, AvpValue::UTF8String(value.into())))
    }

    pub fn push_octets(&mut self, name: &'static str, value: Vec<u8>) -> &mut Self {
        self.push(Avp::new(name, AvpValue::OctetString(value)))
    }

    pub fn push_i32(&mut self, name: &'static str, value: i32) -> &mut Self {
        self.push(Avp::new(name, AvpValue::Integer32(value)))
    }

    pub fn push_u32(&mut self, name: &'static str, value: u32) -> &mut Self {
        self.push(Avp::new(name, AvpValue::Unsigned32(value)))
    }

    pub fn push_group(&mut self, name: &'static str, children: Vec<Avp>) -> &mut Self {
        self.push(Avp::new(name, AvpValue::Grouped(children)))
    }

    pub fn find(&self, name: &str) -> Option<&Avp> {
        self.avps.iter().find(|a| a.name == name)
    }

    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Avp> {
        self.avps.iter().filter(move |a| a.name == name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.find(name).and_then(Avp::as_str)
    }

    pub fn get_i32(&self, name: &str) -> Option<i32> {
        self.find(name).and_then(Avp::as_i32)
    }

    pub fn get_group(&self, name: &str) -> Option<&[Avp]> {
        self.find(name).and_then(Avp::as_group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_round_trips_simple_fields() {
        let mut m = Message::new(300, 16777216, true);
        m.push_str("UserName", "user@example.com");
        m.push_i32("UserAuthorizationType", 0);

        assert_eq!(m.get_str("UserName"), Some("user@example.com"));
        assert_eq!(m.get_i32("UserAuthorizationType"), Some(0));
        assert_eq!(m.get_str("missing"), None);
    }

    #[test]
    fn grouped_avp_holds_children() {
        let mut m = Message::new(303, 16777216, true);
        m.push_group("SipAuthDataItem", vec![Avp::new(
            "SipAuthenticationScheme",
            AvpValue::UTF8String("SIP Digest".into()),
        )]);

        let group = m.get_group("SipAuthDataItem").expect("group present");
        assert_eq!(group[0].as_str(), Some("SIP Digest"));
    }
}
