//! Multimedia-Auth-Request/Answer: fetches SIP Digest or IMS AKA auth
//! vectors. The trickiest Cx command: the HSS nests the actual vector
//! inside a `SIP-Auth-Data-Item` group, digest sub-AVPs may be 3GPP-vendor-
//! scoped or base-protocol-scoped depending on HSS vendor, and (per the
//! open question recorded in DESIGN.md) `impu()` must NOT alias `User-Name`
//! the way the original implementation did.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::{
    avp::{Avp, Message},
    cx::{AnswerResult, RequestEnvelope, command_codes, new_request, read_answer_result},
    model::auth_vector::{AkaAuthVector, DigestAuthVector},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    SipDigest,
    Aka,
    #[default]
    Unknown,
}

impl AuthScheme {
    fn wire_name(self) -> &'static str {
        match self {
            AuthScheme::SipDigest => "SIP Digest",
            AuthScheme::Aka => "Digest-AKAv1-MD5",
            AuthScheme::Unknown => "Unknown",
        }
    }

    fn parse(name: &str) -> Self {
        match name {
            "SIP Digest" => AuthScheme::SipDigest,
            "Digest-AKAv1-MD5" => AuthScheme::Aka,
            _ => AuthScheme::Unknown,
        }
    }
}

pub struct MarRequest<'a> {
    pub impi: &'a str,
    pub impu: &'a str,
    pub scheme: AuthScheme,
    /// `SIP-Authorization`, e.g. the client-supplied AUTN on an AKA resync.
    pub authorization: Option<&'a [u8]>,
    pub number_auth_items: u32,
}

pub fn build(env: &RequestEnvelope<'_>, req: &MarRequest<'_>) -> Message {
    let mut msg = new_request(command_codes::MULTIMEDIA_AUTH, env);
    msg.push_str("UserName", req.impi);
    msg.push_str("PublicIdentity", req.impu);
    msg.push_u32("SipNumberAuthItems", req.number_auth_items);

    let mut auth_data_item = vec![Avp::new(
        "SipAuthenticationScheme",
        crate::avp::AvpValue::UTF8String(req.scheme.wire_name().to_string()),
    )];
    if let Some(authorization) = req.authorization {
        auth_data_item.push(Avp::new(
            "SipAuthorization",
            crate::avp::AvpValue::OctetString(authorization.to_vec()),
        ));
    }
    msg.push_group("SipAuthDataItem", auth_data_item);
    msg
}

#[derive(Debug, Clone, Default)]
pub struct MaaResponse {
    pub result: AnswerResult,
    pub impi: Option<String>,
    pub impu: Option<String>,
    pub scheme: AuthScheme,
    pub digest: Option<DigestAuthVector>,
    pub aka: Option<AkaAuthVector>,
}

fn find_str(group: &[Avp], name: &str) -> Option<String> {
    group.iter().find(|a| a.name == name).and_then(Avp::as_str).map(String::from)
}

fn find_octets(group: &[Avp], name: &str) -> Option<Vec<u8>> {
    group
        .iter()
        .find(|a| a.name == name)
        .and_then(Avp::as_octets)
        .map(<[u8]>::to_vec)
}

fn read_digest(group: &[Avp]) -> Option<DigestAuthVector> {
    let ha1 = find_str(group, "Sip3gppDigestHa1").or_else(|| find_str(group, "DigestHa1"))?;
    let realm = find_str(group, "Sip3gppDigestRealm")
        .or_else(|| find_str(group, "DigestRealm"))
        .unwrap_or_default();
    let qop = find_str(group, "Sip3gppDigestQop")
        .or_else(|| find_str(group, "DigestQop"))
        .unwrap_or_default();
    Some(DigestAuthVector { ha1, realm, qop })
}

fn read_aka(group: &[Avp]) -> Option<AkaAuthVector> {
    let challenge = find_octets(group, "SipAuthenticate")?;
    Some(AkaAuthVector {
        challenge,
        response: find_octets(group, "SipAuthorization").unwrap_or_default(),
        crypt_key: find_octets(group, "ConfidentialityKey").unwrap_or_default(),
        integrity_key: find_octets(group, "IntegrityKey").unwrap_or_default(),
    })
}

/// Read a Multimedia-Auth-Answer. `impi()`/`impu()` are each read from their
/// own, correctly-named AVP — see the open-question note above.
pub fn read(msg: &Message) -> MaaResponse {
    let empty: Vec<Avp> = Vec::new();
    let group = msg.get_group("SipAuthDataItem").unwrap_or(&empty);
    let scheme = find_str(group, "SipAuthenticationScheme")
        .map(|s| AuthScheme::parse(&s))
        .unwrap_or(AuthScheme::Unknown);

    MaaResponse {
        result: read_answer_result(msg),
        impi: msg.get_str("UserName").map(String::from),
        impu: msg.get_str("PublicIdentity").map(String::from),
        scheme,
        digest: if scheme == AuthScheme::SipDigest {
            read_digest(group)
        } else {
            None
        },
        aka: if scheme == AuthScheme::Aka {
            read_aka(group)
        } else {
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{avp::AvpValue, cx::result_codes::DIAMETER_SUCCESS};

    fn envelope() -> RequestEnvelope<'static> {
        RequestEnvelope {
            session_id: "s1",
            origin_host: "homestead.example.com",
            origin_realm: "example.com",
            destination_host: None,
            destination_realm: "hss.example.com",
        }
    }

    #[test]
    fn build_carries_impi_and_impu_independently() {
        let req = MarRequest {
            impi: "impi@ex",
            impu: "sip:impu@ex",
            scheme: AuthScheme::SipDigest,
            authorization: None,
            number_auth_items: 1,
        };
        let msg = build(&envelope(), &req);
        assert_eq!(msg.get_str("UserName"), Some("impi@ex"));
        assert_eq!(msg.get_str("PublicIdentity"), Some("sip:impu@ex"));
    }

    fn maa_with_digest(ha1_name: &str, realm_name: &str, qop_name: &str) -> Message {
        let mut msg = Message::new(303, 16777216, false);
        msg.push_i32("ResultCode", DIAMETER_SUCCESS);
        msg.push_str("UserName", "impi@ex");
        msg.push_str("PublicIdentity", "sip:impu@ex");
        msg.push_group("SipAuthDataItem", vec![
            Avp::new(
                "SipAuthenticationScheme",
                AvpValue::UTF8String("SIP Digest".into()),
            ),
            Avp::new(ha1_name, AvpValue::UTF8String("ha1value".into())),
            Avp::new(realm_name, AvpValue::UTF8String("example.com".into())),
            Avp::new(qop_name, AvpValue::UTF8String("auth".into())),
        ]);
        msg
    }

    #[test]
    fn read_prefers_3gpp_scoped_digest_avps() {
        let msg = maa_with_digest(
            "Sip3gppDigestHa1",
            "Sip3gppDigestRealm",
            "Sip3gppDigestQop",
        );
        let maa = read(&msg);
        let digest = maa.digest.expect("digest present");
        assert_eq!(digest.ha1, "ha1value");
        assert_eq!(digest.realm, "example.com");
    }

    #[test]
    fn read_falls_back_to_base_scoped_digest_avps() {
        let msg = maa_with_digest("DigestHa1", "DigestRealm", "DigestQop");
        let maa = read(&msg);
        assert!(maa.digest.is_some());
    }

    #[test]
    fn impi_and_impu_are_not_aliased() {
        let msg = maa_with_digest("DigestHa1", "DigestRealm", "DigestQop");
        let maa = read(&msg);
        assert_eq!(maa.impi.as_deref(), Some("impi@ex"));
        assert_eq!(maa.impu.as_deref(), Some("sip:impu@ex"));
        assert_ne!(maa.impi, maa.impu);
    }

    #[test]
    fn read_extracts_aka_vector() {
        let mut msg = Message::new(303, 16777216, false);
        msg.push_i32("ResultCode", DIAMETER_SUCCESS);
        msg.push_group("SipAuthDataItem", vec![
            Avp::new(
                "SipAuthenticationScheme",
                AvpValue::UTF8String("Digest-AKAv1-MD5".into()),
            ),
            Avp::new("SipAuthenticate", AvpValue::OctetString(vec![1, 2])),
            Avp::new("SipAuthorization", AvpValue::OctetString(vec![3, 4])),
            Avp::new("ConfidentialityKey", AvpValue::OctetString(vec![5])),
            Avp::new("IntegrityKey", AvpValue::OctetString(vec![6])),
        ]);
        let maa = read(&msg);
        let aka = maa.aka.expect("aka present");
        assert_eq!(aka.challenge, vec![1, 2]);
        assert_eq!(aka.response, vec![3, 4]);
    }
}
