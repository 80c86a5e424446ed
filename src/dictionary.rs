//! AVP code dictionary for the Cx/Dx application (3GPP TS 29.229 / 29.329) plus
//! the base protocol AVPs (RFC 6733) a Cx exchange also needs.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// A Diameter AVP code together with the vendor it is scoped under.
/// `vendor = None` means a base-protocol (RFC 6733) AVP; `vendor = Some(10415)`
/// means a 3GPP vendor-specific AVP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AvpCode {
    pub code: u32,
    pub vendor: Option<u32>,
}

impl AvpCode {
    const fn base(code: u32) -> Self {
        AvpCode { code, vendor: None }
    }

    const fn vendor3gpp(code: u32) -> Self {
        AvpCode {
            code,
            vendor: Some(VENDOR_3GPP),
        }
    }
}

/// 3GPP's IANA-assigned vendor id.
pub const VENDOR_3GPP: u32 = 10415;

macro_rules! dict {
    ($($name:ident => $ctor:ident($code:expr)),+ $(,)?) => {
        /// Name → AVP code, built once at process start.
        pub static DICTIONARY: Lazy<HashMap<&'static str, AvpCode>> = Lazy::new(|| {
            let mut m = HashMap::with_capacity(64);
            $(m.insert(stringify!($name), AvpCode::$ctor($code));)+
            m
        });
    };
}

dict! {
    // Base protocol (RFC 6733)
    SessionId => base(263),
    OriginHost => base(264),
    OriginRealm => base(296),
    DestinationHost => base(293),
    DestinationRealm => base(283),
    UserName => base(1),
    ResultCode => base(268),
    ExperimentalResult => base(297),
    ExperimentalResultCode => base(298),
    AuthSessionState => base(277),
    VendorSpecificApplicationId => base(260),
    VendorId => base(266),
    AuthApplicationId => base(258),

    // Cx/Dx, 3GPP TS 29.229 / 29.329
    PublicIdentity => vendor3gpp(601),
    VisitedNetworkIdentifier => vendor3gpp(600),
    UserAuthorizationType => vendor3gpp(623),
    OriginatingRequest => vendor3gpp(867),
    ServerName => vendor3gpp(602),
    ServerCapabilities => vendor3gpp(603),
    MandatoryCapability => vendor3gpp(604),
    OptionalCapability => vendor3gpp(605),
    SipNumberAuthItems => vendor3gpp(607),
    SipAuthDataItem => vendor3gpp(612),
    SipAuthenticationScheme => vendor3gpp(608),
    SipAuthenticate => vendor3gpp(609),
    SipAuthorization => vendor3gpp(610),
    SipAuthContext => vendor3gpp(611),
    ConfidentialityKey => vendor3gpp(625),
    IntegrityKey => vendor3gpp(626),
    ServerAssignmentType => vendor3gpp(614),
    UserDataAlreadyAvailable => vendor3gpp(624),
    UserData => vendor3gpp(606),
    ChargingInformation => vendor3gpp(618),
    PrimaryChargingCollectionFunctionName => vendor3gpp(619),
    SecondaryChargingCollectionFunctionName => vendor3gpp(620),
    PrimaryEventChargingFunctionName => vendor3gpp(621),
    SecondaryEventChargingFunctionName => vendor3gpp(622),
    DeregistrationReason => vendor3gpp(615),
    ReasonCode => vendor3gpp(616),
    ReasonInfo => vendor3gpp(617),
    AssociatedIdentities => vendor3gpp(632),

    // Base-protocol-scoped digest AVPs (OpenIMSCore-style HSS compatibility
    // fallback; these are NOT 3GPP-vendor-scoped on the wire for such HSSes).
    DigestHa1 => base(121),
    DigestRealm => base(104),
    DigestQop => base(110),

    // 3GPP-scoped digest AVPs (preferred when present).
    Sip3gppDigestHa1 => vendor3gpp(613),
    Sip3gppDigestRealm => vendor3gpp(104),
    Sip3gppDigestQop => vendor3gpp(110),
}

/// Look up an AVP code by its dictionary name.
///
/// Panics only if a name used internally by the codec is misspelled, which
/// would be caught immediately by any codec unit test — never by request
/// traffic.
pub fn code(name: &str) -> AvpCode {
    *DICTIONARY
        .get(name)
        .unwrap_or_else(|| panic!("unknown AVP name in dictionary: {name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_resolves_known_names() {
        assert_eq!(code("PublicIdentity"), AvpCode::vendor3gpp(601));
        assert_eq!(code("UserName"), AvpCode::base(1));
    }

    #[test]
    #[should_panic(expected = "unknown AVP name")]
    fn dictionary_panics_on_unknown_name() {
        code("NotARealAvp");
    }
}
