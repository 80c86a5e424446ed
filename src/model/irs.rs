//! Parsing and rendering of `IMSSubscription` XML: derives Implicit
//! Registration Sets (one per `<ServiceProfile>`) and their default public
//! identity, and renders the `<ClearwaterRegData>` HTTP response body.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::fmt::Write as _;

use quick_xml::{events::Event, reader::Reader};
use thiserror::Error;
use tracing::warn;

use crate::model::reg_state::RegistrationState;

#[derive(Debug, Error)]
pub enum IrsError {
    #[error("malformed IMS-Subscription XML: {0}")]
    Xml(String),
}

/// One `<ServiceProfile>`: an Implicit Registration Set. All public
/// identities in the set are aliases of one another; the first one in
/// document order is the default (the cache key for the set).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceProfile {
    pub public_identities: Vec<String>,
}

impl ServiceProfile {
    pub fn default_identity(&self) -> Option<&str> {
        self.public_identities.first().map(String::as_str)
    }

    pub fn contains(&self, impu: &str) -> bool {
        self.public_identities.iter().any(|i| i == impu)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImsSubscription {
    pub private_id: Option<String>,
    pub service_profiles: Vec<ServiceProfile>,
}

impl ImsSubscription {
    pub fn all_public_identities(&self) -> impl Iterator<Item = &str> {
        self.service_profiles
            .iter()
            .flat_map(|p| p.public_identities.iter().map(String::as_str))
    }

    /// Find the service profile (the IRS) an IMPU belongs to.
    pub fn profile_containing(&self, impu: &str) -> Option<&ServiceProfile> {
        self.service_profiles.iter().find(|p| p.contains(impu))
    }

    /// The default public identity of the first service profile, used when
    /// a request carries no IMPU of its own to anchor on.
    pub fn default_public_identity(&self) -> Option<&str> {
        self.service_profiles.first().and_then(|p| p.default_identity())
    }
}

/// Parse an `IMSSubscription` document. Tolerant: a `<PublicIdentity>` with
/// no (or blank) `<Identity>` text is skipped with a warning, not a parse
/// error, matching HSSes that occasionally deliver partial entries.
pub fn parse_ims_subscription(xml: &str) -> Result<ImsSubscription, IrsError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut private_id = None;
    let mut service_profiles = Vec::new();
    let mut current_profile: Option<ServiceProfile> = None;
    let mut in_public_identity = false;
    let mut identity_seen_in_current_public_identity = false;
    let mut in_identity = false;
    let mut in_private_id = false;
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| IrsError::Xml(e.to_string()))?;
        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"ServiceProfile" => current_profile = Some(ServiceProfile::default()),
                b"PublicIdentity" => {
                    in_public_identity = true;
                    identity_seen_in_current_public_identity = false;
                },
                b"Identity" if in_public_identity => in_identity = true,
                b"PrivateID" => in_private_id = true,
                _ => {},
            },
            Event::Text(t) => {
                let text = t
                    .unescape()
                    .map_err(|e| IrsError::Xml(e.to_string()))?
                    .trim()
                    .to_string();
                if text.is_empty() {
                    // fallthrough: neither branch below fires on blank text
                } else if in_identity {
                    if let Some(profile) = current_profile.as_mut() {
                        profile.public_identities.push(text);
                    }
                    identity_seen_in_current_public_identity = true;
                } else if in_private_id {
                    private_id = Some(text);
                }
            },
            Event::End(e) => match e.name().as_ref() {
                b"ServiceProfile" => {
                    if let Some(p) = current_profile.take() {
                        service_profiles.push(p);
                    }
                },
                b"PublicIdentity" => {
                    if !identity_seen_in_current_public_identity {
                        warn!("PublicIdentity element with no usable Identity text, skipping");
                    }
                    in_public_identity = false;
                },
                b"Identity" => in_identity = false,
                b"PrivateID" => in_private_id = false,
                _ => {},
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(ImsSubscription {
        private_id,
        service_profiles,
    })
}

/// Render the `<ClearwaterRegData>` HTTP response body. When `subscription`
/// is `None` (the dereg-with-no-known-XML case) the body carries only the
/// registration state. Tab-indented with a trailing blank line, matching
/// the wire format HSS-facing clients already parse.
pub fn render_clearwater_regdata(
    regstate: RegistrationState,
    subscription: Option<&ImsSubscription>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<ClearwaterRegData>");
    let _ = writeln!(out, "\t<RegistrationState>{regstate}</RegistrationState>");
    if let Some(sub) = subscription {
        let _ = writeln!(out, "\t<IMSSubscription>");
        if let Some(private_id) = &sub.private_id {
            let _ = writeln!(out, "\t\t<PrivateID>{private_id}</PrivateID>");
        }
        for profile in &sub.service_profiles {
            let _ = writeln!(out, "\t\t<ServiceProfile>");
            for identity in &profile.public_identities {
                let _ = writeln!(out, "\t\t\t<PublicIdentity>");
                let _ = writeln!(out, "\t\t\t\t<Identity>{identity}</Identity>");
                let _ = writeln!(out, "\t\t\t</PublicIdentity>");
            }
            let _ = writeln!(out, "\t\t</ServiceProfile>");
        }
        let _ = writeln!(out, "\t</IMSSubscription>");
    }
    let _ = writeln!(out, "</ClearwaterRegData>");
    out.push('\n');
    out
}
