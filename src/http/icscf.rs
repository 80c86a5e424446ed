//! The HSS-result → HTTP mapping shared by the registration-status and
//! location-info handlers (§4.5).

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::cx::result_codes::{
    DIAMETER_ERROR_AUTHORIZATION_REJECTED, DIAMETER_ERROR_IDENTITIES_DONT_MATCH,
    DIAMETER_ERROR_IDENTITY_NOT_REGISTERED, DIAMETER_ERROR_ROAMING_NOT_ALLOWED,
    DIAMETER_ERROR_USER_UNKNOWN, DIAMETER_SUBSEQUENT_REGISTRATION, DIAMETER_SUCCESS,
    DIAMETER_TOO_BUSY, DIAMETER_UNREGISTERED_SERVICE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IcscfOutcome {
    Ok,
    NotFound,
    Forbidden,
    /// HSS reported overload; the caller additionally records a latency
    /// penalty so the HTTP stack can throttle incoming load.
    Overload,
    Error,
}

pub fn classify(code: i32) -> IcscfOutcome {
    match code {
        DIAMETER_SUCCESS | DIAMETER_SUBSEQUENT_REGISTRATION | DIAMETER_UNREGISTERED_SERVICE => {
            IcscfOutcome::Ok
        },
        DIAMETER_ERROR_USER_UNKNOWN
        | DIAMETER_ERROR_IDENTITIES_DONT_MATCH
        | DIAMETER_ERROR_IDENTITY_NOT_REGISTERED => IcscfOutcome::NotFound,
        DIAMETER_ERROR_ROAMING_NOT_ALLOWED | DIAMETER_ERROR_AUTHORIZATION_REJECTED => {
            IcscfOutcome::Forbidden
        },
        DIAMETER_TOO_BUSY => IcscfOutcome::Overload,
        _ => IcscfOutcome::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_family_maps_to_ok() {
        assert_eq!(classify(DIAMETER_SUCCESS), IcscfOutcome::Ok);
        assert_eq!(classify(DIAMETER_SUBSEQUENT_REGISTRATION), IcscfOutcome::Ok);
        assert_eq!(classify(DIAMETER_UNREGISTERED_SERVICE), IcscfOutcome::Ok);
    }

    #[test]
    fn too_busy_maps_to_overload() {
        assert_eq!(classify(DIAMETER_TOO_BUSY), IcscfOutcome::Overload);
    }

    #[test]
    fn unmapped_code_is_an_error() {
        assert_eq!(classify(9999), IcscfOutcome::Error);
    }
}
