//! Result-Code / Experimental-Result-Code values used across Cx answers.
//! Follows the numbering of 3GPP TS 29.229 §6.3 and 29.228 §6.3; since the
//! Diameter transport itself is a collaborator, only the numeric identity
//! matters here, not bit-exact wire encoding.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Base protocol `DIAMETER_SUCCESS`.
pub const DIAMETER_SUCCESS: i32 = 2001;
/// Base protocol `DIAMETER_UNABLE_TO_COMPLY`.
pub const DIAMETER_UNABLE_TO_COMPLY: i32 = 5012;
/// Base protocol `DIAMETER_TOO_BUSY`.
pub const DIAMETER_TOO_BUSY: i32 = 3004;

/// UAA/LIA experimental result: subscriber has no existing binding.
pub const DIAMETER_FIRST_REGISTRATION: i32 = 2001;
/// UAA/LIA experimental result: subscriber already has a binding.
pub const DIAMETER_SUBSEQUENT_REGISTRATION: i32 = 2002;
/// UAA/LIA experimental result: not registered, but HSS holds an
/// unregistered-state service profile.
pub const DIAMETER_UNREGISTERED_SERVICE: i32 = 2003;

pub const DIAMETER_ERROR_USER_UNKNOWN: i32 = 5001;
pub const DIAMETER_ERROR_IDENTITIES_DONT_MATCH: i32 = 5002;
pub const DIAMETER_ERROR_IDENTITY_NOT_REGISTERED: i32 = 5003;
pub const DIAMETER_ERROR_ROAMING_NOT_ALLOWED: i32 = 5004;
pub const DIAMETER_ERROR_AUTHORIZATION_REJECTED: i32 = 5007;

pub fn is_success(code: i32) -> bool {
    (2000..3000).contains(&code)
}
