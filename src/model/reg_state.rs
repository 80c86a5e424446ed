//! Registration state, including the `UNCHANGED` sentinel used only on the
//! handler→cache write path.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Registered,
    Unregistered,
    NotRegistered,
    /// Sentinel: "leave the cached regstate column alone". Never read back
    /// from the cache, only ever passed into `PutRegData::with_reg_state`.
    Unchanged,
}

impl RegistrationState {
    pub fn as_wire_str(self) -> &'static str {
        match self {
            RegistrationState::Registered => "REGISTERED",
            RegistrationState::Unregistered => "UNREGISTERED",
            RegistrationState::NotRegistered => "NOT_REGISTERED",
            RegistrationState::Unchanged => "UNCHANGED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "REGISTERED" => Some(RegistrationState::Registered),
            "UNREGISTERED" => Some(RegistrationState::Unregistered),
            "NOT_REGISTERED" => Some(RegistrationState::NotRegistered),
            _ => None,
        }
    }
}

impl fmt::Display for RegistrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire_str())
    }
}
