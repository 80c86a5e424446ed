//! The record the wide-column cache stores for one default public identity.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{collections::BTreeSet, time::Duration};

use crate::model::{charging::ChargingAddresses, reg_state::RegistrationState};

#[derive(Debug, Clone, PartialEq)]
pub struct CachedRegData {
    pub xml: Option<String>,
    pub regstate: RegistrationState,
    pub associated_impis: BTreeSet<String>,
    pub charging_addrs: Option<ChargingAddresses>,
    /// How long is left before this row expires, as observed at read time.
    pub ttl_remaining: Option<Duration>,
}

impl CachedRegData {
    pub fn empty() -> Self {
        CachedRegData {
            xml: None,
            regstate: RegistrationState::NotRegistered,
            associated_impis: BTreeSet::new(),
            charging_addrs: None,
            ttl_remaining: None,
        }
    }

    /// Whether a re-registration should be treated as fresh (no SAR needed)
    /// given the configured re-registration interval `r`: fresh as long as
    /// the elapsed time since the last write (`2r - ttl_remaining`) has not
    /// yet exceeded `r`, i.e. `ttl_remaining >= r`.
    pub fn reregistration_is_fresh(&self, r: Duration) -> bool {
        match self.ttl_remaining {
            Some(remaining) => remaining >= r,
            None => false,
        }
    }
}
