//! The wide-column cache collaborator boundary: ten typed operations over
//! subscription state. The real backend (connection pooling, CQL dialect,
//! batching) lives outside this crate; [`MemoryCacheStore`](memory::MemoryCacheStore)
//! is a reference implementation for local running and tests.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

pub mod memory;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{
    cached_record::CachedRegData, charging::ChargingAddresses, reg_state::RegistrationState,
};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("no cache row found")]
    NotFound,
    #[error("invalid cache request: {0}")]
    InvalidRequest(String),
    #[error("cache backend unavailable")]
    Unavailable,
    #[error("cache connection error: {0}")]
    Connection(String),
    #[error("unknown cache error: {0}")]
    Unknown(String),
}

/// Builder for a `PutRegData` write. Only fields set via `with_*` are
/// written; unset fields leave the corresponding column untouched rather
/// than clearing it, and `with_reg_state(RegistrationState::Unchanged)` is
/// equivalent to never calling `with_reg_state` at all.
#[derive(Debug, Clone, Default)]
pub struct PutRegData {
    pub(crate) xml: Option<String>,
    pub(crate) regstate: Option<RegistrationState>,
    pub(crate) associated_impis: Option<Vec<String>>,
    pub(crate) charging_addrs: Option<ChargingAddresses>,
    pub(crate) ttl: Duration,
}

impl PutRegData {
    pub fn new(ttl: Duration) -> Self {
        PutRegData {
            ttl,
            ..Default::default()
        }
    }

    pub fn with_xml(mut self, xml: impl Into<String>) -> Self {
        self.xml = Some(xml.into());
        self
    }

    pub fn with_reg_state(mut self, state: RegistrationState) -> Self {
        if state != RegistrationState::Unchanged {
            self.regstate = Some(state);
        }
        self
    }

    pub fn with_associated_impis(mut self, impis: impl IntoIterator<Item = String>) -> Self {
        self.associated_impis = Some(impis.into_iter().collect());
        self
    }

    pub fn with_charging_addrs(mut self, addrs: ChargingAddresses) -> Self {
        self.charging_addrs = Some(addrs);
        self
    }
}

/// The ten cache operations the handlers are built on. `irs` parameters
/// take every public identity in an Implicit Registration Set; the default
/// (first) entry is the row's primary key, the rest are alias rows pointing
/// back at it.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get_reg_data(&self, impu: &str) -> Result<CachedRegData, CacheError>;

    async fn get_auth_vector(
        &self,
        impi: &str,
        impu: Option<&str>,
    ) -> Result<crate::model::auth_vector::DigestAuthVector, CacheError>;

    async fn get_associated_public_ids(&self, impi: &str) -> Result<Vec<String>, CacheError>;

    async fn get_associated_primary_public_ids(
        &self,
        impis: &[String],
    ) -> Result<Vec<String>, CacheError>;

    async fn put_reg_data(&self, irs: &[String], data: PutRegData) -> Result<(), CacheError>;

    async fn put_associated_public_id(
        &self,
        impi: &str,
        impu: &str,
        ttl: Duration,
    ) -> Result<(), CacheError>;

    async fn put_associated_private_id(
        &self,
        irs: &[String],
        impi: &str,
        ttl: Duration,
    ) -> Result<(), CacheError>;

    async fn delete_public_ids(&self, irs: &[String], impis: &[String]) -> Result<(), CacheError>;

    async fn dissociate_irs_from_impi(
        &self,
        irs: &[String],
        impis: &[String],
    ) -> Result<(), CacheError>;

    async fn delete_impi_mapping(&self, impis: &[String]) -> Result<(), CacheError>;
}
