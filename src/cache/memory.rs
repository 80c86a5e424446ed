//! In-process reference [`CacheStore`]: a stand-in for the real wide-column
//! backend, used for local running, demos and the test suite.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    collections::BTreeSet,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::{
    cache::{CacheError, CacheStore, PutRegData},
    model::{
        auth_vector::DigestAuthVector, cached_record::CachedRegData, charging::ChargingAddresses,
        reg_state::RegistrationState,
    },
};

#[derive(Debug, Clone)]
struct Row {
    xml: Option<String>,
    regstate: RegistrationState,
    associated_impis: BTreeSet<String>,
    charging_addrs: Option<ChargingAddresses>,
    expires_at: Option<Instant>,
}

impl Row {
    fn blank() -> Self {
        Row {
            xml: None,
            regstate: RegistrationState::NotRegistered,
            associated_impis: BTreeSet::new(),
            charging_addrs: None,
            expires_at: None,
        }
    }

    fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    fn is_expired(&self) -> bool {
        matches!(self.expires_at, Some(at) if at <= Instant::now())
    }
}

#[derive(Default)]
pub struct MemoryCacheStore {
    rows: DashMap<String, Row>,
    alias_to_primary: DashMap<String, String>,
    impi_to_public_ids: DashMap<String, BTreeSet<String>>,
    digests: DashMap<String, DigestAuthVector>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Not part of the `CacheStore` contract: lets tests and local demos
    /// pre-provision a digest without a round trip through the HSS.
    pub fn seed_digest(&self, impi: &str, vector: DigestAuthVector) {
        self.digests.insert(impi.to_string(), vector);
    }

    fn resolve_primary(&self, impu: &str) -> Option<String> {
        if self.rows.contains_key(impu) {
            Some(impu.to_string())
        } else {
            self.alias_to_primary.get(impu).map(|p| p.clone())
        }
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get_reg_data(&self, impu: &str) -> Result<CachedRegData, CacheError> {
        let primary = self.resolve_primary(impu).ok_or(CacheError::NotFound)?;
        let expired = {
            let row = self.rows.get(&primary).ok_or(CacheError::NotFound)?;
            row.is_expired()
        };
        if expired {
            self.rows.remove(&primary);
            return Err(CacheError::NotFound);
        }
        let row = self.rows.get(&primary).ok_or(CacheError::NotFound)?;
        Ok(CachedRegData {
            xml: row.xml.clone(),
            regstate: row.regstate,
            associated_impis: row.associated_impis.clone(),
            charging_addrs: row.charging_addrs.clone(),
            ttl_remaining: row.ttl_remaining(),
        })
    }

    async fn get_auth_vector(
        &self,
        impi: &str,
        _impu: Option<&str>,
    ) -> Result<DigestAuthVector, CacheError> {
        self.digests
            .get(impi)
            .map(|v| v.clone())
            .ok_or(CacheError::NotFound)
    }

    async fn get_associated_public_ids(&self, impi: &str) -> Result<Vec<String>, CacheError> {
        Ok(self
            .impi_to_public_ids
            .get(impi)
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn get_associated_primary_public_ids(
        &self,
        impis: &[String],
    ) -> Result<Vec<String>, CacheError> {
        let mut out = BTreeSet::new();
        for impi in impis {
            if let Some(impus) = self.impi_to_public_ids.get(impi) {
                for impu in impus.iter() {
                    if let Some(primary) = self.resolve_primary(impu) {
                        out.insert(primary);
                    }
                }
            }
        }
        Ok(out.into_iter().collect())
    }

    async fn put_reg_data(&self, irs: &[String], data: PutRegData) -> Result<(), CacheError> {
        let primary = irs
            .first()
            .ok_or_else(|| CacheError::InvalidRequest("empty IRS".into()))?
            .clone();
        let expires_at = if data.ttl.is_zero() {
            None
        } else {
            Some(Instant::now() + data.ttl)
        };

        {
            let mut row = self.rows.entry(primary.clone()).or_insert_with(Row::blank);
            if let Some(xml) = data.xml {
                row.xml = Some(xml);
            }
            if let Some(regstate) = data.regstate {
                row.regstate = regstate;
            }
            if let Some(impis) = data.associated_impis {
                for impi in impis {
                    row.associated_impis.insert(impi.clone());
                    self.impi_to_public_ids
                        .entry(impi)
                        .or_default()
                        .insert(primary.clone());
                }
            }
            if let Some(addrs) = data.charging_addrs {
                row.charging_addrs = Some(addrs);
            }
            row.expires_at = expires_at;
        }

        for alias in irs.iter().skip(1) {
            self.alias_to_primary.insert(alias.clone(), primary.clone());
        }
        Ok(())
    }

    async fn put_associated_public_id(
        &self,
        impi: &str,
        impu: &str,
        _ttl: Duration,
    ) -> Result<(), CacheError> {
        self.impi_to_public_ids
            .entry(impi.to_string())
            .or_default()
            .insert(impu.to_string());
        Ok(())
    }

    async fn put_associated_private_id(
        &self,
        irs: &[String],
        impi: &str,
        _ttl: Duration,
    ) -> Result<(), CacheError> {
        if let Some(primary) = irs.first()
            && let Some(mut row) = self.rows.get_mut(primary)
        {
            row.associated_impis.insert(impi.to_string());
        }
        for impu in irs {
            self.impi_to_public_ids
                .entry(impi.to_string())
                .or_default()
                .insert(impu.clone());
        }
        Ok(())
    }

    async fn delete_public_ids(&self, irs: &[String], impis: &[String]) -> Result<(), CacheError> {
        for impu in irs {
            self.rows.remove(impu);
            self.alias_to_primary.remove(impu);
        }
        for impi in impis {
            if let Some(mut set) = self.impi_to_public_ids.get_mut(impi) {
                for impu in irs {
                    set.remove(impu);
                }
            }
        }
        Ok(())
    }

    async fn dissociate_irs_from_impi(
        &self,
        irs: &[String],
        impis: &[String],
    ) -> Result<(), CacheError> {
        for impi in impis {
            if let Some(mut set) = self.impi_to_public_ids.get_mut(impi) {
                for impu in irs {
                    set.remove(impu);
                }
            }
        }
        if let Some(primary) = irs.first()
            && let Some(mut row) = self.rows.get_mut(primary)
        {
            for impi in impis {
                row.associated_impis.remove(impi);
            }
        }
        Ok(())
    }

    async fn delete_impi_mapping(&self, impis: &[String]) -> Result<(), CacheError> {
        for impi in impis {
            self.impi_to_public_ids.remove(impi);
        }
        Ok(())
    }
}
