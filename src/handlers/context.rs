//! The process-wide `AppContext`: every handler receives an `Arc<AppContext>`
//! rather than reaching for module-level globals. Constructed once in `main`.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::sync::Arc;

use crate::{cache::CacheStore, cfg::config::Config, diameter::HssHandle, sprout::SproutConnection, stats::StatsHandle};

pub struct AppContext {
    pub cache: Arc<dyn CacheStore>,
    pub hss: HssHandle,
    pub sprout: Arc<dyn SproutConnection>,
    pub stats: Arc<dyn StatsHandle>,
    pub config: Config,
}

impl AppContext {
    pub fn new(
        cache: Arc<dyn CacheStore>,
        hss: HssHandle,
        sprout: Arc<dyn SproutConnection>,
        stats: Arc<dyn StatsHandle>,
        config: Config,
    ) -> Self {
        AppContext {
            cache,
            hss,
            sprout,
            stats,
            config,
        }
    }

    pub fn hss_enabled(&self) -> bool {
        self.hss.is_some()
    }

    pub fn reregistration_interval(&self) -> std::time::Duration {
        self.config.hss.reregistration_interval
    }

    pub fn cache_ttl(&self) -> std::time::Duration {
        self.config.cache_ttl()
    }

    pub fn request_envelope<'a>(&'a self, session_id: &'a str) -> crate::cx::RequestEnvelope<'a> {
        crate::cx::RequestEnvelope {
            session_id,
            origin_host: &self.config.hss.origin_host,
            origin_realm: &self.config.hss.origin_realm,
            destination_host: self.config.hss.destination_host.as_deref(),
            destination_realm: &self.config.hss.destination_realm,
        }
    }
}
