//! Shared test doubles and router wiring for the black-box HTTP scenarios.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use axum::Router;
use homestead_cx_gateway::{
    avp::Message,
    cache::memory::MemoryCacheStore,
    cfg::config::{Config, HssConfig, HttpConfig, RuntimeConfig, SproutConfig},
    diameter::{DiameterError, DiameterTransport},
    handlers::context::AppContext,
    http::routes,
    sprout::{SproutConnection, SproutError},
    stats::InMemoryStats,
};

/// Returns one scripted [`Message`] per call to `send`, in order, and
/// records every outbound request for assertions.
#[derive(Default)]
pub struct ScriptedDiameter {
    answers: Mutex<Vec<Message>>,
    requests: Mutex<Vec<Message>>,
}

impl ScriptedDiameter {
    pub fn with_answers(answers: Vec<Message>) -> Self {
        ScriptedDiameter {
            answers: Mutex::new(answers.into_iter().rev().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Message> {
        self.requests.lock().expect("lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("lock").len()
    }
}

#[async_trait]
impl DiameterTransport for ScriptedDiameter {
    async fn send(&self, request: Message) -> Result<Message, DiameterError> {
        self.requests.lock().expect("lock").push(request);
        self.answers
            .lock()
            .expect("lock")
            .pop()
            .ok_or(DiameterError::Unavailable("no scripted answer left".to_string()))
    }
}

#[derive(Default)]
pub struct ScriptedSprout {
    status: Mutex<u16>,
    deletes: Mutex<Vec<(String, serde_json::Value)>>,
}

impl ScriptedSprout {
    pub fn with_status(status: u16) -> Self {
        ScriptedSprout {
            status: Mutex::new(status),
            deletes: Mutex::new(Vec::new()),
        }
    }

    pub fn deletes(&self) -> Vec<(String, serde_json::Value)> {
        self.deletes.lock().expect("lock").clone()
    }
}

#[async_trait]
impl SproutConnection for ScriptedSprout {
    async fn send_delete(&self, path: &str, body: serde_json::Value) -> Result<u16, SproutError> {
        self.deletes.lock().expect("lock").push((path.to_string(), body));
        Ok(*self.status.lock().expect("lock"))
    }
}

pub fn test_config(hss_enabled: bool) -> Config {
    Config {
        http: HttpConfig {
            listen_address: "127.0.0.1:0".to_string(),
        },
        hss: HssConfig {
            enabled: hss_enabled,
            origin_host: "homestead.example.com".to_string(),
            origin_realm: "example.com".to_string(),
            destination_realm: "hss.example.com".to_string(),
            destination_host: None,
            default_server_name: "sprout.example.com".to_string(),
            reregistration_interval: Duration::from_secs(3600),
            request_timeout: Duration::from_secs(5),
        },
        sprout: SproutConfig {
            base_url: "http://sprout.example.com".to_string(),
            request_timeout: Duration::from_secs(5),
        },
        runtime: RuntimeConfig { worker_threads: None },
    }
}

pub fn router_with(
    hss: Option<Arc<dyn DiameterTransport>>,
    sprout: Arc<dyn SproutConnection>,
) -> Router {
    let ctx = Arc::new(AppContext::new(
        Arc::new(MemoryCacheStore::new()),
        hss.clone(),
        sprout,
        Arc::new(InMemoryStats::new()),
        test_config(hss.is_some()),
    ));
    routes::router(ctx)
}

pub fn router_with_cache(
    cache: Arc<MemoryCacheStore>,
    hss: Option<Arc<dyn DiameterTransport>>,
    sprout: Arc<dyn SproutConnection>,
) -> (Router, Arc<AppContext>) {
    let ctx = Arc::new(AppContext::new(
        cache,
        hss.clone(),
        sprout,
        Arc::new(InMemoryStats::new()),
        test_config(hss.is_some()),
    ));
    (routes::router(ctx.clone()), ctx)
}
