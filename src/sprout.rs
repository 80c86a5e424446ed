//! The Sprout connection: unlike the Diameter transport and the wide-column
//! cache, Sprout notification IS part of this crate's core (§2), so this is
//! a concrete `reqwest`-backed client behind a small trait (kept as a trait
//! purely so handler tests can substitute a scripted double).

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SproutError {
    #[error("request to Sprout failed: {0}")]
    Request(String),
}

#[async_trait]
pub trait SproutConnection: Send + Sync {
    /// Sends `DELETE {base_url}{path}` with a JSON body and returns the
    /// response's HTTP status code. Connection pooling, retries and DNS
    /// resolution are `reqwest`'s concern, not this trait's.
    async fn send_delete(&self, path: &str, body: serde_json::Value) -> Result<u16, SproutError>;
}

pub struct ReqwestSproutConnection {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestSproutConnection {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        ReqwestSproutConnection {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
            timeout,
        }
    }
}

#[async_trait]
impl SproutConnection for ReqwestSproutConnection {
    async fn send_delete(&self, path: &str, body: serde_json::Value) -> Result<u16, SproutError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .delete(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| SproutError::Request(e.to_string()))?;
        Ok(response.status().as_u16())
    }
}

/// Builds the `/registrations?send-notifications=...` path and JSON body
/// described in §4.6. `pairings` is `(primary_impu, impi)` tuples; for
/// reasons other than `PERMANENT_TERMINATION` the caller passes an empty
/// `impi` for each pairing and only the primary IMPUs matter.
pub fn build_deregistration_request(
    send_notifications: bool,
    pairings: &[(String, String)],
    include_impi: bool,
) -> (String, serde_json::Value) {
    let path = format!("/registrations?send-notifications={send_notifications}");
    let registrations: Vec<serde_json::Value> = pairings
        .iter()
        .map(|(impu, impi)| {
            if include_impi {
                serde_json::json!({"primary-impu": impu, "impi": impi})
            } else {
                serde_json::json!({"primary-impu": impu})
            }
        })
        .collect();
    (path, serde_json::json!({"registrations": registrations}))
}
