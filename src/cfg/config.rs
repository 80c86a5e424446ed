// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{fs, net::SocketAddr, path::Path, time::Duration};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    /// HTTP control-plane surface (Sprout-facing and I-CSCF-facing).
    pub http: HttpConfig,
    /// HSS-facing Cx parameters.
    pub hss: HssConfig,
    /// The Sprout collaborator's HTTP endpoint.
    pub sprout: SproutConfig,
    /// Implementation/runtime parameters that live outside the Cx protocol.
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct HttpConfig {
    #[serde(rename = "ListenAddress")]
    /// Address the axum server binds, e.g. `0.0.0.0:8888`.
    pub listen_address: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct HssConfig {
    #[serde(rename = "Enabled", default)]
    /// Whether a real HSS is configured. When `false` every handler takes
    /// its cache-only branch and no Diameter traffic is ever sent.
    pub enabled: bool,

    #[serde(rename = "OriginHost", default = "default_origin_host")]
    /// Our own Diameter identity on outbound Cx requests.
    pub origin_host: String,

    #[serde(rename = "OriginRealm", default = "default_origin_realm")]
    pub origin_realm: String,

    #[serde(rename = "DestinationRealm", default)]
    /// Required when `Enabled = true`.
    pub destination_realm: String,

    #[serde(rename = "DestinationHost", default)]
    pub destination_host: Option<String>,

    #[serde(rename = "DefaultServerName", default = "default_server_name")]
    /// The S-CSCF name this gateway assigns on SAR (`sprout`, typically).
    pub default_server_name: String,

    #[serde(
        rename = "ReregistrationInterval",
        with = "serde_secs",
        default = "default_reregistration_interval"
    )]
    /// R: the HSS-configured re-registration interval. Cache TTL is `2·R`.
    pub reregistration_interval: Duration,

    #[serde(
        rename = "RequestTimeout",
        with = "serde_secs",
        default = "default_diameter_timeout"
    )]
    /// Per-request timeout for an outbound Cx exchange.
    pub request_timeout: Duration,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SproutConfig {
    #[serde(rename = "BaseUrl")]
    pub base_url: String,

    #[serde(
        rename = "RequestTimeout",
        with = "serde_secs",
        default = "default_sprout_timeout"
    )]
    pub request_timeout: Duration,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RuntimeConfig {
    #[serde(rename = "WorkerThreads", default)]
    /// `None` lets Tokio pick (one worker per core).
    pub worker_threads: Option<usize>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            worker_threads: None,
        }
    }
}

fn default_origin_host() -> String {
    "homestead.example.com".to_string()
}

fn default_origin_realm() -> String {
    "example.com".to_string()
}

fn default_server_name() -> String {
    "sip:sprout.example.com".to_string()
}

fn default_reregistration_interval() -> Duration {
    Duration::from_secs(300)
}

fn default_diameter_timeout() -> Duration {
    Duration::from_secs(20)
}

fn default_sprout_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Config {
    /// Loads the configuration from YAML, validates it, and returns the
    /// ready-to-use value.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        let mut cfg: Config =
            serde_yaml::from_str(&s).context("failed to parse config YAML")?;
        cfg.validate_and_normalize()?;
        Ok(cfg)
    }

    /// Validates invariants implied by §5/§10 of the design: a parseable
    /// listen address, a positive re-registration interval, and (when an
    /// HSS is configured) a non-empty destination realm.
    pub fn validate_and_normalize(&mut self) -> Result<()> {
        self.http
            .listen_address
            .parse::<SocketAddr>()
            .with_context(|| {
                format!(
                    "ListenAddress {:?} is not a valid socket address",
                    self.http.listen_address
                )
            })?;

        ensure!(
            !self.hss.reregistration_interval.is_zero(),
            "ReregistrationInterval must be > 0"
        );
        ensure!(
            !self.hss.request_timeout.is_zero(),
            "HSS RequestTimeout must be > 0"
        );

        if self.hss.enabled {
            ensure!(
                !self.hss.destination_realm.is_empty(),
                "DestinationRealm is required when Hss.Enabled is true"
            );
        }

        ensure!(!self.sprout.base_url.is_empty(), "Sprout BaseUrl is required");
        ensure!(
            !self.sprout.request_timeout.is_zero(),
            "Sprout RequestTimeout must be > 0"
        );

        Ok(())
    }

    /// `2·R`: the cache time-to-live derived from the configured
    /// re-registration interval.
    pub fn cache_ttl(&self) -> Duration {
        self.hss.reregistration_interval * 2
    }
}

/// Serde helpers for representing `Duration` as a number of seconds.
mod serde_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(d)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            http: HttpConfig {
                listen_address: "0.0.0.0:8888".to_string(),
            },
            hss: HssConfig {
                enabled: true,
                origin_host: default_origin_host(),
                origin_realm: default_origin_realm(),
                destination_realm: "hss.example.com".to_string(),
                destination_host: None,
                default_server_name: default_server_name(),
                reregistration_interval: Duration::from_secs(300),
                request_timeout: Duration::from_secs(20),
            },
            sprout: SproutConfig {
                base_url: "http://sprout.example.com:9888".to_string(),
                request_timeout: Duration::from_secs(10),
            },
            runtime: RuntimeConfig::default(),
        }
    }

    #[test]
    fn cache_ttl_is_twice_the_reregistration_interval() {
        let cfg = sample();
        assert_eq!(cfg.cache_ttl(), Duration::from_secs(600));
    }

    #[test]
    fn rejects_unparseable_listen_address() {
        let mut cfg = sample();
        cfg.http.listen_address = "not-an-address".to_string();
        assert!(cfg.validate_and_normalize().is_err());
    }

    #[test]
    fn requires_destination_realm_when_hss_enabled() {
        let mut cfg = sample();
        cfg.hss.destination_realm.clear();
        assert!(cfg.validate_and_normalize().is_err());
    }

    #[test]
    fn allows_empty_destination_realm_when_hss_disabled() {
        let mut cfg = sample();
        cfg.hss.enabled = false;
        cfg.hss.destination_realm.clear();
        assert!(cfg.validate_and_normalize().is_ok());
    }
}
