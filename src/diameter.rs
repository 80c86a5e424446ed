//! The Diameter transport collaborator boundary. Framing, peer tables,
//! routing and session management live outside this crate; handlers only
//! ever see the [`DiameterTransport`] trait.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use async_trait::async_trait;
use thiserror::Error;

use crate::avp::Message;

#[derive(Debug, Error)]
pub enum DiameterError {
    #[error("Diameter request timed out")]
    Timeout,
    #[error("Diameter transport unavailable: {0}")]
    Unavailable(String),
    #[error("malformed Diameter answer: {0}")]
    Malformed(String),
}

/// Sends a Cx request and awaits its answer. Implementations own peer
/// selection, retransmission and session bookkeeping; this crate only
/// constructs the outbound [`Message`] and reads the inbound one.
#[async_trait]
pub trait DiameterTransport: Send + Sync {
    async fn send(&self, request: Message) -> Result<Message, DiameterError>;
}

/// Whether an HSS is configured at all. Several handlers take a "no HSS"
/// branch that serves purely from cache; `None` here selects that branch
/// without the handler needing a second config flag.
pub type HssHandle = Option<std::sync::Arc<dyn DiameterTransport>>;
