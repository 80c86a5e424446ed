//! `GET /impi/{impi}/registration-status`: the I-CSCF UAR/UAA query.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use axum::Json;

use crate::{
    cx::uar::{self, UarRequest, UserAuthorizationType},
    handlers::context::AppContext,
    http::{dto::IcscfResponse, error::HandlerError, icscf::{self, IcscfOutcome}},
    stats::{HssLatencyKind, timed_hss_op},
};

fn parse_auth_type(raw: Option<&str>) -> UserAuthorizationType {
    match raw {
        Some("DEREG") => UserAuthorizationType::Deregistration,
        Some("CAPAB") => UserAuthorizationType::RegistrationAndCapabilities,
        _ => UserAuthorizationType::Registration,
    }
}

pub async fn serve(
    ctx: &AppContext,
    impi: &str,
    impu: &str,
    visited_network: Option<&str>,
    auth_type: Option<&str>,
) -> Result<Json<IcscfResponse>, HandlerError> {
    let Some(hss) = ctx.hss.clone() else {
        return Ok(Json(IcscfResponse::success(
            Some(ctx.config.hss.default_server_name.clone()),
            &Default::default(),
        )));
    };

    let env = ctx.request_envelope(impi);
    let request = uar::build(&env, &UarRequest {
        impi,
        impu,
        visited_network_identifier: visited_network.unwrap_or_default(),
        auth_type: parse_auth_type(auth_type),
    });
    let answer = timed_hss_op(
        ctx.stats.as_ref(),
        HssLatencyKind::Subscription,
        hss.send(request),
    )
    .await?;
    let uaa = uar::read(&answer);
    let code = uaa
        .result
        .effective()
        .ok_or_else(|| HandlerError::LocalError("UAA carried no result code".to_string()))?;

    match icscf::classify(code) {
        IcscfOutcome::Ok => Ok(Json(IcscfResponse::from_result(
            code,
            uaa.server_name,
            &uaa.capabilities,
        ))),
        IcscfOutcome::NotFound => Err(HandlerError::NotFound),
        IcscfOutcome::Forbidden => Err(HandlerError::Forbidden(format!(
            "UAA rejected authorization (result {code})"
        ))),
        IcscfOutcome::Overload => {
            ctx.stats.record_overload_penalty();
            Err(HandlerError::UpstreamOverload(format!(
                "HSS reported {code} (TOO_BUSY)"
            )))
        },
        IcscfOutcome::Error => Err(HandlerError::UpstreamError(format!(
            "UAA returned result code {code}"
        ))),
    }
}
