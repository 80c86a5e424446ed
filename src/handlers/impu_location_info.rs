//! `GET /impu/{impu}/location`: the I-CSCF LIR/LIA query.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use axum::Json;

use crate::{
    cx::lir::{self, LirRequest},
    handlers::context::AppContext,
    http::{dto::IcscfResponse, error::HandlerError, icscf::{self, IcscfOutcome}},
    stats::{HssLatencyKind, timed_hss_op},
};

pub async fn serve(
    ctx: &AppContext,
    impu: &str,
    originating: bool,
    auth_type: Option<&str>,
) -> Result<Json<IcscfResponse>, HandlerError> {
    let Some(hss) = ctx.hss.clone() else {
        return Ok(Json(IcscfResponse::success(
            Some(ctx.config.hss.default_server_name.clone()),
            &Default::default(),
        )));
    };

    let capabilities_only = auth_type == Some("CAPAB");
    let env = ctx.request_envelope(impu);
    let request = lir::build(&env, &LirRequest {
        impu,
        originating,
        capabilities_only,
    });
    let answer = timed_hss_op(
        ctx.stats.as_ref(),
        HssLatencyKind::Subscription,
        hss.send(request),
    )
    .await?;
    let lia = lir::read(&answer);
    let code = lia
        .result
        .effective()
        .ok_or_else(|| HandlerError::LocalError("LIA carried no result code".to_string()))?;

    match icscf::classify(code) {
        IcscfOutcome::Ok => Ok(Json(IcscfResponse::from_result(
            code,
            lia.server_name,
            &lia.capabilities,
        ))),
        IcscfOutcome::NotFound => Err(HandlerError::NotFound),
        IcscfOutcome::Forbidden => Err(HandlerError::Forbidden(format!(
            "LIA rejected authorization (result {code})"
        ))),
        IcscfOutcome::Overload => {
            ctx.stats.record_overload_penalty();
            Err(HandlerError::UpstreamOverload(format!(
                "HSS reported {code} (TOO_BUSY)"
            )))
        },
        IcscfOutcome::Error => Err(HandlerError::UpstreamError(format!(
            "LIA returned result code {code}"
        ))),
    }
}
