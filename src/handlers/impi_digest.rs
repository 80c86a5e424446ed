//! `GET /impi/{impi}/digest`: SIP Digest lookup, cache-only when no HSS is
//! configured.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use axum::Json;

use crate::{
    cx::{
        mar::{self, AuthScheme, MarRequest},
        result_codes,
    },
    handlers::context::AppContext,
    http::{dto::DigestOnlyResponse, error::HandlerError},
    stats::{HssLatencyKind, timed_cache_op, timed_hss_op},
};

pub async fn serve(
    ctx: &AppContext,
    impi: &str,
    public_id: Option<&str>,
) -> Result<Json<DigestOnlyResponse>, HandlerError> {
    let Some(hss) = ctx.hss.clone() else {
        let vector = timed_cache_op(
            ctx.stats.as_ref(),
            ctx.cache.get_auth_vector(impi, public_id),
        )
        .await?;
        return Ok(Json(DigestOnlyResponse {
            digest_ha1: vector.ha1,
        }));
    };

    let impu = match public_id {
        Some(id) => id.to_string(),
        None => {
            let candidates = timed_cache_op(
                ctx.stats.as_ref(),
                ctx.cache.get_associated_public_ids(impi),
            )
            .await?;
            candidates.into_iter().next().ok_or(HandlerError::NotFound)?
        },
    };

    let env = ctx.request_envelope(impi);
    let request = mar::build(&env, &MarRequest {
        impi,
        impu: &impu,
        scheme: AuthScheme::SipDigest,
        authorization: None,
        number_auth_items: 1,
    });
    let answer = timed_hss_op(ctx.stats.as_ref(), HssLatencyKind::Digest, hss.send(request)).await?;
    let maa = mar::read(&answer);

    match maa.result.effective() {
        Some(result_codes::DIAMETER_SUCCESS) => match (maa.scheme, maa.digest) {
            (AuthScheme::SipDigest, Some(digest)) => {
                timed_cache_op(
                    ctx.stats.as_ref(),
                    ctx.cache
                        .put_associated_public_id(impi, &impu, ctx.reregistration_interval()),
                )
                .await?;
                Ok(Json(DigestOnlyResponse {
                    digest_ha1: digest.ha1,
                }))
            },
            _ => Err(HandlerError::NotFound),
        },
        Some(result_codes::DIAMETER_ERROR_USER_UNKNOWN) => Err(HandlerError::NotFound),
        Some(code) => Err(HandlerError::UpstreamError(format!(
            "MAA returned result code {code}"
        ))),
        None => Err(HandlerError::LocalError(
            "MAA carried no result code".to_string(),
        )),
    }
}
