//! `GET /impi/{impi}/{digest|aka|av}`: general authentication-vector
//! lookup. Unlike [`impi_digest`](crate::handlers::impi_digest) this always
//! goes to the HSS (there is no cache-only AKA path) and the response body
//! shape follows whichever scheme the HSS actually returned.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use axum::{Json, response::{IntoResponse, Response}};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::{
    cx::{
        mar::{self, AuthScheme, MarRequest},
        result_codes,
    },
    handlers::context::AppContext,
    http::{
        dto::{AkaBody, AkaResponse, DigestBody, DigestResponse},
        error::HandlerError,
    },
    stats::{HssLatencyKind, timed_cache_op, timed_hss_op},
};

pub enum AvResponse {
    Digest(DigestResponse),
    Aka(AkaResponse),
}

impl IntoResponse for AvResponse {
    fn into_response(self) -> Response {
        match self {
            AvResponse::Digest(body) => Json(body).into_response(),
            AvResponse::Aka(body) => Json(body).into_response(),
        }
    }
}

/// Maps the `{digest|aka|av}` path segment onto the scheme requested on the
/// outbound MAR. Returns `None` for any other segment, which the caller
/// turns into a 404.
pub fn scheme_for_segment(segment: &str) -> Option<AuthScheme> {
    match segment {
        "digest" => Some(AuthScheme::SipDigest),
        "aka" => Some(AuthScheme::Aka),
        "av" => Some(AuthScheme::Unknown),
        _ => None,
    }
}

pub async fn serve(
    ctx: &AppContext,
    impi: &str,
    scheme_segment: &str,
    impu: Option<&str>,
    autn: Option<&str>,
) -> Result<AvResponse, HandlerError> {
    let scheme = scheme_for_segment(scheme_segment).ok_or(HandlerError::NotFound)?;
    if scheme == AuthScheme::Aka && impu.is_none() {
        return Err(HandlerError::NotFound);
    }
    let hss = ctx.hss.clone().ok_or_else(|| {
        HandlerError::UpstreamError("no HSS configured for authentication-vector lookups".to_string())
    })?;
    let impu = match impu {
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
    let authorization = autn
        .map(|autn| {
            BASE64
                .decode(autn)
                .map_err(|e| HandlerError::InvalidRequest(format!("autn is not valid base64: {e}")))
        })
        .transpose()?;

    let env = ctx.request_envelope(impi);
    let request = mar::build(&env, &MarRequest {
        impi,
        impu: &impu,
        scheme,
        authorization: authorization.as_deref(),
        number_auth_items: 1,
    });
    let answer = timed_hss_op(ctx.stats.as_ref(), HssLatencyKind::Digest, hss.send(request)).await?;
    let maa = mar::read(&answer);

    match maa.result.effective() {
        Some(result_codes::DIAMETER_SUCCESS) => match (maa.scheme, maa.digest, maa.aka) {
            (AuthScheme::SipDigest, Some(digest), _) => Ok(AvResponse::Digest(DigestResponse {
                digest: DigestBody::from(&digest),
            })),
            (AuthScheme::Aka, _, Some(aka)) => Ok(AvResponse::Aka(AkaResponse {
                aka: AkaBody::from(&aka),
            })),
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
