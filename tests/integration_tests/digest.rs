//! S1 (digest from cache) and S5 (auth-scheme mismatch).

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use homestead_cx_gateway::{
    avp::Message,
    cache::memory::MemoryCacheStore,
    cx::result_codes::DIAMETER_SUCCESS,
    model::auth_vector::DigestAuthVector,
};
use tower::ServiceExt;

use crate::integration_tests::common::{self, ScriptedDiameter, ScriptedSprout};

#[tokio::test]
async fn s1_digest_served_from_cache_without_hss() {
    let cache = Arc::new(MemoryCacheStore::new());
    cache.seed_digest("user@example.com", DigestAuthVector {
        ha1: "abc".to_string(),
        realm: "r".to_string(),
        qop: "q".to_string(),
    });

    let (app, _ctx) = common::router_with_cache(
        cache,
        None,
        Arc::new(ScriptedSprout::with_status(200)),
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/impi/user@example.com/digest?public_id=sip:u@example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["digest_ha1"], "abc");
}

fn maa_with_scheme(result_code: i32, scheme: &str) -> Message {
    use homestead_cx_gateway::avp::{Avp, AvpValue};
    let mut msg = Message::new(303, 16777216, false);
    msg.push_i32("ResultCode", result_code);
    msg.push_group("SipAuthDataItem", vec![Avp::new(
        "SipAuthenticationScheme",
        AvpValue::UTF8String(scheme.to_string()),
    )]);
    msg
}

#[tokio::test]
async fn s5_auth_scheme_mismatch_is_not_found() {
    let hss = Arc::new(ScriptedDiameter::with_answers(vec![maa_with_scheme(
        DIAMETER_SUCCESS,
        "Digest-AKAv1-MD5",
    )]));
    let app = common::router_with(Some(hss), Arc::new(ScriptedSprout::with_status(200)));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/impi/impi@ex/digest?public_id=sip:impu@ex")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
