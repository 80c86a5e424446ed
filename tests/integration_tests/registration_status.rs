//! S4: HSS overload on a UAR maps to 504 and records exactly one penalty.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use homestead_cx_gateway::{
    avp::{Avp, AvpValue, Message},
    cache::memory::MemoryCacheStore,
    cx::result_codes::DIAMETER_TOO_BUSY,
    handlers::context::AppContext,
    http::routes,
    stats::InMemoryStats,
};
use tower::ServiceExt;

use crate::integration_tests::common::{self, ScriptedDiameter, ScriptedSprout};

fn uaa_too_busy() -> Message {
    let mut msg = Message::new(300, 16777216, false);
    msg.push_group("ExperimentalResult", vec![
        Avp::new("VendorId", AvpValue::Unsigned32(10415)),
        Avp::new("ExperimentalResultCode", AvpValue::Integer32(DIAMETER_TOO_BUSY)),
    ]);
    msg
}

#[tokio::test]
async fn s4_hss_overload_maps_to_gateway_timeout_with_one_penalty() {
    let hss = Arc::new(ScriptedDiameter::with_answers(vec![uaa_too_busy()]));
    let stats = Arc::new(InMemoryStats::new());
    let ctx = Arc::new(AppContext::new(
        Arc::new(MemoryCacheStore::new()),
        Some(hss.clone()),
        Arc::new(ScriptedSprout::with_status(200)),
        stats.clone(),
        common::test_config(true),
    ));
    let app = routes::router(ctx);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/impi/impi@ex/registration-status?impu=sip:impu@ex")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(hss.call_count(), 1);
    assert_eq!(stats.overload_penalties(), 1);
}
