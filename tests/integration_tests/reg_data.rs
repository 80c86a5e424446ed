//! S2 (initial registration with HSS) and the idempotence property (§8.5).

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use homestead_cx_gateway::{avp::Message, cx::result_codes::DIAMETER_SUCCESS};
use tower::ServiceExt;

use crate::integration_tests::common::{self, ScriptedDiameter, ScriptedSprout};

const SUBSCRIPTION_XML: &str = "<IMSSubscription><ServiceProfile><PublicIdentity><Identity>sip:u@ex</Identity></PublicIdentity></ServiceProfile></IMSSubscription>";

fn saa_success(xml: &str) -> Message {
    let mut msg = Message::new(301, 16777216, false);
    msg.push_i32("ResultCode", DIAMETER_SUCCESS);
    msg.push_str("UserData", xml);
    msg
}

async fn put_reg_data(app: axum::Router, reqtype: &str) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri("/impu/sip:u@ex/reg-data?private_id=user@ex")
            .header("content-type", "application/json")
            .body(Body::from(format!("{{\"reqtype\":\"{reqtype}\"}}")))
            .unwrap(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn s2_initial_registration_issues_registration_sar_and_writes_cache() {
    let hss = Arc::new(ScriptedDiameter::with_answers(vec![saa_success(SUBSCRIPTION_XML)]));
    let sprout = Arc::new(ScriptedSprout::with_status(200));
    let app = common::router_with(Some(hss.clone()), sprout);

    let response = put_reg_data(app, "reg").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("<RegistrationState>REGISTERED</RegistrationState>"));
    assert!(body.contains("<Identity>sip:u@ex</Identity>"));

    assert_eq!(hss.call_count(), 1);
    let sent = hss.requests();
    assert_eq!(sent[0].get_i32("ServerAssignmentType"), Some(1));
}

#[tokio::test]
async fn repeated_reg_for_fresh_binding_sends_at_most_one_sar() {
    let hss = Arc::new(ScriptedDiameter::with_answers(vec![saa_success(SUBSCRIPTION_XML)]));
    let sprout = Arc::new(ScriptedSprout::with_status(200));
    let cache = Arc::new(homestead_cx_gateway::cache::memory::MemoryCacheStore::new());
    let (app, _ctx) = common::router_with_cache(cache, Some(hss.clone()), sprout);

    let first = put_reg_data(app.clone(), "reg").await;
    assert_eq!(first.status(), StatusCode::OK);
    let second = put_reg_data(app, "reg").await;
    assert_eq!(second.status(), StatusCode::OK);

    assert_eq!(hss.call_count(), 1, "second reg for a fresh binding must not re-issue a SAR");
}
