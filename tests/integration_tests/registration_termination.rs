//! S3: RTR with PERMANENT_TERMINATION pairs every target IMPU with every
//! IMPI (2 IMPUs × 3 IMPIs = 6 pairings) and disables Sprout notifications.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::sync::Arc;

use homestead_cx_gateway::{
    avp::{Avp, AvpValue, Message},
    cache::{CacheStore, PutRegData, memory::MemoryCacheStore},
    cx::result_codes::DIAMETER_SUCCESS,
    handlers::{context::AppContext, registration_termination},
    stats::InMemoryStats,
};
use std::time::Duration;

use crate::integration_tests::common::{self, ScriptedSprout};

fn profile_xml(impu: &str) -> String {
    format!("<IMSSubscription><ServiceProfile><PublicIdentity><Identity>{impu}</Identity></PublicIdentity></ServiceProfile></IMSSubscription>")
}

fn rtr_request(primary_impi: &str, other_impis: &[&str], impus: &[&str]) -> Message {
    let mut msg = Message::new(304, 16777216, true);
    msg.session_id = "s1".to_string();
    msg.push_str("UserName", primary_impi);
    for impu in impus {
        msg.push_str("PublicIdentity", *impu);
    }
    for impi in other_impis {
        msg.push_str("AssociatedIdentities", *impi);
    }
    msg.push_group("DeregistrationReason", vec![Avp::new(
        "ReasonCode",
        AvpValue::Integer32(0),
    )]);
    msg
}

#[tokio::test]
async fn s3_permanent_termination_pairs_every_impu_with_every_impi() {
    let cache = Arc::new(MemoryCacheStore::new());
    for impu in ["sip:a@ex", "sip:b@ex"] {
        cache
            .put_reg_data(
                &[impu.to_string()],
                PutRegData::new(Duration::from_secs(3600)).with_xml(profile_xml(impu)),
            )
            .await
            .unwrap();
    }

    let sprout = Arc::new(ScriptedSprout::with_status(200));
    let ctx = AppContext::new(
        cache,
        None,
        sprout.clone(),
        Arc::new(InMemoryStats::new()),
        common::test_config(false),
    );

    let request = rtr_request("impi1@ex", &["impi2@ex", "impi3@ex"], &["sip:a@ex", "sip:b@ex"]);
    let answer = registration_termination::handle(&ctx, &request).await;

    assert_eq!(answer.get_i32("ResultCode"), Some(DIAMETER_SUCCESS));

    let deletes = sprout.deletes();
    assert_eq!(deletes.len(), 1);
    let (path, body) = &deletes[0];
    assert_eq!(path, "/registrations?send-notifications=false");
    let registrations = body["registrations"].as_array().unwrap();
    assert_eq!(registrations.len(), 6, "2 IMPUs x 3 IMPIs must yield 6 pairings");
    assert!(registrations.iter().all(|r| r.get("impi").is_some()));
}
