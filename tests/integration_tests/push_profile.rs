//! S6: PPR carrying tel:-only IRS user-data is still accepted, with a
//! warning, and ends up keyed on every identity in the pushed profile.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::sync::Arc;

use homestead_cx_gateway::{
    avp::Message,
    cache::{CacheStore, memory::MemoryCacheStore},
    cx::result_codes::DIAMETER_SUCCESS,
    handlers::{context::AppContext, push_profile},
    stats::InMemoryStats,
};

use crate::integration_tests::common::{self, ScriptedSprout};

const TEL_ONLY_XML: &str = "<IMSSubscription><ServiceProfile>\
    <PublicIdentity><Identity>tel:123</Identity></PublicIdentity>\
    <PublicIdentity><Identity>tel:321</Identity></PublicIdentity>\
    </ServiceProfile></IMSSubscription>";

fn ppr_request(impi: &str, xml: &str) -> Message {
    let mut msg = Message::new(305, 16777216, true);
    msg.session_id = "s1".to_string();
    msg.push_str("UserName", impi);
    msg.push_str("UserData", xml);
    msg
}

#[tokio::test]
async fn s6_tel_uri_only_irs_is_accepted_and_cached() {
    let cache = Arc::new(MemoryCacheStore::new());
    let ctx = AppContext::new(
        cache.clone(),
        None,
        Arc::new(ScriptedSprout::with_status(200)),
        Arc::new(InMemoryStats::new()),
        common::test_config(false),
    );

    let request = ppr_request("impi@ex", TEL_ONLY_XML);
    let answer = push_profile::handle(&ctx, &request).await;

    assert_eq!(answer.get_i32("ResultCode"), Some(DIAMETER_SUCCESS));

    let row = cache.get_reg_data("tel:123").await.expect("primary row present");
    assert_eq!(row.xml.as_deref(), Some(TEL_ONLY_XML));
    let alias = cache.get_reg_data("tel:321").await.expect("alias resolves to the same row");
    assert_eq!(alias.xml.as_deref(), Some(TEL_ONLY_XML));
}
