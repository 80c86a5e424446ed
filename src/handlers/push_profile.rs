//! Push-Profile-Request handling: an HSS-initiated profile or
//! charging-address update delivered outside any registration flow.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::{
    avp::Message,
    cx::{
        ppr::{self, PpaAnswer},
        result_codes,
    },
    handlers::context::AppContext,
    model::irs::parse_ims_subscription,
    stats::timed_cache_op,
};

pub async fn handle(ctx: &AppContext, request: &Message) -> Message {
    let ppr = ppr::read(request);
    let result_code = match process(ctx, &ppr).await {
        Ok(()) => result_codes::DIAMETER_SUCCESS,
        Err(msg) => {
            tracing::warn!(reason = %msg, "PPR rejected with UNABLE_TO_COMPLY");
            result_codes::DIAMETER_UNABLE_TO_COMPLY
        },
    };
    ppr::build_answer(&PpaAnswer {
        session_id: &ppr.session_id,
        result_code,
    })
}

async fn process(ctx: &AppContext, ppr: &ppr::PprRequest) -> Result<(), String> {
    if ppr.user_data.is_none() && ppr.charging_addrs.is_none() {
        return Ok(());
    }

    if let Some(xml) = &ppr.user_data {
        let subscription = parse_ims_subscription(xml).map_err(|e| e.to_string())?;
        if subscription.service_profiles.is_empty() {
            return Err("push-profile XML carried no public identities".to_string());
        }

        for profile in &subscription.service_profiles {
            let irs = &profile.public_identities;
            if irs.is_empty() {
                continue;
            }
            if !irs.iter().any(|i| !crate::model::identity::is_tel_uri(i)) {
                tracing::warn!(impi = %ppr.impi, "push-profile IRS contains only tel: URIs");
            }

            let mut put = crate::cache::PutRegData::new(ctx.config.cache_ttl()).with_xml(xml.clone());
            if let Some(addrs) = &ppr.charging_addrs {
                put = put.with_charging_addrs(addrs.clone());
            }
            timed_cache_op(ctx.stats.as_ref(), ctx.cache.put_reg_data(irs, put))
                .await
                .map_err(|e| e.to_string())?;
        }
        Ok(())
    } else {
        let impus = ctx
            .cache
            .get_associated_public_ids(&ppr.impi)
            .await
            .map_err(|e| e.to_string())?;
        if impus.is_empty() {
            return Err(format!("no known public identities for IMPI {}", ppr.impi));
        }
        let put = crate::cache::PutRegData::new(ctx.config.cache_ttl())
            .with_charging_addrs(ppr.charging_addrs.clone().unwrap_or_default());
        timed_cache_op(ctx.stats.as_ref(), ctx.cache.put_reg_data(&impus, put))
            .await
            .map_err(|e| e.to_string())
    }
}
