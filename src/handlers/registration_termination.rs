//! Registration-Termination-Request handling: HSS-initiated deregistration.
//! The inbound Diameter dispatcher (out of scope, §1) decodes the RTR into
//! an [`avp::Message`](crate::avp::Message) and hands it here; this module
//! returns the RTA to send back.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::{
    avp::Message,
    cx::{
        result_codes,
        rtr::{self, DeregistrationReason, RtaAnswer, RtrRequest},
    },
    handlers::context::AppContext,
    sprout,
    stats::timed_cache_op,
};

async fn resolve_target_impus(
    ctx: &AppContext,
    rtr: &RtrRequest,
    all_impis: &[String],
) -> Result<Vec<String>, String> {
    if !rtr.public_identities.is_empty() {
        return Ok(rtr.public_identities.clone());
    }
    ctx.cache
        .get_associated_primary_public_ids(all_impis)
        .await
        .map_err(|e| e.to_string())
}

pub async fn handle(ctx: &AppContext, request: &Message) -> Message {
    let rtr = rtr::read(request);
    let mut all_impis = vec![rtr.impi.clone()];
    all_impis.extend(rtr.associated_identities.iter().cloned());

    let result_code = match process(ctx, &rtr, &all_impis).await {
        Ok(()) => result_codes::DIAMETER_SUCCESS,
        Err(msg) => {
            tracing::warn!(reason = %msg, "RTR rejected with UNABLE_TO_COMPLY");
            result_codes::DIAMETER_UNABLE_TO_COMPLY
        },
    };

    rtr::build_answer(&RtaAnswer {
        session_id: &rtr.session_id,
        result_code,
        associated_identities: &all_impis,
    })
}

async fn process(ctx: &AppContext, rtr: &RtrRequest, all_impis: &[String]) -> Result<(), String> {
    let reason = rtr.reason.ok_or_else(|| "unrecognised deregistration reason".to_string())?;

    let targets = resolve_target_impus(ctx, rtr, all_impis).await?;
    if targets.is_empty() {
        return Ok(());
    }

    let include_impi = matches!(reason, DeregistrationReason::PermanentTermination);
    // PERMANENT_TERMINATION lists every (primary-impu, impi) pairing; the
    // other reasons list each target impu once, with no impi attached.
    let pairings: Vec<(String, String)> = if include_impi {
        targets
            .iter()
            .flat_map(|impu| all_impis.iter().map(move |impi| (impu.clone(), impi.clone())))
            .collect()
    } else {
        targets.iter().map(|impu| (impu.clone(), String::new())).collect()
    };

    let mut per_impu_impis: Vec<(Vec<String>, Vec<String>)> = Vec::new();
    for impu in &targets {
        let record = match timed_cache_op(ctx.stats.as_ref(), ctx.cache.get_reg_data(impu)).await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(impu, error = %e, "skipping IMPU with no usable cache row for RTR");
                continue;
            },
        };
        if record.xml.is_none() {
            tracing::warn!(impu, "skipping IMPU with no cached subscription XML for RTR");
            continue;
        }
        let irs = crate::model::irs::parse_ims_subscription(record.xml.as_deref().unwrap_or_default())
            .ok()
            .and_then(|sub| sub.profile_containing(impu).map(|p| p.public_identities.clone()))
            .unwrap_or_else(|| vec![impu.clone()]);

        let impis_for_dissociation = match reason {
            DeregistrationReason::ServerChange | DeregistrationReason::NewServerAssigned => {
                let mut impis: Vec<String> = record.associated_impis.iter().cloned().collect();
                impis.extend(all_impis.iter().cloned());
                impis.sort();
                impis.dedup();
                impis
            },
            _ => all_impis.to_vec(),
        };
        per_impu_impis.push((irs, impis_for_dissociation));
    }

    let send_notifications = matches!(
        reason,
        DeregistrationReason::RemoveScscf | DeregistrationReason::ServerChange
    );
    let (path, body) =
        sprout::build_deregistration_request(send_notifications, &pairings, include_impi);
    let status = ctx
        .sprout
        .send_delete(&path, body)
        .await
        .map_err(|e| e.to_string())?;
    if status != 200 {
        return Err(format!("Sprout returned HTTP {status}"));
    }

    for (irs, impis) in &per_impu_impis {
        timed_cache_op(
            ctx.stats.as_ref(),
            ctx.cache.dissociate_irs_from_impi(irs, impis),
        )
        .await
        .map_err(|e| e.to_string())?;
    }

    if matches!(
        reason,
        DeregistrationReason::ServerChange | DeregistrationReason::NewServerAssigned
    ) {
        timed_cache_op(ctx.stats.as_ref(), ctx.cache.delete_impi_mapping(all_impis))
            .await
            .map_err(|e| e.to_string())?;
    }

    Ok(())
}
