//! `PUT`/`GET /impu/{impu}/reg-data`: the central registration-data state
//! machine. The one place a literal decision enum earns its keep (§9) — the
//! SAR-or-not tree is computed once into a [`RegDataDecision`] and then
//! matched on, rather than threaded through a chain of boolean checks.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::{
    cache::PutRegData,
    cx::{
        result_codes,
        sar::{self, SarRequest, ServerAssignmentType},
    },
    handlers::context::AppContext,
    http::error::HandlerError,
    model::{
        cached_record::CachedRegData,
        irs::{parse_ims_subscription, render_clearwater_regdata},
        reg_state::RegistrationState,
    },
    stats::{HssLatencyKind, timed_cache_op, timed_hss_op},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReqType {
    Reg,
    Call,
    DeregTimeout,
    DeregUser,
    DeregAdmin,
    DeregAuthFailed,
    DeregAuthTimeout,
}

impl ReqType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "reg" => Some(ReqType::Reg),
            "call" => Some(ReqType::Call),
            "dereg-timeout" => Some(ReqType::DeregTimeout),
            "dereg-user" => Some(ReqType::DeregUser),
            "dereg-admin" => Some(ReqType::DeregAdmin),
            "dereg-auth-failed" => Some(ReqType::DeregAuthFailed),
            "dereg-auth-timeout" => Some(ReqType::DeregAuthTimeout),
            _ => None,
        }
    }

    fn is_dereg(self) -> bool {
        matches!(
            self,
            ReqType::DeregTimeout | ReqType::DeregUser | ReqType::DeregAdmin
        )
    }

    fn is_auth_dereg(self) -> bool {
        matches!(self, ReqType::DeregAuthFailed | ReqType::DeregAuthTimeout)
    }

    fn dereg_sar_type(self) -> ServerAssignmentType {
        match self {
            ReqType::DeregTimeout => ServerAssignmentType::TimeoutDeregistration,
            ReqType::DeregUser => ServerAssignmentType::UserDeregistration,
            ReqType::DeregAdmin => ServerAssignmentType::AdministrativeDeregistration,
            ReqType::DeregAuthFailed => ServerAssignmentType::AuthenticationFailure,
            ReqType::DeregAuthTimeout => ServerAssignmentType::AuthenticationTimeout,
            ReqType::Reg | ReqType::Call => unreachable!("not a deregistration reqtype"),
        }
    }
}

/// What to do about an incoming `reg-data` write, decided once from the
/// reqtype and the currently cached record.
enum RegDataDecision {
    /// No SAR needed; respond with the record as it already stands.
    RespondCached,
    /// The reqtype/regstate combination is invalid (dereg on a subscriber
    /// that is not currently registered).
    Reject(String),
    /// No HSS configured: write the new regstate directly, no SAR.
    DirectWrite(RegistrationState),
    /// Issue a SAR; `delete_on_success` selects the dereg cache-cleanup
    /// path, `write_on_success` selects the reg/call cache-write path.
    /// Both false covers `dereg-auth-{failed,timeout}`, which never write.
    IssueSar {
        sar_type: ServerAssignmentType,
        success_regstate: RegistrationState,
        delete_on_success: bool,
        write_on_success: bool,
    },
}

fn decide(
    reqtype: ReqType,
    hss_enabled: bool,
    record: &CachedRegData,
    new_binding: bool,
    reregistration_interval: std::time::Duration,
) -> RegDataDecision {
    if !hss_enabled {
        return match reqtype {
            ReqType::Reg => RegDataDecision::DirectWrite(RegistrationState::Registered),
            ReqType::Call => RegDataDecision::RespondCached,
            ReqType::DeregUser | ReqType::DeregTimeout | ReqType::DeregAdmin => {
                if matches!(record.regstate, RegistrationState::Registered) {
                    RegDataDecision::DirectWrite(RegistrationState::Unregistered)
                } else {
                    RegDataDecision::Reject(format!(
                        "{reqtype:?} received for a subscriber that is not REGISTERED"
                    ))
                }
            },
            ReqType::DeregAuthFailed | ReqType::DeregAuthTimeout => RegDataDecision::RespondCached,
        };
    }

    match reqtype {
        ReqType::Reg => {
            let needs_fresh_sar = !matches!(record.regstate, RegistrationState::Registered)
                || new_binding
                || !record.reregistration_is_fresh(reregistration_interval);
            if !needs_fresh_sar {
                RegDataDecision::RespondCached
            } else if matches!(record.regstate, RegistrationState::Registered) && !new_binding {
                RegDataDecision::IssueSar {
                    sar_type: ServerAssignmentType::ReRegistration,
                    success_regstate: RegistrationState::Registered,
                    delete_on_success: false,
                    write_on_success: true,
                }
            } else {
                RegDataDecision::IssueSar {
                    sar_type: ServerAssignmentType::Registration,
                    success_regstate: RegistrationState::Registered,
                    delete_on_success: false,
                    write_on_success: true,
                }
            }
        },
        ReqType::Call => {
            if matches!(record.regstate, RegistrationState::NotRegistered) {
                RegDataDecision::IssueSar {
                    sar_type: ServerAssignmentType::UnregisteredUser,
                    success_regstate: RegistrationState::Unregistered,
                    delete_on_success: false,
                    write_on_success: true,
                }
            } else {
                RegDataDecision::RespondCached
            }
        },
        _ if reqtype.is_auth_dereg() => RegDataDecision::IssueSar {
            sar_type: reqtype.dereg_sar_type(),
            success_regstate: RegistrationState::NotRegistered,
            delete_on_success: false,
            write_on_success: false,
        },
        _ if reqtype.is_dereg() => {
            if matches!(record.regstate, RegistrationState::Registered) {
                RegDataDecision::IssueSar {
                    sar_type: reqtype.dereg_sar_type(),
                    success_regstate: RegistrationState::NotRegistered,
                    delete_on_success: true,
                    write_on_success: false,
                }
            } else {
                RegDataDecision::Reject(format!(
                    "{reqtype:?} received for a subscriber that is not REGISTERED"
                ))
            }
        },
        _ => unreachable!("reqtype classification is exhaustive"),
    }
}

/// The public identities of the Implicit Registration Set `impu` belongs
/// to, derived from whatever subscription XML is on hand. Falls back to a
/// single-element IRS of just `impu` when there is no XML yet (brand new
/// subscriber) or parsing turns up no matching profile.
fn irs_for_impu(impu: &str, xml: Option<&str>) -> Vec<String> {
    if let Some(xml) = xml
        && let Ok(sub) = parse_ims_subscription(xml)
        && let Some(profile) = sub.profile_containing(impu)
    {
        return profile.public_identities.clone();
    }
    vec![impu.to_string()]
}

pub async fn serve_get(ctx: &AppContext, impu: &str) -> Result<String, HandlerError> {
    let record = timed_cache_op(ctx.stats.as_ref(), ctx.cache.get_reg_data(impu)).await?;
    render_record(&record)
}

fn render_record(record: &CachedRegData) -> Result<String, HandlerError> {
    let subscription = match &record.xml {
        Some(xml) => Some(
            parse_ims_subscription(xml)
                .map_err(|e| HandlerError::LocalError(format!("cached subscription XML: {e}")))?,
        ),
        None => None,
    };
    Ok(render_clearwater_regdata(
        record.regstate,
        subscription.as_ref(),
    ))
}

pub async fn serve_put(
    ctx: &AppContext,
    impu: &str,
    private_id: Option<&str>,
    reqtype_raw: &str,
) -> Result<String, HandlerError> {
    let reqtype =
        ReqType::parse(reqtype_raw).ok_or_else(|| HandlerError::InvalidRequest(format!(
            "unrecognised reqtype {reqtype_raw:?}"
        )))?;

    let record = match timed_cache_op(ctx.stats.as_ref(), ctx.cache.get_reg_data(impu)).await {
        Ok(r) => r,
        Err(crate::cache::CacheError::NotFound) => CachedRegData::empty(),
        Err(e) => return Err(e.into()),
    };

    let impi = private_id.unwrap_or_default();
    let new_binding = !impi.is_empty() && !record.associated_impis.contains(impi);
    if new_binding {
        let irs = irs_for_impu(impu, record.xml.as_deref());
        timed_cache_op(
            ctx.stats.as_ref(),
            ctx.cache
                .put_associated_private_id(&irs, impi, ctx.config.cache_ttl()),
        )
        .await?;
    }

    let decision = decide(
        reqtype,
        ctx.hss_enabled(),
        &record,
        new_binding,
        ctx.reregistration_interval(),
    );

    match decision {
        RegDataDecision::RespondCached => render_record(&record),
        RegDataDecision::Reject(msg) => Err(HandlerError::InvalidRequest(msg)),
        RegDataDecision::DirectWrite(new_state) => {
            timed_cache_op(
                ctx.stats.as_ref(),
                ctx.cache.put_reg_data(
                    &[impu.to_string()],
                    PutRegData::new(std::time::Duration::ZERO).with_reg_state(new_state),
                ),
            )
            .await?;
            render_record(&CachedRegData {
                regstate: new_state,
                ..record
            })
        },
        RegDataDecision::IssueSar {
            sar_type,
            success_regstate,
            delete_on_success,
            write_on_success,
        } => {
            let hss = ctx
                .hss
                .clone()
                .ok_or_else(|| HandlerError::LocalError("SAR decided with no HSS configured".to_string()))?;
            let env = ctx.request_envelope(impu);
            let request = sar::build(&env, &SarRequest {
                impi,
                impu,
                server_name: &ctx.config.hss.default_server_name,
                assignment_type: sar_type,
            });
            let answer = timed_hss_op(
                ctx.stats.as_ref(),
                HssLatencyKind::Subscription,
                hss.send(request),
            )
            .await?;
            let saa = sar::read(&answer);
            let code = saa.result.effective().ok_or_else(|| {
                HandlerError::LocalError("SAA carried no result code".to_string())
            })?;

            match code {
                result_codes::DIAMETER_SUCCESS => {
                    if delete_on_success {
                        let irs = irs_for_impu(impu, record.xml.as_deref());
                        let impis: Vec<String> = record.associated_impis.iter().cloned().collect();
                        timed_cache_op(
                            ctx.stats.as_ref(),
                            ctx.cache.delete_public_ids(&irs, &impis),
                        )
                        .await?;
                        render_record(&CachedRegData {
                            regstate: RegistrationState::NotRegistered,
                            xml: None,
                            associated_impis: Default::default(),
                            charging_addrs: None,
                            ttl_remaining: None,
                        })
                    } else if write_on_success {
                        let irs = irs_for_impu(impu, saa.user_data.as_deref());
                        let mut put = PutRegData::new(ctx.config.cache_ttl())
                            .with_reg_state(success_regstate);
                        if let Some(xml) = &saa.user_data {
                            put = put.with_xml(xml.clone());
                        }
                        if !impi.is_empty() {
                            put = put.with_associated_impis([impi.to_string()]);
                        }
                        if let Some(addrs) = &saa.charging_addrs {
                            put = put.with_charging_addrs(addrs.clone());
                        }
                        timed_cache_op(ctx.stats.as_ref(), ctx.cache.put_reg_data(&irs, put)).await?;
                        render_record(&CachedRegData {
                            xml: saa.user_data,
                            regstate: success_regstate,
                            associated_impis: if impi.is_empty() {
                                record.associated_impis
                            } else {
                                [impi.to_string()].into_iter().collect()
                            },
                            charging_addrs: saa.charging_addrs,
                            ttl_remaining: Some(ctx.config.cache_ttl()),
                        })
                    } else {
                        // dereg-auth-{failed,timeout}: SAR sent, never written.
                        render_record(&record)
                    }
                },
                result_codes::DIAMETER_ERROR_USER_UNKNOWN => Err(HandlerError::NotFound),
                result_codes::DIAMETER_TOO_BUSY => {
                    ctx.stats.record_overload_penalty();
                    Err(HandlerError::UpstreamOverload(
                        "SAA reported TOO_BUSY".to_string(),
                    ))
                },
                other => Err(HandlerError::UpstreamError(format!(
                    "SAA returned result code {other}"
                ))),
            }
        },
    }
}
