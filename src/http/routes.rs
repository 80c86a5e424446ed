//! Route table (§6): every Sprout-facing endpoint, wired to the handler
//! functions in [`crate::handlers`]. Kept thin — extraction and response
//! wrapping only, no decision logic lives here.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, put},
};

use crate::{
    handlers::{context::AppContext, impi_av, impi_digest, impi_registration_status, impu_location_info, impu_reg_data},
    http::{
        dto::{AvQuery, LocationQuery, PublicIdQuery, RegDataRequest, RegistrationStatusQuery},
        error::HandlerError,
    },
};

pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/impi/:impi/digest", get(get_impi_digest))
        .route("/impi/:impi/registration-status", get(get_registration_status))
        .route("/impi/:impi/:scheme", get(get_impi_av))
        .route("/impu/:impu/location", get(get_location_info))
        .route("/impu/:impu/reg-data", get(get_reg_data).put(put_reg_data))
        .route("/impu/:impu", get(get_reg_data_legacy))
        .with_state(ctx)
}

async fn ping() -> &'static str {
    "OK"
}

async fn get_impi_digest(
    State(ctx): State<Arc<AppContext>>,
    Path(impi): Path<String>,
    Query(query): Query<PublicIdQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    impi_digest::serve(&ctx, &impi, query.public_id.as_deref()).await
}

async fn get_impi_av(
    State(ctx): State<Arc<AppContext>>,
    Path((impi, scheme)): Path<(String, String)>,
    Query(query): Query<AvQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    impi_av::serve(&ctx, &impi, &scheme, query.impu.as_deref(), query.autn.as_deref()).await
}

async fn get_registration_status(
    State(ctx): State<Arc<AppContext>>,
    Path(impi): Path<String>,
    Query(query): Query<RegistrationStatusQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    impi_registration_status::serve(
        &ctx,
        &impi,
        &query.impu,
        query.visited_network.as_deref(),
        query.auth_type.as_deref(),
    )
    .await
}

async fn get_location_info(
    State(ctx): State<Arc<AppContext>>,
    Path(impu): Path<String>,
    Query(query): Query<LocationQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    impu_location_info::serve(
        &ctx,
        &impu,
        query.originating.unwrap_or(false),
        query.auth_type.as_deref(),
    )
    .await
}

async fn get_reg_data(
    State(ctx): State<Arc<AppContext>>,
    Path(impu): Path<String>,
) -> Result<String, HandlerError> {
    impu_reg_data::serve_get(&ctx, &impu).await
}

async fn get_reg_data_legacy(
    State(ctx): State<Arc<AppContext>>,
    Path(impu): Path<String>,
) -> Result<String, HandlerError> {
    impu_reg_data::serve_get(&ctx, &impu).await
}

async fn put_reg_data(
    State(ctx): State<Arc<AppContext>>,
    Path(impu): Path<String>,
    Query(query): Query<crate::http::dto::PrivateIdQuery>,
    axum::Json(body): axum::Json<RegDataRequest>,
) -> Result<String, HandlerError> {
    impu_reg_data::serve_put(&ctx, &impu, query.private_id.as_deref(), &body.reqtype).await
}
