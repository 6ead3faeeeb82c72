use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse, StatusResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use shortcut_core::Alias;
use tracing::info;

pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<Json<CreateUrlResponse>> {
    let Json(request) = payload?;
    let requested_alias = request.validate()?;

    let alias = state
        .shortener()
        .shorten(request.url, requested_alias)
        .await?;

    info!(alias = %alias, "url saved");
    Ok(Json(CreateUrlResponse {
        status: StatusResponse::OK,
        alias: alias.into(),
    }))
}

pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let alias = Alias::new(alias)?;
    let target_url = state.resolver().resolve(&alias).await?;

    let location = HeaderValue::try_from(target_url.as_str()).map_err(|e| {
        AppError::Internal(format!("stored url for {alias} is not a valid header: {e}"))
    })?;

    info!(alias = %alias, url = %target_url, "redirecting");
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

pub async fn delete_url_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>> {
    let alias = Alias::new(alias)?;
    state.remover().remove(&alias).await?;

    info!(alias = %alias, "url deleted");
    Ok(Json(StatusResponse::ok()))
}
