use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use super::AppState;
use crate::api::errors::ApiResult;
use crate::api::models::{StartResponse, TournamentListItem, TournamentRequest, TournamentResponse};
use crate::database;
use crate::services::tournaments::TournamentForm;
use crate::services::{groups, tournaments};

pub async fn list_tournaments(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<TournamentListItem>>> {
    let conn = database::get_connection(&state.pool)?;
    let items = tournaments::list_tournaments(&conn)?
        .into_iter()
        .map(TournamentListItem::from)
        .collect();
    Ok(Json(items))
}

pub async fn create_tournament(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TournamentRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TournamentResponse>)> {
    let Json(request) = payload?;
    let conn = database::get_connection(&state.pool)?;

    let form = TournamentForm::from(request);
    let tournament = tournaments::create_tournament(&conn, &form, &state.config.limits)?;
    Ok((StatusCode::CREATED, Json(tournament.into())))
}

pub async fn get_tournament(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<TournamentResponse>> {
    let Path(id) = id?;
    let conn = database::get_connection(&state.pool)?;

    Ok(Json(tournaments::load_tournament(&conn, id)?.into()))
}

pub async fn update_tournament(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TournamentRequest>, JsonRejection>,
) -> ApiResult<Json<TournamentResponse>> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let conn = database::get_connection(&state.pool)?;

    let form = TournamentForm::from(request);
    let tournament = tournaments::update_tournament(&conn, id, &form, &state.config.limits)?;
    Ok(Json(tournament.into()))
}

pub async fn start_tournament(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<StartResponse>> {
    let Path(id) = id?;
    let mut conn = database::get_connection(&state.pool)?;

    let summary = groups::start_tournament(&mut conn, id, &state.config.limits)?;
    Ok(Json(summary.into()))
}
