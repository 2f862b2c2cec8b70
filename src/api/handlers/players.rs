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
use crate::api::models::{
    GroupAssignmentRequest, PlayerRequest, PlayerResponse, SyncPlayersRequest, SyncResponse,
};
use crate::database;
use crate::services::groups::GroupAssignment;
use crate::services::{groups, registration};

pub async fn list_players(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<PlayerResponse>>> {
    let Path(tournament_id) = id?;
    let conn = database::get_connection(&state.pool)?;

    let players = registration::list_players(&conn, tournament_id)?;
    Ok(Json(players.into_iter().map(PlayerResponse::from).collect()))
}

pub async fn register_player(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<PlayerRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PlayerResponse>)> {
    let Path(tournament_id) = id?;
    let Json(request) = payload?;
    let conn = database::get_connection(&state.pool)?;

    let name = request.name.unwrap_or_default();
    let player = registration::register_player(&conn, tournament_id, &name, &state.config.limits)?;
    Ok((StatusCode::CREATED, Json(player.into())))
}

pub async fn sync_players(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<SyncPlayersRequest>, JsonRejection>,
) -> ApiResult<Json<SyncResponse>> {
    let Path(tournament_id) = id?;
    let Json(request) = payload?;
    let mut conn = database::get_connection(&state.pool)?;

    let limits = &state.config.limits;
    let summary = registration::sync_players(&mut conn, tournament_id, &request.names, limits)?;
    let players = registration::list_players(&conn, tournament_id)?;
    Ok(Json(SyncResponse::new(summary, players)))
}

pub async fn delete_player(
    State(state): State<Arc<AppState>>,
    ids: Result<Path<(i64, i64)>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path((tournament_id, player_id)) = ids?;
    let conn = database::get_connection(&state.pool)?;

    registration::delete_player(&conn, tournament_id, player_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn assign_groups(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<GroupAssignmentRequest>, JsonRejection>,
) -> ApiResult<Json<Vec<PlayerResponse>>> {
    let Path(tournament_id) = id?;
    let Json(request) = payload?;
    let mut conn = database::get_connection(&state.pool)?;

    let assignment = GroupAssignment::from(request);
    let players =
        groups::assign_groups(&mut conn, tournament_id, &assignment, &state.config.limits)?;
    Ok(Json(players.into_iter().map(PlayerResponse::from).collect()))
}
