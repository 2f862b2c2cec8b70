use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::Json,
};
use std::sync::Arc;

use super::AppState;
use crate::api::errors::ApiResult;
use crate::api::models::{GenerateResponse, MatchResponse, ScoreRequest, ScoreResponse};
use crate::database;
use crate::services::{matches, scoring};

pub async fn list_matches(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<MatchResponse>>> {
    let Path(tournament_id) = id?;
    let conn = database::get_connection(&state.pool)?;

    let games = matches::list_matches(&conn, tournament_id)?;
    Ok(Json(games.into_iter().map(MatchResponse::from).collect()))
}

pub async fn generate_matches(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<GenerateResponse>> {
    let Path(tournament_id) = id?;
    let mut conn = database::get_connection(&state.pool)?;

    let created = matches::regenerate_matches(&mut conn, tournament_id)?;
    Ok(Json(GenerateResponse { created }))
}

pub async fn submit_score(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> ApiResult<Json<ScoreResponse>> {
    let Path(match_id) = id?;
    let Json(request) = payload?;
    let submission = request.into_submission(match_id)?;
    let mut conn = database::get_connection(&state.pool)?;

    let outcome = scoring::submit_score(&mut conn, &submission, &state.config.limits)?;
    Ok(Json(outcome.into()))
}
