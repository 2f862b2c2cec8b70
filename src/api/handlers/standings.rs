use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Json,
};
use std::sync::Arc;

use super::AppState;
use crate::api::errors::ApiResult;
use crate::api::models::GroupStandingsResponse;
use crate::database;
use crate::services::standings;

pub async fn get_standings(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<GroupStandingsResponse>>> {
    let Path(tournament_id) = id?;
    let mut conn = database::get_connection(&state.pool)?;

    let groups = standings::group_standings(&mut conn, tournament_id)?;
    Ok(Json(groups.into_iter().map(GroupStandingsResponse::from).collect()))
}
