use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{self, matches, players, standings, tournaments, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route(
            "/api/tournaments",
            get(tournaments::list_tournaments).post(tournaments::create_tournament),
        )
        .route(
            "/api/tournaments/:id",
            get(tournaments::get_tournament).put(tournaments::update_tournament),
        )
        .route(
            "/api/tournaments/:id/players",
            get(players::list_players)
                .post(players::register_player)
                .put(players::sync_players),
        )
        .route("/api/tournaments/:id/players/:player_id", delete(players::delete_player))
        .route("/api/tournaments/:id/groups", put(players::assign_groups))
        .route("/api/tournaments/:id/start", post(tournaments::start_tournament))
        .route("/api/tournaments/:id/matches", get(matches::list_matches))
        .route("/api/tournaments/:id/matches/generate", post(matches::generate_matches))
        .route("/api/tournaments/:id/standings", get(standings::get_standings))
        .route("/api/matches/:id/score", put(matches::submit_score))
        .with_state(state)
}
