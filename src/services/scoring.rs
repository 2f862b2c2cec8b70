use anyhow::Context;
use log::info;
use rusqlite::Connection;

use super::standings::recalculate_group;
use crate::config::settings::SetupLimits;
use crate::database::{self, Match};
use crate::engine::{MatchId, RankedStanding};
use crate::errors::{Entity, FieldErrors, ServiceError, ServiceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSubmission {
    pub match_id: MatchId,
    pub score1: i64,
    pub score2: i64,
}

#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    pub game: Match,
    /// The recomputed standings of the match's group.
    pub standings: Vec<RankedStanding>,
}

pub fn validate_submission(
    submission: &ScoreSubmission,
    limits: &SetupLimits,
) -> ServiceResult<()> {
    let mut errors = FieldErrors::new();

    if submission.match_id <= 0 {
        errors.add("matchId", "Match id must be a positive integer");
    }
    for (field, score) in [("score1", submission.score1), ("score2", submission.score2)] {
        if !(0..=limits.max_score).contains(&score) {
            errors.add(
                field,
                format!("Score must be an integer between 0 and {}", limits.max_score),
            );
        }
    }
    if errors.is_empty() && submission.score1 == submission.score2 {
        errors.add("scores", "Draws are not allowed");
    }

    errors.into_result()
}

/// Records the score and recomputes the standings of the match's group
/// in one transaction. Nothing is written when validation fails.
pub fn submit_score(
    conn: &mut Connection,
    submission: &ScoreSubmission,
    limits: &SetupLimits,
) -> ServiceResult<ScoreOutcome> {
    validate_submission(submission, limits)?;

    let existing = database::matches::find_by_id(conn, submission.match_id)?
        .ok_or_else(|| ServiceError::not_found(Entity::Match, submission.match_id))?;

    let tx = conn.transaction().context("Failed to open transaction")?;
    database::matches::record_score(&tx, existing.id, submission.score1, submission.score2)?;
    let standings = recalculate_group(&tx, existing.tournament_id, existing.group_number)?;
    let game = database::matches::find_by_id(&tx, existing.id)?
        .ok_or_else(|| ServiceError::not_found(Entity::Match, existing.id))?;
    tx.commit().context("Failed to commit score")?;

    info!(
        "Match {} scored {}:{}; group {} of tournament {} recalculated",
        game.id, submission.score1, submission.score2, game.group_number, game.tournament_id
    );
    Ok(ScoreOutcome { game, standings })
}
