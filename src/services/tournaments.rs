use log::info;
use rusqlite::Connection;

use crate::config::settings::SetupLimits;
use crate::database::{self, EliminationType, Tournament, TournamentDetails};
use crate::engine::TournamentId;
use crate::errors::{Entity, FieldErrors, ServiceError, ServiceResult};

/// Raw setup form. Every field is optional so that missing values are
/// reported as field errors instead of failing deserialization.
#[derive(Debug, Clone, Default)]
pub struct TournamentForm {
    pub name: Option<String>,
    pub players: Option<i64>,
    pub elimination_type: Option<String>,
    pub number_of_groups: Option<i64>,
}

pub fn validate_form(
    form: &TournamentForm,
    limits: &SetupLimits,
) -> ServiceResult<TournamentDetails> {
    let mut errors = FieldErrors::new();

    let name = form.name.as_deref().map(str::trim).unwrap_or("");
    if name.is_empty() {
        errors.add("name", "Name is required");
    } else if !limits.tournament_name_chars.contains(&name.chars().count()) {
        errors.add(
            "name",
            format!(
                "Name must be between {} and {} characters",
                limits.tournament_name_chars.start(),
                limits.tournament_name_chars.end()
            ),
        );
    }

    match form.players {
        Some(n) if limits.planned_players.contains(&n) => {}
        _ => errors.add(
            "players",
            format!(
                "Players must be between {} and {}",
                limits.planned_players.start(),
                limits.planned_players.end()
            ),
        ),
    }

    let elimination_type = match form.elimination_type.as_deref() {
        None => EliminationType::default(),
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            errors.add("eliminationType", "Elimination type must be SINGLE or MULTI");
            EliminationType::default()
        }),
    };

    let number_of_groups = match form.number_of_groups {
        Some(n) if limits.groups.contains(&n) => n,
        _ => {
            errors.add(
                "numberOfGroups",
                format!(
                    "Number of groups must be between {} and {}",
                    limits.groups.start(),
                    limits.groups.end()
                ),
            );
            0
        }
    };

    errors.into_result()?;
    Ok(TournamentDetails {
        name: name.to_string(),
        elimination_type,
        number_of_groups,
    })
}

pub fn create_tournament(
    conn: &Connection,
    form: &TournamentForm,
    limits: &SetupLimits,
) -> ServiceResult<Tournament> {
    let details = validate_form(form, limits)?;
    let tournament = database::tournaments::insert_tournament(conn, &details)?;

    info!("Created tournament {} ({})", tournament.id, tournament.name);
    Ok(tournament)
}

pub fn update_tournament(
    conn: &Connection,
    id: TournamentId,
    form: &TournamentForm,
    limits: &SetupLimits,
) -> ServiceResult<Tournament> {
    let details = validate_form(form, limits)?;
    let existing = load_tournament(conn, id)?;
    ensure_not_started(&existing)?;

    database::tournaments::update_details(conn, id, &details)?
        .ok_or_else(|| ServiceError::not_found(Entity::Tournament, id))
}

pub fn list_tournaments(conn: &Connection) -> ServiceResult<Vec<Tournament>> {
    Ok(database::tournaments::list_all(conn)?)
}

pub fn load_tournament(conn: &Connection, id: TournamentId) -> ServiceResult<Tournament> {
    database::tournaments::find_by_id(conn, id)?
        .ok_or_else(|| ServiceError::not_found(Entity::Tournament, id))
}

/// Setup changes are frozen once matches and standings exist.
pub fn ensure_not_started(tournament: &Tournament) -> ServiceResult<()> {
    if tournament.started {
        return Err(ServiceError::invalid(
            "tournament",
            format!("Tournament {} has already started", tournament.id),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::memory_conn;

    fn form(name: &str, players: i64, elimination: &str, groups: i64) -> TournamentForm {
        TournamentForm {
            name: Some(name.to_string()),
            players: Some(players),
            elimination_type: Some(elimination.to_string()),
            number_of_groups: Some(groups),
        }
    }

    #[test]
    fn test_create_tournament() {
        let (_pool, conn) = memory_conn();
        let limits = SetupLimits::default();

        let t = create_tournament(&conn, &form(" Summer Cup ", 8, "SINGLE", 4), &limits).unwrap();

        assert_eq!(t.name, "Summer Cup");
        assert_eq!(t.elimination_type, EliminationType::Single);
        assert_eq!(t.number_of_groups, 4);
        assert!(!t.started);
    }

    #[test]
    fn test_invalid_form_reports_every_field() {
        let (_pool, conn) = memory_conn();
        let bad = TournamentForm {
            name: Some("A".to_string()),
            players: Some(3),
            elimination_type: Some("DOUBLE".to_string()),
            number_of_groups: None,
        };

        let err = create_tournament(&conn, &bad, &SetupLimits::default()).unwrap_err();

        match err {
            ServiceError::Validation(errors) => {
                for field in ["name", "players", "eliminationType", "numberOfGroups"] {
                    assert!(errors.contains(field), "missing {field}");
                }
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(list_tournaments(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_elimination_type_defaults_to_multi() {
        let mut f = form("Cup", 8, "", 2);
        f.elimination_type = None;

        let details = validate_form(&f, &SetupLimits::default()).unwrap();
        assert_eq!(details.elimination_type, EliminationType::Multi);
    }

    #[test]
    fn test_update_tournament() {
        let (_pool, conn) = memory_conn();
        let limits = SetupLimits::default();
        let t = create_tournament(&conn, &form("Cup", 8, "SINGLE", 4), &limits).unwrap();

        let updated =
            update_tournament(&conn, t.id, &form("Edited Cup", 16, "MULTI", 2), &limits).unwrap();

        assert_eq!(updated.name, "Edited Cup");
        assert_eq!(updated.elimination_type, EliminationType::Multi);
        assert_eq!(updated.number_of_groups, 2);
    }

    #[test]
    fn test_update_unknown_tournament_is_not_found() {
        let (_pool, conn) = memory_conn();
        let limits = SetupLimits::default();

        let err = update_tournament(&conn, 77, &form("Cup", 8, "SINGLE", 4), &limits).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: Entity::Tournament, id: 77 }));
    }

    #[test]
    fn test_update_started_tournament_is_rejected() {
        let (_pool, conn) = memory_conn();
        let limits = SetupLimits::default();
        let t = create_tournament(&conn, &form("Cup", 8, "SINGLE", 4), &limits).unwrap();
        database::tournaments::mark_started(&conn, t.id).unwrap();

        let err =
            update_tournament(&conn, t.id, &form("Other", 8, "SINGLE", 4), &limits).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(load_tournament(&conn, t.id).unwrap().name, "Cup");
    }
}
