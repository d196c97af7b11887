use sqlx::SqlitePool;

use crate::database::{
    models::Roster,
    types::{MemberRow, TeamRow},
};
use crate::error::AppError;

/// Persists [`Roster`] aggregates into the `teams` / `members` tables.
#[derive(Clone)]
pub struct RosterRepository {
    pool: SqlitePool,
}

impl RosterRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert every team and member of the roster, keeping their ids.
    ///
    /// Runs in one transaction; teams go first so member foreign keys resolve.
    pub async fn save(&self, roster: &Roster) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for team in roster.teams() {
            sqlx::query(
                r#"
                INSERT INTO teams (id, name)
                VALUES (?, ?)
                "#,
            )
            .bind(team.id)
            .bind(&team.name)
            .execute(&mut *tx)
            .await?;
        }

        for member in roster.members() {
            sqlx::query(
                r#"
                INSERT INTO members (id, username, age, team_id)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(member.id)
            .bind(&member.username)
            .bind(member.age)
            .bind(member.team_id())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        log::info!(
            "Saved roster: {} teams, {} members",
            roster.teams().count(),
            roster.members().count()
        );

        Ok(())
    }

    pub async fn load(&self) -> Result<Roster, AppError> {
        let teams = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, name
            FROM teams
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let members = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, username, age, team_id
            FROM members
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Roster::from_rows(teams, members)
    }

    pub async fn team_member_ids(&self, team_id: i64) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id
            FROM members
            WHERE team_id = ?
            ORDER BY id
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    pub async fn is_empty(&self) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teams")
            .fetch_one(&self.pool)
            .await?;

        Ok(count == 0)
    }
}
