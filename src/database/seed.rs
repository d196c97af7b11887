use sqlx::SqlitePool;

use crate::database::{models::Roster, roster_repository::RosterRepository};
use crate::error::AppError;

const SAMPLE_MEMBERS: i32 = 100;

/// `teamA` and `teamB` with `member0..member99`; age equals the index and
/// even indexes join `teamA`.
pub fn sample_roster() -> Result<Roster, AppError> {
    let mut roster = Roster::new();
    let team_a = roster.add_team("teamA");
    let team_b = roster.add_team("teamB");

    for i in 0..SAMPLE_MEMBERS {
        let team = if i % 2 == 0 { team_a } else { team_b };
        roster.add_member(Some(format!("member{}", i)), i, Some(team))?;
    }

    Ok(roster)
}

/// Seed the sample roster unless the store already holds teams.
pub async fn seed_sample_data(pool: &SqlitePool) -> Result<(), AppError> {
    let repository = RosterRepository::new(pool.clone());

    if !repository.is_empty().await? {
        log::info!("Sample data already present, skipping seed");
        return Ok(());
    }

    repository.save(&sample_roster()?).await
}
