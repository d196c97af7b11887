use sqlx::SqlitePool;

// Idempotent bootstrap for the two tables the search reads. Not a migration
// system: existing tables are left untouched.
const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS teams (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS members (
        id INTEGER PRIMARY KEY,
        username TEXT,
        age INTEGER NOT NULL,
        team_id INTEGER REFERENCES teams (id)
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_members_team_id ON members (team_id)
    "#,
];

pub async fn bootstrap_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}
