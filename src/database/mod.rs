use std::str::FromStr;

use anyhow::Result;
use sqlx::{
    Sqlite,
    migrate::MigrateDatabase,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
};

pub mod member_repository;
pub mod models;
pub mod pagination;
pub mod predicate;
pub mod projection;
pub mod query;
pub mod roster_repository;
pub mod schema;
pub mod seed;
pub mod store;
pub mod types;
pub mod utils;

pub use member_repository::MemberRepository;
pub use roster_repository::RosterRepository;

pub async fn init_database(database_url: &str) -> Result<SqlitePool> {
    // Create database if it doesn't exist
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        log::info!("Creating database {}", database_url);
        Sqlite::create_database(database_url).await?;
    }

    let options = SqliteConnectOptions::from_str(database_url)?.foreign_keys(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    log::info!("Bootstrapping schema...");
    schema::bootstrap_schema(&pool).await?;

    Ok(pool)
}
