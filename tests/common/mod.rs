#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use anyhow::Result;
use sqlx::SqlitePool;
use tempfile::TempDir;

use member_search::Config;
use member_search::database::{
    RosterRepository, init_database,
    models::Roster,
    projection::MemberTeamDto,
    query::MemberTeamQuery,
    store::SearchStore,
};
use member_search::handlers::shared::ApiResponse;

// Test database wrapper
pub struct TestContext {
    pub pool: SqlitePool,
    pub config: Config,
    pub temp_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let database_url = format!("sqlite:{}/test.db", temp_dir.path().display());

        let config = Config::test_config(database_url.clone());
        let pool = init_database(&database_url).await?;

        Ok(TestContext {
            pool,
            config,
            temp_dir,
        })
    }

    /// A fresh database holding [`four_members`].
    pub async fn with_four_members() -> Result<Self> {
        let ctx = Self::new().await?;
        ctx.save(&four_members()?).await?;
        Ok(ctx)
    }

    pub async fn save(&self, roster: &Roster) -> Result<()> {
        RosterRepository::new(self.pool.clone()).save(roster).await?;
        Ok(())
    }
}

pub fn setup_test_env() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// teamA: member1(10), member2(20); teamB: member3(30), member4(40).
/// Ids are 1..=4 in that order; teamA is 1, teamB is 2.
pub fn four_members() -> Result<Roster> {
    let mut roster = Roster::new();
    let team_a = roster.add_team("teamA");
    let team_b = roster.add_team("teamB");

    roster.add_member(Some("member1".to_string()), 10, Some(team_a))?;
    roster.add_member(Some("member2".to_string()), 20, Some(team_a))?;
    roster.add_member(Some("member3".to_string()), 30, Some(team_b))?;
    roster.add_member(Some("member4".to_string()), 40, Some(team_b))?;

    Ok(roster)
}

/// [`four_members`] plus `loner(50)` (id 5) with no team.
pub fn four_members_and_loner() -> Result<Roster> {
    let mut roster = four_members()?;
    roster.add_member(Some("loner".to_string()), 50, None)?;
    Ok(roster)
}

pub fn usernames(rows: &[MemberTeamDto]) -> Vec<&str> {
    rows.iter()
        .map(|row| row.username.as_deref().unwrap_or_default())
        .collect()
}

/// Wraps the real store and counts how often each query runs.
#[derive(Clone)]
pub struct CountingStore {
    pool: SqlitePool,
    content_calls: Arc<AtomicUsize>,
    count_calls: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            content_calls: Arc::new(AtomicUsize::new(0)),
            count_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn content_calls(&self) -> usize {
        self.content_calls.load(Ordering::SeqCst)
    }

    pub fn count_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }
}

impl SearchStore for CountingStore {
    async fn fetch_content(
        &self,
        query: &MemberTeamQuery,
    ) -> Result<Vec<MemberTeamDto>, sqlx::Error> {
        self.content_calls.fetch_add(1, Ordering::SeqCst);
        self.pool.fetch_content(query).await
    }

    async fn fetch_count(&self, query: &MemberTeamQuery) -> Result<i64, sqlx::Error> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.pool.fetch_count(query).await
    }
}

/// Serves content from the real store but fails the selected query.
#[derive(Clone)]
pub struct FailingStore {
    pool: SqlitePool,
    fail_content: bool,
    count_calls: Arc<AtomicUsize>,
}

impl FailingStore {
    pub fn failing_content(pool: SqlitePool) -> Self {
        Self {
            pool,
            fail_content: true,
            count_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing_count(pool: SqlitePool) -> Self {
        Self {
            pool,
            fail_content: false,
            count_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn count_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }
}

impl SearchStore for FailingStore {
    async fn fetch_content(
        &self,
        query: &MemberTeamQuery,
    ) -> Result<Vec<MemberTeamDto>, sqlx::Error> {
        if self.fail_content {
            return Err(sqlx::Error::PoolTimedOut);
        }
        self.pool.fetch_content(query).await
    }

    async fn fetch_count(&self, _query: &MemberTeamQuery) -> Result<i64, sqlx::Error> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        Err(sqlx::Error::PoolTimedOut)
    }
}

// Test assertion helpers
pub struct TestAssertions;

impl TestAssertions {
    pub fn assert_success_response<T>(body: &[u8]) -> T
    where
        T: serde::de::DeserializeOwned,
    {
        let response: ApiResponse<T> =
            serde_json::from_slice(body).expect("Failed to parse JSON response");

        assert!(
            response.success,
            "Expected successful response but got error: {:?}",
            response.message
        );
        response.data.expect("Expected data in successful response")
    }
}
