use std::future::Future;

use sqlx::SqlitePool;

use crate::database::{projection::MemberTeamDto, query::MemberTeamQuery, utils::sql};

/// Executes assembled member/team queries against a relational store.
///
/// Implementations run each call as a single round trip and report store
/// failures as-is; retries and transactions belong to the caller.
pub trait SearchStore {
    fn fetch_content(
        &self,
        query: &MemberTeamQuery,
    ) -> impl Future<Output = Result<Vec<MemberTeamDto>, sqlx::Error>> + Send;

    fn fetch_count(
        &self,
        query: &MemberTeamQuery,
    ) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;
}

impl SearchStore for SqlitePool {
    async fn fetch_content(
        &self,
        query: &MemberTeamQuery,
    ) -> Result<Vec<MemberTeamDto>, sqlx::Error> {
        let mut builder = query.content_sql();
        log::debug!("Content query: {}", sql(builder.sql()));

        builder
            .build_query_as::<MemberTeamDto>()
            .fetch_all(self)
            .await
    }

    async fn fetch_count(&self, query: &MemberTeamQuery) -> Result<i64, sqlx::Error> {
        let mut builder = query.count_sql();
        log::debug!("Count query: {}", sql(builder.sql()));

        builder.build_query_scalar::<i64>().fetch_one(self).await
    }
}
