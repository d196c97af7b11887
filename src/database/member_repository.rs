use sqlx::SqlitePool;

use crate::database::{
    models::MemberSearchCondition,
    pagination::{self, Page, PageRequest},
    projection::MemberTeamDto,
    query::MemberTeamQuery,
    store::SearchStore,
};
use crate::error::AppError;

/// Conditional member search over members left-joined to their teams.
#[derive(Clone)]
pub struct MemberRepository<S = SqlitePool> {
    store: S,
}

impl<S: SearchStore> MemberRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Every matching row, unbounded and in store order.
    pub async fn search(
        &self,
        condition: &MemberSearchCondition,
    ) -> Result<Vec<MemberTeamDto>, AppError> {
        let query = MemberTeamQuery::new(condition);
        let rows = self.store.fetch_content(&query).await?;

        Ok(rows)
    }

    /// One page of matches. The count query only runs when the page itself
    /// cannot determine the total.
    pub async fn search_page(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> Result<Page<MemberTeamDto>, AppError> {
        page.validate()?;

        let query = MemberTeamQuery::new(condition).paged(page);
        let content = self.store.fetch_content(&query).await?;

        let total = pagination::compute_total(content.len(), page, || async {
            Ok(self.store.fetch_count(&query).await?)
        })
        .await?;

        Ok(Page::new(content, page, total))
    }

    /// Like [`search_page`](Self::search_page) but always runs the count query.
    pub async fn search_page_with_count(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> Result<Page<MemberTeamDto>, AppError> {
        page.validate()?;

        let query = MemberTeamQuery::new(condition).paged(page);
        let content = self.store.fetch_content(&query).await?;
        let total = self.store.fetch_count(&query).await?;

        Ok(Page::new(content, page, total))
    }
}
