use actix_web::{HttpResponse, Result, web};
use serde::Deserialize;

use crate::{
    config::Config,
    database::{
        MemberRepository,
        models::MemberSearchCondition,
        pagination::{PageRequest, Sort},
    },
    error::AppError,
    handlers::shared::ApiResponse,
};

/// Search filters plus paging parameters, all from the query string.
///
/// Kept flat because `serde_urlencoded` cannot flatten numeric fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPageQuery {
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
    /// Zero-based page number
    pub page: Option<i64>,
    pub size: Option<i64>,
    /// `field[:asc|desc]`, comma separated
    pub sort: Option<String>,
}

impl MemberPageQuery {
    pub fn condition(&self) -> MemberSearchCondition {
        MemberSearchCondition {
            username: self.username.clone(),
            team_name: self.team_name.clone(),
            age_goe: self.age_goe,
            age_loe: self.age_loe,
        }
    }

    /// Page defaults come from config; oversized pages are clamped, negative
    /// values are left for `PageRequest::validate` to reject.
    pub fn page_request(&self, config: &Config) -> Result<PageRequest, AppError> {
        let size = self
            .size
            .unwrap_or(config.default_page_size)
            .min(config.max_page_size);
        let mut page = PageRequest::of(self.page.unwrap_or(0), size)?;

        if let Some(sort) = &self.sort {
            page.sort = Sort::parse_list(sort)?;
        }

        Ok(page)
    }
}

/// GET /v1/members
pub async fn search_members(
    repo: web::Data<MemberRepository>,
    query: web::Query<MemberSearchCondition>,
) -> Result<HttpResponse> {
    let rows = repo.search(&query).await?;

    Ok(ApiResponse::success(rows))
}

/// GET /v2/members, always counting
pub async fn search_members_page_with_count(
    repo: web::Data<MemberRepository>,
    config: web::Data<Config>,
    query: web::Query<MemberPageQuery>,
) -> Result<HttpResponse> {
    let page = query.page_request(&config)?;
    let result = repo
        .search_page_with_count(&query.condition(), &page)
        .await?;

    Ok(ApiResponse::success(result))
}

/// GET /v3/members, counting only when the page cannot settle the total
pub async fn search_members_page(
    repo: web::Data<MemberRepository>,
    config: web::Data<Config>,
    query: web::Query<MemberPageQuery>,
) -> Result<HttpResponse> {
    let page = query.page_request(&config)?;
    let result = repo.search_page(&query.condition(), &page).await?;

    Ok(ApiResponse::success(result))
}
