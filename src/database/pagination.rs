//! Page requests, page results and the total-count decision.
//!
//! A page is fetched with one bounded content query. The separate count query
//! only runs when the fetched page cannot prove the total on its own; see
//! [`compute_total`].

use std::{fmt, future::Future, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{database::projection::Column, error::AppError};

/// Direction for ordering results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Ascending,
    Descending,
}

impl OrderDirection {
    pub const fn sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

impl FromStr for OrderDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(AppError::bad_request(format!(
                "Unknown sort direction: {}",
                other
            ))),
        }
    }
}

/// One ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub column: Column,
    pub direction: OrderDirection,
}

impl Sort {
    pub const fn asc(column: Column) -> Self {
        Self {
            column,
            direction: OrderDirection::Ascending,
        }
    }

    pub const fn desc(column: Column) -> Self {
        Self {
            column,
            direction: OrderDirection::Descending,
        }
    }

    /// Parse a comma separated list such as `teamName,age:desc`.
    pub fn parse_list(s: &str) -> Result<Vec<Sort>, AppError> {
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(|part| part.parse::<Sort>())
            .collect()
    }
}

impl FromStr for Sort {
    type Err = AppError;

    /// `field` or `field:asc|desc`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(':') {
            Some((field, direction)) => (field, direction.parse::<OrderDirection>()?),
            None => (s, OrderDirection::default()),
        };

        Ok(Self {
            column: field.parse()?,
            direction,
        })
    }
}

/// Offset/limit window plus ordering.
///
/// Without a sort the rows come back in whatever order the store produces,
/// which is not guaranteed to be stable between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: i64,
    pub limit: i64,
    pub sort: Vec<Sort>,
}

impl PageRequest {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset,
            limit,
            sort: Vec::new(),
        }
    }

    /// Zero-based page number and page size.
    pub fn of(page_number: i64, page_size: i64) -> Result<Self, AppError> {
        let offset = page_number
            .checked_mul(page_size)
            .ok_or_else(|| AppError::bad_request("Page offset out of range"))?;

        Ok(Self::new(offset, page_size))
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort.push(sort);
        self
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.offset < 0 {
            return Err(AppError::bad_request(format!(
                "Page offset must not be negative, got {}",
                self.offset
            )));
        }
        if self.limit <= 0 {
            return Err(AppError::bad_request(format!(
                "Page limit must be positive, got {}",
                self.limit
            )));
        }

        Ok(())
    }
}

/// One page of results together with the total over all pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, page: &PageRequest, total: i64) -> Self {
        Self {
            content,
            total,
            offset: page.offset,
            limit: page.limit,
        }
    }

    pub fn total_pages(&self) -> i64 {
        if self.limit <= 0 {
            return 0;
        }
        self.total / self.limit + i64::from(self.total % self.limit != 0)
    }

    pub fn has_next(&self) -> bool {
        self.offset.saturating_add(self.content.len() as i64) < self.total
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }
}

/// Resolve the total for a fetched page, running `count` only when needed.
///
/// A short page (fewer rows than `limit`) is the last page, so the total is
/// `offset + content_len`. An empty page past the first one proves nothing
/// (the offset may overshoot the data), and a full page may have more rows
/// behind it; both fall through to `count`.
pub async fn compute_total<F, Fut>(
    content_len: usize,
    page: &PageRequest,
    count: F,
) -> Result<i64, AppError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<i64, AppError>>,
{
    let content_len = content_len as i64;

    if content_len < page.limit {
        if page.offset == 0 {
            log::debug!("Count query elided on first page: total={}", content_len);
            return Ok(content_len);
        }
        if content_len > 0 {
            let total = page.offset + content_len;
            log::debug!("Count query elided on last page: total={}", total);
            return Ok(total);
        }
    }

    log::debug!(
        "Count query required (offset={}, limit={}, fetched={})",
        page.offset,
        page.limit,
        content_len
    );
    count().await
}
