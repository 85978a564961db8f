//! Pagination of list endpoints.
//!
//! Services either paginate themselves (their [`PagedResult`] is passed through
//! untouched by [`ListResponse::from_page`]) or hand back a complete list that
//! [`ListResponse::paginate`] slices in memory.

use axum::extract::{rejection::QueryRejection, Query};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::error::ApiError;
use crate::domain::{Pageable, PagedResult};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_SIZE: i64 = 10;
/// `size=-1` requests every element on a single page.
pub const SIZE_ALL: i64 = -1;

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_size() -> i64 {
    DEFAULT_SIZE
}

/// `?page=&size=` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParam {
    /// 1-based page number (default: 1)
    #[serde(default = "default_page")]
    pub page: i64,
    /// Page size, or -1 for everything (default: 10)
    #[serde(default = "default_size")]
    pub size: i64,
}

impl Default for PaginationParam {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, size: DEFAULT_SIZE }
    }
}

impl PaginationParam {
    pub fn new(page: i64, size: i64) -> Self {
        Self { page, size }
    }

    /// Turn the raw extractor result into validated parameters.
    pub fn from_query(query: Result<Query<Self>, QueryRejection>) -> Result<Self, ApiError> {
        let Query(param) = query.map_err(|rejection| {
            ApiError::InvalidPagination(format!("Invalid pagination: {}", rejection.body_text()))
        })?;
        param.to_pageable()?;
        Ok(param)
    }

    pub fn to_pageable(&self) -> Result<Pageable, ApiError> {
        let page = u32::try_from(self.page)
            .ok()
            .filter(|page| *page >= 1)
            .ok_or_else(|| ApiError::InvalidPagination(format!("Invalid page '{}'", self.page)))?;

        let size = match self.size {
            SIZE_ALL => None,
            size => Some(
                u32::try_from(size)
                    .ok()
                    .filter(|size| *size >= 1)
                    .ok_or_else(|| ApiError::InvalidPagination(format!("Invalid size '{}'", size)))?,
            ),
        };

        Ok(Pageable::new(page, size))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMetadata {
    pub current_page: u32,
    /// Number of elements on this page
    pub size: u64,
    pub total: u64,
    pub total_pages: u64,
    /// 1-based index of the first element of the page (0 when empty)
    pub first: u64,
    /// 1-based index of the last element of the page (0 when empty)
    pub last: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListMetadata {
    pub pagination: PaginationMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub first: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    pub last: String,
}

/// Paginated list body shared by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub metadata: ListMetadata,
    pub links: ListLinks,
}

impl<T> ListResponse<T> {
    /// Wrap a page produced upstream. Its content is never re-sliced and its
    /// bounds are taken as reported, even when they disagree with `param`.
    pub fn from_page<U>(
        page: PagedResult<U>,
        param: PaginationParam,
        path: &str,
        convert: impl FnMut(U) -> T,
    ) -> Result<Self, ApiError> {
        let pageable = param.to_pageable()?;
        let total = page.total_elements;
        let page_elements = page.page_elements;
        let current_page = page.page_number.max(1);

        let per_page = pageable.page_size.map(u64::from).unwrap_or(total.max(1));
        let total_pages = match total {
            0 => 0,
            total => total.div_ceil(per_page.max(1)).max(u64::from(current_page)),
        };

        let (first, last) = if page_elements == 0 {
            (0, 0)
        } else {
            let first = u64::from(current_page - 1) * per_page + 1;
            (first, first + page_elements - 1)
        };

        let link = |number: u64| page_link(path, number, param.size);
        let last_page = total_pages.max(1);
        let links = ListLinks {
            self_link: link(u64::from(current_page)),
            first: link(1),
            prev: (current_page > 1).then(|| link(u64::from(current_page) - 1)),
            next: (u64::from(current_page) < total_pages).then(|| link(u64::from(current_page) + 1)),
            last: link(last_page),
        };

        Ok(Self {
            data: page.content.into_iter().map(convert).collect(),
            metadata: ListMetadata {
                pagination: PaginationMetadata {
                    current_page,
                    size: page_elements,
                    total,
                    total_pages,
                    first,
                    last,
                },
            },
            links,
        })
    }

    /// Slice a complete list in memory, then wrap the requested page.
    ///
    /// Unlike [`ListResponse::from_page`], a page past the end is rejected.
    pub fn paginate(all: Vec<T>, param: PaginationParam, path: &str) -> Result<Self, ApiError> {
        let pageable = param.to_pageable()?;
        let total = all.len() as u64;
        let per_page = pageable.page_size.map(u64::from).unwrap_or(total.max(1));
        let total_pages = total.div_ceil(per_page.max(1));

        if total_pages > 0 && u64::from(pageable.page_number) > total_pages {
            return Err(ApiError::InvalidPagination(format!(
                "Page {} is out of range (total pages: {})",
                pageable.page_number, total_pages
            )));
        }

        Self::from_page(PagedResult::slice(all, pageable), param, path, |item| item)
    }
}

fn page_link(path: &str, page: u64, size: i64) -> String {
    format!("{}?page={}&size={}", path, page, size)
}
