//! Paging contract shared with the backing services.
//!
//! Services that paginate on their side return a [`PagedResult`] which already
//! holds exactly one page of content plus the total count.

use serde::{Deserialize, Serialize};

/// Requested page, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pageable {
    pub page_number: u32,
    /// `None` means "everything"
    pub page_size: Option<u32>,
}

impl Pageable {
    pub fn new(page_number: u32, page_size: Option<u32>) -> Self {
        Self { page_number, page_size }
    }

    /// Zero-based index of the first element of the page.
    pub fn offset(&self) -> usize {
        match self.page_size {
            Some(size) => (self.page_number.saturating_sub(1) as usize) * size as usize,
            None => 0,
        }
    }
}

/// One page of results as produced upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_elements: u64,
    pub total_elements: u64,
}

impl<T> PagedResult<T> {
    pub fn new(content: Vec<T>, page_number: u32, total_elements: u64) -> Self {
        let page_elements = content.len() as u64;
        Self { content, page_number, page_elements, total_elements }
    }

    /// Slice a complete list the way a paginating service would.
    pub fn slice(all: Vec<T>, pageable: Pageable) -> Self {
        let total = all.len() as u64;
        let content: Vec<T> = match pageable.page_size {
            Some(size) => all.into_iter().skip(pageable.offset()).take(size as usize).collect(),
            None => all,
        };
        Self::new(content, pageable.page_number, total)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_elements: self.page_elements,
            total_elements: self.total_elements,
        }
    }
}
