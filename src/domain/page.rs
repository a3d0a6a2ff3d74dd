//! Offset pagination shared by the listing endpoints

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// A 0-based page request with a bounded size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    size: usize,
}

impl PageRequest {
    /// Build a request, falling back to defaults and clamping the size
    pub fn new(page: Option<usize>, size: Option<usize>) -> Self {
        let size = match size {
            Some(0) | None => DEFAULT_PAGE_SIZE,
            Some(size) => size.min(MAX_PAGE_SIZE),
        };

        Self {
            page: page.unwrap_or(0),
            size,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Slice an already ordered collection
    pub fn paginate(items: Vec<T>, request: PageRequest) -> Self {
        let total_elements = items.len();
        let content = items
            .into_iter()
            .skip(request.offset())
            .take(request.size())
            .collect();

        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
            total_pages: total_elements.div_ceil(request.size()),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
