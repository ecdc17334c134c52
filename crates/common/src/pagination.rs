//! Pagination utilities shared by the service and controller tiers.
//!
//! `PageRequest` describes which slice the caller wants, `Page<T>` carries the
//! slice back together with the totals needed to render pagers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page size must be greater than zero")]
    ZeroSize,
    #[error("page {page} of size {size} is out of range")]
    OffsetOutOfRange { page: u64, size: u64 },
}

/// Ordering applied to the primary key of the paged rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    #[default]
    Desc,
}

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 0-based page index
    pub page: u64,
    /// items per page
    pub size: u64,
    #[serde(default)]
    pub direction: Direction,
}

impl PageRequest {
    pub const MAX_SIZE: u64 = 100;
    pub const DEFAULT_SIZE: u64 = 20;

    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size, direction: Direction::default() }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Reject an empty page size and clamp oversized ones. The row offset
    /// must fit a signed 64-bit SQL `OFFSET`.
    pub fn normalize(self) -> Result<Self, PaginationError> {
        if self.size == 0 {
            return Err(PaginationError::ZeroSize);
        }
        let size = self.size.min(Self::MAX_SIZE);
        match self.page.checked_mul(size) {
            Some(offset) if offset <= i64::MAX as u64 => Ok(Self { size, ..self }),
            _ => Err(PaginationError::OffsetOutOfRange { page: self.page, size }),
        }
    }

    /// Number of rows preceding this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self { Self::new(0, Self::DEFAULT_SIZE) }
}

/// One slice of a larger result set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let total_pages = if request.size == 0 { 0 } else { total_elements.div_ceil(request.size) };
        Self { content, page: request.page, size: request.size, total_elements, total_pages }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rejects_zero_size() {
        assert_eq!(PageRequest::new(0, 0).normalize(), Err(PaginationError::ZeroSize));
    }

    #[test]
    fn normalize_rejects_offset_overflow() {
        assert_eq!(
            PageRequest::new(u64::MAX, 10).normalize(),
            Err(PaginationError::OffsetOutOfRange { page: u64::MAX, size: 10 })
        );
        let last = i64::MAX as u64 / 100;
        assert!(PageRequest::new(last, 100).normalize().is_ok());
        assert!(PageRequest::new(last + 1, 100).normalize().is_err());
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let req = PageRequest::new(4, 1000).normalize().unwrap();
        assert_eq!(req.page, 4);
        assert_eq!(req.size, PageRequest::MAX_SIZE);
        assert_eq!(req.offset(), 400);
    }

    #[test]
    fn default_values_are_sane() {
        let d = PageRequest::default();
        assert_eq!(d.page, 0);
        assert_eq!(d.size, 20);
        assert_eq!(d.direction, Direction::Desc);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::new(vec![1, 2, 3], PageRequest::new(0, 3), 7);
        assert_eq!(page.total_pages, 3);
        let empty: Page<i32> = Page::new(Vec::new(), PageRequest::new(0, 10), 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn map_keeps_totals() {
        let page = Page::new(vec![1, 2], PageRequest::new(1, 2), 4).map(|n| n * 10);
        assert_eq!(page.content, vec![10, 20]);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_elements, 4);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn direction_deserializes_lowercase() {
        let req: PageRequest = serde_json::from_str(r#"{"page":0,"size":5,"direction":"asc"}"#).unwrap();
        assert_eq!(req.direction, Direction::Asc);
        let req: PageRequest = serde_json::from_str(r#"{"page":0,"size":5}"#).unwrap();
        assert_eq!(req.direction, Direction::Desc);
    }
}
