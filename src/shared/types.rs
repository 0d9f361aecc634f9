use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// A 1-indexed page of fixed size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    pub size: i64,
}

impl Page {
    /// Page numbers past the last representable offset are clamped.
    pub fn new(number: i64, size: i64) -> Self {
        let size = size.max(1);
        Self {
            number: number.clamp(1, i64::MAX / size),
            size,
        }
    }

    /// SQL OFFSET for this page
    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.size
    }

    /// SQL LIMIT for this page
    pub fn limit(&self) -> i64 {
        self.size
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offset() {
        assert_eq!(Page::new(1, 15).offset(), 0);
        assert_eq!(Page::new(3, 15).offset(), 30);
    }

    #[test]
    fn test_page_clamps_to_first_page() {
        let page = Page::new(0, 15);
        assert_eq!(page.number, 1);
        assert_eq!(page.offset(), 0);
        assert_eq!(Page::new(-4, 15).offset(), 0);
    }

    #[test]
    fn test_page_huge_number_does_not_overflow() {
        let page = Page::new(i64::MAX, 15);
        assert_eq!(page.number, i64::MAX / 15);
        assert!(page.offset() > 0);
        assert!(page.offset() <= i64::MAX - 15);
    }
}
