//! Offset pagination envelope shared by every console list endpoint.

use serde::{Deserialize, Serialize};

/// Page window sent as `limit`/`offset` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u32,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: u32 = 50;

    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    /// First page with the given window size.
    pub fn first(limit: u32) -> Self {
        Self { limit, offset: 0 }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// One page of a collection response.
///
/// `total` counts the whole collection under the applied filter, not the
/// page, so clients can render pagination controls from a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

impl<T> ListPage<T> {
    pub fn empty(limit: u32, offset: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            limit,
            offset,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_defaults() {
        let page = PageRequest::default();
        assert_eq!(page.limit, 50);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn list_page_envelope_roundtrip() {
        let page: ListPage<String> = serde_json::from_str(
            r#"{"items":["a","b"],"total":7,"limit":2,"offset":0}"#,
        )
        .expect("envelope should deserialize");
        assert_eq!(page.len(), 2);
        assert_eq!(page.total, 7);
    }
}
