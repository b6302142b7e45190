//! Listing order and page window for product queries

use serde::Serialize;

/// Ordering over product creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Map a raw sort parameter onto the closed vocabulary.
    ///
    /// Only the exact strings `"asc"` and `"desc"` are recognised; anything
    /// else, including the empty string, falls back to ascending order.
    pub fn coerce(value: &str) -> Self {
        match value {
            "desc" => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Requested slice of the ordered product list.
///
/// Pages are 1-indexed. Pagination is opt-in: when either `page` or `limit`
/// is zero the whole ordered set is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    pub sort: SortOrder,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32, sort: &str) -> Self {
        Self {
            page,
            limit,
            sort: SortOrder::coerce(sort),
        }
    }

    pub fn is_paginated(&self) -> bool {
        self.page != 0 && self.limit != 0
    }

    /// Number of records to skip; zero when not paginated
    pub fn offset(&self) -> u64 {
        if self.is_paginated() {
            u64::from(self.page - 1) * u64::from(self.limit)
        } else {
            0
        }
    }

    /// Apply the window to an already ordered sequence
    pub fn window<T>(&self, items: Vec<T>) -> Vec<T> {
        if !self.is_paginated() {
            return items;
        }

        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        items
            .into_iter()
            .skip(offset)
            .take(self.limit as usize)
            .collect()
    }
}
