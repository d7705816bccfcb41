//! # Repositories
//!
//! One repository per entity, each owning the SQL for that table, plus the
//! read-only [`reports`] repository for cross-entity aggregation.
//!
//! ## Conventions
//! - Repositories are cheap to construct: they hold a pool clone
//! - Mutations check `rows_affected` and turn 0 into `DbError::NotFound`
//! - List operations are paginated with a fixed page size chosen by the
//!   caller; the [`Page`] envelope carries the pagination meta the API echoes
//! - Reporting queries guard optional range bounds with
//!   `(?N IS NULL OR column >= ?N)` so an unbounded side genuinely skips
//!   filtering instead of comparing against sentinel dates

pub mod category;
pub mod product;
pub mod purchase_order;
pub mod reports;
pub mod sale;
pub mod store;
pub mod supplier;

use uuid::Uuid;

/// One page of a paginated listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: i64,
}

impl<T> Page<T> {
    /// Assembles a page envelope from a fetched slice and a total count.
    pub fn new(items: Vec<T>, current_page: u32, per_page: u32, total: i64) -> Self {
        let last_page = if total == 0 {
            1
        } else {
            ((total + i64::from(per_page) - 1) / i64::from(per_page)) as u32
        };
        Page {
            items,
            current_page,
            last_page,
            per_page,
            total,
        }
    }

    /// Maps the page's items, keeping the pagination meta intact. Used by
    /// the API layer to convert records into response DTOs.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            last_page: self.last_page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

/// SQL OFFSET for a 1-based page number.
pub(crate) fn page_offset(page: u32, per_page: u32) -> i64 {
    i64::from(page.saturating_sub(1)) * i64::from(per_page)
}

/// Generates a new entity ID (UUID v4).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_math() {
        let page = Page::new(vec![1, 2, 3], 1, 10, 23);
        assert_eq!(page.last_page, 3);

        let page = Page::new(Vec::<i32>::new(), 1, 10, 0);
        assert_eq!(page.last_page, 1);

        let page = Page::new(vec![1], 2, 10, 20);
        assert_eq!(page.last_page, 2);
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(3, 10), 20);
        // Page 0 is treated as page 1
        assert_eq!(page_offset(0, 10), 0);
    }
}
