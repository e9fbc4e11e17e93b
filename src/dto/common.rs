use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: i64 = 100;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Pagination {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    pub fn offset(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_clamping() {
        let page = Pagination::default();
        assert_eq!((page.offset(), page.limit()), (0, 100));

        let page = Pagination {
            skip: Some(-5),
            limit: Some(10_000),
        };
        assert_eq!((page.offset(), page.limit()), (0, 100));

        let page = Pagination {
            skip: Some(20),
            limit: Some(0),
        };
        assert_eq!((page.offset(), page.limit()), (20, 1));
    }
}
