pub mod promotions;
pub mod subscriptions;
pub mod users;

use serde::{Deserialize, Serialize};

use crate::error::{RestError, RestResult};

const MAX_PAGE_SIZE: i64 = 1000;

/// Pagination query parameters shared by the list endpoints.
#[derive(Debug, Deserialize)]
pub struct Page {
    #[serde(default = "Page::default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

impl Page {
    fn default_limit() -> i64 {
        100
    }

    pub fn validate(&self) -> RestResult<()> {
        if self.limit < 1 || self.limit > MAX_PAGE_SIZE {
            return Err(RestError::ParseError(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        if self.offset < 0 {
            return Err(RestError::ParseError("offset must not be negative".into()));
        }
        Ok(())
    }
}

/// List response envelope: a page of items plus the total matching count.
#[derive(Debug, Serialize)]
pub struct ListBody<T> {
    pub items: Vec<T>,
    pub total: i64,
}
