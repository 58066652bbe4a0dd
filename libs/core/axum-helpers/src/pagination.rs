//! Offset pagination shared by the list endpoints.

use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

/// Page size used when `size` is omitted.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// `from`/`size` window over an ordered result set.
///
/// `from` is a row offset, not a page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Index of the first row to return
    #[serde(default)]
    #[validate(range(min = 0, message = "from must not be negative"))]
    pub from: i64,
    /// Maximum number of rows to return
    #[serde(default = "default_size")]
    #[validate(range(min = 1, message = "size must be positive"))]
    pub size: i64,
}

impl PageParams {
    pub fn new(from: i64, size: i64) -> Self {
        Self { from, size }
    }

    pub fn offset(&self) -> u64 {
        self.from.max(0) as u64
    }

    pub fn limit(&self) -> u64 {
        self.size.max(1) as u64
    }

    /// Apply this window to an already ordered in-memory sequence.
    pub fn apply<T>(&self, rows: impl IntoIterator<Item = T>) -> Vec<T> {
        rows.into_iter()
            .skip(self.offset() as usize)
            .take(self.limit() as usize)
            .collect()
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            from: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}
