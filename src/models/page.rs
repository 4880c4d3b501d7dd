//! Paged listing payload.

use serde::{Deserialize, Serialize};

/// One page of an ordered result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Requested page number, echoed even when the page is empty.
    pub page: i64,
    pub has_previous: bool,
    pub has_next: bool,
}
