//! Data models for the roster service.
//!
//! Field names on the wire follow the snake_case JSON contract of the public API.

mod member;
mod page;
mod project;

pub use member::*;
pub use page::*;
pub use project::*;
