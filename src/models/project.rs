//! Project model.

use serde::{Deserialize, Serialize};

/// A project members can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    #[serde(rename = "project_name")]
    pub name: String,
}

impl Project {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
