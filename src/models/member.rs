//! Team member model.

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::Project;

/// A team member in the roster.
///
/// Everything except `current_project` is fixed once the roster is generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: u32,
    pub skills: Vec<String>,
    pub first_name: String,
    pub last_name: String,
    /// Snapshot of the manager's identity taken at generation time.
    /// `None` only for the root manager.
    #[serde(rename = "manager_id")]
    pub manager: Option<ManagerRef>,
    /// Last day of holidays, inclusive, in the member's own timezone.
    #[serde(rename = "on_holidays_till")]
    pub on_holiday_until: Option<NaiveDate>,
    pub free_since: Option<NaiveDate>,
    pub current_project: Option<Project>,
    pub working_hours: WorkingHours,
}

impl TeamMember {
    /// Identity snapshot used as the `manager_id` of subordinates.
    pub fn as_manager_ref(&self) -> ManagerRef {
        ManagerRef {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }
}

/// Denormalized manager identity (not a live link).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerRef {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
}

/// Daily working window in the member's timezone.
///
/// `end` earlier than `start` means the shift runs past midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub timezone: Tz,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl WorkingHours {
    pub fn new(timezone: Tz, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            timezone,
            start,
            end,
        }
    }

    /// Whether the window wraps through midnight.
    pub fn is_overnight(&self) -> bool {
        self.end < self.start
    }
}
