//! Member filter and its matching rules.
//!
//! A [`Filter`] is a conjunction of independent clauses. Clauses left as
//! `None` always pass. Time-based clauses are evaluated against an instant
//! supplied by the caller, converted into each member's own timezone.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{TeamMember, WorkingHours};

/// How the skills of a [`SkillRequirement`] combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Member must have every listed skill.
    And,
    /// Member must have at least one listed skill.
    Or,
}

/// Required skills plus the way they combine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRequirement {
    pub skills: BTreeSet<String>,
    pub combinator: Combinator,
}

impl SkillRequirement {
    pub fn all<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skills: skills.into_iter().map(Into::into).collect(),
            combinator: Combinator::And,
        }
    }

    pub fn any<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skills: skills.into_iter().map(Into::into).collect(),
            combinator: Combinator::Or,
        }
    }

    fn is_satisfied_by(&self, member: &TeamMember) -> bool {
        // An empty requirement is trivially satisfied in both modes.
        if self.skills.is_empty() {
            return true;
        }
        match self.combinator {
            Combinator::And => self.skills.iter().all(|s| member.has_skill(s)),
            Combinator::Or => self.skills.iter().any(|s| member.has_skill(s)),
        }
    }
}

/// Conjunction of optional member clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub on_holidays_now: Option<bool>,
    pub working_now: Option<bool>,
    pub project_ids: Option<BTreeSet<u32>>,
    pub skills: Option<SkillRequirement>,
}

impl Filter {
    /// A filter with no clauses; matches every member.
    #[cfg(test)]
    pub fn any() -> Self {
        Self::default()
    }

    /// Check whether `member` satisfies every present clause at instant `now`.
    pub fn matches(&self, member: &TeamMember, now: DateTime<Utc>) -> bool {
        self.matches_project(member)
            && self.matches_skills(member)
            && self.matches_on_holidays(member, now)
            && self.matches_working(member, now)
    }

    fn matches_project(&self, member: &TeamMember) -> bool {
        match &self.project_ids {
            None => true,
            Some(ids) => member
                .current_project
                .as_ref()
                .is_some_and(|p| ids.contains(&p.id)),
        }
    }

    fn matches_skills(&self, member: &TeamMember) -> bool {
        self.skills
            .as_ref()
            .map_or(true, |req| req.is_satisfied_by(member))
    }

    fn matches_working(&self, member: &TeamMember, now: DateTime<Utc>) -> bool {
        self.working_now
            .map_or(true, |wanted| is_working_at(&member.working_hours, now) == wanted)
    }

    fn matches_on_holidays(&self, member: &TeamMember, now: DateTime<Utc>) -> bool {
        self.on_holidays_now
            .map_or(true, |wanted| is_on_holiday_at(member, now) == wanted)
    }
}

/// Whether the member is on duty at `now`, judged in their own timezone.
///
/// The window is half-open, `[start, end)`, and wraps through midnight for
/// overnight shifts. `start == end` is an empty window.
pub fn is_working_at(hours: &WorkingHours, now: DateTime<Utc>) -> bool {
    let local = now.with_timezone(&hours.timezone).time();
    if hours.is_overnight() {
        local >= hours.start || local < hours.end
    } else {
        hours.start <= local && local < hours.end
    }
}

/// Whether `now` falls on or before the member's last holiday day, in their timezone.
///
/// Members without a holiday end date are never on holiday.
pub fn is_on_holiday_at(member: &TeamMember, now: DateTime<Utc>) -> bool {
    let Some(last_day) = member.on_holiday_until else {
        return false;
    };
    local_date(member, now) <= last_day
}

fn local_date(member: &TeamMember, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&member.working_hours.timezone)
        .date_naive()
}
