//! Member query engine: filter matching, query-string parsing and pagination.

mod filter;
mod pagination;
mod parser;

pub use filter::*;
pub use pagination::*;
pub use parser::*;

use chrono::{DateTime, Utc};

use crate::models::{Page, TeamMember};

/// Filter an ordered member snapshot and cut out one page of [`PAGE_SIZE`].
///
/// Pure: the caller takes the snapshot and supplies the evaluation instant.
pub fn list_members(
    members: &[TeamMember],
    filter: &Filter,
    page: i64,
    now: DateTime<Utc>,
) -> Page<TeamMember> {
    let matching: Vec<&TeamMember> = members.iter().filter(|m| filter.matches(m, now)).collect();
    let page = paginate(&matching, PAGE_SIZE, page);

    Page {
        items: page.items.into_iter().cloned().collect(),
        page: page.page,
        has_previous: page.has_previous,
        has_next: page.has_next,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Project, WorkingHours};
    use chrono::{NaiveTime, TimeZone};
    use chrono_tz::Tz;

    fn member(id: u32, project: u32) -> TeamMember {
        TeamMember {
            id,
            skills: vec!["Java".to_string()],
            first_name: format!("First{id}"),
            last_name: format!("Last{id}"),
            manager: None,
            on_holiday_until: None,
            free_since: None,
            current_project: Some(Project::new(project, format!("P{project}"))),
            working_hours: WorkingHours::new(
                Tz::UTC,
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            ),
        }
    }

    #[test]
    fn test_list_members_filters_before_paging() {
        let members: Vec<TeamMember> = (1..=30).map(|id| member(id, id % 3)).collect();
        let filter = Filter {
            project_ids: Some([0].into_iter().collect()),
            ..Filter::any()
        };
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        let first = list_members(&members, &filter, 1, now);
        let ids: Vec<u32> = first.items.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 6, 9, 12, 15, 18, 21, 24]);
        assert!(!first.has_previous);
        assert!(first.has_next);

        let second = list_members(&members, &filter, 2, now);
        let ids: Vec<u32> = second.items.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![27, 30]);
        assert!(!second.has_next);
    }
}
