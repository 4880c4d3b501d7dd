//! In-memory roster of team members and projects.
//!
//! The project table is fixed at construction. Member records sit behind a
//! single mutex that serializes snapshot reads against project reassignment,
//! so a reader never sees a half-applied write.

mod generator;

pub use generator::*;

use std::collections::BTreeMap;

use parking_lot::Mutex;
use thiserror::Error;

use crate::models::{Project, TeamMember};

/// Why a reassignment was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReassignError {
    #[error("Member {0} not found")]
    MemberNotFound(u32),
    #[error("Project {0} not found")]
    ProjectNotFound(u32),
}

/// A refused reassignment, with the revision observed while checking it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub reason: ReassignError,
    pub revision: i64,
}

/// Member state right after a successful reassignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassignment {
    pub member: TeamMember,
    pub revision: i64,
}

/// Point-in-time copy of every member, with the revision it was taken at.
#[derive(Debug, Clone)]
pub struct RosterSnapshot {
    pub members: Vec<TeamMember>,
    pub revision: i64,
}

struct MemberTable {
    /// Ascending by id.
    members: Vec<TeamMember>,
    revision: i64,
}

impl MemberTable {
    fn position(&self, id: u32) -> Option<usize> {
        self.members.binary_search_by_key(&id, |m| m.id).ok()
    }
}

/// Shared roster. Wrap in an `Arc` to hand to request handlers.
pub struct Roster {
    projects: BTreeMap<u32, Project>,
    table: Mutex<MemberTable>,
}

impl Roster {
    /// Build a roster, ordering members by id.
    pub fn new(projects: Vec<Project>, mut members: Vec<TeamMember>) -> Self {
        members.sort_by_key(|m| m.id);
        let projects = projects.into_iter().map(|p| (p.id, p)).collect();

        Self {
            projects,
            table: Mutex::new(MemberTable {
                members,
                revision: 0,
            }),
        }
    }

    /// Consistent copy of all members in id order.
    pub fn snapshot_all(&self) -> RosterSnapshot {
        let table = self.table.lock();
        RosterSnapshot {
            members: table.members.clone(),
            revision: table.revision,
        }
    }

    pub fn revision(&self) -> i64 {
        self.table.lock().revision
    }

    pub fn member_count(&self) -> usize {
        self.table.lock().members.len()
    }

    pub fn find_project(&self, id: u32) -> Option<&Project> {
        self.projects.get(&id)
    }

    /// All projects, ordered by id.
    pub fn list_projects(&self) -> Vec<Project> {
        self.projects.values().cloned().collect()
    }

    /// Look up one member, returning the revision read alongside it.
    pub fn find_member(&self, id: u32) -> (Option<TeamMember>, i64) {
        let table = self.table.lock();
        let member = table.position(id).map(|idx| table.members[idx].clone());
        (member, table.revision)
    }

    /// Point `member_id` at `project_id`, returning the updated member.
    ///
    /// Both ids are checked while the lock is held, and the member is only
    /// written once both checks pass.
    pub fn reassign_project(
        &self,
        member_id: u32,
        project_id: u32,
    ) -> Result<Reassignment, Rejected> {
        let mut table = self.table.lock();
        let revision = table.revision;
        let reject = |reason| Rejected { reason, revision };

        let idx = table
            .position(member_id)
            .ok_or_else(|| reject(ReassignError::MemberNotFound(member_id)))?;
        let project = self
            .projects
            .get(&project_id)
            .ok_or_else(|| reject(ReassignError::ProjectNotFound(project_id)))?
            .clone();

        table.members[idx].current_project = Some(project);
        table.revision += 1;

        Ok(Reassignment {
            member: table.members[idx].clone(),
            revision: table.revision,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkingHours;
    use chrono::NaiveTime;
    use chrono_tz::Tz;
    use std::sync::Arc;

    fn member(id: u32, project: Option<Project>) -> TeamMember {
        TeamMember {
            id,
            skills: vec!["Docker".to_string()],
            first_name: format!("First{id}"),
            last_name: format!("Last{id}"),
            manager: None,
            on_holiday_until: None,
            free_since: None,
            current_project: project,
            working_hours: WorkingHours::new(
                Tz::UTC,
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            ),
        }
    }

    fn sample_roster() -> Roster {
        let projects = vec![Project::new(1, "Alpha"), Project::new(2, "Beta")];
        let members = vec![
            member(3, Some(projects[1].clone())),
            member(1, None),
            member(2, Some(projects[0].clone())),
        ];
        Roster::new(projects, members)
    }

    #[test]
    fn test_snapshot_is_ordered_by_id() {
        let roster = sample_roster();
        let snapshot = roster.snapshot_all();
        let ids: Vec<u32> = snapshot.members.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(snapshot.revision, 0);
    }

    #[test]
    fn test_find_member_and_project() {
        let roster = sample_roster();
        let (member, revision) = roster.find_member(2);
        assert_eq!(member.unwrap().id, 2);
        assert_eq!(revision, 0);
        assert!(roster.find_member(99).0.is_none());
        assert_eq!(roster.find_project(1).unwrap().name, "Alpha");
        assert!(roster.find_project(99).is_none());
        assert_eq!(roster.list_projects().len(), 2);
    }

    #[test]
    fn test_reassign_project() {
        let roster = sample_roster();
        let updated = roster.reassign_project(1, 2).unwrap();
        assert_eq!(updated.member.current_project, Some(Project::new(2, "Beta")));
        assert_eq!(updated.revision, 1);
        assert_eq!(
            roster.find_member(1).0.unwrap().current_project.unwrap().id,
            2
        );
        assert_eq!(roster.revision(), 1);
    }

    #[test]
    fn test_reassign_unknown_member() {
        let roster = sample_roster();
        assert_eq!(
            roster.reassign_project(42, 1),
            Err(Rejected {
                reason: ReassignError::MemberNotFound(42),
                revision: 0,
            })
        );
        assert_eq!(roster.revision(), 0);
    }

    #[test]
    fn test_reassign_unknown_project_leaves_member_unchanged() {
        let roster = sample_roster();
        assert_eq!(
            roster.reassign_project(2, 9).map_err(|r| r.reason),
            Err(ReassignError::ProjectNotFound(9))
        );
        assert_eq!(
            roster.find_member(2).0.unwrap().current_project,
            Some(Project::new(1, "Alpha"))
        );
        assert_eq!(roster.revision(), 0);
    }

    #[test]
    fn test_concurrent_reads_see_only_known_projects() {
        let roster = Arc::new(sample_roster());

        let writers: Vec<_> = (0..4)
            .map(|w| {
                let roster = Arc::clone(&roster);
                std::thread::spawn(move || {
                    for i in 0..500u32 {
                        let member_id = (i + w) % 3 + 1;
                        let project_id = if i % 2 == 0 { 1 } else { 2 };
                        roster.reassign_project(member_id, project_id).unwrap();
                        // Invalid targets never land.
                        let _ = roster.reassign_project(member_id, 77);
                    }
                })
            })
            .collect();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let roster = Arc::clone(&roster);
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        for m in roster.snapshot_all().members {
                            if let Some(project) = m.current_project {
                                assert_eq!(roster.find_project(project.id), Some(&project));
                            }
                        }
                    }
                })
            })
            .collect();

        for handle in writers.into_iter().chain(readers) {
            handle.join().unwrap();
        }
        assert_eq!(roster.revision(), 4 * 500);
    }

    #[test]
    fn test_find_member_revision_matches_member_state() {
        let roster = Arc::new(sample_roster());

        let writer = {
            let roster = Arc::clone(&roster);
            std::thread::spawn(move || {
                for i in 0..2000 {
                    let project_id = if i % 2 == 0 { 1 } else { 2 };
                    roster.reassign_project(1, project_id).unwrap();
                }
            })
        };

        for _ in 0..2000 {
            let (member, revision) = roster.find_member(1);
            let project = member.unwrap().current_project.map(|p| p.id);
            let expected = match revision {
                0 => None,
                r if r % 2 == 1 => Some(1),
                _ => Some(2),
            };
            assert_eq!(project, expected, "revision {revision}");
        }

        writer.join().unwrap();
        assert_eq!(roster.find_member(1).1, 2000);
    }
}
