//! Synthetic roster generation used to seed the service at startup.

use chrono::{Days, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::Roster;
use crate::models::{ManagerRef, Project, TeamMember, WorkingHours};

/// Random holiday and free-since dates fall within this many days of today.
const DATE_SPREAD_DAYS: i64 = 7;

/// Skills drawn for each non-root member.
const SKILLS_PER_MEMBER: usize = 3;

/// Source of display names.
pub trait NameGenerator {
    fn first_name(&mut self) -> String;
    fn last_name(&mut self) -> String;
    fn project_name(&mut self) -> String;
}

const FIRST_NAMES: &[&str] = &[
    "Olivia", "Liam", "Emma", "Noah", "Ava", "Elijah", "Sophia", "Mateo", "Isabella", "Lucas",
    "Mia", "Levi", "Amelia", "Asher", "Harper", "James", "Evelyn", "Leo", "Priya", "Arjun",
    "Ananya", "Rohan", "Meera", "Vikram", "Yuki", "Kenji", "Ingrid", "Lars", "Chiara", "Tomas",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Thomas", "Taylor", "Moore",
    "Jackson", "Sharma", "Patel", "Iyer", "Reddy", "Tanaka", "Sato", "Novak", "Larsen",
    "Rossi", "Bianchi", "Dubois", "Keller",
];

const PROJECT_ADJECTIVES: &[&str] = &[
    "Silent", "Rapid", "Golden", "Crimson", "Bright", "Hidden", "Lucky", "Quantum", "Solar",
    "Frozen", "Wild", "Electric",
];

const PROJECT_NOUNS: &[&str] = &[
    "Falcon", "Harbor", "Lantern", "Orbit", "Summit", "Canyon", "Beacon", "Meadow", "Anchor",
    "Comet", "Forge", "Atlas",
];

/// [`NameGenerator`] drawing from built-in word lists.
pub struct RandomNames {
    rng: StdRng,
}

impl RandomNames {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    fn pick(&mut self, words: &[&str]) -> String {
        words.choose(&mut self.rng).copied().unwrap_or_default().to_string()
    }
}

impl NameGenerator for RandomNames {
    fn first_name(&mut self) -> String {
        self.pick(FIRST_NAMES)
    }

    fn last_name(&mut self) -> String {
        self.pick(LAST_NAMES)
    }

    fn project_name(&mut self) -> String {
        format!(
            "{} {}",
            self.pick(PROJECT_ADJECTIVES),
            self.pick(PROJECT_NOUNS)
        )
    }
}

/// Shape of the generated roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Total members, root manager and project managers included.
    pub member_count: u32,
    pub project_count: u32,
    pub skills: Vec<String>,
    /// Extra skill every manager carries.
    pub manager_skill: String,
    pub timezones: Vec<Tz>,
    pub min_workday_hours: u32,
    pub max_workday_hours: u32,
    pub min_start_hour: u32,
    pub max_start_hour: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            member_count: 52,
            project_count: 6,
            skills: ["Python", "JS", "Angular", "Java", "Kotlin", "Android", "iOS", "Docker"]
                .into_iter()
                .map(String::from)
                .collect(),
            manager_skill: "Management".to_string(),
            timezones: vec![
                chrono_tz::America::Los_Angeles,
                chrono_tz::Asia::Kolkata,
            ],
            min_workday_hours: 5,
            max_workday_hours: 11,
            min_start_hour: 9,
            max_start_hour: 11,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("member count {members} must be at least one more than the project count {projects}")]
    TooFewMembers { members: u32, projects: u32 },
    #[error("at least one project is required to place {0} regular members")]
    NoProjects(u32),
    #[error("skill vocabulary is empty")]
    NoSkills,
    #[error("timezone list is empty")]
    NoTimezones,
    #[error("{0}: minimum is greater than maximum")]
    InvertedBounds(&'static str),
    #[error("{0} must be below 24 hours")]
    HourOutOfRange(&'static str),
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.member_count < self.project_count.saturating_add(1) {
            return Err(GeneratorError::TooFewMembers {
                members: self.member_count,
                projects: self.project_count,
            });
        }
        let regular = self.member_count - 1 - self.project_count;
        if self.project_count == 0 && regular > 0 {
            return Err(GeneratorError::NoProjects(regular));
        }
        if self.skills.is_empty() {
            return Err(GeneratorError::NoSkills);
        }
        if self.timezones.is_empty() {
            return Err(GeneratorError::NoTimezones);
        }
        if self.min_workday_hours > self.max_workday_hours {
            return Err(GeneratorError::InvertedBounds("working day duration"));
        }
        if self.min_start_hour > self.max_start_hour {
            return Err(GeneratorError::InvertedBounds("working day start"));
        }
        if self.max_workday_hours >= 24 {
            return Err(GeneratorError::HourOutOfRange("working day duration"));
        }
        if self.max_start_hour >= 24 {
            return Err(GeneratorError::HourOutOfRange("working day start"));
        }
        Ok(())
    }
}

/// Builds projects and members with sequential ids.
///
/// Ids: the root manager is 1, project managers follow in project order,
/// then regular members.
pub struct RosterGenerator<'a, R, N> {
    config: &'a GeneratorConfig,
    rng: R,
    names: N,
    today: NaiveDate,
    next_id: u32,
}

impl<'a, R: Rng, N: NameGenerator> RosterGenerator<'a, R, N> {
    /// `today` anchors the random holiday and free-since dates.
    pub fn new(
        config: &'a GeneratorConfig,
        rng: R,
        names: N,
        today: NaiveDate,
    ) -> Result<Self, GeneratorError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            names,
            today,
            next_id: 0,
        })
    }

    pub fn generate(mut self) -> (Vec<Project>, Vec<TeamMember>) {
        let projects: Vec<Project> = (1..=self.config.project_count)
            .map(|id| Project::new(id, self.names.project_name()))
            .collect();

        let root = self.root_manager();
        let root_ref = root.as_manager_ref();

        let managers: Vec<TeamMember> = projects
            .iter()
            .map(|project| self.project_manager(project, &root_ref))
            .collect();

        let regular = self.config.member_count - 1 - self.config.project_count;
        let mut members = Vec::with_capacity(self.config.member_count as usize);
        members.push(root);
        for _ in 0..regular {
            let idx = self.rng.gen_range(0..projects.len());
            let member = self.regular_member(&projects[idx], managers[idx].as_manager_ref());
            members.push(member);
        }
        members.extend(managers);

        tracing::debug!(
            projects = projects.len(),
            members = members.len(),
            "Generated roster"
        );
        (projects, members)
    }

    pub fn into_roster(self) -> Roster {
        let (projects, members) = self.generate();
        Roster::new(projects, members)
    }

    fn next_member_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn root_manager(&mut self) -> TeamMember {
        let start = self.config.min_start_hour;
        let end = start + self.config.max_workday_hours;
        let timezone = self.random_timezone();

        TeamMember {
            id: self.next_member_id(),
            skills: vec![self.config.manager_skill.clone()],
            first_name: self.names.first_name(),
            last_name: self.names.last_name(),
            manager: None,
            on_holiday_until: None,
            free_since: None,
            current_project: None,
            working_hours: WorkingHours::new(timezone, hour(start), hour(end)),
        }
    }

    fn project_manager(&mut self, project: &Project, root: &ManagerRef) -> TeamMember {
        let mut skills = self.random_skills();
        if !skills.contains(&self.config.manager_skill) {
            skills.push(self.config.manager_skill.clone());
        }
        self.member(skills, project, root.clone())
    }

    fn regular_member(&mut self, project: &Project, manager: ManagerRef) -> TeamMember {
        let skills = self.random_skills();
        self.member(skills, project, manager)
    }

    fn member(&mut self, skills: Vec<String>, project: &Project, manager: ManagerRef) -> TeamMember {
        TeamMember {
            id: self.next_member_id(),
            skills,
            first_name: self.names.first_name(),
            last_name: self.names.last_name(),
            manager: Some(manager),
            on_holiday_until: Some(self.random_nearby_date()),
            free_since: Some(self.random_nearby_date()),
            current_project: Some(project.clone()),
            working_hours: self.random_working_hours(),
        }
    }

    fn random_skills(&mut self) -> Vec<String> {
        self.config
            .skills
            .choose_multiple(&mut self.rng, SKILLS_PER_MEMBER)
            .cloned()
            .collect()
    }

    fn random_timezone(&mut self) -> Tz {
        self.config
            .timezones
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Tz::UTC)
    }

    fn random_working_hours(&mut self) -> WorkingHours {
        let duration = self
            .rng
            .gen_range(self.config.min_workday_hours..=self.config.max_workday_hours);
        let start = self
            .rng
            .gen_range(self.config.min_start_hour..=self.config.max_start_hour);
        let timezone = self.random_timezone();
        WorkingHours::new(timezone, hour(start), hour(start + duration))
    }

    /// A day in `[today - 7, today + 7)`.
    fn random_nearby_date(&mut self) -> NaiveDate {
        let offset = self.rng.gen_range(-DATE_SPREAD_DAYS..DATE_SPREAD_DAYS);
        let days = Days::new(offset.unsigned_abs());
        let date = if offset < 0 {
            self.today.checked_sub_days(days)
        } else {
            self.today.checked_add_days(days)
        };
        date.unwrap_or(self.today)
    }
}

/// Time of day for a whole hour, wrapping past midnight.
fn hour(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h % 24, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Generate a roster from `config` with the given seed, or from entropy.
pub fn generate_roster(
    config: &GeneratorConfig,
    seed: Option<u64>,
    today: NaiveDate,
) -> Result<Roster, GeneratorError> {
    let (rng, names_rng) = match seed {
        Some(seed) => (
            StdRng::seed_from_u64(seed),
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        ),
        None => (StdRng::from_entropy(), StdRng::from_entropy()),
    };
    let generator = RosterGenerator::new(config, rng, RandomNames::new(names_rng), today)?;
    Ok(generator.into_roster())
}
