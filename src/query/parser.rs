//! Turns raw query-string parameters into a validated [`MemberQuery`].
//!
//! Every clause parses to `Ok(None)` when absent, `Ok(Some(_))` when valid
//! and `Err(QueryError)` when malformed.

use std::collections::BTreeSet;

use thiserror::Error;

use super::filter::{Filter, SkillRequirement};

pub const PARAM_ON_HOLIDAYS_NOW: &str = "on_holidays_now";
pub const PARAM_WORKING_NOW: &str = "working_now";
pub const PARAM_PROJECT: &str = "project";
pub const PARAM_SKILL: &str = "skill";
pub const PARAM_PAGE: &str = "page";

/// Page requested when the `page` parameter is absent.
pub const DEFAULT_PAGE: i64 = 1;

/// Rejected query input. Messages describe the accepted shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("parameter `{name}` must be `true` or `false`, got `{value}`")]
    InvalidFlag { name: &'static str, value: String },

    #[error(
        "parameter `project` must be a single id (`project=3`) or a list of ids (`project=[1,2,3]`), got `{0}`"
    )]
    InvalidProject(String),

    #[error(
        "skills must be given either as `skill=a&skill=b&skill=c` (member has all of them) or as `skill=[a,b,c]` (member has any of them)"
    )]
    InvalidSkills,

    #[error("parameter `page` must be an integer, got `{0}`")]
    InvalidPage(String),

    #[error("parameter `{0}` may be given only once")]
    Repeated(&'static str),
}

/// A validated listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberQuery {
    pub filter: Filter,
    pub page: i64,
}

/// Parse raw `(name, value)` pairs, in request order, into a query.
///
/// Unknown parameters are ignored.
pub fn parse_member_query(params: &[(String, String)]) -> Result<MemberQuery, QueryError> {
    let filter = Filter {
        on_holidays_now: parse_flag(params, PARAM_ON_HOLIDAYS_NOW)?,
        working_now: parse_flag(params, PARAM_WORKING_NOW)?,
        project_ids: parse_projects(params)?,
        skills: parse_skills(params)?,
    };
    let page = parse_page(params)?.unwrap_or(DEFAULT_PAGE);

    Ok(MemberQuery { filter, page })
}

fn values<'a>(params: &'a [(String, String)], name: &str) -> Vec<&'a str> {
    params
        .iter()
        .filter(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .collect()
}

fn single<'a>(
    params: &'a [(String, String)],
    name: &'static str,
) -> Result<Option<&'a str>, QueryError> {
    match values(params, name).as_slice() {
        [] => Ok(None),
        [value] => Ok(Some(*value)),
        _ => Err(QueryError::Repeated(name)),
    }
}

fn parse_flag(params: &[(String, String)], name: &'static str) -> Result<Option<bool>, QueryError> {
    let Some(raw) = single(params, name)? else {
        return Ok(None);
    };
    let value = raw.trim();
    if value.eq_ignore_ascii_case("true") {
        Ok(Some(true))
    } else if value.eq_ignore_ascii_case("false") {
        Ok(Some(false))
    } else {
        Err(QueryError::InvalidFlag {
            name,
            value: raw.to_string(),
        })
    }
}

fn parse_page(params: &[(String, String)]) -> Result<Option<i64>, QueryError> {
    single(params, PARAM_PAGE)?
        .map(|raw| {
            raw.trim()
                .parse::<i64>()
                .map_err(|_| QueryError::InvalidPage(raw.to_string()))
        })
        .transpose()
}

fn parse_projects(params: &[(String, String)]) -> Result<Option<BTreeSet<u32>>, QueryError> {
    let Some(raw) = single(params, PARAM_PROJECT)? else {
        return Ok(None);
    };
    let invalid = || QueryError::InvalidProject(raw.to_string());
    let value = raw.trim();

    if let Ok(id) = value.parse::<u32>() {
        return Ok(Some(BTreeSet::from([id])));
    }

    let items = bracketed(value).ok_or_else(invalid)?;
    let ids = items
        .iter()
        .map(|item| item.parse::<u32>().map_err(|_| invalid()))
        .collect::<Result<BTreeSet<_>, _>>()?;
    Ok(Some(ids))
}

fn parse_skills(params: &[(String, String)]) -> Result<Option<SkillRequirement>, QueryError> {
    let raw = values(params, PARAM_SKILL);
    let trimmed: Vec<&str> = raw.iter().map(|v| v.trim()).collect();

    match trimmed.as_slice() {
        [] => Ok(None),
        [only] if only.starts_with('[') => {
            let items = bracketed(only).ok_or(QueryError::InvalidSkills)?;
            if !items.iter().all(|s| is_bare_word(s)) {
                return Err(QueryError::InvalidSkills);
            }
            Ok(Some(SkillRequirement::any(items)))
        }
        all if all.iter().all(|s| is_bare_word(s)) => Ok(Some(SkillRequirement::all(
            all.iter().copied(),
        ))),
        _ => Err(QueryError::InvalidSkills),
    }
}

/// Split a non-empty `[a, b, c]` literal into trimmed items.
fn bracketed(value: &str) -> Option<Vec<&str>> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;
    let items: Vec<&str> = inner.split(',').map(str::trim).collect();
    if items.iter().any(|item| item.is_empty()) {
        return None;
    }
    Some(items)
}

fn is_bare_word(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_alphanumeric() || c == '_')
}
