//! Member API endpoints.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};

use super::{error, parse_id, success, ApiResult};
use crate::errors::AppError;
use crate::models::{Page, TeamMember};
use crate::query::{self, parse_member_query};
use crate::AppState;

/// GET /api/members - List members matching the query, one page at a time.
pub async fn list_members(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Page<TeamMember>> {
    let now = state.clock.now();

    let request = match parse_member_query(&params) {
        Ok(request) => request,
        Err(e) => return error(e.into(), state.roster.revision()),
    };

    let snapshot = state.roster.snapshot_all();
    let page = query::list_members(&snapshot.members, &request.filter, request.page, now);

    tracing::debug!(
        page = page.page,
        returned = page.items.len(),
        revision = snapshot.revision,
        "Listed members"
    );
    success(page, snapshot.revision)
}

/// GET /api/members/:id - Get a single member.
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<TeamMember> {
    let id = match parse_id(&id, "member id") {
        Ok(id) => id,
        Err(e) => return error(e, state.roster.revision()),
    };

    match state.roster.find_member(id) {
        (Some(member), revision_id) => success(member, revision_id),
        (None, revision_id) => error(AppError::MemberNotFound(id), revision_id),
    }
}

/// PUT /api/members/:id/current_project - Reassign a member to another project.
///
/// The body is the bare target project id, e.g. `3`.
pub async fn reassign_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<TeamMember> {
    let member_id = match parse_id(&id, "member id") {
        Ok(id) => id,
        Err(e) => return error(e, state.roster.revision()),
    };
    let project_id = match parse_body_id(&body) {
        Ok(id) => id,
        Err(e) => return error(e, state.roster.revision()),
    };

    match state.roster.reassign_project(member_id, project_id) {
        Ok(done) => {
            tracing::info!(
                member_id,
                project_id,
                revision = done.revision,
                "Reassigned member to project"
            );
            success(done.member, done.revision)
        }
        Err(rejected) => {
            tracing::debug!("Reassignment rejected: {}", rejected.reason);
            error(rejected.reason.into(), rejected.revision)
        }
    }
}

const BODY_ID: &str = "request body (target project id)";

/// Read the target project id from a raw request body.
fn parse_body_id(body: &[u8]) -> Result<u32, AppError> {
    let text = std::str::from_utf8(body).map_err(|_| {
        AppError::Validation(format!(
            "{} must be a non-negative integer id, got non-UTF-8 bytes",
            BODY_ID
        ))
    })?;
    parse_id(text, BODY_ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body_id() {
        assert_eq!(parse_body_id(b" 3\n").unwrap(), 3);

        let err = parse_body_id(&[0xff, 0xfe]).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.message().contains("must be a non-negative integer id"));

        assert!(parse_body_id(b"three").is_err());
    }
}
