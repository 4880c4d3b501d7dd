//! Project API endpoints.

use axum::extract::{Path, State};

use super::{error, parse_id, success, ApiResult};
use crate::errors::AppError;
use crate::models::Project;
use crate::AppState;

/// GET /api/projects - List all projects.
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Vec<Project>> {
    success(state.roster.list_projects(), state.roster.revision())
}

/// GET /api/projects/:id - Get a single project.
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Project> {
    let revision_id = state.roster.revision();

    let id = match parse_id(&id, "project id") {
        Ok(id) => id,
        Err(e) => return error(e, revision_id),
    };

    match state.roster.find_project(id) {
        Some(project) => success(project.clone(), revision_id),
        None => error(AppError::ProjectNotFound(id), revision_id),
    }
}
