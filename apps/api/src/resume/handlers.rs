use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{CompleteResume, ResumeListItem};
use crate::models::submission::{CompleteSubmission, PartialSubmission};
use crate::resume::{service, validation};
use crate::state::AppState;

#[derive(Serialize)]
pub struct CreateResumeResponse {
    pub resume_id: Uuid,
}

#[derive(Serialize)]
pub struct ResumeListResponse {
    pub resumes: Vec<ResumeListItem>,
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(body): Json<CompleteSubmission>,
) -> Result<(StatusCode, Json<CreateResumeResponse>), AppError> {
    validation::validate_complete(&body)?;
    let resume_id = service::create_resume(&state.db, &body).await?;
    Ok((StatusCode::CREATED, Json(CreateResumeResponse { resume_id })))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<ResumeListResponse>, AppError> {
    let resumes = service::list_resumes(&state.db).await?;
    Ok(Json(ResumeListResponse { resumes }))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<CompleteResume>, AppError> {
    let resume = service::get_resume(&state.db, resume_id).await?;
    Ok(Json(resume))
}

/// PUT /api/v1/resumes/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Json(body): Json<PartialSubmission>,
) -> Result<StatusCode, AppError> {
    validation::validate_partial(&body)?;
    service::update_resume(&state.db, resume_id, &body).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if service::delete_resume(&state.db, resume_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Resume {resume_id} not found")))
    }
}
