use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        shared::ApiResponse,
        tts_job::{
            CreateTtsJobRequest, ListTtsJobsQuery, TtsJobPage, TtsJobPayload, TtsJobServiceApi,
            UpdateTtsJobRequest,
        },
    },
    error::AppResult,
    infrastructure::auth::AuthUser,
};

pub struct TtsJobController {
    tts_job_service: Arc<dyn TtsJobServiceApi>,
}

impl TtsJobController {
    pub fn new(tts_job_service: Arc<dyn TtsJobServiceApi>) -> Self {
        Self { tts_job_service }
    }

    /// POST /api/tts/jobs - Submit text for conversion
    pub async fn create_job(
        State(controller): State<Arc<TtsJobController>>,
        Extension(auth_user): Extension<AuthUser>,
        Json(request): Json<CreateTtsJobRequest>,
    ) -> AppResult<(StatusCode, Json<ApiResponse<TtsJobPayload>>)> {
        let job = controller
            .tts_job_service
            .create_job(auth_user.user_id, request)
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(ApiResponse::ok(TtsJobPayload { job })),
        ))
    }

    /// PATCH /api/tts/jobs/{id} - Report progress or results for a job
    pub async fn update_job(
        State(controller): State<Arc<TtsJobController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(job_id): Path<Uuid>,
        Json(request): Json<UpdateTtsJobRequest>,
    ) -> AppResult<Json<ApiResponse<TtsJobPayload>>> {
        let job = controller
            .tts_job_service
            .update_job(auth_user.user_id, job_id, request)
            .await?;

        Ok(Json(ApiResponse::ok(TtsJobPayload { job })))
    }

    /// GET /api/tts/jobs/{id} - Fetch one of the caller's jobs
    pub async fn get_job(
        State(controller): State<Arc<TtsJobController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(job_id): Path<Uuid>,
    ) -> AppResult<Json<ApiResponse<TtsJobPayload>>> {
        let job = controller
            .tts_job_service
            .get_job(auth_user.user_id, job_id)
            .await?;

        Ok(Json(ApiResponse::ok(TtsJobPayload { job })))
    }

    /// GET /api/tts/jobs - List the caller's jobs, newest first
    pub async fn list_jobs(
        State(controller): State<Arc<TtsJobController>>,
        Extension(auth_user): Extension<AuthUser>,
        Query(query): Query<ListTtsJobsQuery>,
    ) -> AppResult<Json<ApiResponse<TtsJobPage>>> {
        let pagination = query.pagination()?;

        let page = controller
            .tts_job_service
            .list_jobs(auth_user.user_id, pagination)
            .await?;

        Ok(Json(ApiResponse::ok(page)))
    }
}
