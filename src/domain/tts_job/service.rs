use super::dto::{
    CreateTtsJobRequest, Pagination, TtsJobPage, TtsJobResponse, UpdateTtsJobRequest,
};
use super::error::TtsJobServiceError;
use super::model::{NewTtsJob, TtsJob, TtsJobChanges, TtsJobFilter, TtsJobStatus};
use super::patch::Patch;
use crate::infrastructure::repositories::TtsJobRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub struct TtsJobService {
    job_repo: Arc<dyn TtsJobRepository>,
}

impl TtsJobService {
    pub fn new(job_repo: Arc<dyn TtsJobRepository>) -> Self {
        Self { job_repo }
    }
}

/// Job lifecycle operations. Every call takes the authenticated caller's
/// `user_id`; jobs owned by anyone else behave as if they did not exist.
#[async_trait]
pub trait TtsJobServiceApi: Send + Sync {
    /// Record a new queued job for `input_text`. No synthesis is started.
    async fn create_job(
        &self,
        user_id: Uuid,
        request: CreateTtsJobRequest,
    ) -> Result<TtsJobResponse, TtsJobServiceError>;

    /// Apply a partial update. Moving to `completed` without an explicit
    /// `completedAt` stamps the current time.
    async fn update_job(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        request: UpdateTtsJobRequest,
    ) -> Result<TtsJobResponse, TtsJobServiceError>;

    async fn get_job(&self, user_id: Uuid, job_id: Uuid)
        -> Result<TtsJobResponse, TtsJobServiceError>;

    /// The caller's jobs, newest first
    async fn list_jobs(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> Result<TtsJobPage, TtsJobServiceError>;
}

#[async_trait]
impl TtsJobServiceApi for TtsJobService {
    async fn create_job(
        &self,
        user_id: Uuid,
        request: CreateTtsJobRequest,
    ) -> Result<TtsJobResponse, TtsJobServiceError> {
        request.validate()?;

        let character_count = i32::try_from(request.input_text.chars().count())
            .map_err(|_| TtsJobServiceError::Validation("inputText is too long".to_string()))?;

        let new_job = NewTtsJob {
            id: Uuid::new_v4(),
            user_id,
            input_text: request.input_text,
            language: non_blank(request.language),
            voice_name: non_blank(request.voice_name),
            speaking_rate: request.speaking_rate,
            pitch: request.pitch,
            audio_format: non_blank(request.audio_format),
            character_count,
            status: TtsJobStatus::Queued,
        };

        let job = self.job_repo.insert(new_job).await?;

        tracing::info!(
            job_id = %job.id,
            user_id = %user_id,
            character_count = job.character_count,
            "TTS job created"
        );

        Ok(job.into())
    }

    async fn update_job(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        request: UpdateTtsJobRequest,
    ) -> Result<TtsJobResponse, TtsJobServiceError> {
        request.validate()?;

        let filter = TtsJobFilter::job_of(job_id, user_id);
        let changes = build_changes(request, Utc::now());

        if changes.is_empty() {
            // Existence is reported before the empty body so callers can't
            // use the 400/404 difference to probe other users' jobs.
            self.find_job(&filter).await?;
            return Err(TtsJobServiceError::EmptyUpdate);
        }

        let job = self
            .job_repo
            .update(&filter, &changes)
            .await?
            .ok_or(TtsJobServiceError::NotFound)?;

        tracing::info!(
            job_id = %job.id,
            user_id = %user_id,
            status = %job.status,
            "TTS job updated"
        );

        Ok(job.into())
    }

    async fn get_job(
        &self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<TtsJobResponse, TtsJobServiceError> {
        let job = self
            .find_job(&TtsJobFilter::job_of(job_id, user_id))
            .await?;
        Ok(job.into())
    }

    async fn list_jobs(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> Result<TtsJobPage, TtsJobServiceError> {
        let filter = TtsJobFilter::owned_by(user_id);

        let total = self.job_repo.count(&filter).await?;
        let jobs = self
            .job_repo
            .list(&filter, pagination.page_size, pagination.offset())
            .await?;

        Ok(TtsJobPage {
            items: jobs.into_iter().map(TtsJobResponse::from).collect(),
            total,
            page: pagination.page,
            page_size: pagination.page_size,
        })
    }
}

impl TtsJobService {
    async fn find_job(&self, filter: &TtsJobFilter) -> Result<TtsJob, TtsJobServiceError> {
        self.job_repo
            .find_one(filter)
            .await?
            .ok_or(TtsJobServiceError::NotFound)
    }
}

/// Translate an update request into the columns to write
fn build_changes(request: UpdateTtsJobRequest, now: DateTime<Utc>) -> TtsJobChanges {
    // A completed job always carries a completion time
    let completed_at = match request.completed_at {
        Patch::Unset | Patch::Null if request.status == Some(TtsJobStatus::Completed) => {
            Patch::Value(now)
        }
        other => other,
    };

    TtsJobChanges {
        status: request.status,
        audio_url: request.audio_url.non_blank(),
        duration_seconds: request.duration_seconds,
        character_count: request.character_count,
        language: request.language.non_blank(),
        voice_name: request.voice_name.non_blank(),
        speaking_rate: request.speaking_rate,
        pitch: request.pitch,
        audio_format: request.audio_format.non_blank(),
        error_message: request.error_message.non_blank(),
        completed_at,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
