use super::error::TtsJobServiceError;
use super::model::{TtsJob, TtsJobStatus};
use super::patch::Patch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Request for POST /api/tts/jobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTtsJobRequest {
    pub input_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaking_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_format: Option<String>,
}

impl CreateTtsJobRequest {
    pub fn new(input_text: impl Into<String>) -> Self {
        Self {
            input_text: input_text.into(),
            language: None,
            voice_name: None,
            speaking_rate: None,
            pitch: None,
            audio_format: None,
        }
    }

    pub fn validate(&self) -> Result<(), TtsJobServiceError> {
        if self.input_text.is_empty() {
            return Err(invalid("inputText cannot be empty"));
        }
        if let Some(rate) = self.speaking_rate {
            check_positive("speakingRate", rate)?;
        }
        if let Some(pitch) = self.pitch {
            check_finite("pitch", pitch)?;
        }
        Ok(())
    }
}

/// Request for PATCH /api/tts/jobs/:id
///
/// Omitted keys leave the column untouched. For nullable columns an explicit
/// `null` clears the stored value; empty strings are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTtsJobRequest {
    #[serde(default)]
    pub status: Option<TtsJobStatus>,
    #[serde(default)]
    pub audio_url: Patch<String>,
    #[serde(default)]
    pub duration_seconds: Patch<f64>,
    #[serde(default)]
    pub character_count: Option<i32>,
    #[serde(default)]
    pub language: Patch<String>,
    #[serde(default)]
    pub voice_name: Patch<String>,
    #[serde(default)]
    pub speaking_rate: Patch<f64>,
    #[serde(default)]
    pub pitch: Patch<f64>,
    #[serde(default)]
    pub audio_format: Patch<String>,
    #[serde(default)]
    pub error_message: Patch<String>,
    #[serde(default)]
    pub completed_at: Patch<DateTime<Utc>>,
}

impl UpdateTtsJobRequest {
    pub fn validate(&self) -> Result<(), TtsJobServiceError> {
        if let Some(url) = self.audio_url.value().filter(|u| !u.trim().is_empty()) {
            url::Url::parse(url).map_err(|_| invalid("audioUrl must be a valid URL"))?;
        }
        if let Some(duration) = self.duration_seconds.value() {
            check_non_negative("durationSeconds", *duration)?;
        }
        if let Some(count) = self.character_count {
            if count < 0 {
                return Err(invalid("characterCount must be non-negative"));
            }
        }
        if let Some(rate) = self.speaking_rate.value() {
            check_positive("speakingRate", *rate)?;
        }
        if let Some(pitch) = self.pitch.value() {
            check_finite("pitch", *pitch)?;
        }
        Ok(())
    }
}

/// Query for GET /api/tts/jobs
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTtsJobsQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Rows to skip. Saturates, so an absurdly large page is simply past the end.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl ListTtsJobsQuery {
    /// Apply defaults and check bounds
    pub fn pagination(&self) -> Result<Pagination, TtsJobServiceError> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 1 {
            return Err(invalid("page must be at least 1"));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(invalid(&format!(
                "pageSize must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        Ok(Pagination { page, page_size })
    }
}

/// A job as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsJobResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub input_text: String,
    pub language: Option<String>,
    pub voice_name: Option<String>,
    pub speaking_rate: Option<f64>,
    pub pitch: Option<f64>,
    pub audio_format: Option<String>,
    pub audio_url: Option<String>,
    pub duration_seconds: Option<f64>,
    pub character_count: i32,
    pub status: TtsJobStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<TtsJob> for TtsJobResponse {
    fn from(job: TtsJob) -> Self {
        Self {
            id: job.id,
            user_id: job.user_id,
            input_text: job.input_text,
            language: job.language,
            voice_name: job.voice_name,
            speaking_rate: job.speaking_rate,
            pitch: job.pitch,
            audio_format: job.audio_format,
            audio_url: job.audio_url,
            duration_seconds: job.duration_seconds,
            character_count: job.character_count,
            status: job.status,
            error_message: job.error_message,
            created_at: job.created_at,
            completed_at: job.completed_at,
        }
    }
}

/// `{ job }` payload shared by create, update and get
#[derive(Debug, Serialize, Deserialize)]
pub struct TtsJobPayload {
    pub job: TtsJobResponse,
}

/// One page of the caller's jobs, newest first
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsJobPage {
    pub items: Vec<TtsJobResponse>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

fn invalid(msg: &str) -> TtsJobServiceError {
    TtsJobServiceError::Validation(msg.to_string())
}

fn check_finite(field: &str, value: f64) -> Result<(), TtsJobServiceError> {
    if !value.is_finite() {
        return Err(invalid(&format!("{} must be a finite number", field)));
    }
    Ok(())
}

fn check_positive(field: &str, value: f64) -> Result<(), TtsJobServiceError> {
    check_finite(field, value)?;
    if value <= 0.0 {
        return Err(invalid(&format!("{} must be greater than 0", field)));
    }
    Ok(())
}

fn check_non_negative(field: &str, value: f64) -> Result<(), TtsJobServiceError> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(invalid(&format!("{} must be non-negative", field)));
    }
    Ok(())
}
