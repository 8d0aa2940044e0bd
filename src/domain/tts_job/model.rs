use super::patch::Patch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TtsJob {
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

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "lowercase")]
pub enum TtsJobStatus {
    #[serde(rename = "queued")]
    Queued,
    #[serde(rename = "processing")]
    Processing,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "failed")]
    Failed,
}

impl std::fmt::Display for TtsJobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TtsJobStatus::Queued => write!(f, "queued"),
            TtsJobStatus::Processing => write!(f, "processing"),
            TtsJobStatus::Completed => write!(f, "completed"),
            TtsJobStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Row to insert; `created_at` is assigned by the store
#[derive(Debug, Clone)]
pub struct NewTtsJob {
    pub id: Uuid,
    pub user_id: Uuid,
    pub input_text: String,
    pub language: Option<String>,
    pub voice_name: Option<String>,
    pub speaking_rate: Option<f64>,
    pub pitch: Option<f64>,
    pub audio_format: Option<String>,
    pub character_count: i32,
    pub status: TtsJobStatus,
}

/// Row predicate. Unset fields don't constrain the match.
#[derive(Debug, Clone, Default)]
pub struct TtsJobFilter {
    pub id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

impl TtsJobFilter {
    pub fn owned_by(user_id: Uuid) -> Self {
        Self {
            id: None,
            user_id: Some(user_id),
        }
    }

    pub fn job_of(id: Uuid, user_id: Uuid) -> Self {
        Self {
            id: Some(id),
            user_id: Some(user_id),
        }
    }
}

/// Change set for a partial update. `status` and `character_count` are
/// non-nullable columns so they only have "keep" and "set".
#[derive(Debug, Clone, Default)]
pub struct TtsJobChanges {
    pub status: Option<TtsJobStatus>,
    pub audio_url: Patch<String>,
    pub duration_seconds: Patch<f64>,
    pub character_count: Option<i32>,
    pub language: Patch<String>,
    pub voice_name: Patch<String>,
    pub speaking_rate: Patch<f64>,
    pub pitch: Patch<f64>,
    pub audio_format: Patch<String>,
    pub error_message: Patch<String>,
    pub completed_at: Patch<DateTime<Utc>>,
}

impl TtsJobChanges {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.audio_url.is_unset()
            && self.duration_seconds.is_unset()
            && self.character_count.is_none()
            && self.language.is_unset()
            && self.voice_name.is_unset()
            && self.speaking_rate.is_unset()
            && self.pitch.is_unset()
            && self.audio_format.is_unset()
            && self.error_message.is_unset()
            && self.completed_at.is_unset()
    }
}
