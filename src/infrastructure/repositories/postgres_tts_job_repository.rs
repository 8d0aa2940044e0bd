use super::tts_job_repository::TtsJobRepository;
use crate::domain::tts_job::{NewTtsJob, Patch, TtsJob, TtsJobChanges, TtsJobFilter};
use crate::error::{AppError, AppResult};
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use sqlx::query_builder::Separated;
use sqlx::{Encode, Postgres, QueryBuilder, Type};
use std::sync::Arc;

const TTS_JOB_COLUMNS: &str = "id, user_id, input_text, language, voice_name, speaking_rate, \
     pitch, audio_format, audio_url, duration_seconds, character_count, status, \
     error_message, created_at, completed_at";

/// Postgres implementation of the TTS job store
pub struct PostgresTtsJobRepository {
    pool: Arc<DbPool>,
}

impl PostgresTtsJobRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TtsJobRepository for PostgresTtsJobRepository {
    async fn insert(&self, job: NewTtsJob) -> AppResult<TtsJob> {
        let pool = self.pool.as_ref();
        let now = chrono::Utc::now();

        let query = format!(
            r#"
            INSERT INTO tts_jobs (
                id, user_id, input_text, language, voice_name, speaking_rate,
                pitch, audio_format, character_count, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {TTS_JOB_COLUMNS}
            "#
        );

        let stored = sqlx::query_as::<_, TtsJob>(&query)
            .bind(job.id)
            .bind(job.user_id)
            .bind(job.input_text)
            .bind(job.language)
            .bind(job.voice_name)
            .bind(job.speaking_rate)
            .bind(job.pitch)
            .bind(job.audio_format)
            .bind(job.character_count)
            .bind(job.status)
            .bind(now)
            .fetch_one(pool)
            .await?;

        Ok(stored)
    }

    async fn find_one(&self, filter: &TtsJobFilter) -> AppResult<Option<TtsJob>> {
        let pool = self.pool.as_ref();
        let mut query = QueryBuilder::<Postgres>::new(format!("SELECT {TTS_JOB_COLUMNS} FROM tts_jobs"));
        push_filter(&mut query, filter);
        query.push(" LIMIT 1");

        let job = query.build_query_as::<TtsJob>().fetch_optional(pool).await?;

        Ok(job)
    }

    async fn count(&self, filter: &TtsJobFilter) -> AppResult<i64> {
        let pool = self.pool.as_ref();
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM tts_jobs");
        push_filter(&mut query, filter);

        let (count,) = query.build_query_as::<(i64,)>().fetch_one(pool).await?;

        Ok(count)
    }

    async fn list(&self, filter: &TtsJobFilter, limit: i64, offset: i64) -> AppResult<Vec<TtsJob>> {
        let pool = self.pool.as_ref();
        let mut query = QueryBuilder::<Postgres>::new(format!("SELECT {TTS_JOB_COLUMNS} FROM tts_jobs"));
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let jobs = query.build_query_as::<TtsJob>().fetch_all(pool).await?;

        Ok(jobs)
    }

    async fn update(
        &self,
        filter: &TtsJobFilter,
        changes: &TtsJobChanges,
    ) -> AppResult<Option<TtsJob>> {
        if changes.is_empty() {
            return Err(AppError::BadRequest(
                "No updatable fields provided".to_string(),
            ));
        }

        let pool = self.pool.as_ref();
        let mut query = QueryBuilder::<Postgres>::new("UPDATE tts_jobs SET ");
        {
            let mut set = query.separated(", ");
            if let Some(status) = changes.status {
                set.push("status = ");
                set.push_bind_unseparated(status);
            }
            if let Some(count) = changes.character_count {
                set.push("character_count = ");
                set.push_bind_unseparated(count);
            }
            push_patch(&mut set, "audio_url", &changes.audio_url);
            push_patch(&mut set, "duration_seconds", &changes.duration_seconds);
            push_patch(&mut set, "language", &changes.language);
            push_patch(&mut set, "voice_name", &changes.voice_name);
            push_patch(&mut set, "speaking_rate", &changes.speaking_rate);
            push_patch(&mut set, "pitch", &changes.pitch);
            push_patch(&mut set, "audio_format", &changes.audio_format);
            push_patch(&mut set, "error_message", &changes.error_message);
            push_patch(&mut set, "completed_at", &changes.completed_at);
        }
        push_filter(&mut query, filter);
        query.push(format!(" RETURNING {TTS_JOB_COLUMNS}"));

        let job = query.build_query_as::<TtsJob>().fetch_optional(pool).await?;

        Ok(job)
    }
}

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &TtsJobFilter) {
    query.push(" WHERE TRUE");
    if let Some(id) = filter.id {
        query.push(" AND id = ").push_bind(id);
    }
    if let Some(user_id) = filter.user_id {
        query.push(" AND user_id = ").push_bind(user_id);
    }
}

fn push_patch<'args, T>(
    set: &mut Separated<'_, 'args, Postgres, &'static str>,
    column: &str,
    patch: &Patch<T>,
) where
    T: Clone + Send + 'args + Encode<'args, Postgres> + Type<Postgres>,
{
    match patch {
        Patch::Unset => {}
        Patch::Null => {
            set.push(format!("{column} = NULL"));
        }
        Patch::Value(value) => {
            set.push(format!("{column} = "));
            set.push_bind_unseparated(value.clone());
        }
    }
}
