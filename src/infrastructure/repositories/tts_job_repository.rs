use crate::domain::tts_job::{NewTtsJob, TtsJob, TtsJobChanges, TtsJobFilter};
use crate::error::AppResult;
use async_trait::async_trait;

/// Persistence for TTS job rows.
///
/// Every read and write takes a [`TtsJobFilter`]; callers scope it to the
/// owning user so a job is never reachable through another account.
#[async_trait]
pub trait TtsJobRepository: Send + Sync {
    /// Insert a job and return the stored row
    async fn insert(&self, job: NewTtsJob) -> AppResult<TtsJob>;

    /// First row matching the filter, if any
    async fn find_one(&self, filter: &TtsJobFilter) -> AppResult<Option<TtsJob>>;

    /// Number of rows matching the filter
    async fn count(&self, filter: &TtsJobFilter) -> AppResult<i64>;

    /// Matching rows, newest first
    async fn list(&self, filter: &TtsJobFilter, limit: i64, offset: i64) -> AppResult<Vec<TtsJob>>;

    /// Apply a change set to the matching row in a single statement and
    /// return the updated row. `None` when nothing matched.
    ///
    /// `changes` must not be empty.
    async fn update(
        &self,
        filter: &TtsJobFilter,
        changes: &TtsJobChanges,
    ) -> AppResult<Option<TtsJob>>;
}
