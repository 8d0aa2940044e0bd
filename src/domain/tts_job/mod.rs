pub mod dto;
pub mod error;
pub mod model;
pub mod patch;
pub mod service;

pub use dto::{
    CreateTtsJobRequest, ListTtsJobsQuery, Pagination, TtsJobPage, TtsJobPayload, TtsJobResponse,
    UpdateTtsJobRequest,
};
pub use error::TtsJobServiceError;
pub use model::{NewTtsJob, TtsJob, TtsJobChanges, TtsJobFilter, TtsJobStatus};
pub use patch::Patch;
pub use service::{TtsJobService, TtsJobServiceApi};
