pub mod postgres_tts_job_repository;
pub mod tts_job_repository;
pub mod user_repository;

pub use postgres_tts_job_repository::PostgresTtsJobRepository;
pub use tts_job_repository::TtsJobRepository;
pub use user_repository::UserRepository;
