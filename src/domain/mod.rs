pub mod auth;
pub mod shared;
pub mod tts_job;
pub mod user;
