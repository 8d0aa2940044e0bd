pub mod health;
pub mod tts_job;
