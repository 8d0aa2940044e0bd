use serde_json::Value;

/// Every field a job response carries, nullable ones included
pub fn assert_tts_job_shape(job: &Value) {
    assert!(job.get("id").and_then(|v| v.as_str()).is_some(), "Missing id");
    assert!(
        job.get("userId").and_then(|v| v.as_str()).is_some(),
        "Missing userId"
    );
    assert!(
        job.get("inputText").and_then(|v| v.as_str()).is_some(),
        "Missing inputText"
    );
    assert!(
        job.get("characterCount").and_then(|v| v.as_i64()).is_some(),
        "Missing characterCount"
    );
    assert!(
        job.get("status").and_then(|v| v.as_str()).is_some(),
        "Missing status"
    );
    assert!(
        job.get("createdAt").and_then(|v| v.as_str()).is_some(),
        "Missing createdAt"
    );

    for nullable in [
        "language",
        "voiceName",
        "speakingRate",
        "pitch",
        "audioFormat",
        "audioUrl",
        "durationSeconds",
        "errorMessage",
        "completedAt",
    ] {
        assert!(job.get(nullable).is_some(), "Missing {}", nullable);
    }
}

pub fn assert_page_shape(data: &Value, page: i64, page_size: i64, total: i64) {
    assert!(data.get("items").and_then(|v| v.as_array()).is_some());
    assert_eq!(data.get("page").and_then(|v| v.as_i64()), Some(page));
    assert_eq!(
        data.get("pageSize").and_then(|v| v.as_i64()),
        Some(page_size)
    );
    assert_eq!(data.get("total").and_then(|v| v.as_i64()), Some(total));
}
