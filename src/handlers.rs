// handlers.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::error::ApiError;
use crate::models::{CreatedPoll, Poll, PollDetail, PollOption};

/// Create a poll together with its options in one transaction.
pub async fn create_poll(
    State(pool): State<PgPool>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let (question, options) = validate_create(&body)?;

    let mut tx = pool
        .begin()
        .await
        .map_err(ApiError::storage("Failed to create poll"))?;

    let poll: Poll = sqlx::query_as(
        "INSERT INTO polls (question) VALUES ($1) RETURNING id, question, created_at",
    )
    .bind(&question)
    .fetch_one(&mut *tx)
    .await
    .map_err(ApiError::storage("Failed to create poll"))?;

    let mut saved = Vec::with_capacity(options.len());
    for text in &options {
        let option: PollOption = sqlx::query_as(
            "INSERT INTO options (poll_id, text, votes) VALUES ($1, $2, 0) RETURNING id, text, votes",
        )
        .bind(poll.id)
        .bind(text)
        .fetch_one(&mut *tx)
        .await
        .map_err(ApiError::storage("Failed to create poll"))?;
        saved.push(option);
    }

    tx.commit()
        .await
        .map_err(ApiError::storage("Failed to create poll"))?;

    Ok((StatusCode::CREATED, Json(CreatedPoll { poll, options: saved })))
}

/// Fetch a poll and its options, options in insertion order.
pub async fn get_poll(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Json<PollDetail>, ApiError> {
    let poll: Option<Poll> =
        sqlx::query_as("SELECT id, question, created_at FROM polls WHERE id = $1")
            .bind(id)
            .fetch_optional(&pool)
            .await
            .map_err(ApiError::storage("Failed to fetch poll"))?;

    let poll = poll.ok_or(ApiError::NotFound("Poll"))?;

    let options: Vec<PollOption> =
        sqlx::query_as("SELECT id, text, votes FROM options WHERE poll_id = $1 ORDER BY id")
            .bind(id)
            .fetch_all(&pool)
            .await
            .map_err(ApiError::storage("Failed to fetch poll"))?;

    Ok(Json(PollDetail { poll, options }))
}

/// Record one vote on an option. Increment and read-back happen in a single
/// statement, so concurrent votes cannot lose updates.
pub async fn vote(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Json<PollOption>, ApiError> {
    let updated: Option<PollOption> = sqlx::query_as(
        "UPDATE options SET votes = votes + 1 WHERE id = $1 RETURNING id, text, votes",
    )
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(ApiError::storage("Failed to record vote"))?;

    updated.map(Json).ok_or(ApiError::NotFound("Option"))
}

/// List all polls, most recent first. No option data.
pub async fn list_polls(State(pool): State<PgPool>) -> Result<Json<Vec<Poll>>, ApiError> {
    let polls =
        sqlx::query_as("SELECT id, question, created_at FROM polls ORDER BY created_at DESC")
            .fetch_all(&pool)
            .await
            .map_err(ApiError::storage("Failed to fetch polls"))?;

    Ok(Json(polls))
}

/// Delete a poll and all of its options in one transaction.
pub async fn delete_poll(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let mut tx = pool
        .begin()
        .await
        .map_err(ApiError::storage("Failed to delete poll"))?;

    // Options first, poll_id references polls.id.
    sqlx::query("DELETE FROM options WHERE poll_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(ApiError::storage("Failed to delete poll"))?;

    let deleted = sqlx::query("DELETE FROM polls WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(ApiError::storage("Failed to delete poll"))?;

    if deleted.rows_affected() == 0 {
        // Dropping the transaction rolls back the options delete.
        return Err(ApiError::NotFound("Poll"));
    }

    tx.commit()
        .await
        .map_err(ApiError::storage("Failed to delete poll"))?;

    Ok(Json(json!({ "message": "Poll deleted successfully" })))
}

/// Pull the question and the non-blank option texts out of the raw payload.
/// Working on the raw value keeps shape failures (missing fields, `options`
/// not an array, non-string entries) on the 400 path.
fn validate_create(body: &Value) -> Result<(String, Vec<String>), ApiError> {
    let invalid = || {
        ApiError::InvalidInput(
            "Invalid input. Question and at least 2 options are required.".to_string(),
        )
    };

    let question = body
        .get("question")
        .and_then(Value::as_str)
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(invalid)?;

    let entries = body
        .get("options")
        .and_then(Value::as_array)
        .ok_or_else(invalid)?;

    let mut options = Vec::with_capacity(entries.len());
    for entry in entries {
        let text = entry.as_str().ok_or_else(invalid)?;
        if !text.trim().is_empty() {
            options.push(text.to_string());
        }
    }

    if options.len() < 2 {
        return Err(invalid());
    }

    Ok((question.to_string(), options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(body: Value) -> (String, Vec<String>) {
        validate_create(&body).expect("payload should validate")
    }

    fn rejected(body: Value) -> bool {
        matches!(validate_create(&body), Err(ApiError::InvalidInput(_)))
    }

    #[test]
    fn accepts_question_with_two_options() {
        let (question, options) = ok(json!({
            "question": "Color?",
            "options": ["Red", "Blue"]
        }));
        assert_eq!(question, "Color?");
        assert_eq!(options, vec!["Red", "Blue"]);
    }

    #[test]
    fn drops_blank_options_but_keeps_text_unchanged() {
        let (_, options) = ok(json!({
            "question": "Color?",
            "options": ["  Red ", "", "   ", "Blue"]
        }));
        assert_eq!(options, vec!["  Red ", "Blue"]);
    }

    #[test]
    fn rejects_missing_question() {
        assert!(rejected(json!({ "options": ["Red", "Blue"] })));
    }

    #[test]
    fn rejects_blank_question() {
        assert!(rejected(json!({ "question": "   ", "options": ["Red", "Blue"] })));
    }

    #[test]
    fn rejects_missing_options() {
        assert!(rejected(json!({ "question": "Color?" })));
    }

    #[test]
    fn rejects_options_that_are_not_an_array() {
        assert!(rejected(json!({ "question": "Color?", "options": "Red" })));
    }

    #[test]
    fn rejects_non_string_option_entries() {
        assert!(rejected(json!({ "question": "Color?", "options": ["Red", 2] })));
    }

    #[test]
    fn rejects_fewer_than_two_non_blank_options() {
        // Two raw entries, but only one survives blank filtering.
        assert!(rejected(json!({ "question": "Color?", "options": ["Red", "  "] })));
        assert!(rejected(json!({ "question": "Color?", "options": ["Red"] })));
        assert!(rejected(json!({ "question": "Color?", "options": [] })));
    }
}
