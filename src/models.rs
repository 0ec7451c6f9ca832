// models.rs
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Poll {
    pub id: i32,
    pub question: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct PollOption {
    pub id: i32,
    pub text: String,
    pub votes: i32,
}

/// Body of a successful POST /polls: the poll fields at the top level
/// with the created options alongside.
#[derive(Debug, Serialize)]
pub struct CreatedPoll {
    #[serde(flatten)]
    pub poll: Poll,
    pub options: Vec<PollOption>,
}

/// Body of GET /polls/{id}.
#[derive(Debug, Serialize)]
pub struct PollDetail {
    pub poll: Poll,
    pub options: Vec<PollOption>,
}
