use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub id: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub dislikes: u32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn count(&self, vote: VoteType) -> u32 {
        match vote {
            VoteType::Likes => self.likes,
            VoteType::Dislikes => self.dislikes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Likes,
    Dislikes,
}

impl VoteType {
    pub fn as_str(self) -> &'static str {
        match self {
            VoteType::Likes => "likes",
            VoteType::Dislikes => "dislikes",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteType {
    type Err = UnknownVoteType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "likes" => Ok(VoteType::Likes),
            "dislikes" => Ok(VoteType::Dislikes),
            other => Err(UnknownVoteType(other.to_string())),
        }
    }
}

/// Post id -> vote type already cast from this profile.
pub type VoteRecord = BTreeMap<i64, VoteType>;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerForm {
    pub question: usize,
    pub option: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PasswordForm {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown vote type: {0}")]
pub struct UnknownVoteType(pub String);

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Field `{0}` cannot be empty")]
    EmptyField(&'static str),
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Credenciales incorrectas")]
    InvalidCredentials,
    #[error("Administrator session required")]
    NotAdmin,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PublishError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("Question {0} needs at least two options")]
    TooFewOptions(usize),
    #[error("Question {question} has {correct} correct options, expected exactly one")]
    CorrectCount { question: usize, correct: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Sled(#[from] sled::Error),
}
