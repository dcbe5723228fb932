//! Request/response models and static fixtures.

pub mod client_profile;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use client_profile::{client_profiles, ClientProfile, RiskAppetite};

/// Body of `POST /ask`. Accepts `question`, or `query` as an alias; when
/// both are sent, `question` wins.
#[derive(Debug, Deserialize, Validate)]
#[serde(try_from = "RawQueryRequest")]
pub struct QueryRequest {
    #[validate(length(min = 1, message = "Question must not be empty"))]
    pub question: String,
}

/// Wire form of [`QueryRequest`] before the two field names are resolved.
#[derive(Debug, Deserialize)]
pub struct RawQueryRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
}

impl TryFrom<RawQueryRequest> for QueryRequest {
    type Error = String;

    fn try_from(raw: RawQueryRequest) -> Result<Self, Self::Error> {
        raw.question
            .or(raw.query)
            .map(|question| QueryRequest { question })
            .ok_or_else(|| "missing field `question`".to_string())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryResponse {
    pub response: String,
}

impl QueryResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}
