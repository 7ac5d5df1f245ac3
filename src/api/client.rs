//! HTTP client for the survey backend.
//!
//! One method per endpoint, JSON in and out. Any non-success status is
//! surfaced as an error carrying the raw response body text; there is no
//! retry and no recovery beyond leaving the session untouched.

use crate::api::types::{
    AnswerPayload, CommentPayload, InitPayload, InitResponse, InteractionResponse,
    PairwisePayload, RankingResponse, StateResponse,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

const USER_AGENT: &str = concat!("univia-client/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    // body is the raw server text, passed through unformatted
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response payload: {0}")]
    Decode(String),
    #[error("configuration error: {0}")]
    Config(String),
}

/// Seam between the controller and the wire. `ApiClient` is the real
/// implementation; tests substitute a scripted fake.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn init(
        &self,
        student_id: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<InitResponse, ApiError>;

    async fn comment(
        &self,
        student_id: &str,
        uni_id: &str,
        text: &str,
    ) -> Result<InteractionResponse, ApiError>;

    async fn answer(
        &self,
        student_id: &str,
        uni_id: &str,
        slot: &str,
        value: &str,
    ) -> Result<InteractionResponse, ApiError>;

    async fn pairwise(
        &self,
        student_id: &str,
        better_id: &str,
        worse_id: &str,
    ) -> Result<StateResponse, ApiError>;

    async fn state(&self, student_id: &str) -> Result<StateResponse, ApiError>;

    async fn ranking(&self, student_id: &str) -> Result<RankingResponse, ApiError>;
}

pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    pub fn new(config: &crate::config::Config) -> Result<Self, ApiError> {
        Self::with_base(
            &config.api_base,
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    /// Build a client against an explicit base URL. Trailing slashes are
    /// stripped so path concatenation stays predictable.
    pub fn with_base(base: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let request_id = Uuid::new_v4();
        debug!(%request_id, path, "POST");
        let response = self
            .http
            .post(format!("{}{}", self.base, path))
            .json(body)
            .send()
            .await
            .map_err(map_transport)?;
        Self::decode(request_id, response).await
    }

    async fn get<T>(&self, path: &str, student_id: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let request_id = Uuid::new_v4();
        debug!(%request_id, path, student_id, "GET");
        let response = self
            .http
            .get(format!("{}{}", self.base, path))
            .query(&[("student_id", student_id)])
            .send()
            .await
            .map_err(map_transport)?;
        Self::decode(request_id, response).await
    }

    async fn decode<T: DeserializeOwned>(
        request_id: Uuid,
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            // the raw body text is the whole error contract
            let body = response.text().await.unwrap_or_default();
            warn!(%request_id, status = status.as_u16(), "backend rejected request");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn map_transport(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Transport(e.to_string())
    }
}

#[async_trait::async_trait]
impl Backend for ApiClient {
    #[instrument(skip(self, api_key))]
    async fn init(
        &self,
        student_id: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<InitResponse, ApiError> {
        self.post(
            "/api/init",
            &InitPayload {
                student_id,
                openai_api_key: api_key,
            },
        )
        .await
    }

    #[instrument(skip(self, text))]
    async fn comment(
        &self,
        student_id: &str,
        uni_id: &str,
        text: &str,
    ) -> Result<InteractionResponse, ApiError> {
        self.post(
            "/api/comment",
            &CommentPayload {
                student_id,
                uni_id,
                text,
            },
        )
        .await
    }

    #[instrument(skip(self, value))]
    async fn answer(
        &self,
        student_id: &str,
        uni_id: &str,
        slot: &str,
        value: &str,
    ) -> Result<InteractionResponse, ApiError> {
        self.post(
            "/api/answer",
            &AnswerPayload {
                student_id,
                uni_id,
                slot,
                value,
            },
        )
        .await
    }

    #[instrument(skip(self))]
    async fn pairwise(
        &self,
        student_id: &str,
        better_id: &str,
        worse_id: &str,
    ) -> Result<StateResponse, ApiError> {
        self.post(
            "/api/pairwise",
            &PairwisePayload {
                student_id,
                better_id,
                worse_id,
            },
        )
        .await
    }

    #[instrument(skip(self))]
    async fn state(&self, student_id: &str) -> Result<StateResponse, ApiError> {
        self.get("/api/state", student_id).await
    }

    #[instrument(skip(self))]
    async fn ranking(&self, student_id: &str) -> Result<RankingResponse, ApiError> {
        self.get("/api/ranking", student_id).await
    }
}
