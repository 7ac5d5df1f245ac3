//! Typed HTTP surface of the survey backend.

pub mod client;
pub mod types;

pub use client::{ApiClient, ApiError, Backend};
pub use types::{
    InitResponse, InteractionResponse, Question, RankingEntry, RankingResponse, ServerState,
    StateResponse, UniScores,
};
