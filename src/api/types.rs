//! Wire payloads exchanged with the survey backend.
//!
//! The backend is authoritative for everything in here: the client parses
//! these shapes, projects them into views, and never derives or mutates a
//! score locally.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-university score block inside a state snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UniScores {
    pub hybrid: f64,
    pub soft_fit: f64,
    pub pref: f64,
}

/// Authoritative state snapshot owned by the backend.
///
/// `triplet` is the ordered set of university ids currently under
/// comparison (typically three, may be shorter). `confident_unis` and
/// `should_stop` come along with every snapshot and are advisory only.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ServerState {
    pub triplet: Vec<String>,
    #[serde(default)]
    pub scores: HashMap<String, UniScores>,
    #[serde(default)]
    pub confident_unis: Vec<String>,
    #[serde(default)]
    pub should_stop: bool,
}

/// A backend-generated follow-up question. The slot routes the answer back
/// to whatever the backend asked.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Question {
    pub slot: String,
    pub text: String,
}

/// One row of the final ranking table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RankingEntry {
    pub uni_id: String,
    pub score: f64,
}

/* ---------- request bodies ---------- */

#[derive(Serialize, Debug)]
pub struct InitPayload<'a> {
    pub student_id: Option<&'a str>,
    pub openai_api_key: Option<&'a str>,
}

#[derive(Serialize, Debug)]
pub struct CommentPayload<'a> {
    pub student_id: &'a str,
    pub uni_id: &'a str,
    pub text: &'a str,
}

#[derive(Serialize, Debug)]
pub struct AnswerPayload<'a> {
    pub student_id: &'a str,
    pub uni_id: &'a str,
    pub slot: &'a str,
    pub value: &'a str,
}

#[derive(Serialize, Debug)]
pub struct PairwisePayload<'a> {
    pub student_id: &'a str,
    pub better_id: &'a str,
    pub worse_id: &'a str,
}

/* ---------- responses ---------- */

#[derive(Deserialize, Debug, Clone)]
pub struct InitResponse {
    #[serde(default)]
    pub ok: bool,
    pub student_id: String,
    pub state: ServerState,
}

/// Shared shape of `/api/comment` and `/api/answer` responses.
#[derive(Deserialize, Debug, Clone)]
pub struct InteractionResponse {
    #[serde(default)]
    pub ok: bool,
    pub state: ServerState,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StateResponse {
    #[serde(default)]
    pub ok: bool,
    pub state: ServerState,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RankingResponse {
    #[serde(default)]
    pub ok: bool,
    pub ranking: Vec<RankingEntry>,
    pub stop: bool,
}
