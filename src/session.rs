//! In-memory survey session.
//!
//! The session owns nothing the backend cares about: it mirrors the last
//! authoritative snapshot, plus what the student typed. Snapshots are
//! replaced wholesale, never merged field by field. The comment and answer
//! maps are append/overwrite only; nothing is deleted client side.

use crate::api::types::{Question, ServerState};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Ticket drawn before a state-bearing request goes out. A response may
/// only install its snapshot if no younger ticket has landed first, so an
/// overlapping slow response can never clobber a newer snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTicket(u64);

#[derive(Debug, Default)]
pub struct Session {
    student_id: Option<String>,
    api_key: Option<String>,
    state: Option<ServerState>,
    answers: HashMap<String, String>,
    comments: HashMap<String, String>,
    questions: HashMap<String, Vec<Question>>,
    started_at: Option<DateTime<Utc>>,
    issued: u64,
    applied: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.student_id.is_some()
    }

    pub fn student_id(&self) -> Option<&str> {
        self.student_id.as_deref()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn state(&self) -> Option<&ServerState> {
        self.state.as_ref()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Bind the server-assigned student id. Happens exactly once, at init;
    /// the controller rejects a second start before calling this.
    pub fn activate(&mut self, student_id: String, api_key: Option<String>) {
        debug!(%student_id, "session activated");
        self.student_id = Some(student_id);
        self.api_key = api_key;
        self.started_at = Some(Utc::now());
    }

    pub fn begin_request(&mut self) -> StateTicket {
        self.issued += 1;
        StateTicket(self.issued)
    }

    /// Install a snapshot, unless a younger one already landed. Returns
    /// whether the snapshot was applied.
    pub fn apply_state(&mut self, ticket: StateTicket, state: ServerState) -> bool {
        if ticket.0 <= self.applied {
            warn!(
                ticket = ticket.0,
                applied = self.applied,
                "dropping stale state snapshot"
            );
            return false;
        }
        self.applied = ticket.0;
        self.state = Some(state);
        true
    }

    pub fn record_comment(&mut self, uni_id: &str, text: &str) {
        self.comments.insert(uni_id.to_string(), text.to_string());
    }

    pub fn comment_for(&self, uni_id: &str) -> Option<&str> {
        self.comments.get(uni_id).map(String::as_str)
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// Answers are keyed by slot across the whole session: the last write
    /// for a slot wins, no matter which university prompted it.
    pub fn record_answer(&mut self, slot: &str, value: &str) {
        self.answers.insert(slot.to_string(), value.to_string());
    }

    pub fn answer_for(&self, slot: &str) -> Option<&str> {
        self.answers.get(slot).map(String::as_str)
    }

    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }

    /// Comment flow: the pending list is replaced with the returned set.
    pub fn replace_questions(&mut self, uni_id: &str, questions: Vec<Question>) {
        self.questions.insert(uni_id.to_string(), questions);
    }

    /// Answer flow: returned questions accumulate alongside ones not yet
    /// answered. No dedup, nothing dropped.
    pub fn append_questions(&mut self, uni_id: &str, questions: Vec<Question>) {
        self.questions
            .entry(uni_id.to_string())
            .or_default()
            .extend(questions);
    }

    pub fn questions_for(&self, uni_id: &str) -> &[Question] {
        self.questions.get(uni_id).map(Vec::as_slice).unwrap_or(&[])
    }
}
