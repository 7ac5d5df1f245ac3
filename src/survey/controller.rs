//! Event dispatch: validate locally, call the backend, install the
//! returned snapshot, project the fresh view.

use crate::api::client::{ApiError, Backend};
use crate::session::Session;
use crate::view::{project_ranking, project_triplet, RankingView, TripletView};
use thiserror::Error;
use tracing::{info, instrument};

use super::events::UiEvent;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Local validation failure. The request is never sent; the frontend
    /// surfaces this as a prompt.
    #[error("input is empty")]
    EmptyInput,
    #[error("no active session; run `start` first")]
    NotInitialized,
    #[error("session already started as {0}")]
    AlreadyStarted(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Triplet(TripletView),
    Ranking(RankingView),
    /// Nothing was sent; the reason says why.
    Noop(&'static str),
}

pub struct SurveyController {
    backend: Box<dyn Backend>,
    session: Session,
}

impl SurveyController {
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Self {
            backend,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Project the current snapshot. Total: with no snapshot yet this is
    /// the empty view.
    pub fn render(&self) -> TripletView {
        self.session
            .state()
            .map(|state| project_triplet(state, &self.session))
            .unwrap_or_default()
    }

    #[instrument(skip_all, fields(event = event.name()))]
    pub async fn dispatch(&mut self, event: UiEvent) -> Result<Outcome, ClientError> {
        match event {
            UiEvent::Start {
                student_id,
                api_key,
            } => self.start(student_id, api_key).await,
            UiEvent::SubmitComment { uni_id, text } => self.send_comment(&uni_id, &text).await,
            UiEvent::SubmitAnswer {
                uni_id,
                slot,
                value,
            } => self.answer(&uni_id, &slot, &value).await,
            UiEvent::PreferOverFirst { uni_id } => self.prefer_over_first(&uni_id).await,
            UiEvent::Refresh => self.refresh().await,
            UiEvent::ShowRanking => self.ranking().await,
        }
    }

    async fn start(
        &mut self,
        student_id: Option<String>,
        api_key: Option<String>,
    ) -> Result<Outcome, ClientError> {
        if let Some(existing) = self.session.student_id() {
            return Err(ClientError::AlreadyStarted(existing.to_string()));
        }

        let ticket = self.session.begin_request();
        let response = self
            .backend
            .init(student_id.as_deref(), api_key.as_deref())
            .await?;

        info!(student_id = %response.student_id, "session initialized");
        self.session.activate(response.student_id, api_key);
        self.session.apply_state(ticket, response.state);
        Ok(Outcome::Triplet(self.render()))
    }

    async fn send_comment(&mut self, uni_id: &str, text: &str) -> Result<Outcome, ClientError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ClientError::EmptyInput);
        }
        let student_id = self.require_student()?;

        // recorded before the call goes out; a failed call keeps the draft
        self.session.record_comment(uni_id, text);

        let ticket = self.session.begin_request();
        let response = self.backend.comment(&student_id, uni_id, text).await?;
        if self.session.apply_state(ticket, response.state) {
            // comment flow replaces the pending list with the returned set
            self.session.replace_questions(uni_id, response.questions);
        }
        Ok(Outcome::Triplet(self.render()))
    }

    async fn answer(
        &mut self,
        uni_id: &str,
        slot: &str,
        value: &str,
    ) -> Result<Outcome, ClientError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ClientError::EmptyInput);
        }
        let student_id = self.require_student()?;

        self.session.record_answer(slot, value);

        let ticket = self.session.begin_request();
        let response = self.backend.answer(&student_id, uni_id, slot, value).await?;
        if self.session.apply_state(ticket, response.state) {
            // answer flow accumulates: new questions join unanswered ones
            self.session.append_questions(uni_id, response.questions);
        }
        Ok(Outcome::Triplet(self.render()))
    }

    /// Compare the given university against triplet position 0 (or, when
    /// it is position 0 itself, against position 1).
    async fn prefer_over_first(&mut self, uni_id: &str) -> Result<Outcome, ClientError> {
        let student_id = self.require_student()?;

        let triplet = self
            .session
            .state()
            .map(|s| s.triplet.clone())
            .unwrap_or_default();
        if triplet.len() < 2 {
            return Ok(Outcome::Noop("need at least two universities to compare"));
        }
        let other = if uni_id != triplet[0] {
            triplet[0].clone()
        } else {
            triplet[1].clone()
        };

        info!(better = uni_id, worse = %other, "pairwise preference");
        let ticket = self.session.begin_request();
        let response = self.backend.pairwise(&student_id, uni_id, &other).await?;
        self.session.apply_state(ticket, response.state);
        Ok(Outcome::Triplet(self.render()))
    }

    async fn refresh(&mut self) -> Result<Outcome, ClientError> {
        let student_id = self.require_student()?;
        let ticket = self.session.begin_request();
        let response = self.backend.state(&student_id).await?;
        self.session.apply_state(ticket, response.state);
        Ok(Outcome::Triplet(self.render()))
    }

    /// Ranking display is additive: it never touches the session snapshot
    /// or the triplet view.
    async fn ranking(&mut self) -> Result<Outcome, ClientError> {
        let student_id = self.require_student()?;
        let response = self.backend.ranking(&student_id).await?;
        Ok(Outcome::Ranking(project_ranking(&response)))
    }

    fn require_student(&self) -> Result<String, ClientError> {
        self.session
            .student_id()
            .map(str::to_string)
            .ok_or(ClientError::NotInitialized)
    }
}
