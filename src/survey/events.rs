//! What happened in the UI, as data. The frontend translates raw input
//! into one of these; the controller decides what each one means.

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Start {
        student_id: Option<String>,
        api_key: Option<String>,
    },
    SubmitComment {
        uni_id: String,
        text: String,
    },
    SubmitAnswer {
        uni_id: String,
        slot: String,
        value: String,
    },
    PreferOverFirst {
        uni_id: String,
    },
    Refresh,
    ShowRanking,
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::Start { .. } => "start",
            UiEvent::SubmitComment { .. } => "submit_comment",
            UiEvent::SubmitAnswer { .. } => "submit_answer",
            UiEvent::PreferOverFirst { .. } => "prefer_over_first",
            UiEvent::Refresh => "refresh",
            UiEvent::ShowRanking => "show_ranking",
        }
    }
}
