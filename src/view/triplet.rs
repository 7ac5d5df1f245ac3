//! Triplet view: one card per university in the current comparison.

use crate::api::types::{Question, ServerState};
use crate::session::Session;
use std::fmt;

const OK_THRESHOLD: f64 = 0.8;
const WARN_THRESHOLD: f64 = 0.6;

/// Visual tier derived from the hybrid score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Ok,
    Warn,
    Bad,
}

impl Tier {
    pub fn classify(hybrid: f64) -> Self {
        if hybrid >= OK_THRESHOLD {
            Tier::Ok
        } else if hybrid >= WARN_THRESHOLD {
            Tier::Warn
        } else {
            Tier::Bad
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Ok => "ok",
            Tier::Warn => "warn",
            Tier::Bad => "bad",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UniCard {
    pub uni_id: String,
    pub hybrid: f64,
    /// Absent when the snapshot has no score entry for this id.
    pub soft_fit: Option<f64>,
    pub pref: Option<f64>,
    pub tier: Tier,
    pub confident: bool,
    pub comment_draft: Option<String>,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripletView {
    pub cards: Vec<UniCard>,
    pub should_stop: bool,
}

/// Project a snapshot into cards, in triplet order. Total over any input:
/// a university without a score entry gets placeholder fit/preference and
/// a hybrid of 0.0 (tier "bad").
pub fn project_triplet(state: &ServerState, session: &Session) -> TripletView {
    let cards = state
        .triplet
        .iter()
        .map(|uni_id| {
            let scores = state.scores.get(uni_id);
            let hybrid = scores.map_or(0.0, |s| s.hybrid);
            UniCard {
                uni_id: uni_id.clone(),
                hybrid,
                soft_fit: scores.map(|s| s.soft_fit),
                pref: scores.map(|s| s.pref),
                tier: Tier::classify(hybrid),
                confident: state.confident_unis.iter().any(|u| u == uni_id),
                comment_draft: session.comment_for(uni_id).map(str::to_string),
                questions: session.questions_for(uni_id).to_vec(),
            }
        })
        .collect();

    TripletView {
        cards,
        should_stop: state.should_stop,
    }
}

impl fmt::Display for UniCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let badge = if self.confident { " · confident" } else { "" };
        writeln!(f, "── {} [{}]{}", self.uni_id, self.tier, badge)?;

        let soft_fit = self
            .soft_fit
            .map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
        let pref = self
            .pref
            .map_or_else(|| "-".to_string(), |v| format!("{v:.1}"));
        writeln!(
            f,
            "   hybrid {:.2} · soft fit {} · pref {}",
            self.hybrid, soft_fit, pref
        )?;

        match &self.comment_draft {
            Some(text) => writeln!(f, "   comment: \"{text}\"")?,
            None => writeln!(f, "   comment: (none)")?,
        }

        if self.questions.is_empty() {
            writeln!(f, "   questions: (none pending)")?;
        } else {
            writeln!(f, "   questions:")?;
            for (i, q) in self.questions.iter().enumerate() {
                writeln!(f, "     {}. [{}] {}", i + 1, q.slot, q.text)?;
            }
        }

        writeln!(
            f,
            "   actions: comment {id} <text> · answer {id} <slot> <value> · prefer {id}",
            id = self.uni_id
        )
    }
}

impl fmt::Display for TripletView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cards.is_empty() {
            return writeln!(f, "(no universities in comparison)");
        }
        if self.should_stop {
            writeln!(f, "note: ranking confidence reached, results are stable")?;
        }
        for card in &self.cards {
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
