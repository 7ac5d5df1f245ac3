//! Projection and rendering tests.

use crate::api::types::{RankingEntry, RankingResponse, ServerState, UniScores};
use crate::session::Session;
use crate::view::ranking::{project_ranking, STOP_MARKER};
use crate::view::triplet::{project_triplet, Tier};
use std::collections::HashMap;

fn scores(hybrid: f64) -> UniScores {
    UniScores {
        hybrid,
        soft_fit: 0.5,
        pref: 1000.0,
    }
}

fn state_with(entries: &[(&str, f64)]) -> ServerState {
    ServerState {
        triplet: entries.iter().map(|(id, _)| id.to_string()).collect(),
        scores: entries
            .iter()
            .map(|(id, h)| (id.to_string(), scores(*h)))
            .collect(),
        confident_unis: Vec::new(),
        should_stop: false,
    }
}

#[test]
fn tier_thresholds() {
    assert_eq!(Tier::classify(0.85), Tier::Ok);
    assert_eq!(Tier::classify(0.8), Tier::Ok);
    assert_eq!(Tier::classify(0.79), Tier::Warn);
    assert_eq!(Tier::classify(0.6), Tier::Warn);
    assert_eq!(Tier::classify(0.59), Tier::Bad);
    assert_eq!(Tier::classify(0.0), Tier::Bad);
}

#[test]
fn two_cards_classified_by_hybrid() {
    let state = state_with(&[("a", 0.85), ("b", 0.5)]);
    let view = project_triplet(&state, &Session::new());

    assert_eq!(view.cards.len(), 2);
    assert_eq!(view.cards[0].uni_id, "a");
    assert_eq!(view.cards[0].tier, Tier::Ok);
    assert_eq!(view.cards[1].tier, Tier::Bad);
}

#[test]
fn missing_score_entry_renders_placeholders() {
    let mut state = state_with(&[("a", 0.9)]);
    state.triplet.push("unknown".to_string());

    let view = project_triplet(&state, &Session::new());
    let card = &view.cards[1];
    assert_eq!(card.hybrid, 0.0);
    assert_eq!(card.tier, Tier::Bad);
    assert_eq!(card.soft_fit, None);
    assert_eq!(card.pref, None);

    let rendered = card.to_string();
    assert!(rendered.contains("soft fit - "));
    assert!(rendered.contains("pref -"));
}

#[test]
fn cards_carry_session_drafts_and_questions() {
    let state = state_with(&[("a", 0.7)]);
    let mut session = Session::new();
    session.record_comment("a", "pretty campus");
    session.replace_questions(
        "a",
        vec![crate::api::types::Question {
            slot: "budget_range".to_string(),
            text: "What is your budget?".to_string(),
        }],
    );

    let view = project_triplet(&state, &session);
    assert_eq!(view.cards[0].comment_draft.as_deref(), Some("pretty campus"));
    assert_eq!(view.cards[0].questions.len(), 1);

    let rendered = view.to_string();
    assert!(rendered.contains("comment: \"pretty campus\""));
    assert!(rendered.contains("[budget_range]"));
}

#[test]
fn confidence_and_stop_are_surfaced() {
    let mut state = state_with(&[("a", 0.9), ("b", 0.2)]);
    state.confident_unis = vec!["a".to_string()];
    state.should_stop = true;

    let view = project_triplet(&state, &Session::new());
    assert!(view.cards[0].confident);
    assert!(!view.cards[1].confident);
    assert!(view.should_stop);
    assert!(view.to_string().contains("confidence reached"));
}

#[test]
fn rendering_is_idempotent() {
    let mut state = state_with(&[("a", 0.85), ("b", 0.61), ("c", 0.1)]);
    state.confident_unis = vec!["b".to_string()];
    let mut session = Session::new();
    session.record_comment("c", "too far away");

    let first = project_triplet(&state, &session).to_string();
    let second = project_triplet(&state, &session).to_string();
    assert_eq!(first, second);
}

#[test]
fn ranking_rows_are_one_based_with_three_decimals() {
    let response = RankingResponse {
        ok: true,
        ranking: vec![
            RankingEntry {
                uni_id: "a".to_string(),
                score: 0.912,
            },
            RankingEntry {
                uni_id: "b".to_string(),
                score: 0.4,
            },
        ],
        stop: false,
    };

    let view = project_ranking(&response);
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[0].position, 1);

    let rendered = view.to_string();
    assert!(rendered.contains("1. a — 0.912"));
    assert!(rendered.contains("2. b — 0.400"));
    assert!(!rendered.contains(STOP_MARKER));
}

#[test]
fn stop_flag_appends_exactly_one_marker() {
    let response = RankingResponse {
        ok: true,
        ranking: vec![RankingEntry {
            uni_id: "a".to_string(),
            score: 1.0,
        }],
        stop: true,
    };

    let rendered = project_ranking(&response).to_string();
    assert_eq!(rendered.matches(STOP_MARKER).count(), 1);
    // marker comes after the enumerated rows
    let marker_pos = rendered.find(STOP_MARKER).unwrap();
    let row_pos = rendered.find("1. a").unwrap();
    assert!(marker_pos > row_pos);
}

#[test]
fn empty_triplet_renders_a_placeholder_line() {
    let state = ServerState {
        triplet: Vec::new(),
        scores: HashMap::new(),
        confident_unis: Vec::new(),
        should_stop: false,
    };
    let view = project_triplet(&state, &Session::new());
    assert!(view.cards.is_empty());
    assert!(view.to_string().contains("no universities"));
}
