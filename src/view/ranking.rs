//! Ranking panel: enumerated rows plus the advisory stop marker.

use crate::api::types::RankingResponse;
use std::fmt;

pub const STOP_MARKER: &str = "stopping confidence reached";

#[derive(Debug, Clone, PartialEq)]
pub struct RankingRow {
    pub position: usize,
    pub uni_id: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingView {
    pub rows: Vec<RankingRow>,
    pub stop: bool,
}

pub fn project_ranking(response: &RankingResponse) -> RankingView {
    let rows = response
        .ranking
        .iter()
        .enumerate()
        .map(|(i, entry)| RankingRow {
            position: i + 1,
            uni_id: entry.uni_id.clone(),
            score: entry.score,
        })
        .collect();

    RankingView {
        rows,
        stop: response.stop,
    }
}

impl fmt::Display for RankingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ranking:")?;
        for row in &self.rows {
            writeln!(f, "  {}. {} — {:.3}", row.position, row.uni_id, row.score)?;
        }
        if self.stop {
            // exactly one terminal marker entry, only when the backend says so
            writeln!(f, "  ✓ {STOP_MARKER}")?;
        }
        Ok(())
    }
}
