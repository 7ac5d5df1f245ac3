//! Pure projections from backend state to rendered views.
//! Nothing in here talks to the network or mutates the session.

pub mod ranking;
pub mod triplet;

pub use ranking::{project_ranking, RankingRow, RankingView};
pub use triplet::{project_triplet, Tier, TripletView, UniCard};

#[cfg(test)]
mod tests;
