//! Client library for the UNIVIA university-ranking survey backend.
//!
//! The backend owns every decision: scoring, question generation, ranking,
//! the stopping rule. This crate keeps a local session, marshals user
//! input into JSON calls, and projects returned snapshots into views.
//!
//! ```text
//! UiEvent → SurveyController (validate, call backend, install snapshot)
//!         → TripletView / RankingView (pure projection, full replace)
//! ```

pub mod api;
pub mod config;
pub mod session;
pub mod survey;
pub mod view;

pub use api::{ApiClient, ApiError, Backend};
pub use config::Config;
pub use session::Session;
pub use survey::{ClientError, Outcome, SurveyController, UiEvent};
pub use view::{project_ranking, project_triplet, RankingView, Tier, TripletView};
