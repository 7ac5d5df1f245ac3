//! The survey flow: typed UI events dispatched against the session.

pub mod controller;
pub mod events;

pub use controller::{ClientError, Outcome, SurveyController};
pub use events::UiEvent;
