//! Voice skill layer.
//!
//! Receives voice platform webhooks over HTTP, answers the built-in
//! intents, remembers home stations and speaks the next train home.

mod dto;
mod handler;
mod routes;
pub mod speech;
mod state;

pub use dto::*;
pub use handler::{STATION_SLOT, SkillError, handle};
pub use routes::create_router;
pub use state::{AppState, DEFAULT_BIND_ADDR, SkillConfig};
