//! Web layer for the refuelling stop planner.
//!
//! Provides JSON endpoints for planning stops and listing station brands.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
