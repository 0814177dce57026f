//! Web layer for the route planner.
//!
//! Provides the route form, the route endpoint (HTML fragment or JSON) and
//! the endpoint catalogue.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
