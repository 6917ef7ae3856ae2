//! Diet-tracking HTTP API: cookie-session users and their meals.

pub mod app;
pub mod config;
pub mod error;
pub mod meals;
pub mod session;
pub mod state;
pub mod store;
pub mod users;

pub use app::{build_app, serve};
pub use state::AppState;
