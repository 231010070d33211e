//! HTTP and stdin front ends for the title dispatcher.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod stdin;
pub mod telemetry;

pub use app::App;
pub use error::{GatewayError, Result};
pub use state::AppState;
