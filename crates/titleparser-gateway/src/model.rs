mod health;
mod title;

pub use health::HealthResponse;
pub use title::{ErrorBody, TitleRecord};
