mod health;
mod title;

pub use health::health_handler;
pub use title::title_handler;
